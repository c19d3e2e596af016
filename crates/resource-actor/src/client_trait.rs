//! # ActorClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default read
//! methods (`load`, `refresh`, `get`, `snapshot`, `subscribe`) built on top of a generic
//! `ResourceClient`.
use crate::message::Snapshot;
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for resource-specific clients to inherit the standard read operations.
///
/// Implementors only provide access to the inner client and an error mapping; writes
/// stay on the concrete client because they usually need domain-specific checks.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Product> for ProductClient {
///     type Error = ProductError;
///
///     fn inner(&self) -> &ResourceClient<Product> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         ProductError::from_framework(e)
///     }
/// }
///
/// // refresh(), get() and snapshot() are provided automatically
/// let products = client.refresh().await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Re-fetch the snapshot, switching the server-side query when one is given.
    #[tracing::instrument(skip(self))]
    async fn load(&self, query: Option<T::Query>) -> Result<Snapshot<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().load(query).await.map_err(Self::map_error)
    }

    /// Re-fetch the snapshot with the current query.
    async fn refresh(&self) -> Result<Snapshot<T>, Self::Error> {
        self.load(None).await
    }

    /// Look an entity up in the snapshot, after every request queued before it.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// The last published snapshot.
    fn snapshot(&self) -> Snapshot<T> {
        self.inner().snapshot()
    }

    /// Notifications for every new snapshot.
    fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.inner().subscribe()
    }
}

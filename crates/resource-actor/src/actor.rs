//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that serializes every
//! operation on a remote collection and keeps an in-memory snapshot of it. It implements
//! the "Server" side of the Actor Model: one Tokio task, one message at a time.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Snapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that owns the snapshot of a remote collection.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the receiver end of the
/// request channel and the sending end of the snapshot watch channel.
///
/// **Concurrency Model**:
/// Requests are processed sequentially, so an upload → create → reload chain can never
/// interleave with a delete → reload chain on the same collection. No `Mutex` is needed
/// around the snapshot: it is an `Arc<Vec<T>>` that gets replaced, and readers clone
/// the `Arc` out of the watch channel.
///
/// **Synchronization Contract**:
/// - Every successful Create/Update/Delete/Action is followed by a full reload with the
///   current query, before the caller gets its response.
/// - A failed reload leaves the previous snapshot in place (stale but available).
/// - A failed mutation does not reload at all.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(buffer, query)` gives the actor and its client.
/// 2.  **Wire**: pass the store handles into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    query: T::Query,
    snapshot: watch::Sender<Snapshot<T>>,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(buffer_size: usize, query: T::Query) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshot, watcher) = watch::channel(Arc::new(Vec::new()));
        // "Product" instead of "wishlist::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            query,
            snapshot,
            entity_type,
        };
        let client = ResourceClient::new(sender, watcher);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The first thing the loop does is load the snapshot once, the way a screen
    /// fetches its list when it first appears.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, query = ?self.query, "Actor started");

        let _ = self.reload(&context).await;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Load { query, respond_to } => {
                    debug!(entity_type, ?query, "Load");
                    let previous = query.map(|q| std::mem::replace(&mut self.query, q));
                    let result = self.reload(&context).await;
                    if result.is_err() {
                        if let Some(previous) = previous {
                            self.query = previous;
                        }
                    }
                    let _ = respond_to.send(result.map_err(FrameworkError::entity));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self
                        .snapshot
                        .borrow()
                        .iter()
                        .find(|item| item.id() == &id)
                        .cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    match T::on_create(params, &context).await {
                        Ok(item) => {
                            info!(entity_type, id = %item.id(), "Created");
                            let _ = self.reload(&context).await;
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::entity(e)));
                        }
                    }
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    match T::on_update(&id, update, &context).await {
                        Ok(item) => {
                            info!(entity_type, %id, "Updated");
                            let _ = self.reload(&context).await;
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::entity(e)));
                        }
                    }
                }
                ResourceRequest::Delete {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Delete");
                    match T::on_delete(&id, params, &context).await {
                        Ok(()) => {
                            info!(entity_type, %id, "Deleted");
                            let _ = self.reload(&context).await;
                            let _ = respond_to.send(Ok(()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Delete failed");
                            let _ = respond_to.send(Err(FrameworkError::entity(e)));
                        }
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    match T::handle_action(&id, action, &context).await {
                        Ok(result) => {
                            info!(entity_type, %id, "Action ok");
                            let _ = self.reload(&context).await;
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::entity(e)));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.snapshot.borrow().len(), "Shutdown");
    }

    /// Fetches with the current query and publishes the result as the new snapshot.
    async fn reload(&mut self, context: &T::Context) -> Result<Snapshot<T>, T::Error> {
        let entity_type = self.entity_type;
        match T::fetch(&self.query, context).await {
            Ok(items) => {
                let snapshot = Arc::new(items);
                self.snapshot.send_replace(snapshot.clone());
                info!(entity_type, size = snapshot.len(), "Reloaded");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(entity_type, error = %e, "Reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }
}

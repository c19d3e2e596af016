//! # Messages
//!
//! Request messages exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A whole catalog snapshot. Replaced, never patched.
pub type Snapshot<T> = Arc<Vec<T>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// The variants map to the standard lifecycle of a persistent resource (Load/Get for
/// reads, Create/Update/Delete for writes) plus `Action` for resource-specific logic.
///
/// Every write variant is followed by a reload of the snapshot before the response is
/// sent, so a caller that awaits the response observes the refreshed catalog.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    /// Re-fetch the snapshot, optionally switching the server-side query first.
    Load {
        query: Option<T::Query>,
        respond_to: Response<Snapshot<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        params: T::Delete,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

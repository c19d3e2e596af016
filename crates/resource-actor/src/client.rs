//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Snapshot};
use tokio::sync::{mpsc, oneshot, watch};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type-safe, async API for interacting with a
/// `ResourceActor<T>`. Requests travel over a Tokio mpsc channel and results come back
/// on oneshot channels. Snapshot reads go through a watch channel and never wait on
/// the actor.
///
/// * **Cloneable** – holds a sender and a watch receiver, so cloning is inexpensive.
/// * **Async API** – all requests resolve to `Result<…, FrameworkError>`.
/// * **Generic** – works with any entity that implements `ActorEntity`.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    snapshot: watch::Receiver<Snapshot<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        snapshot: watch::Receiver<Snapshot<T>>,
    ) -> Self {
        Self { sender, snapshot }
    }

    /// The last snapshot the actor published. No round trip.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// A receiver that is notified every time the actor publishes a new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.clone()
    }

    pub async fn load(&self, query: Option<T::Query>) -> Result<Snapshot<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Load { query, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id, params: T::Delete) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete {
                id,
                params,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every remote resource must implement
//! to be managed by the generic `ResourceActor`. It specifies associated types for IDs,
//! DTOs, actions, queries, context and errors, and provides the hooks the actor calls to
//! talk to the system of record (`fetch`, `on_create`, `on_update`, `on_delete`,
//! `handle_action`).
//!
//! # Architecture Note
//! The actor never owns the truth. The remote store does. The actor owns a *snapshot*
//! of it, and every hook that mutates the remote side is followed by a `fetch` that
//! replaces the snapshot wholesale. Implementing this trait is therefore all it takes to
//! get a serialized, always-refetched view of a remote collection.
//!
//! We use associated types (type Id, type Create, etc.) so that a `Product` actor only
//! accepts a `ProductCreate` payload. The compiler rejects anything else.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any remote resource must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `async` because they perform network calls. The `Context` type carries the
/// store handles and is injected into every hook when the actor starts ("late binding":
/// passing dependencies to `run()` instead of `new()`).
///
/// Hooks are associated functions rather than methods: the snapshot entry is a copy of
/// remote state, so mutating it in place would mean nothing.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The identifier assigned by the remote store.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Extra data the remote side needs to release an instance (e.g. attached blobs).
    /// Use `()` when the id alone is enough.
    type Delete: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Server-side constraint applied every time the snapshot is loaded.
    type Query: Clone + Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per actor rather than one per message. Clients deal with a single
    /// type, at the cost of `ActionA` technically being able to return an error only
    /// `ActionB` produces.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this snapshot entry.
    fn id(&self) -> &Self::Id;

    /// Load every instance matching `query` from the remote store.
    async fn fetch(query: &Self::Query, ctx: &Self::Context) -> Result<Vec<Self>, Self::Error>;

    /// Create a new instance remotely and return it as stored.
    async fn on_create(params: Self::Create, ctx: &Self::Context) -> Result<Self, Self::Error>;

    /// Apply an update remotely and return the instance as stored.
    async fn on_update(
        id: &Self::Id,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Remove an instance remotely.
    async fn on_delete(
        id: &Self::Id,
        params: Self::Delete,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Handle a custom resource-specific action.
    async fn handle_action(
        id: &Self::Id,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

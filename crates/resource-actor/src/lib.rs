//! # Resource Actor
//!
//! Building blocks for keeping a typed, serialized, always-refetched view of a collection
//! that lives in a remote store.
//!
//! ## Why an actor in front of a remote store?
//!
//! A screen that lists remote records has one piece of shared state: the list. Every
//! mutation (upload then create, delete file then delete record) is a chain of remote
//! calls, and the list must afterwards reflect the last *confirmed* server state.
//!
//! - **Serialization**: the actor handles one request at a time, so two call chains on
//!   the same collection never interleave.
//! - **Invalidation contract**: every successful mutation is followed by a full reload
//!   before the caller is answered. Nothing is patched locally.
//! - **Stale but available**: a failed reload keeps the previous snapshot.
//! - **Push**: each new snapshot is published on a `tokio::sync::watch` channel.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - how to fetch/create/update/delete one kind of
//!    record remotely
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop, reloads, snapshot publishing
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Context Injection Pattern
//!
//! Store handles are injected at **runtime** via `run(context)`, not at construction
//! time, so one context can be shared by several actors that each watch a different
//! query of the same collection.
//!
//! ```rust,ignore
//! let (pending, pending_client) = ResourceActor::<Product>::new(32, CatalogQuery::pending());
//! let (bought, bought_client) = ResourceActor::<Product>::new(32, CatalogQuery::purchased());
//! tokio::spawn(pending.run(context.clone()));
//! tokio::spawn(bought.run(context));
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for `MockClient` and the raw channel helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response, Snapshot};

//! # Wishlist
//!
//! A personal wishlist kept in a hosted document store, with product images in a file
//! bucket. Every catalog view is a [`ResourceActor`](resource_actor::ResourceActor) that
//! serializes the operations on it and re-fetches the list after each change.
//!
//! ## Modules
//!
//! - **[model]**: [`Product`](model::Product), its priority tags and the form payloads.
//! - **[backend]**: the store traits, the Appwrite REST client and an in-memory stand-in.
//! - **[product_actor]**: the `ActorEntity` implementation: create, edit, toggle, delete.
//! - **[clients]**: [`ProductClient`](clients::ProductClient), the typed API screens call.
//! - **[config]**: environment configuration.
//! - **[lifecycle]**: [`WishlistSystem`](lifecycle::WishlistSystem), which starts both views.
//!
//! ## Testing
//!
//! See [`resource_actor::mock`] for testing clients without actors, and
//! [`backend::MemoryBackend`] for running real actors without a network.

pub mod backend;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod product_actor;

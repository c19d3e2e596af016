//! # Product Actor
//!
//! The actor that owns one catalog view: the snapshot of every product matching a
//! [`CatalogQuery`], re-fetched after each successful mutation.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//!   and the [`ProductContext`] it runs with
//! - [`error`] - [`ProductError`], covering validation, store and channel failures
//! - [`actions`] - [`ProductAction::SetPurchased`]
//! - [`gate`] - the date check in front of product creation
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Call chains
//!
//! ```text
//! create: gate -> image present -> title present -> upload -> create record -> reload
//! delete: remove image -> delete record -> reload
//! ```
//!
//! The actor processes one request at a time, so two chains on the same view never
//! interleave.
//!
//! ## Usage
//!
//! ```rust
//! use resource_actor::ActorClient;
//! use std::sync::Arc;
//! use wishlist::backend::MemoryBackend;
//! use wishlist::clients::ProductClient;
//! use wishlist::model::{CatalogQuery, ImageUpload, Priority, ProductCreate};
//! use wishlist::product_actor::{self, Gate, ProductContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32, CatalogQuery::pending());
//!     let client = ProductClient::new(generic_client);
//!
//!     let backend = Arc::new(MemoryBackend::new());
//!     tokio::spawn(actor.run(ProductContext::shared(backend, Gate::default())));
//!
//!     let lamp = client
//!         .create_product(ProductCreate {
//!             title: "Lamp".to_string(),
//!             link: "https://x".to_string(),
//!             image: Some(ImageUpload::new("lamp.png", "image/png", vec![0u8; 4])),
//!             priority: Priority::High,
//!             gate_date: "2024-05-03".to_string(),
//!         })
//!         .await?;
//!
//!     client.set_purchased(lamp.id.clone(), true).await?;
//!     assert!(client.snapshot().is_empty());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod gate;

pub use actions::*;
pub use entity::ProductContext;
pub use error::*;
pub use gate::Gate;

use crate::model::{CatalogQuery, Product};
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Product actor for one catalog view, and its client.
pub fn new(
    buffer_size: usize,
    query: CatalogQuery,
) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size, query)
}

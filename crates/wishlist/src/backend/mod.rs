//! # Remote Store Seams
//!
//! The wishlist talks to two external services: a document store holding the product
//! records and a file store holding their images. Each is a trait so the product actor
//! can run against the hosted service ([`appwrite::AppwriteBackend`]) or an in-process
//! stand-in ([`memory::MemoryBackend`]).

pub mod appwrite;
pub mod memory;

pub use appwrite::AppwriteBackend;
pub use memory::MemoryBackend;

use crate::model::{CatalogQuery, FileId, ImageUpload, NewProduct, Product, ProductId, ProductPatch};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by either store.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The record or object does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer (connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request was refused locally, before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The answer could not be understood.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// The document collection holding product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every record matching `query`, in store order. No pagination.
    async fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, BackendError>;

    /// Writes a new record with `purchased = false` and returns it as stored.
    async fn create(&self, record: NewProduct) -> Result<Product, BackendError>;

    /// Overwrites the fields present in `patch`.
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, BackendError>;

    async fn delete(&self, id: &ProductId) -> Result<(), BackendError>;
}

/// The bucket holding product images.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<FileId, BackendError>;

    async fn remove(&self, id: &FileId) -> Result<(), BackendError>;

    /// Where a browser can display the object.
    fn view_url(&self, id: &FileId) -> String;
}

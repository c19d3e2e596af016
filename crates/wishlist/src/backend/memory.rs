//! In-process stand-in for both stores.
//!
//! Used by the tests and by the demo binary when no endpoint is configured. It records
//! every call and can be told to fail the next call of a given kind.

use super::{BackendError, FileStore, ProductStore};
use crate::model::{CatalogQuery, FileId, ImageUpload, NewProduct, Product, ProductId, ProductPatch};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

/// The remote calls a backend can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    Upload,
    Remove,
}

#[derive(Default)]
struct State {
    products: Vec<Product>,
    files: HashMap<FileId, ImageUpload>,
    next_product: u64,
    next_file: u64,
    failures: HashSet<Operation>,
    calls: Vec<Operation>,
}

impl State {
    /// Logs the call and consumes a pending injected failure for it.
    fn enter(&mut self, operation: Operation) -> Result<(), BackendError> {
        self.calls.push(operation);
        if self.failures.remove(&operation) {
            debug!(?operation, "Injected failure");
            return Err(BackendError::Rejected {
                status: 503,
                message: format!("injected {operation:?} failure"),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call of `operation` fail with a 503.
    pub async fn fail_next(&self, operation: Operation) {
        self.state.lock().await.failures.insert(operation);
    }

    /// Every call received so far, in order.
    pub async fn calls(&self) -> Vec<Operation> {
        self.state.lock().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    pub async fn has_file(&self, id: &FileId) -> bool {
        self.state.lock().await.files.contains_key(id)
    }

    pub async fn file_count(&self) -> usize {
        self.state.lock().await.files.len()
    }
}

#[async_trait]
impl ProductStore for MemoryBackend {
    async fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, BackendError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::List)?;
        Ok(state
            .products
            .iter()
            .filter(|product| query.matches(product))
            .cloned()
            .collect())
    }

    async fn create(&self, record: NewProduct) -> Result<Product, BackendError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Create)?;
        state.next_product += 1;
        let product = Product {
            id: ProductId(format!("product_{}", state.next_product)),
            title: record.title,
            product_url: record.link,
            image_id: record.image_id,
            priority: Some(record.priority),
            purchased: false,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, BackendError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Update)?;
        let product = state
            .products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            product.title = title;
        }
        if let Some(link) = patch.link {
            product.product_url = link;
        }
        if let Some(priority) = patch.priority {
            product.priority = Some(priority);
        }
        if let Some(purchased) = patch.purchased {
            product.purchased = purchased;
        }
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Delete)?;
        let before = state.products.len();
        state.products.retain(|product| &product.id != id);
        if state.products.len() == before {
            return Err(BackendError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FileStore for MemoryBackend {
    async fn upload(&self, image: ImageUpload) -> Result<FileId, BackendError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Upload)?;
        state.next_file += 1;
        let id = FileId(format!("file_{}", state.next_file));
        state.files.insert(id.clone(), image);
        Ok(id)
    }

    async fn remove(&self, id: &FileId) -> Result<(), BackendError> {
        let mut state = self.state.lock().await;
        state.enter(Operation::Remove)?;
        state
            .files
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    fn view_url(&self, id: &FileId) -> String {
        format!("memory://files/{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn record(title: &str, image_id: FileId) -> NewProduct {
        NewProduct {
            title: title.to_string(),
            link: "https://x".to_string(),
            image_id,
            priority: Priority::High,
        }
    }

    #[tokio::test]
    async fn test_crud_and_query() {
        let backend = MemoryBackend::new();
        let image = backend
            .upload(ImageUpload::new("a.png", "image/png", vec![1, 2, 3]))
            .await
            .unwrap();
        let lamp = backend.create(record("Lamp", image.clone())).await.unwrap();
        assert_eq!(lamp.id.as_str(), "product_1");
        assert!(!lamp.purchased);

        backend
            .update(&lamp.id, ProductPatch::purchased(true))
            .await
            .unwrap();
        assert!(backend.list(&CatalogQuery::pending()).await.unwrap().is_empty());
        assert_eq!(backend.list(&CatalogQuery::purchased()).await.unwrap().len(), 1);

        backend.delete(&lamp.id).await.unwrap();
        backend.remove(&image).await.unwrap();
        assert!(backend.list(&CatalogQuery::all()).await.unwrap().is_empty());
        assert_eq!(backend.file_count().await, 0);
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot_and_recorded() {
        let backend = MemoryBackend::new();
        backend.fail_next(Operation::List).await;

        let first = backend.list(&CatalogQuery::all()).await;
        assert!(matches!(first, Err(BackendError::Rejected { status: 503, .. })));
        assert!(backend.list(&CatalogQuery::all()).await.is_ok());
        assert_eq!(backend.calls().await, vec![Operation::List, Operation::List]);
    }

    #[tokio::test]
    async fn test_missing_records_report_not_found() {
        let backend = MemoryBackend::new();
        let id = ProductId::from("product_9");
        assert!(matches!(
            backend.update(&id, ProductPatch::default()).await,
            Err(BackendError::NotFound(_))
        ));
        assert!(matches!(
            backend.remove(&FileId::from("file_9")).await,
            Err(BackendError::NotFound(_))
        ));
        assert_eq!(backend.view_url(&FileId::from("file_9")), "memory://files/file_9");
    }
}

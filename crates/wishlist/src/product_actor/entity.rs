//! [`ActorEntity`] implementation for [`Product`].
//!
//! Every hook goes straight to the stores in [`ProductContext`]; the actor re-fetches
//! the catalog afterwards.

use super::{Gate, ProductAction, ProductActionResult, ProductError};
use crate::backend::{BackendError, FileStore, ProductStore};
use crate::model::{
    CatalogQuery, FileId, NewProduct, Product, ProductCreate, ProductId, ProductPatch,
    ProductUpdate,
};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Store handles and the gate, injected into the product actor at `run`.
#[derive(Clone)]
pub struct ProductContext {
    pub products: Arc<dyn ProductStore>,
    pub files: Arc<dyn FileStore>,
    pub gate: Gate,
}

impl ProductContext {
    pub fn new(products: Arc<dyn ProductStore>, files: Arc<dyn FileStore>, gate: Gate) -> Self {
        Self {
            products,
            files,
            gate,
        }
    }

    /// One backend serving as both document store and file store.
    pub fn shared<B>(backend: Arc<B>, gate: Gate) -> Self
    where
        B: ProductStore + FileStore + 'static,
    {
        Self::new(backend.clone(), backend, gate)
    }
}

fn require_title(title: &str) -> Result<(), ProductError> {
    if title.trim().is_empty() {
        Err(ProductError::MissingTitle)
    } else {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    /// The image to release along with the record.
    type Delete = FileId;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Query = CatalogQuery;
    type Context = ProductContext;
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    async fn fetch(query: &CatalogQuery, ctx: &ProductContext) -> Result<Vec<Self>, ProductError> {
        Ok(ctx.products.list(query).await?)
    }

    /// Gate, then local checks, then upload, then the record.
    ///
    /// If the record cannot be written the uploaded image is removed again.
    async fn on_create(params: ProductCreate, ctx: &ProductContext) -> Result<Self, ProductError> {
        ctx.gate.check(&params.gate_date)?;
        let image = params.image.ok_or(ProductError::MissingImage)?;
        require_title(&params.title)?;

        let image_id = ctx.files.upload(image).await?;
        info!(%image_id, "Image uploaded");

        let record = NewProduct {
            title: params.title,
            link: params.link,
            image_id: image_id.clone(),
            priority: params.priority,
        };
        match ctx.products.create(record).await {
            Ok(product) => Ok(product),
            Err(e) => {
                if let Err(cleanup) = ctx.files.remove(&image_id).await {
                    error!(%image_id, error = %cleanup, "Failed to remove orphaned image");
                }
                Err(e.into())
            }
        }
    }

    async fn on_update(
        id: &ProductId,
        update: ProductUpdate,
        ctx: &ProductContext,
    ) -> Result<Self, ProductError> {
        require_title(&update.title)?;
        Ok(ctx.products.update(id, update.into()).await?)
    }

    /// Image first, then the record. An image that is already gone does not stop the
    /// record from being deleted.
    async fn on_delete(
        id: &ProductId,
        image_id: FileId,
        ctx: &ProductContext,
    ) -> Result<(), ProductError> {
        match ctx.files.remove(&image_id).await {
            Ok(()) => {}
            Err(BackendError::NotFound(_)) => {
                warn!(%id, %image_id, "Image already missing, deleting record anyway");
            }
            Err(e) => return Err(e.into()),
        }
        Ok(ctx.products.delete(id).await?)
    }

    async fn handle_action(
        id: &ProductId,
        action: ProductAction,
        ctx: &ProductContext,
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::SetPurchased(purchased) => {
                let stored = ctx
                    .products
                    .update(id, ProductPatch::purchased(purchased))
                    .await?;
                Ok(ProductActionResult::SetPurchased(stored.purchased))
            }
        }
    }
}

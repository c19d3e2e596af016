use crate::backend::{AppwriteBackend, BackendError, FileStore, MemoryBackend};
use crate::clients::ProductClient;
use crate::config::WishlistConfig;
use crate::model::{CatalogQuery, Product};
use crate::product_actor::{self, Gate, ProductContext, ProductError};
use resource_actor::ActorClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Both catalog views and the handles of their actors.
pub struct WishlistSystem {
    /// Products still wanted.
    pub wishlist: ProductClient,
    /// Products already bought.
    pub purchased: ProductClient,
    files: Arc<dyn FileStore>,
    handles: Vec<JoinHandle<()>>,
}

impl WishlistSystem {
    /// Spawns the two view actors over `context`. Must be called inside a Tokio runtime.
    pub fn new(context: ProductContext, buffer_size: usize) -> Self {
        let (wishlist_actor, wishlist_client) =
            product_actor::new(buffer_size, CatalogQuery::pending());
        let (purchased_actor, purchased_client) =
            product_actor::new(buffer_size, CatalogQuery::purchased());

        let files = context.files.clone();
        let wishlist_handle = tokio::spawn(wishlist_actor.run(context.clone()));
        let purchased_handle = tokio::spawn(purchased_actor.run(context));

        Self {
            wishlist: ProductClient::new(wishlist_client),
            purchased: ProductClient::new(purchased_client),
            files,
            handles: vec![wishlist_handle, purchased_handle],
        }
    }

    /// Picks the backend the config names: Appwrite when an endpoint is set, the
    /// in-memory store otherwise.
    pub fn from_config(config: &WishlistConfig) -> Result<Self, BackendError> {
        let gate = Gate::new(config.gate_date.clone());
        let context = match &config.appwrite {
            Some(appwrite) => {
                info!(endpoint = %appwrite.endpoint, "Using Appwrite backend");
                ProductContext::shared(Arc::new(AppwriteBackend::new(appwrite.clone())?), gate)
            }
            None => {
                info!("Using in-memory backend");
                ProductContext::shared(Arc::new(MemoryBackend::new()), gate)
            }
        };
        Ok(Self::new(context, config.actor_buffer))
    }

    /// Where the product's image can be displayed.
    pub fn image_url(&self, product: &Product) -> String {
        self.files.view_url(&product.image_id)
    }

    /// Reloads both views, even when the first reload fails. Returns the first error.
    pub async fn refresh_all(&self) -> Result<(), ProductError> {
        let wishlist = self.wishlist.refresh().await;
        let purchased = self.purchased.refresh().await;
        wishlist?;
        purchased?;
        Ok(())
    }

    /// Gracefully shuts down both actors.
    pub async fn shutdown(self) -> Result<(), String> {
        drop(self.wishlist);
        drop(self.purchased);

        for handle in self.handles {
            handle.await.map_err(|e| e.to_string())?;
        }
        info!("Wishlist system shut down");
        Ok(())
    }
}

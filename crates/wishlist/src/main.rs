//! Demo run of the wishlist against the configured backend.
//!
//! Without `APPWRITE_ENDPOINT` it runs against the in-memory store, so it works offline:
//!
//! ```bash
//! RUST_LOG=info cargo run -p wishlist
//! RUST_LOG=debug cargo run -p wishlist   # full payloads
//! ```

use resource_actor::tracing::setup_tracing;
use resource_actor::ActorClient;
use tracing::{error, info, Instrument};
use wishlist::config::WishlistConfig;
use wishlist::lifecycle::WishlistSystem;
use wishlist::model::{ImageUpload, Priority, PriorityFilter, ProductCreate, ProductUpdate};

// 1x1 transparent PNG
const PIXEL: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = WishlistConfig::load().map_err(|e| e.to_string())?;
    let system = WishlistSystem::from_config(&config).map_err(|e| e.to_string())?;
    info!("Wishlist started");

    let lamp = ProductCreate {
        title: "Lamp".to_string(),
        link: "https://x".to_string(),
        image: Some(ImageUpload::new("lamp.png", "image/png", PIXEL)),
        priority: Priority::High,
        gate_date: config.gate_date.clone(),
    };

    let span = tracing::info_span!("add_product");
    let lamp = async {
        info!("Adding product");
        system
            .wishlist
            .create_product(lamp)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(id = %lamp.id, image = %system.image_url(&lamp), "Product added");

    // A wrong date never reaches the stores.
    let rejected = ProductCreate {
        title: "Chair".to_string(),
        link: "https://y".to_string(),
        image: Some(ImageUpload::new("chair.png", "image/png", PIXEL)),
        priority: Priority::Low,
        gate_date: "2024-05-04".to_string(),
    };
    if let Err(e) = system.wishlist.create_product(rejected).await {
        info!(error = %e, "Submission refused");
    }

    let mut edit = ProductUpdate::from(&lamp);
    edit.priority = Priority::Medium;
    system
        .wishlist
        .update_product(lamp.id.clone(), edit)
        .await
        .map_err(|e| e.to_string())?;

    let medium = system.wishlist.catalog(PriorityFilter::Only(Priority::Medium));
    info!(count = medium.len(), "Products tagged {}", Priority::Medium);

    system
        .wishlist
        .set_purchased(lamp.id.clone(), true)
        .await
        .map_err(|e| e.to_string())?;
    system.purchased.refresh().await.map_err(|e| e.to_string())?;
    info!(
        wishlist = system.wishlist.snapshot().len(),
        purchased = system.purchased.snapshot().len(),
        "Marked purchased"
    );

    match system
        .purchased
        .delete_product(lamp.id.clone(), lamp.image_id.clone())
        .await
    {
        Ok(()) => info!(id = %lamp.id, "Product deleted"),
        Err(e) => error!(error = %e, "Delete failed"),
    }

    system.shutdown().await?;
    info!("Wishlist completed successfully");
    Ok(())
}

//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for every
//! binary built on this framework.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup (with the active query), shutdown and final snapshot size
//! - **Operations**: Load, Get, Create, Update, Delete and custom Actions, each at
//!   `debug` with its payload
//! - **Synchronization**: every reload with the new snapshot size, and reload failures
//!   that leave the previous snapshot in place
//! - **Errors**: entity ids and failure reasons at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default when RUST_LOG is unset)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads
//! RUST_LOG=debug cargo run
//!
//! # Filter to the actor loop only
//! RUST_LOG=resource_actor=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a product creation reads:
//!
//! ```text
//! INFO Actor started entity_type="Product" query=CatalogQuery { purchased: Some(false) }
//! INFO Reloaded entity_type="Product" size=0
//! INFO Created entity_type="Product" id=product_1
//! INFO Reloaded entity_type="Product" size=1
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type carries the context instead
        .compact()
        .init();
}

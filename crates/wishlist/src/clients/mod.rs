//! Domain clients wrapping the generic [`ResourceClient`](resource_actor::ResourceClient).

pub mod product_client;

pub use product_client::ProductClient;

//! Pure data structures (DTOs) for the wishlist domain.

pub mod priority;
pub mod product;

pub use priority::*;
pub use product::*;

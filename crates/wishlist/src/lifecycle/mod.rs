//! # System Lifecycle & Orchestration
//!
//! Starts the product actors, wires them to the stores, and shuts them down.
//!
//! ## Views
//!
//! The wishlist has two screens over the same collection, and each gets its own actor:
//!
//! | View | Query | Client |
//! |------|-------|--------|
//! | Wishlist | `purchased == false` | [`WishlistSystem::wishlist`] |
//! | Purchased | `purchased == true` | [`WishlistSystem::purchased`] |
//!
//! Both actors run with the same [`ProductContext`](crate::product_actor::ProductContext),
//! so they write to the same stores. A mutation reloads only the view it went through;
//! call [`WishlistSystem::refresh_all`] when the other screen comes back into focus.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive the store handles in
//! `run(context)`. Swapping the Appwrite backend for the in-memory one is a matter of
//! building a different context:
//!
//! ```rust,ignore
//! let backend = Arc::new(MemoryBackend::new());
//! let system = WishlistSystem::new(ProductContext::shared(backend, Gate::default()), 32);
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for both actor tasks to finish
//!
//! Any clone of a client still alive elsewhere keeps its actor running, and `shutdown`
//! waits for it.

pub mod wishlist_system;

pub use wishlist_system::*;

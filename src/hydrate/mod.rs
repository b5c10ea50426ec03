//! Hydration layer
//!
//! Implements:
//! - The per-kind hydrator contract and typed point lookups
//! - Concurrent, order-preserving hydration of a page
//! - Hydrators for friends, friend requests, user search, posts and
//!   notifications

mod batch;
mod friends;
mod hydrator;
mod notifications;
mod posts;

pub use batch::*;
pub use friends::*;
pub use hydrator::*;
pub use notifications::*;
pub use posts::*;

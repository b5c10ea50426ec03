//! Feeds layer
//!
//! Implements:
//! - Configured lists for friends, friend requests, notifications, the
//!   community feed and user search
//! - The mutation service contract and an in-memory implementation
//! - Local list updates after successful mutations

mod lists;
mod mutations;

pub use lists::*;
pub use mutations::*;

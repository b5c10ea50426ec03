//! Paging layer
//!
//! Implements:
//! - Cursor-driven page loading with a single in-flight fetch per list
//! - Idempotent, order-preserving append
//! - Exhaustion tracking and refresh
//! - Local removal/insertion after mutations elsewhere

mod config;
mod pager;
mod state;

pub use config::*;
pub use pager::*;
pub use state::*;

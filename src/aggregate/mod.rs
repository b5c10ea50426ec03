//! Aggregation layer
//!
//! Pure grouping of already-hydrated items into labelled sections:
//! notification tabs, trick list star ratings, and pro videos by stance.

mod group;
mod keys;

pub use group::*;
pub use keys::*;

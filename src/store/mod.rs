//! Document store contract types and the in-memory store.

mod document;
mod memory;
mod query;

pub use document::*;
pub use memory::*;
pub use query::*;

//! Domain model: entities, reference records, notification variants and
//! trick list entries.

mod entities;
mod notification;
mod records;
mod tricklist;

pub use entities::*;
pub use notification::*;
pub use records::*;
pub use tricklist::*;

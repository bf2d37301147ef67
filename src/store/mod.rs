//! In-memory persistence: tables keyed by entity id and the transaction
//! handle every workflow runs against.

mod table;
mod transaction;

pub use table::*;
pub use transaction::*;

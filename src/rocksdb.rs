//! The RocksDB prelude entry.

pub use crate::db::DB;
pub use crate::error::{Code, Status};
pub use crate::options::*;
pub use crate::statistics::{Statistics, Ticker};
pub use crate::write_batch::WriteBatch;

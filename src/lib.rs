//! Rocks-Workload
//!
//! Drives RocksDB through a preload, write and read workload and reports
//! elapsed time and byte counters.
//!
//! # Examples
//!
//! ```no_run
//! use rocks_workload::rocksdb::*;
//! // RAII DB instance
//! let db = DB::open(Options::default_instance(), "./data").unwrap();
//! assert!(db.put(&WriteOptions::default(), b"my key", b"my value").is_ok());
//! match db.get(&ReadOptions::default(), b"my key") {
//!     Ok(ref value) => println!("retrieved value {}", String::from_utf8_lossy(value)),
//!     Err(e) => println!("operational problem encountered: {}", e),
//! }
//! println!("{}", db.get_statistics().unwrap());
//! ```

#[macro_use]
extern crate lazy_static;

use std::result;

pub use error::{Error, Status};

/// The result type returned by store calls, wraps Status
pub type Result<T> = result::Result<T, Status>;

pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod options;
pub mod report;
pub mod statistics;
pub mod workload;
pub mod write_batch;

// the prelude
pub mod rocksdb;

// for information hiding
mod to_raw;

//! A DB is a persistent ordered map from keys to values.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Code, Status};
use crate::options::{Options, ReadOptions, WriteOptions};
use crate::statistics::{Statistics, Ticker};
use crate::to_raw::ToRaw;
use crate::write_batch::WriteBatch;
use crate::Result;

/// An open database. The handle closes the database when dropped.
pub struct DB {
    raw: rocksdb::DB,
    // keeps the statistics object the DB was opened with
    options: rocksdb::Options,
    statistics: bool,
    name: PathBuf,
}

impl fmt::Debug for DB {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DB({:?})", self.name)
    }
}

impl DB {
    /// Open the database with the specified "name".
    ///
    /// Returns a non-OK status on error, e.g. when the directory is missing
    /// and `create_if_missing` is not set, or when another process holds
    /// the lock.
    pub fn open<O: AsRef<Options>, P: AsRef<Path>>(options: O, name: P) -> Result<DB> {
        let options = options.as_ref();
        let raw_options = options.to_rocksdb();
        let raw = rocksdb::DB::open(&raw_options, name.as_ref())?;
        debug!(path = %name.as_ref().display(), ?options, "db opened");
        Ok(DB {
            raw: raw,
            options: raw_options,
            statistics: options.db_options().statistics_enabled(),
            name: name.as_ref().to_path_buf(),
        })
    }

    /// Set the database entry for "key" to "value".
    /// If "key" already exists, it will be overwritten.
    pub fn put(&self, options: &WriteOptions, key: &[u8], value: &[u8]) -> Result<()> {
        self.raw.put_opt(key, value, options.raw())?;
        Ok(())
    }

    /// If the database contains an entry for "key" return its value.
    ///
    /// If there is no entry for "key" return a status for which
    /// `Status::is_not_found()` returns true.
    ///
    /// May return some other Status on an error.
    pub fn get(&self, options: &ReadOptions, key: &[u8]) -> Result<Vec<u8>> {
        match self.raw.get_opt(key, options.raw())? {
            Some(value) => Ok(value),
            None => Err(Status::not_found()),
        }
    }

    /// Apply the specified updates to the database atomically.
    pub fn write(&self, options: &WriteOptions, updates: WriteBatch) -> Result<()> {
        self.raw.write_opt(updates.into_raw(), options.raw())?;
        Ok(())
    }

    /// DB implementations can export properties about their state via this
    /// method. If "property" is a valid property understood by this DB
    /// implementation, returns its current value.
    pub fn get_property(&self, property: &str) -> Option<String> {
        self.raw.property_value(property).ok().and_then(|v| v)
    }

    /// Similar to `get_property()`, but only works for a subset of properties
    /// whose return value is an integer.
    pub fn get_int_property(&self, property: &str) -> Option<u64> {
        self.raw.property_int_value(property).ok().and_then(|v| v)
    }

    /// Current value of a statistics ticker.
    ///
    /// Fails with `InvalidArgument` unless the DB was opened with
    /// `DBOptions::enable_statistics(true)`.
    pub fn get_ticker_count(&self, ticker: Ticker) -> Result<u64> {
        if !self.statistics {
            return Err(Status::with_message(
                Code::InvalidArgument,
                format!("statistics not enabled, cannot read {}", ticker.name()),
            ));
        }
        Ok(self.options.get_ticker_count(ticker.into()))
    }

    /// Reads all the tickers `Statistics` carries in one go.
    pub fn get_statistics(&self) -> Result<Statistics> {
        Ok(Statistics {
            bytes_written: self.get_ticker_count(Ticker::BytesWritten)?,
            bytes_read: self.get_ticker_count(Ticker::BytesRead)?,
            keys_written: self.get_ticker_count(Ticker::NumberKeysWritten)?,
            keys_read: self.get_ticker_count(Ticker::NumberKeysRead)?,
        })
    }

    /// Get DB name -- the exact same name that was provided as an argument to
    /// `DB::open()`
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Close the DB, releasing its lock and background threads.
    pub fn close(self) {
        debug!(path = %self.name.display(), "db closed");
    }
}

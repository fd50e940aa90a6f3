//! Analyze the performance of a DB

use std::fmt;

/// Counters collected when `DBOptions::enable_statistics` is set.
///
/// Tickers are cumulative for the lifetime of the statistics object, i.e.
/// for the lifetime of the process that opened the DB.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Ticker {
    /// Uncompressed bytes issued by `DB::put`, `DB::write` and friends.
    BytesWritten,
    /// Uncompressed bytes returned by `DB::get`.
    BytesRead,
    /// Keys written through put and write calls.
    NumberKeysWritten,
    /// Keys read through get calls.
    NumberKeysRead,
}

impl Ticker {
    pub fn name(&self) -> &'static str {
        match *self {
            Ticker::BytesWritten => "rocksdb.bytes.written",
            Ticker::BytesRead => "rocksdb.bytes.read",
            Ticker::NumberKeysWritten => "rocksdb.number.keys.written",
            Ticker::NumberKeysRead => "rocksdb.number.keys.read",
        }
    }
}

impl From<Ticker> for rocksdb::statistics::Ticker {
    fn from(ticker: Ticker) -> Self {
        use rocksdb::statistics::Ticker as T;

        match ticker {
            Ticker::BytesWritten => T::BytesWritten,
            Ticker::BytesRead => T::BytesRead,
            Ticker::NumberKeysWritten => T::NumberKeysWritten,
            Ticker::NumberKeysRead => T::NumberKeysRead,
        }
    }
}

/// A point-in-time read of the byte and key tickers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    pub bytes_written: u64,
    pub bytes_read: u64,
    pub keys_written: u64,
    pub keys_read: u64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} = {}, {} = {}, {} = {}, {} = {}",
            Ticker::BytesWritten.name(),
            self.bytes_written,
            Ticker::BytesRead.name(),
            self.bytes_read,
            Ticker::NumberKeysWritten.name(),
            self.keys_written,
            Ticker::NumberKeysRead.name(),
            self.keys_read
        )
    }
}

#[test]
fn test_ticker_names() {
    assert_eq!(Ticker::BytesWritten.name(), "rocksdb.bytes.written");
    assert_eq!(Ticker::BytesRead.name(), "rocksdb.bytes.read");

    let stats = Statistics {
        bytes_written: 10,
        ..Default::default()
    };
    assert!(stats.to_string().starts_with("rocksdb.bytes.written = 10,"));
}

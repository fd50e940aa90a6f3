//! The end-of-run report.

use std::io::{self, Write};
use std::time::Duration;

/// What one run measured. Computed last and only printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    pub write_duration: Duration,
    pub read_duration: Duration,
    /// Cumulative `rocksdb.bytes.written` of the open store.
    pub bytes_written: u64,
    /// Cumulative `rocksdb.bytes.read` of the open store.
    pub bytes_read: u64,
    pub reads_issued: u64,
    /// Lookups that found nothing; only tracked when misses are tolerated.
    pub misses: Option<u64>,
}

impl Measurement {
    /// Writes the report lines, one counter per line.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Total Bytes Written: {}", self.bytes_written)?;
        writeln!(out, "Total Bytes Read: {}", self.bytes_read)?;
        writeln!(out, "Write Time: {} milliseconds", self.write_duration.as_millis())?;
        writeln!(out, "Read Time: {} milliseconds", self.read_duration.as_millis())?;
        if let Some(misses) = self.misses {
            writeln!(out, "Read Misses: {}/{}", misses, self.reads_issued)?;
        }
        out.flush()
    }
}

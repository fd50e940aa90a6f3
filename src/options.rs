//! Options for DB open, reads and writes.
//!
//! `Options` is split into 2 parts, `DBOptions` and `ColumnFamilyOptions`,
//! each configured in builder style.

use std::fmt;

use crate::to_raw::ToRaw;

lazy_static! {
    // since all Options fields are plain values
    static ref DEFAULT_OPTIONS: Options = {
        Options::default().map_db_options(|db| db.create_if_missing(true).enable_statistics(true))
    };
}

/// Options that apply to the whole DB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DBOptions {
    create_if_missing: bool,
    parallelism: Option<i32>,
    statistics: bool,
}

impl Default for DBOptions {
    fn default() -> Self {
        DBOptions {
            create_if_missing: false,
            parallelism: None,
            statistics: false,
        }
    }
}

impl DBOptions {
    /// If true, the database will be created if it is missing.
    ///
    /// Default: false
    pub fn create_if_missing(mut self, val: bool) -> Self {
        self.create_if_missing = val;
        self
    }

    /// By default, RocksDB uses only one background thread for flush and
    /// compaction. Calling this function will set it up such that total of
    /// `total_threads` is used. Good value for `total_threads` is the number of
    /// cores.
    pub fn increase_parallelism(mut self, total_threads: i32) -> Self {
        self.parallelism = Some(total_threads);
        self
    }

    /// Collect metrics about database operations, readable through
    /// `DB::get_ticker_count`.
    ///
    /// Default: false
    pub fn enable_statistics(mut self, val: bool) -> Self {
        self.statistics = val;
        self
    }

    pub fn statistics_enabled(&self) -> bool {
        self.statistics
    }
}

/// Options that apply to a column family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnFamilyOptions {
    level_style_memtable_budget: Option<usize>,
}

impl ColumnFamilyOptions {
    /// Default values for some parameters are not optimized for heavy
    /// workloads and big datasets, which means you might observe write stalls
    /// under some conditions. Make sure to also call `increase_parallelism()`.
    ///
    /// Note: we might use more memory than `memtable_memory_budget` during high
    /// write rate period
    pub fn optimize_level_style_compaction(mut self, memtable_memory_budget: usize) -> Self {
        // 512 * 1024 * 1024
        self.level_style_memtable_budget = Some(memtable_memory_budget);
        self
    }
}

#[derive(Clone, PartialEq, Eq, Default)]
pub struct Options {
    db: DBOptions,
    cf: ColumnFamilyOptions,
}

impl AsRef<Options> for Options {
    fn as_ref(&self) -> &Options {
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Options({:?}, {:?})", self.db, self.cf)
    }
}

impl Options {
    /// default `Options` with `create_if_missing = true` and statistics on
    #[inline]
    pub fn default_instance() -> &'static Options {
        &*DEFAULT_OPTIONS
    }

    /// Configure DBOptions using builder style.
    pub fn map_db_options<F: FnOnce(DBOptions) -> DBOptions>(self, f: F) -> Self {
        Options {
            db: f(self.db),
            cf: self.cf,
        }
    }

    /// Configure ColumnFamilyOptions using builder style.
    pub fn map_cf_options<F: FnOnce(ColumnFamilyOptions) -> ColumnFamilyOptions>(self, f: F) -> Self {
        Options {
            db: self.db,
            cf: f(self.cf),
        }
    }

    pub fn db_options(&self) -> &DBOptions {
        &self.db
    }

    pub fn cf_options(&self) -> &ColumnFamilyOptions {
        &self.cf
    }

    /// Builds the engine-side options. The returned value owns the statistics
    /// object, so it must outlive every ticker read.
    pub(crate) fn to_rocksdb(&self) -> rocksdb::Options {
        let mut opts = rocksdb::Options::default();
        opts.create_if_missing(self.db.create_if_missing);
        if let Some(n) = self.db.parallelism {
            opts.increase_parallelism(n);
        }
        if self.db.statistics {
            opts.enable_statistics();
        }
        if let Some(budget) = self.cf.level_style_memtable_budget {
            opts.optimize_level_style_compaction(budget);
        }
        opts
    }
}

/// Options that control read operations
pub struct ReadOptions {
    raw: rocksdb::ReadOptions,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            raw: rocksdb::ReadOptions::default(),
        }
    }
}

impl ToRaw<rocksdb::ReadOptions> for ReadOptions {
    fn raw(&self) -> &rocksdb::ReadOptions {
        &self.raw
    }
}

impl ReadOptions {
    /// Should the "data block"/"index block"/"filter block" read for this
    /// iteration be cached in memory? Callers may wish to set this field to
    /// false for bulk scans.
    ///
    /// Default: true
    pub fn fill_cache(mut self, val: bool) -> Self {
        self.raw.fill_cache(val);
        self
    }

    /// If true, all data read from underlying storage will be verified
    /// against corresponding checksums.
    ///
    /// Default: true
    pub fn verify_checksums(mut self, val: bool) -> Self {
        self.raw.set_verify_checksums(val);
        self
    }
}

/// Options that control write operations
pub struct WriteOptions {
    raw: rocksdb::WriteOptions,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            raw: rocksdb::WriteOptions::default(),
        }
    }
}

impl ToRaw<rocksdb::WriteOptions> for WriteOptions {
    fn raw(&self) -> &rocksdb::WriteOptions {
        &self.raw
    }
}

impl WriteOptions {
    /// If true, the write will be flushed from the operating system
    /// buffer cache before the write is considered complete. If this flag
    /// is true, writes will be slower.
    ///
    /// Default: false
    pub fn sync(mut self, val: bool) -> Self {
        self.raw.set_sync(val);
        self
    }

    /// If true, writes will not first go to the write ahead log,
    /// and the write may got lost after a crash.
    pub fn disable_wal(mut self, val: bool) -> Self {
        self.raw.disable_wal(val);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_instance_creates_and_counts() {
        let opt = Options::default_instance();
        assert!(opt.db_options().create_if_missing);
        assert!(opt.db_options().statistics_enabled());
        assert_eq!(opt.cf_options(), &ColumnFamilyOptions::default());
    }

    #[test]
    fn map_options_keeps_the_other_half() {
        let opt = Options::default()
            .map_cf_options(|cf| cf.optimize_level_style_compaction(64 << 20))
            .map_db_options(|db| db.create_if_missing(true).increase_parallelism(4));

        assert_eq!(opt.db_options().parallelism, Some(4));
        assert!(opt.db_options().create_if_missing);
        assert_eq!(opt.cf_options().level_style_memtable_budget, Some(64 << 20));
        assert!(!opt.db_options().statistics_enabled());
    }
}

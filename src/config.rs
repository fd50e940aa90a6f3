//! Command-line surface and the immutable workload configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::options::Options;

/// How the timed write loop picks its keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum WriteMode {
    /// Continue the preload scheme: `key<existing + i>`.
    Sequential,
    /// Random digit keys of `--key-size`.
    Random,
}

/// How the timed read loop picks its keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ReadMode {
    /// `key<i>` for a uniformly random `i` below `existing + writes`.
    Index,
    /// Keys sampled by coin toss during the write loop, each read once.
    Sampled,
}

/// Preload, write and read workload driver for RocksDB.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Database directory, created if missing
    #[arg(value_name = "STORE_PATH")]
    pub store_path: PathBuf,

    /// Number of records bulk-loaded before timing starts
    #[arg(value_name = "EXISTING_RECORDS")]
    pub existing_records: u64,

    /// Number of timed point writes
    #[arg(value_name = "WRITES")]
    pub writes: u64,

    /// Number of timed point reads
    #[arg(value_name = "READS")]
    pub reads: u64,

    /// Length of random keys
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u64).range(1..))]
    pub key_size: u64,

    /// Length of random values
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub value_size: u64,

    #[arg(long, value_enum, default_value_t = WriteMode::Sequential)]
    pub write_mode: WriteMode,

    #[arg(long, value_enum, default_value_t = ReadMode::Index)]
    pub read_mode: ReadMode,

    /// Seed for the key/value generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Count reads of absent keys instead of aborting the run
    #[arg(long)]
    pub tolerate_misses: bool,

    /// Read back every preloaded record before the timed loops
    #[arg(long)]
    pub verify_preload: bool,

    /// Background flush and compaction threads
    #[arg(long, default_value_t = 16)]
    pub parallelism: i32,

    /// Memtable memory budget for level-style compaction, in bytes
    #[arg(long, default_value_t = 512 * 1024 * 1024)]
    pub memtable_budget: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub store_path: PathBuf,
    pub existing_records: u64,
    pub writes: u64,
    pub reads: u64,
    pub key_size: usize,
    pub value_size: usize,
    pub write_mode: WriteMode,
    pub read_mode: ReadMode,
    pub seed: Option<u64>,
    pub tolerate_misses: bool,
    pub verify_preload: bool,
    pub parallelism: i32,
    pub memtable_budget: usize,
}

impl WorkloadConfig {
    /// A config with the command-line defaults for everything but the four
    /// positional values.
    pub fn new<P: Into<PathBuf>>(store_path: P, existing_records: u64, writes: u64, reads: u64) -> WorkloadConfig {
        WorkloadConfig {
            store_path: store_path.into(),
            existing_records: existing_records,
            writes: writes,
            reads: reads,
            key_size: 8,
            value_size: 100,
            write_mode: WriteMode::Sequential,
            read_mode: ReadMode::Index,
            seed: None,
            tolerate_misses: false,
            verify_preload: false,
            parallelism: 16,
            memtable_budget: 512 * 1024 * 1024,
        }
    }

    /// Number of records the index read mode draws from.
    pub fn key_space(&self) -> u64 {
        self.existing_records.saturating_add(self.writes)
    }

    /// Store options: created if missing, statistics on, tuned for
    /// parallel level-style compaction.
    pub fn options(&self) -> Options {
        let parallelism = self.parallelism;
        let budget = self.memtable_budget;
        Options::default_instance()
            .clone()
            .map_db_options(|db| db.increase_parallelism(parallelism))
            .map_cf_options(|cf| cf.optimize_level_style_compaction(budget))
    }
}

impl From<Args> for WorkloadConfig {
    fn from(args: Args) -> WorkloadConfig {
        WorkloadConfig {
            store_path: args.store_path,
            existing_records: args.existing_records,
            writes: args.writes,
            reads: args.reads,
            key_size: args.key_size as usize,
            value_size: args.value_size as usize,
            write_mode: args.write_mode,
            read_mode: args.read_mode,
            seed: args.seed,
            tolerate_misses: args.tolerate_misses,
            verify_preload: args.verify_preload,
            parallelism: args.parallelism,
            memtable_budget: args.memtable_budget,
        }
    }
}

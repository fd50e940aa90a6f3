//! The workload driver: preload, timed writes, timed reads, counters.
//!
//! Every store failure aborts the run with the first error. A read of an
//! absent key is such a failure unless the config tolerates misses, in
//! which case it is only counted.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::config::{ReadMode, WorkloadConfig, WriteMode};
use crate::db::DB;
use crate::error::Error;
use crate::generator::{generate_key, generate_value, new_rng, preload_key, preload_value, KeySample};
use crate::options::{ReadOptions, WriteOptions};
use crate::report::Measurement;
use crate::write_batch::WriteBatch;

/// Outcome of the timed write loop.
#[derive(Debug)]
pub struct WriteLoop {
    pub elapsed: Duration,
    /// Read targets for `ReadMode::Sampled`; empty otherwise.
    pub sample: KeySample,
}

/// Outcome of the timed read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLoop {
    pub elapsed: Duration,
    pub issued: u64,
    pub misses: u64,
}

/// Owns the store handle and the generator for one run.
pub struct Driver<R> {
    config: WorkloadConfig,
    db: DB,
    rng: R,
    write_options: WriteOptions,
    read_options: ReadOptions,
}

impl Driver<StdRng> {
    /// Opens (or creates) the store, seeding the generator from the config.
    pub fn open(config: WorkloadConfig) -> Result<Driver<StdRng>, Error> {
        let rng = new_rng(config.seed);
        Driver::with_rng(config, rng)
    }
}

impl<R: Rng> Driver<R> {
    pub fn with_rng(config: WorkloadConfig, rng: R) -> Result<Driver<R>, Error> {
        let db = DB::open(config.options(), &config.store_path).map_err(|source| Error::Open {
            path: config.store_path.clone(),
            source: source,
        })?;
        if config.write_mode == WriteMode::Random && config.read_mode == ReadMode::Index {
            warn!("random write keys are outside the index read key space, reads may miss");
        }
        info!(path = %config.store_path.display(), "store opened");

        Ok(Driver {
            config: config,
            db: db,
            rng: rng,
            write_options: WriteOptions::default(),
            read_options: ReadOptions::default(),
        })
    }

    pub fn db(&self) -> &DB {
        &self.db
    }

    /// Runs every phase in order and collects the measurement.
    pub fn run(&mut self) -> Result<Measurement, Error> {
        self.preload()?;
        if self.config.verify_preload {
            self.verify_preload()?;
        }
        let writes = self.write_loop()?;
        let reads = self.read_loop(&writes.sample)?;
        let stats = self.db.get_statistics().map_err(Error::Statistics)?;
        debug!(%stats, "store statistics");
        if let Some(keys) = self.db.get_int_property("rocksdb.estimate-num-keys") {
            debug!(keys, "estimated keys in store");
        }

        Ok(Measurement {
            write_duration: writes.elapsed,
            read_duration: reads.elapsed,
            bytes_written: stats.bytes_written,
            bytes_read: stats.bytes_read,
            reads_issued: reads.issued,
            misses: if self.config.tolerate_misses {
                Some(reads.misses)
            } else {
                None
            },
        })
    }

    /// Writes `key<i> -> value<i>` for every existing record in one
    /// atomic batch.
    pub fn preload(&self) -> Result<(), Error> {
        let mut batch = WriteBatch::new();
        for i in 0..self.config.existing_records {
            batch.put(preload_key(i).as_bytes(), preload_value(i).as_bytes());
        }
        info!(records = batch.count(), bytes = batch.data_size(), "bulk load");
        self.db.write(&self.write_options, batch).map_err(Error::Preload)
    }

    /// Reads back every preloaded record and compares it to its value.
    pub fn verify_preload(&self) -> Result<(), Error> {
        for i in 0..self.config.existing_records {
            let key = preload_key(i);
            let expected = preload_value(i);
            let found = match self.db.get(&self.read_options, key.as_bytes()) {
                Ok(found) => found,
                Err(source) => return Err(Error::Read { key: key, source: source }),
            };
            if found != expected.as_bytes() {
                return Err(Error::Verify {
                    key: key,
                    expected: expected,
                    found: String::from_utf8_lossy(&found).into_owned(),
                });
            }
        }
        info!(records = self.config.existing_records, "preload verified");
        Ok(())
    }

    /// Issues `writes` point writes. Only the loop as a whole is timed.
    pub fn write_loop(&mut self) -> Result<WriteLoop, Error> {
        let capacity = match self.config.read_mode {
            ReadMode::Sampled => usize::try_from(self.config.reads).unwrap_or(usize::MAX),
            ReadMode::Index => 0,
        };
        let mut sample = KeySample::with_capacity(capacity);

        let start = Instant::now();
        for i in 0..self.config.writes {
            let key = match self.config.write_mode {
                WriteMode::Sequential => preload_key(self.config.existing_records + i),
                WriteMode::Random => generate_key(&mut self.rng, self.config.key_size),
            };
            let value = generate_value(&mut self.rng, self.config.value_size);
            if self.config.read_mode == ReadMode::Sampled {
                sample.offer(&mut self.rng, &key);
            }
            trace!(%key, "generated key");

            if let Err(source) = self.db.put(&self.write_options, key.as_bytes(), value.as_bytes()) {
                return Err(Error::Write { key: key, source: source });
            }
        }
        let elapsed = start.elapsed();

        debug!(sampled = sample.len(), "write loop sampled read targets");
        info!(writes = self.config.writes, elapsed_ms = elapsed.as_millis() as u64, "write loop done");
        Ok(WriteLoop {
            elapsed: elapsed,
            sample: sample,
        })
    }

    /// Issues the point reads. `sample` is only consulted in sampled mode.
    pub fn read_loop(&mut self, sample: &KeySample) -> Result<ReadLoop, Error> {
        let mut issued = 0;
        let mut misses = 0;

        let start = Instant::now();
        match self.config.read_mode {
            ReadMode::Index => {
                let key_space = self.config.key_space();
                for _ in 0..self.config.reads {
                    let index = if key_space == 0 {
                        0
                    } else {
                        self.rng.gen_range(0..key_space)
                    };
                    self.lookup(&preload_key(index), &mut misses)?;
                    issued += 1;
                }
            }
            ReadMode::Sampled => {
                for key in sample.iter() {
                    self.lookup(key, &mut misses)?;
                    issued += 1;
                }
            }
        }
        let elapsed = start.elapsed();

        if misses > 0 {
            warn!(misses, issued, "reads found no record");
        }
        info!(reads = issued, elapsed_ms = elapsed.as_millis() as u64, "read loop done");
        Ok(ReadLoop {
            elapsed: elapsed,
            issued: issued,
            misses: misses,
        })
    }

    fn lookup(&self, key: &str, misses: &mut u64) -> Result<(), Error> {
        match self.db.get(&self.read_options, key.as_bytes()) {
            Ok(_) => Ok(()),
            Err(ref status) if status.is_not_found() && self.config.tolerate_misses => {
                *misses += 1;
                Ok(())
            }
            Err(source) => Err(Error::Read {
                key: key.to_owned(),
                source: source,
            }),
        }
    }

    /// Releases the store handle.
    pub fn close(self) {
        self.db.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn config(dir: &TempDir, existing: u64, writes: u64, reads: u64) -> WorkloadConfig {
        let mut config = WorkloadConfig::new(dir.path().join("db"), existing, writes, reads);
        config.seed = Some(2024);
        config.parallelism = 2;
        config.memtable_budget = 8 << 20;
        config
    }

    #[test]
    fn sequential_writes_continue_the_preload_scheme() {
        let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
        let mut driver = Driver::open(config(&tmp_dir, 3, 4, 0)).unwrap();

        driver.preload().unwrap();
        let writes = driver.write_loop().unwrap();
        assert!(writes.sample.is_empty());

        for i in 0..7 {
            let value = driver.db().get(&ReadOptions::default(), preload_key(i).as_bytes()).unwrap();
            if i < 3 {
                assert_eq!(value, preload_value(i).as_bytes());
            } else {
                assert_eq!(value.len(), 100);
                assert!(value.iter().all(|c| c.is_ascii_alphanumeric()));
            }
        }
        assert!(driver.db().get(&ReadOptions::default(), b"key7").unwrap_err().is_not_found());
    }

    #[test]
    fn sampled_reads_hit_written_keys() {
        let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
        let mut cfg = config(&tmp_dir, 0, 200, 10);
        cfg.write_mode = WriteMode::Random;
        cfg.read_mode = ReadMode::Sampled;
        cfg.key_size = 12;
        let mut driver = Driver::open(cfg).unwrap();

        let writes = driver.write_loop().unwrap();
        assert_eq!(writes.sample.len(), 10);
        assert!(writes.sample.iter().all(|k| k.len() == 12));

        let reads = driver.read_loop(&writes.sample).unwrap();
        assert_eq!(reads.issued, 10);
        assert_eq!(reads.misses, 0);
    }

    #[test]
    fn strict_reads_abort_on_miss() {
        let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
        let mut driver = Driver::open(config(&tmp_dir, 0, 0, 3)).unwrap();

        match driver.read_loop(&KeySample::default()) {
            Err(Error::Read { key, source }) => {
                assert_eq!(key, "key0");
                assert!(source.is_not_found());
            }
            other => panic!("expected a read failure, got {:?}", other),
        }
    }

    #[test]
    fn tolerant_reads_count_misses() {
        let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
        let mut cfg = config(&tmp_dir, 2, 0, 50);
        cfg.tolerate_misses = true;
        let mut driver = Driver::open(cfg).unwrap();

        // nothing preloaded, so every lookup misses
        let reads = driver.read_loop(&KeySample::default()).unwrap();
        assert_eq!(reads.issued, 50);
        assert_eq!(reads.misses, 50);

        driver.preload().unwrap();
        let reads = driver.read_loop(&KeySample::default()).unwrap();
        assert_eq!(reads.misses, 0);
    }

    #[test]
    fn verify_detects_overwritten_record() {
        let tmp_dir = TempDir::new_in(".", "rocks").unwrap();
        let driver = Driver::open(config(&tmp_dir, 5, 0, 0)).unwrap();

        driver.preload().unwrap();
        assert!(driver.verify_preload().is_ok());

        driver.db().put(&WriteOptions::default(), b"key3", b"clobbered").unwrap();
        match driver.verify_preload() {
            Err(Error::Verify { key, expected, found }) => {
                assert_eq!(key, "key3");
                assert_eq!(expected, "value3");
                assert_eq!(found, "clobbered");
            }
            other => panic!("expected a verify failure, got {:?}", other),
        }
    }
}

//! Synthetic keys and values.
//!
//! All randomness flows from one generator created at startup and passed
//! in explicitly, so a fixed seed reproduces the whole key/value sequence.

use std::collections::BTreeSet;

use rand::distributions::{Alphanumeric, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates the process-wide generator, from `seed` when given.
pub fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `size` ASCII digits, each drawn uniformly.
pub fn generate_key<R: Rng + ?Sized>(rng: &mut R, size: usize) -> String {
    rng.sample_iter(Uniform::new_inclusive(b'0', b'9'))
        .take(size)
        .map(char::from)
        .collect()
}

/// `size` characters drawn uniformly from `[a-zA-Z0-9]`.
pub fn generate_value<R: Rng + ?Sized>(rng: &mut R, size: usize) -> String {
    rng.sample_iter(Alphanumeric).take(size).map(char::from).collect()
}

pub fn coin_toss<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Key of the `i`th deterministic record.
pub fn preload_key(i: u64) -> String {
    format!("key{}", i)
}

/// Value stored under `preload_key(i)` by the preload phase.
pub fn preload_value(i: u64) -> String {
    format!("value{}", i)
}

/// A bounded set of written keys kept around as read targets.
#[derive(Debug, Clone, Default)]
pub struct KeySample {
    keys: BTreeSet<String>,
    capacity: usize,
}

impl KeySample {
    pub fn with_capacity(capacity: usize) -> KeySample {
        KeySample {
            keys: BTreeSet::new(),
            capacity: capacity,
        }
    }

    /// Offers `key` to the sample: it is kept when the coin comes up heads and
    /// there is room left. Returns whether the key was added.
    pub fn offer<R: Rng + ?Sized>(&mut self, rng: &mut R, key: &str) -> bool {
        if coin_toss(rng) && self.keys.len() < self.capacity {
            self.keys.insert(key.to_owned())
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

//! WriteBatch holds a collection of updates to apply atomically to a DB.
//!
//! The updates are applied in the order in which they are added
//! to the WriteBatch.  For example, the value of "key" will be "v3"
//! after the following batch is written:
//!
//! ```
//! use rocks_workload::write_batch::WriteBatch;
//!
//! let mut batch = WriteBatch::new();
//! batch.put(b"key", b"v1").put(b"key", b"v2").put(b"key", b"v3");
//! assert_eq!(batch.count(), 3);
//! ```

use std::fmt;

#[derive(Default)]
pub struct WriteBatch {
    raw: rocksdb::WriteBatch,
}

impl fmt::Debug for WriteBatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WriteBatch {{ count: {}, size: {} }}", self.count(), self.data_size())
    }
}

impl WriteBatch {
    pub fn new() -> WriteBatch {
        WriteBatch::default()
    }

    /// Store the mapping "key->value" in the database.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> &mut Self {
        self.raw.put(key, value);
        self
    }

    /// Clear all updates buffered in this batch.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of updates in the batch
    pub fn count(&self) -> usize {
        self.raw.len()
    }

    /// Retrieve data size of the batch.
    pub fn data_size(&self) -> usize {
        self.raw.size_in_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub(crate) fn into_raw(self) -> rocksdb::WriteBatch {
        self.raw
    }
}

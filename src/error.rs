//! A Status encapsulates the result of a store operation.
//!
//! It may indicate success, or it may indicate an error with an
//! associated error message. `Error` is the driver-level failure that
//! wraps a `Status` with what the workload was doing at the time.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Code {
    NotFound,
    Corruption,
    NotSupported,
    InvalidArgument,
    IOError,
    MergeInProgress,
    Incomplete,
    ShutdownInProgress,
    TimedOut,
    Aborted,
    Busy,
    Expired,
    TryAgain,
    CompactionTooLarge,
    ColumnFamilyDropped,
    Unknown,
}

impl From<rocksdb::ErrorKind> for Code {
    #[allow(unreachable_patterns)]
    fn from(kind: rocksdb::ErrorKind) -> Code {
        use rocksdb::ErrorKind;

        match kind {
            ErrorKind::NotFound => Code::NotFound,
            ErrorKind::Corruption => Code::Corruption,
            ErrorKind::NotSupported => Code::NotSupported,
            ErrorKind::InvalidArgument => Code::InvalidArgument,
            ErrorKind::IOError => Code::IOError,
            ErrorKind::MergeInProgress => Code::MergeInProgress,
            ErrorKind::Incomplete => Code::Incomplete,
            ErrorKind::ShutdownInProgress => Code::ShutdownInProgress,
            ErrorKind::TimedOut => Code::TimedOut,
            ErrorKind::Aborted => Code::Aborted,
            ErrorKind::Busy => Code::Busy,
            ErrorKind::Expired => Code::Expired,
            ErrorKind::TryAgain => Code::TryAgain,
            ErrorKind::CompactionTooLarge => Code::CompactionTooLarge,
            ErrorKind::ColumnFamilyDropped => Code::ColumnFamilyDropped,
            _ => Code::Unknown,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Status {
    code: Code,
    /// string indicating the message of the Status
    state: String,
}

impl From<rocksdb::Error> for Status {
    fn from(err: rocksdb::Error) -> Status {
        Status {
            code: err.kind().into(),
            state: err.into_string(),
        }
    }
}

impl Status {
    pub fn with_message<S: Into<String>>(code: Code, msg: S) -> Status {
        Status {
            code: code,
            state: msg.into(),
        }
    }

    /// The status a point lookup returns when the key is absent.
    pub fn not_found() -> Status {
        Status::with_message(Code::NotFound, "")
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Code::NotFound
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// string indicating the message of the Status
    pub fn state(&self) -> &str {
        &self.state
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Status({:?}, {})", self.code, self.state)
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}({:?})", self.code, self.state)
    }
}

impl std::error::Error for Status {}

/// A workload run failure. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open or create the database at {}: {source}", .path.display())]
    Open { path: PathBuf, source: Status },

    #[error("failed to perform bulk load: {0}")]
    Preload(#[source] Status),

    #[error("put of {key:?} failed: {source}")]
    Write { key: String, source: Status },

    #[error("get of {key:?} failed: {source}")]
    Read { key: String, source: Status },

    #[error("preload record {key:?} holds {found:?}, expected {expected:?}")]
    Verify {
        key: String,
        expected: String,
        found: String,
    },

    #[error("failed to read store statistics: {0}")]
    Statistics(#[source] Status),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status() {
        let s = Status::not_found();
        assert!(s.is_not_found());
        assert_eq!(s.code(), Code::NotFound);
        assert_eq!(s.state(), "");
    }

    #[test]
    fn status_display() {
        let s = Status::with_message(Code::IOError, "disk on fire");
        assert!(!s.is_not_found());
        assert_eq!(s.to_string(), "Status(IOError, disk on fire)");
        assert_eq!(format!("{:?}", s), "IOError(\"disk on fire\")");
    }

    #[test]
    fn error_messages_carry_the_key() {
        let err = Error::Read {
            key: "key7".to_owned(),
            source: Status::not_found(),
        };
        assert!(err.to_string().contains("\"key7\""));
        assert!(err.to_string().contains("NotFound"));
    }
}

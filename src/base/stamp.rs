//! Modification stamps and the pluggable stamp oracle.
//!
//! Cache freshness is decided by comparing stamps, never by hashing content.
//! The oracle answers "when was this identity last modified"; an identity
//! with no answer (unsaved buffer, virtual document) has no stamp at all,
//! which callers treat differently from a stamp of zero.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::base::FileKey;

/// A modification stamp at whatever resolution the oracle provides.
///
/// Stamps are only ever compared for equality; two equal stamps mean "no
/// observed change", nothing more.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stamp(u128);

impl Stamp {
    /// The zero stamp, predating every observable modification.
    pub const ZERO: Stamp = Stamp(0);

    /// Create a stamp from milliseconds since the Unix epoch.
    pub fn from_millis(millis: u128) -> Self {
        Self(millis)
    }

    /// Get the stamp as milliseconds since the Unix epoch.
    pub fn as_millis(&self) -> u128 {
        self.0
    }

    /// Convert a system time to a stamp. Times before the epoch collapse
    /// to [`Stamp::ZERO`].
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Self(elapsed.as_millis()),
            Err(_) => Self::ZERO,
        }
    }
}

impl std::fmt::Display for Stamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Oracle answering "when was this file identity last modified".
pub trait Stamper: Send + Sync {
    /// Current modification stamp for `key`, or `None` when the key does
    /// not name a live file.
    fn stamp(&self, key: &FileKey) -> Option<Stamp>;
}

/// Filesystem-backed oracle reading metadata modification times.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStamper;

impl Stamper for FsStamper {
    fn stamp(&self, key: &FileKey) -> Option<Stamp> {
        let metadata = std::fs::metadata(key.as_path()).ok()?;
        let modified = metadata.modified().ok()?;
        Some(Stamp::from_system_time(modified))
    }
}

//! Eviction limits for one history key

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};

/// Count and/or duration cap governing eviction for one history key
///
/// A zero `max_entries` means no count cap, a zero `max_duration_millis`
/// means no time cap; at least one must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLimit {
    max_entries: usize,
    max_duration_millis: u64,
}

impl HistoryLimit {
    /// Create a limit, rejecting the all-unbounded combination
    pub fn new(max_entries: usize, max_duration_millis: u64) -> Result<Self> {
        if max_entries == 0 && max_duration_millis == 0 {
            return Err(BridgeError::config(
                "at least one of max_entries and max_duration_millis must be positive",
            ));
        }
        Ok(Self {
            max_entries,
            max_duration_millis,
        })
    }

    /// Create a limit from signed wire values, rejecting negatives
    ///
    /// Request payloads carry both fields as signed JSON numbers; a negative
    /// value in either is a client error naming the offending field.
    pub fn from_raw(max_entries: i64, max_duration_millis: i64) -> Result<Self> {
        if max_entries < 0 {
            return Err(BridgeError::config(format!(
                "max_entries must not be negative (got {})",
                max_entries
            )));
        }
        if max_duration_millis < 0 {
            return Err(BridgeError::config(format!(
                "max_duration_millis must not be negative (got {})",
                max_duration_millis
            )));
        }
        Self::new(max_entries as usize, max_duration_millis as u64)
    }

    /// Cap the count limit at the process-wide ceiling
    ///
    /// A duration-only limit (count 0) gets the ceiling itself, so the global
    /// ceiling bounds every history uniformly.
    pub fn clamp(self, ceiling: usize) -> Self {
        let max_entries = if self.max_entries == 0 {
            ceiling
        } else {
            self.max_entries.min(ceiling)
        };
        Self {
            max_entries,
            max_duration_millis: self.max_duration_millis,
        }
    }

    /// Maximum number of retained entries; 0 means uncapped
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Maximum entry age in milliseconds; 0 means uncapped
    pub fn max_duration_millis(&self) -> u64 {
        self.max_duration_millis
    }
}

//! Bounded value sequences for one history key

use crate::history::HistoryLimit;
use serde_json::{json, Value};
use std::collections::VecDeque;

/// One recorded value with its wall-clock timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntry {
    pub value: Value,
    pub timestamp_millis: i64,
}

impl ValueEntry {
    /// Serialized form injected into response payloads
    ///
    /// Timestamps are exposed in epoch seconds; millisecond precision is
    /// only needed internally for duration eviction.
    pub fn to_json(&self) -> Value {
        json!({
            "value": self.value,
            "timestamp": self.timestamp_millis / 1000,
        })
    }
}

/// The bounded, ordered value sequence for one concrete history key
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    limit: HistoryLimit,
    values: VecDeque<ValueEntry>,
}

impl HistoryEntry {
    /// Create an empty sequence under the given limit
    pub fn new(limit: HistoryLimit) -> Self {
        Self {
            limit,
            values: VecDeque::new(),
        }
    }

    /// Replace the limit, re-evicting retained values under the new count cap
    pub fn set_limit(&mut self, limit: HistoryLimit) {
        self.limit = limit;
        self.evict_by_count();
    }

    /// The active limit
    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }

    /// Append a value and evict
    ///
    /// Duration eviction runs before count eviction on every add, so a
    /// combined limit stabilizes within one call.
    pub fn add(&mut self, value: Value, now_millis: i64) {
        self.values.push_back(ValueEntry {
            value,
            timestamp_millis: now_millis,
        });
        let max_duration = self.limit.max_duration_millis();
        if max_duration > 0 {
            let cutoff = now_millis - max_duration as i64;
            while self
                .values
                .front()
                .is_some_and(|e| e.timestamp_millis < cutoff)
            {
                self.values.pop_front();
            }
        }
        self.evict_by_count();
    }

    fn evict_by_count(&mut self) {
        let max_entries = self.limit.max_entries();
        if max_entries > 0 {
            while self.values.len() > max_entries {
                self.values.pop_front();
            }
        }
    }

    /// Retained values as a JSON array, oldest first
    pub fn to_json(&self) -> Value {
        Value::Array(self.values.iter().map(ValueEntry::to_json).collect())
    }

    /// Number of retained values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are retained
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Approximate serialized byte footprint, for capacity diagnostics
    pub fn byte_size(&self) -> usize {
        self.values
            .iter()
            .map(|e| e.value.to_string().len() + 24)
            .sum()
    }
}

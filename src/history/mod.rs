//! Historical value store ("history engine")
//!
//! Opt-in, bounded per-key history of read/write/exec results, injected back
//! into response payloads as a `history` field for trend display. The store
//! is process-lifetime state guarded by one coarse lock; tracking is
//! configured per [`HistoryKey`] with count and/or duration caps.

mod entry;
mod key;
mod limit;
mod store;

pub use entry::{HistoryEntry, ValueEntry};
pub use key::{HistoryItem, HistoryKey};
pub use limit::HistoryLimit;
pub use store::HistoryStore;

/// Response field under which accumulated history is injected
pub const HISTORY_KEY: &str = "history";

//! The process-lifetime history store

use crate::bean::ObjectName;
use crate::config::HistoryConfig;
use crate::history::{HistoryEntry, HistoryKey, HistoryLimit, HISTORY_KEY};
use crate::request::{BridgeRequest, RequestKind};
use ahash::AHashMap;
use chrono::Utc;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

static GLOBAL: Lazy<HistoryStore> =
    Lazy::new(|| HistoryStore::new(crate::DEFAULT_GLOBAL_MAX_ENTRIES));

/// Bounded, path-aware store of prior request values
///
/// Tracking is opt-in per [`HistoryKey`]; update frequency is request
/// frequency, so one coarse lock around all mutation is sufficient and keeps
/// the read-then-mutate sequence inside
/// [`update_and_add`](Self::update_and_add) atomic.
#[derive(Debug)]
pub struct HistoryStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    /// Configured keys (exact and pattern) in configuration order
    configs: Vec<(HistoryKey, HistoryLimit)>,
    /// Accumulated value sequences per concrete key
    entries: AHashMap<HistoryKey, HistoryEntry>,
    /// Ceiling applied to every limit at configuration time
    global_max_entries: usize,
}

/// Exact-configured-key match first; only on miss is the pattern list
/// scanned in configuration order.
fn lookup(configs: &[(HistoryKey, HistoryLimit)], key: &HistoryKey) -> Option<HistoryLimit> {
    if let Some((_, limit)) = configs.iter().find(|(k, _)| k == key) {
        return Some(*limit);
    }
    configs
        .iter()
        .find(|(k, _)| k.is_pattern() && k.matches(key))
        .map(|(_, limit)| *limit)
}

fn has_exact_config(configs: &[(HistoryKey, HistoryLimit)], key: &HistoryKey) -> bool {
    configs.iter().any(|(k, _)| !k.is_pattern() && k == key)
}

impl HistoryStore {
    /// Create a store with the given global entry-count ceiling
    pub fn new(global_max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                configs: Vec::new(),
                entries: AHashMap::new(),
                global_max_entries,
            }),
        }
    }

    /// Create a store from configuration
    pub fn with_config(config: &HistoryConfig) -> Self {
        Self::new(config.global_max_entries)
    }

    /// The process-wide store instance
    pub fn global() -> &'static HistoryStore {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Install, update, or remove tracking for a key
    ///
    /// The limit's count cap is clamped to the global ceiling. Passing `None`
    /// removes the key's configuration together with its accumulated values;
    /// for a pattern key this also drops values accumulated under the
    /// pattern, except where an exact configuration still covers them.
    pub fn configure(&self, key: HistoryKey, limit: Option<HistoryLimit>) {
        let mut inner = self.lock();
        match limit {
            Some(limit) => {
                let limit = limit.clamp(inner.global_max_entries);
                debug!(key = %key, max_entries = limit.max_entries(), "Configuring history tracking");
                inner.configs.retain(|(k, _)| k != &key);
                inner.configs.push((key.clone(), limit));
                if key.is_pattern() {
                    let StoreInner {
                        configs, entries, ..
                    } = &mut *inner;
                    for (entry_key, entry) in entries.iter_mut() {
                        if key.matches(entry_key) && !has_exact_config(configs, entry_key) {
                            entry.set_limit(limit);
                        }
                    }
                } else if let Some(entry) = inner.entries.get_mut(&key) {
                    entry.set_limit(limit);
                }
            }
            None => {
                debug!(key = %key, "Removing history tracking");
                inner.configs.retain(|(k, _)| k != &key);
                inner.entries.remove(&key);
                if key.is_pattern() {
                    let StoreInner {
                        configs, entries, ..
                    } = &mut *inner;
                    entries.retain(|k, _| !key.matches(k) || lookup(configs, k).is_some());
                }
            }
        }
    }

    /// Record a dispatched request's result and inject accumulated history
    ///
    /// Derives the concrete key(s) for the request, appends the fresh value
    /// to each tracked sequence, and inserts a `history` field into `json`:
    /// an array of the entries accumulated before this update for the
    /// single-key case, or a `bean -> attribute -> array` map for an
    /// all-attribute read. Untracked requests leave `json` untouched.
    pub fn update_and_add(&self, request: &BridgeRequest, json: &mut Value) {
        let Some(bean) = request.bean.clone() else {
            return;
        };
        let now = Utc::now().timestamp_millis();
        let path = request.path.as_deref();
        let target = request.target.as_deref();
        match &request.kind {
            RequestKind::List => {}
            RequestKind::Write { attribute } => {
                let key = HistoryKey::for_attribute(bean, attribute, path, target);
                self.inject_single(key, json, now);
            }
            RequestKind::Exec { operation } => {
                let key = HistoryKey::for_operation(bean, operation, path, target);
                self.inject_single(key, json, now);
            }
            RequestKind::Read {
                attributes: Some(attrs),
            } if attrs.len() == 1 => {
                let key = HistoryKey::for_attribute(bean, &attrs[0], path, target);
                self.inject_single(key, json, now);
            }
            RequestKind::Read { .. } => {
                self.inject_multi(bean, path, target, json, now);
            }
        }
    }

    fn inject_single(&self, key: HistoryKey, json: &mut Value, now: i64) {
        let value = json.get("value").cloned().unwrap_or(Value::Null);
        let mut inner = self.lock();
        if let Some(history) = record(&mut inner, key, value, now) {
            drop(inner);
            if let Some(obj) = json.as_object_mut() {
                obj.insert(HISTORY_KEY.to_string(), history);
            }
        }
    }

    fn inject_multi(
        &self,
        bean: ObjectName,
        path: Option<&str>,
        target: Option<&str>,
        json: &mut Value,
        now: i64,
    ) {
        let Some(value_map) = json.get("value").and_then(Value::as_object).cloned() else {
            return;
        };
        let mut nested = Map::new();
        {
            let mut inner = self.lock();
            if bean.is_pattern() {
                // Pattern reads resolve to `bean -> attribute -> value`.
                for (bean_str, attr_values) in &value_map {
                    let Ok(concrete) = ObjectName::parse(bean_str) else {
                        continue;
                    };
                    let Some(attr_map) = attr_values.as_object() else {
                        continue;
                    };
                    let histories =
                        record_attributes(&mut inner, &concrete, attr_map, path, target, now);
                    if !histories.is_empty() {
                        nested.insert(bean_str.clone(), Value::Object(histories));
                    }
                }
            } else {
                let histories = record_attributes(&mut inner, &bean, &value_map, path, target, now);
                if !histories.is_empty() {
                    nested.insert(bean.to_string(), Value::Object(histories));
                }
            }
        }
        if !nested.is_empty() {
            if let Some(obj) = json.as_object_mut() {
                obj.insert(HISTORY_KEY.to_string(), Value::Object(nested));
            }
        }
    }

    /// Set the process-wide entry-count ceiling
    ///
    /// Bounds future `configure` calls only; already-configured limits and
    /// accumulated entries are unaffected.
    pub fn set_global_max_entries(&self, ceiling: usize) {
        let mut inner = self.lock();
        debug!(ceiling, "Setting global history ceiling");
        inner.global_max_entries = ceiling;
    }

    /// The current process-wide entry-count ceiling
    pub fn global_max_entries(&self) -> usize {
        self.lock().global_max_entries
    }

    /// Drop all configured keys and accumulated values
    pub fn reset(&self) {
        let mut inner = self.lock();
        info!(
            tracked_keys = inner.entries.len(),
            "Resetting history store"
        );
        inner.configs.clear();
        inner.entries.clear();
    }

    /// Number of concrete keys with accumulated values
    pub fn tracked_keys(&self) -> usize {
        self.lock().entries.len()
    }

    /// Approximate serialized byte footprint of all stored values
    pub fn size_estimate(&self) -> usize {
        self.lock()
            .entries
            .values()
            .map(HistoryEntry::byte_size)
            .sum()
    }
}

/// Append one value under its concrete key, returning the pre-update history
///
/// Returns `None` when no configuration (exact or pattern) covers the key.
/// The entry is created lazily on first match; the returned array reflects
/// the state before this update.
fn record(inner: &mut StoreInner, key: HistoryKey, value: Value, now: i64) -> Option<Value> {
    if !inner.entries.contains_key(&key) {
        let limit = lookup(&inner.configs, &key)?;
        inner.entries.insert(key.clone(), HistoryEntry::new(limit));
    }
    let entry = inner.entries.get_mut(&key)?;
    let history = entry.to_json();
    entry.add(value, now);
    Some(history)
}

fn record_attributes(
    inner: &mut StoreInner,
    bean: &ObjectName,
    attrs: &Map<String, Value>,
    path: Option<&str>,
    target: Option<&str>,
    now: i64,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (attr, value) in attrs {
        let key = HistoryKey::for_attribute(bean.clone(), attr, path, target);
        if let Some(history) = record(inner, key, value.clone(), now) {
            out.insert(attr.clone(), history);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn memory() -> ObjectName {
        ObjectName::parse("java.lang:type=Memory").unwrap()
    }

    fn heap_key() -> HistoryKey {
        HistoryKey::for_attribute(memory(), "HeapMemoryUsage", None, None)
    }

    #[test]
    fn test_untracked_request_leaves_result_untouched() {
        let store = HistoryStore::new(10);
        let request = BridgeRequest::read(memory(), &["HeapMemoryUsage"]);
        let mut json = json!({"value": 17});
        store.update_and_add(&request, &mut json);
        assert_eq!(json, json!({"value": 17}));
    }

    #[test]
    fn test_first_update_returns_empty_history() {
        let store = HistoryStore::new(10);
        store.configure(heap_key(), Some(HistoryLimit::new(5, 0).unwrap()));
        let request = BridgeRequest::read(memory(), &["HeapMemoryUsage"]);
        let mut json = json!({"value": 17});
        store.update_and_add(&request, &mut json);
        assert_eq!(json["history"], json!([]));
    }

    #[test]
    fn test_remove_tracking_drops_accumulated_values() {
        let store = HistoryStore::new(10);
        store.configure(heap_key(), Some(HistoryLimit::new(5, 0).unwrap()));
        let request = BridgeRequest::read(memory(), &["HeapMemoryUsage"]);
        for i in 0..3 {
            let mut json = json!({"value": i});
            store.update_and_add(&request, &mut json);
        }
        assert_eq!(store.tracked_keys(), 1);

        store.configure(heap_key(), None);
        assert_eq!(store.tracked_keys(), 0);

        let mut json = json!({"value": 99});
        store.update_and_add(&request, &mut json);
        assert!(json.get("history").is_none());
    }

    #[test]
    fn test_pattern_removal_spares_exactly_configured_keys() {
        let store = HistoryStore::new(10);
        let pattern = HistoryKey::for_attribute(
            ObjectName::parse("java.lang:*").unwrap(),
            "HeapMemoryUsage",
            None,
            None,
        );
        store.configure(heap_key(), Some(HistoryLimit::new(5, 0).unwrap()));
        store.configure(pattern.clone(), Some(HistoryLimit::new(3, 0).unwrap()));

        let request = BridgeRequest::read(memory(), &["HeapMemoryUsage"]);
        let mut json = json!({"value": 1});
        store.update_and_add(&request, &mut json);
        assert_eq!(store.tracked_keys(), 1);

        // The exact configuration keeps the accumulated entry alive.
        store.configure(pattern, None);
        assert_eq!(store.tracked_keys(), 1);
    }

    #[test]
    fn test_global_singleton_is_shared() {
        let a = HistoryStore::global();
        let b = HistoryStore::global();
        assert!(std::ptr::eq(a, b));
    }
}

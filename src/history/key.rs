//! History keys: the identity under which values are tracked

use crate::bean::ObjectName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The tracked item: exactly one attribute or one operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryItem {
    Attribute(String),
    Operation(String),
}

/// Identity of one tracked value series
///
/// Keys compare equal when bean name, item, normalized path (empty string is
/// the same as none), and target URL all match. A key whose bean name is a
/// pattern acts as a lazy template: it is matched against concrete request
/// keys at update time, never eagerly expanded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryKey {
    bean: ObjectName,
    item: HistoryItem,
    path: Option<String>,
    target: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

impl HistoryKey {
    /// Key for an attribute read/write series
    pub fn for_attribute(
        bean: ObjectName,
        attribute: &str,
        path: Option<&str>,
        target: Option<&str>,
    ) -> Self {
        Self {
            bean,
            item: HistoryItem::Attribute(attribute.to_string()),
            path: normalize(path),
            target: normalize(target),
        }
    }

    /// Key for an operation return-value series
    pub fn for_operation(
        bean: ObjectName,
        operation: &str,
        path: Option<&str>,
        target: Option<&str>,
    ) -> Self {
        Self {
            bean,
            item: HistoryItem::Operation(operation.to_string()),
            path: normalize(path),
            target: normalize(target),
        }
    }

    /// The bean name or bean-name pattern
    pub fn bean(&self) -> &ObjectName {
        &self.bean
    }

    /// The tracked attribute or operation
    pub fn item(&self) -> &HistoryItem {
        &self.item
    }

    /// Whether the bean name contains pattern wildcards
    pub fn is_pattern(&self) -> bool {
        self.bean.is_pattern()
    }

    /// Match a concrete key against this (possibly pattern) key
    pub fn matches(&self, concrete: &HistoryKey) -> bool {
        self.bean.matches(&concrete.bean)
            && self.item == concrete.item
            && self.path == concrete.path
            && self.target == concrete.target
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item = match &self.item {
            HistoryItem::Attribute(name) => format!("attr={}", name),
            HistoryItem::Operation(name) => format!("op={}", name),
        };
        write!(f, "{}!{}", self.bean, item)?;
        if let Some(path) = &self.path {
            write!(f, "!{}", path)?;
        }
        if let Some(target) = &self.target {
            write!(f, "@{}", target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> ObjectName {
        ObjectName::parse("java.lang:type=Memory").unwrap()
    }

    #[test]
    fn test_empty_path_normalizes_to_none() {
        let a = HistoryKey::for_attribute(memory(), "HeapMemoryUsage", Some(""), None);
        let b = HistoryKey::for_attribute(memory(), "HeapMemoryUsage", None, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_inequality_on_each_field() {
        let base = HistoryKey::for_attribute(memory(), "HeapMemoryUsage", None, None);
        assert_ne!(
            base,
            HistoryKey::for_attribute(memory(), "NonHeapMemoryUsage", None, None)
        );
        assert_ne!(
            base,
            HistoryKey::for_operation(memory(), "HeapMemoryUsage", None, None)
        );
        assert_ne!(
            base,
            HistoryKey::for_attribute(memory(), "HeapMemoryUsage", Some("used"), None)
        );
        assert_ne!(
            base,
            HistoryKey::for_attribute(memory(), "HeapMemoryUsage", None, Some("http://remote"))
        );
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = HistoryKey::for_attribute(
            ObjectName::parse("java.lang:*").unwrap(),
            "HeapMemoryUsage",
            None,
            None,
        );
        let concrete = HistoryKey::for_attribute(memory(), "HeapMemoryUsage", None, None);
        let other_attr = HistoryKey::for_attribute(memory(), "Verbose", None, None);

        assert!(pattern.is_pattern());
        assert!(pattern.matches(&concrete));
        assert!(!pattern.matches(&other_attr));
    }
}

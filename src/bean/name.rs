//! Bean object names: parsing, canonicalization, and pattern matching
//!
//! An object name has the form `domain:key=value,key=value,...`. Names may be
//! patterns: `*` and `?` wildcards in the domain or in property values, and a
//! trailing `,*` (or a bare `*` property list) matching any further
//! properties. Equality and hashing work on the canonical form (properties
//! sorted by key) so `a:x=1,y=2` and `a:y=2,x=1` are the same bean.

use crate::error::{BridgeError, Result};
use globset::Glob;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Parsed two-level bean identity: domain plus key-property list
#[derive(Debug, Clone)]
pub struct ObjectName {
    domain: String,
    properties: Vec<(String, String)>,
    property_list_pattern: bool,
    canonical: String,
}

fn has_wildcard(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    if !has_wildcard(pattern) {
        return pattern == text;
    }
    match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(text),
        Err(_) => pattern == text,
    }
}

impl ObjectName {
    /// Parse an object name from its string form
    pub fn parse(name: &str) -> Result<Self> {
        let (domain, prop_list) = name.split_once(':').ok_or_else(|| {
            BridgeError::object_name(name, "missing ':' separator between domain and properties")
        })?;
        if prop_list.is_empty() {
            return Err(BridgeError::object_name(
                name,
                "key property list cannot be empty",
            ));
        }

        let mut properties = Vec::new();
        let mut property_list_pattern = false;
        for part in prop_list.split(',') {
            if part == "*" {
                property_list_pattern = true;
                continue;
            }
            let (key, value) = part.split_once('=').ok_or_else(|| {
                BridgeError::object_name(name, "key property without '=' separator")
            })?;
            if key.is_empty() {
                return Err(BridgeError::object_name(name, "empty key property name"));
            }
            if properties.iter().any(|(k, _)| k == key) {
                return Err(BridgeError::object_name(name, "duplicate key property"));
            }
            properties.push((key.to_string(), value.to_string()));
        }
        if properties.is_empty() && !property_list_pattern {
            return Err(BridgeError::object_name(
                name,
                "key property list cannot be empty",
            ));
        }

        let canonical = Self::canonical_form(domain, &properties, property_list_pattern);
        Ok(Self {
            domain: domain.to_string(),
            properties,
            property_list_pattern,
            canonical,
        })
    }

    fn canonical_form(
        domain: &str,
        properties: &[(String, String)],
        property_list_pattern: bool,
    ) -> String {
        let mut sorted: Vec<&(String, String)> = properties.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        let mut parts: Vec<String> = sorted.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        if property_list_pattern {
            parts.push("*".to_string());
        }
        format!("{}:{}", domain, parts.join(","))
    }

    /// The first-level namespace segment
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The key-property list in its original (registration) order
    pub fn key_property_list(&self) -> String {
        let mut parts: Vec<String> = self
            .properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        if self.property_list_pattern {
            parts.push("*".to_string());
        }
        parts.join(",")
    }

    /// The key-property list with keys in sorted (canonical) order
    pub fn canonical_key_property_list(&self) -> String {
        self.canonical
            .split_once(':')
            .map(|(_, props)| props.to_string())
            .unwrap_or_default()
    }

    /// The full canonical name
    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }

    /// Look up one key property value
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether this name contains pattern wildcards
    pub fn is_pattern(&self) -> bool {
        self.property_list_pattern
            || has_wildcard(&self.domain)
            || self.properties.iter().any(|(_, v)| has_wildcard(v))
    }

    /// Match a concrete name against this (possibly pattern) name
    ///
    /// A non-pattern name matches only itself. A pattern matches when the
    /// domain glob matches, every key property present in the pattern is
    /// present in `other` with a matching value, and (unless the pattern
    /// carries a trailing `*` property) no extra properties exist in `other`.
    pub fn matches(&self, other: &ObjectName) -> bool {
        if !self.is_pattern() {
            return self == other;
        }
        if !wildcard_match(&self.domain, &other.domain) {
            return false;
        }
        for (key, value) in &self.properties {
            match other.get_property(key) {
                Some(other_value) if wildcard_match(value, other_value) => {}
                _ => return false,
            }
        }
        if !self.property_list_pattern && other.properties.len() != self.properties.len() {
            return false;
        }
        true
    }
}

impl PartialEq for ObjectName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for ObjectName {}

impl std::hash::Hash for ObjectName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain, self.key_property_list())
    }
}

impl FromStr for ObjectName {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ObjectName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectName::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_accessors() {
        let name = ObjectName::parse("java.lang:type=Memory").unwrap();
        assert_eq!(name.domain(), "java.lang");
        assert_eq!(name.key_property_list(), "type=Memory");
        assert_eq!(name.get_property("type"), Some("Memory"));
        assert!(!name.is_pattern());
    }

    #[test]
    fn test_canonical_ordering() {
        let a = ObjectName::parse("d:x=1,a=2").unwrap();
        let b = ObjectName::parse("d:a=2,x=1").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.canonical_key_property_list(), "a=2,x=1");
        assert_eq!(a.key_property_list(), "x=1,a=2");
    }

    #[test]
    fn test_parse_errors() {
        assert!(ObjectName::parse("nodomainseparator").is_err());
        assert!(ObjectName::parse("d:").is_err());
        assert!(ObjectName::parse("d:novalue").is_err());
        assert!(ObjectName::parse("d:a=1,a=2").is_err());
    }

    #[test]
    fn test_pattern_detection() {
        assert!(ObjectName::parse("java.lang:*").unwrap().is_pattern());
        assert!(ObjectName::parse("*:type=Memory").unwrap().is_pattern());
        assert!(ObjectName::parse("d:type=Mem?ry").unwrap().is_pattern());
        assert!(!ObjectName::parse("d:type=Memory").unwrap().is_pattern());
    }

    #[test]
    fn test_property_list_pattern_matching() {
        let pattern = ObjectName::parse("java.lang:*").unwrap();
        let concrete = ObjectName::parse("java.lang:type=Memory").unwrap();
        let other_domain = ObjectName::parse("java.util.logging:type=Logging").unwrap();
        assert!(pattern.matches(&concrete));
        assert!(!pattern.matches(&other_domain));
    }

    #[test]
    fn test_domain_wildcard_matching() {
        let pattern = ObjectName::parse("java.*:type=Memory").unwrap();
        assert!(pattern.matches(&ObjectName::parse("java.lang:type=Memory").unwrap()));
        assert!(!pattern.matches(&ObjectName::parse("java.lang:type=Threading").unwrap()));
    }

    #[test]
    fn test_partial_property_pattern() {
        let pattern = ObjectName::parse("d:type=Cache,*").unwrap();
        assert!(pattern.matches(&ObjectName::parse("d:type=Cache,name=users").unwrap()));
        assert!(pattern.matches(&ObjectName::parse("d:type=Cache").unwrap()));
        assert!(!pattern.matches(&ObjectName::parse("d:type=Pool,name=users").unwrap()));
    }

    #[test]
    fn test_exact_property_set_required_without_list_pattern() {
        let pattern = ObjectName::parse("d:type=*").unwrap();
        assert!(pattern.matches(&ObjectName::parse("d:type=Cache").unwrap()));
        assert!(!pattern.matches(&ObjectName::parse("d:type=Cache,name=users").unwrap()));
    }

    #[test]
    fn test_non_pattern_matches_only_itself() {
        let name = ObjectName::parse("d:type=Cache").unwrap();
        assert!(name.matches(&ObjectName::parse("d:type=Cache").unwrap()));
        assert!(!name.matches(&ObjectName::parse("d:type=Pool").unwrap()));
    }

    #[test]
    fn test_serde_round_trip() {
        let name = ObjectName::parse("java.lang:type=Memory").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"java.lang:type=Memory\"");
        let back: ObjectName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}

//! Dispatch-layer request contract
//!
//! The HTTP layer deserializes POST bodies into [`BridgeRequest`]s, dispatches
//! them, and hands the request plus its computed JSON result to the history
//! store. The bridge core never constructs these itself outside of tests.

use crate::bean::ObjectName;
use serde::{Deserialize, Serialize};

/// What a request does, with its kind-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RequestKind {
    /// Read one, several, or (with no list) all attributes of a bean
    Read {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<Vec<String>>,
    },
    /// Write a single attribute; the result carries the old value
    Write { attribute: String },
    /// Execute an operation; the result carries the return value
    Exec { operation: String },
    /// List bean metadata; the shared `path` field scopes the tree
    List,
}

/// One dispatched request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    #[serde(flatten)]
    pub kind: RequestKind,
    /// Target bean; absent for list requests without a bean scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bean: Option<ObjectName>,
    /// Optional sub-path into the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Target URL discriminator for proxied requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl BridgeRequest {
    /// Read specific attributes of a bean
    pub fn read(bean: ObjectName, attributes: &[&str]) -> Self {
        Self {
            kind: RequestKind::Read {
                attributes: Some(attributes.iter().map(|s| s.to_string()).collect()),
            },
            bean: Some(bean),
            path: None,
            target: None,
        }
    }

    /// Read all attributes of a bean (or of every bean matching a pattern)
    pub fn read_all(bean: ObjectName) -> Self {
        Self {
            kind: RequestKind::Read { attributes: None },
            bean: Some(bean),
            path: None,
            target: None,
        }
    }

    /// Write one attribute of a bean
    pub fn write(bean: ObjectName, attribute: &str) -> Self {
        Self {
            kind: RequestKind::Write {
                attribute: attribute.to_string(),
            },
            bean: Some(bean),
            path: None,
            target: None,
        }
    }

    /// Execute one operation on a bean
    pub fn exec(bean: ObjectName, operation: &str) -> Self {
        Self {
            kind: RequestKind::Exec {
                operation: operation.to_string(),
            },
            bean: Some(bean),
            path: None,
            target: None,
        }
    }

    /// List bean metadata under the given tree path
    pub fn list(path: &[String]) -> Self {
        Self {
            kind: RequestKind::List,
            bean: None,
            path: if path.is_empty() {
                None
            } else {
                Some(path.join("/"))
            },
            target: None,
        }
    }

    /// The request path split into tree segments
    pub fn path_segments(&self) -> Vec<String> {
        self.path
            .as_deref()
            .map(|p| {
                p.split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attach a value sub-path
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Attach a proxy target URL
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        let bean = ObjectName::parse("java.lang:type=Memory").unwrap();
        let request = BridgeRequest::read(bean, &["HeapMemoryUsage"]).with_path("used");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "read");
        assert_eq!(json["bean"], "java.lang:type=Memory");
        assert_eq!(json["attributes"][0], "HeapMemoryUsage");

        let back: BridgeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_exec_request_shape() {
        let bean = ObjectName::parse("java.lang:type=Memory").unwrap();
        let request = BridgeRequest::exec(bean, "gc");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "exec");
        assert_eq!(json["operation"], "gc");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_list_request_defaults() {
        let parsed: BridgeRequest = serde_json::from_str(r#"{"type":"list"}"#).unwrap();
        assert_eq!(parsed.kind, RequestKind::List);
        assert!(parsed.bean.is_none());
        assert!(parsed.path_segments().is_empty());
    }

    #[test]
    fn test_list_path_segments() {
        let request = BridgeRequest::list(&[
            "java.lang".to_string(),
            "type=Memory".to_string(),
            "attr".to_string(),
        ]);
        assert_eq!(request.path, Some("java.lang/type=Memory/attr".to_string()));
        assert_eq!(
            request.path_segments(),
            vec!["java.lang", "type=Memory", "attr"]
        );
    }
}

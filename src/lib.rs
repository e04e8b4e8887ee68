//! Beanbridge - HTTP-to-management-protocol bridge core
//!
//! This crate provides the introspection and request-history engines of an
//! HTTP/JSON management bridge: a depth-bounded, path-addressable metadata
//! tree built from managed-bean descriptors (the "list engine"), and a
//! bounded per-key store of prior request values injected back into response
//! payloads (the "history engine"). Transport, lifecycle, and authentication
//! live in the surrounding dispatch layer, which calls in through
//! [`bean::MBeanServer`], [`request::BridgeRequest`], and plain
//! `serde_json::Value` results.

pub mod bean;
pub mod config;
pub mod error;
pub mod history;
pub mod list;
pub mod request;

pub use bean::{MBeanInfo, MBeanServer, ObjectName};
pub use config::{BridgeConfig, HistoryConfig, ListConfig};
pub use error::{BridgeError, Result};
pub use history::{HistoryKey, HistoryLimit, HistoryStore};
pub use list::{build_list, TreeBuilder};
pub use request::{BridgeRequest, RequestKind};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default process-wide ceiling on per-key history entry counts
pub const DEFAULT_GLOBAL_MAX_ENTRIES: usize = 1000;

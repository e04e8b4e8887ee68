//! Configuration module for the bridge core
//!
//! This module provides configuration management and loading utilities.

mod config;

// Re-export the main configuration types
pub use config::{BridgeConfig, HistoryConfig, ListConfig};

//! Error types and handling for the bridge core
//!
//! This module provides error types and result handling utilities.

mod error;

pub use error::{BridgeError, Result};

//! Error types and handling for the bridge core

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for the bridge core
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A navigation path was given but resolved to no data
    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    /// A path segment at the aspect-selection level matched no known aspect
    #[error("Illegal path element: {element}")]
    IllegalPathElement { element: String },

    /// Bean introspection failed for a single bean
    #[error("Introspection error: {message}")]
    Introspection { message: String },

    /// Lookup miss for a bean, client, or handle supplied by the caller
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A bean name string could not be parsed
    #[error("Malformed object name '{name}': {message}")]
    ObjectName { name: String, message: String },

    /// Configuration errors (invalid history limits, bad config values)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Internal tree consistency errors (path/tree mismatch bugs)
    #[error("Internal error: {message}")]
    InternalTree { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BridgeError {
    /// Create an invalid-path error
    pub fn invalid_path<S: Into<String>>(message: S) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    /// Create an illegal-path-element error
    pub fn illegal_path_element<S: Into<String>>(element: S) -> Self {
        Self::IllegalPathElement {
            element: element.into(),
        }
    }

    /// Create an introspection error
    pub fn introspection<S: Into<String>>(message: S) -> Self {
        Self::Introspection {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a malformed-object-name error
    pub fn object_name<S: Into<String>>(name: S, message: S) -> Self {
        Self::ObjectName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal tree-consistency error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalTree {
            message: message.into(),
        }
    }

    /// Whether this error was caused by client input (maps to HTTP 4xx upstream)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidPath { .. }
                | BridgeError::IllegalPathElement { .. }
                | BridgeError::NotFound { .. }
                | BridgeError::ObjectName { .. }
                | BridgeError::Config { .. }
        )
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            BridgeError::InvalidPath { .. } => "invalid_path",
            BridgeError::IllegalPathElement { .. } => "illegal_path_element",
            BridgeError::Introspection { .. } => "introspection",
            BridgeError::NotFound { .. } => "not_found",
            BridgeError::ObjectName { .. } => "object_name",
            BridgeError::Config { .. } => "config",
            BridgeError::InternalTree { .. } => "internal",
            BridgeError::Io(_) => "io",
            BridgeError::Serde(_) => "serialization",
            BridgeError::Yaml(_) => "yaml",
            BridgeError::Internal(_) => "internal",
        }
    }
}

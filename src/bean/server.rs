//! Bean descriptor source contract and an in-memory implementation

use crate::bean::{MBeanInfo, ObjectName};
use crate::error::{BridgeError, Result};
use ahash::AHashMap;

/// Source of bean descriptors, implemented by the hosting agent
///
/// The bridge core only reads from this collaborator; implementations are
/// responsible for their own thread-safety.
pub trait MBeanServer: Send + Sync {
    /// All registered bean names, in registration order
    fn query_names(&self) -> Vec<ObjectName>;

    /// The descriptor for one bean, or an error when the bean is unknown or
    /// its introspection fails
    fn bean_info(&self, name: &ObjectName) -> Result<MBeanInfo>;
}

/// Simple in-memory bean server for embedding and tests
#[derive(Debug, Default)]
pub struct LocalBeanServer {
    order: Vec<ObjectName>,
    beans: AHashMap<ObjectName, MBeanInfo>,
}

impl LocalBeanServer {
    /// Create an empty server
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bean under the given name, replacing any previous descriptor
    pub fn register(&mut self, name: ObjectName, info: MBeanInfo) {
        if !self.beans.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.beans.insert(name, info);
    }

    /// Remove a bean registration
    pub fn unregister(&mut self, name: &ObjectName) -> Option<MBeanInfo> {
        self.order.retain(|n| n != name);
        self.beans.remove(name)
    }

    /// Number of registered beans
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// Whether no beans are registered
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl MBeanServer for LocalBeanServer {
    fn query_names(&self) -> Vec<ObjectName> {
        self.order.clone()
    }

    fn bean_info(&self, name: &ObjectName) -> Result<MBeanInfo> {
        self.beans
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::not_found(format!("No bean registered as '{}'", name)))
    }
}

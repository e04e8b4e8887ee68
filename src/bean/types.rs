//! Bean descriptor types

use serde::{Deserialize, Serialize};

/// Metadata for a single readable/writable bean attribute
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MBeanAttributeInfo {
    /// Attribute name (unique within the bean)
    pub name: String,
    /// Java-style type string (e.g. `long`, `javax.management.openmbean.CompositeData`)
    pub type_name: String,
    /// Human-readable description
    pub description: String,
    /// Whether the attribute can be read
    pub readable: bool,
    /// Whether the attribute can be written
    pub writable: bool,
}

impl MBeanAttributeInfo {
    /// Create a read-only attribute descriptor
    pub fn read_only(name: &str, type_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            description: description.to_string(),
            readable: true,
            writable: false,
        }
    }

    /// Create a read-write attribute descriptor
    pub fn read_write(name: &str, type_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            description: description.to_string(),
            readable: true,
            writable: true,
        }
    }
}

/// Metadata for one operation parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MBeanParameterInfo {
    /// Parameter name
    pub name: String,
    /// Parameter type string
    pub type_name: String,
    /// Human-readable description
    pub description: String,
}

impl MBeanParameterInfo {
    /// Create a parameter descriptor
    pub fn new(name: &str, type_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Metadata for a single invokable bean operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MBeanOperationInfo {
    /// Operation name; the same name may appear more than once with
    /// different signatures (overloads)
    pub name: String,
    /// Return type string
    pub return_type: String,
    /// Human-readable description
    pub description: String,
    /// Ordered parameter descriptors
    pub parameters: Vec<MBeanParameterInfo>,
}

impl MBeanOperationInfo {
    /// Create an operation descriptor
    pub fn new(
        name: &str,
        return_type: &str,
        description: &str,
        parameters: Vec<MBeanParameterInfo>,
    ) -> Self {
        Self {
            name: name.to_string(),
            return_type: return_type.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

/// Metadata for a notification broadcast by the bean
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MBeanNotificationInfo {
    /// Notification name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Notification type strings emitted under this name
    pub notif_types: Vec<String>,
}

impl MBeanNotificationInfo {
    /// Create a notification descriptor
    pub fn new(name: &str, description: &str, notif_types: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            notif_types,
        }
    }
}

/// Complete immutable descriptor for one managed bean
///
/// Supplied per bean by an [`MBeanServer`](crate::bean::MBeanServer)
/// implementation and never mutated by the bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MBeanInfo {
    /// Fully qualified implementation class name
    pub class_name: String,
    /// Human-readable bean description
    pub description: String,
    /// Ordered attribute descriptors
    pub attributes: Vec<MBeanAttributeInfo>,
    /// Ordered operation descriptors (overloads appear as repeated names)
    pub operations: Vec<MBeanOperationInfo>,
    /// Notification descriptors
    pub notifications: Vec<MBeanNotificationInfo>,
}

impl MBeanInfo {
    /// Create an empty descriptor for the given class
    pub fn new(class_name: &str, description: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            description: description.to_string(),
            attributes: Vec::new(),
            operations: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Add an attribute descriptor
    pub fn attribute(mut self, attribute: MBeanAttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an operation descriptor
    pub fn operation(mut self, operation: MBeanOperationInfo) -> Self {
        self.operations.push(operation);
        self
    }

    /// Add a notification descriptor
    pub fn notification(mut self, notification: MBeanNotificationInfo) -> Self {
        self.notifications.push(notification);
        self
    }

    /// Look up an attribute descriptor by name
    pub fn get_attribute(&self, name: &str) -> Option<&MBeanAttributeInfo> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// All operation descriptors sharing the given name (overloads)
    pub fn get_operations(&self, name: &str) -> Vec<&MBeanOperationInfo> {
        self.operations.iter().filter(|o| o.name == name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_building() {
        let info = MBeanInfo::new("sun.management.MemoryImpl", "Memory subsystem")
            .attribute(MBeanAttributeInfo::read_only(
                "HeapMemoryUsage",
                "javax.management.openmbean.CompositeData",
                "Current heap usage",
            ))
            .operation(MBeanOperationInfo::new("gc", "void", "Run GC", vec![]));

        assert_eq!(info.attributes.len(), 1);
        assert!(info.get_attribute("HeapMemoryUsage").is_some());
        assert!(info.get_attribute("Missing").is_none());
        assert_eq!(info.get_operations("gc").len(), 1);
    }

    #[test]
    fn test_overload_lookup() {
        let info = MBeanInfo::new("Threading", "Threads")
            .operation(MBeanOperationInfo::new(
                "getThreadInfo",
                "CompositeData",
                "Single id",
                vec![MBeanParameterInfo::new("id", "long", "Thread id")],
            ))
            .operation(MBeanOperationInfo::new(
                "getThreadInfo",
                "CompositeData[]",
                "Many ids",
                vec![MBeanParameterInfo::new("ids", "long[]", "Thread ids")],
            ));

        assert_eq!(info.get_operations("getThreadInfo").len(), 2);
    }
}

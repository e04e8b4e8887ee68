//! Per-aspect tree updaters
//!
//! Each bean's entry in the metadata tree holds a fixed vocabulary of aspects
//! (class name, description, attributes, operations, notifications). A full
//! dump renders all of them in order; a partial dump routes one path segment
//! to exactly one aspect. The `error` key is not an aspect: it is written
//! directly when a bean's introspection fails.

use crate::bean::MBeanInfo;
use crate::error::{BridgeError, Result};
use serde_json::{json, Map, Value};

/// Map key recording a per-bean introspection failure
pub const ERROR_KEY: &str = "error";

/// The fixed aspect vocabulary of a bean's tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectKind {
    ClassName,
    Description,
    Attributes,
    Operations,
    Notifications,
}

impl AspectKind {
    /// All aspects in full-dump order
    pub const ALL: [AspectKind; 5] = [
        AspectKind::ClassName,
        AspectKind::Description,
        AspectKind::Attributes,
        AspectKind::Operations,
        AspectKind::Notifications,
    ];

    /// The tree key under which this aspect is stored
    pub fn key(&self) -> &'static str {
        match self {
            AspectKind::ClassName => "class",
            AspectKind::Description => "desc",
            AspectKind::Attributes => "attr",
            AspectKind::Operations => "op",
            AspectKind::Notifications => "not",
        }
    }

    /// Resolve a path segment to an aspect
    pub fn from_key(key: &str) -> Option<AspectKind> {
        Self::ALL.iter().copied().find(|a| a.key() == key)
    }

    /// Render this aspect of a bean into its tree value
    ///
    /// `filter` restricts map-valued aspects to a single item name; a filter
    /// that matches nothing yields an empty map, which the builder turns into
    /// an invalid-path error. Scalar aspects reject any filter since they
    /// have no sub-tree to descend into.
    pub fn extract(&self, info: &MBeanInfo, filter: Option<&str>) -> Result<Value> {
        match self {
            AspectKind::ClassName => {
                Self::reject_filter(self, filter)?;
                Ok(Value::String(info.class_name.clone()))
            }
            AspectKind::Description => {
                Self::reject_filter(self, filter)?;
                Ok(Value::String(info.description.clone()))
            }
            AspectKind::Attributes => Ok(Value::Object(attribute_map(info, filter))),
            AspectKind::Operations => Ok(Value::Object(operation_map(info, filter))),
            AspectKind::Notifications => Ok(Value::Object(notification_map(info, filter))),
        }
    }

    fn reject_filter(aspect: &AspectKind, filter: Option<&str>) -> Result<()> {
        match filter {
            Some(segment) => Err(BridgeError::invalid_path(format!(
                "'{}' has no sub-tree for path segment '{}'",
                aspect.key(),
                segment
            ))),
            None => Ok(()),
        }
    }
}

fn attribute_map(info: &MBeanInfo, filter: Option<&str>) -> Map<String, Value> {
    let mut map = Map::new();
    for attr in &info.attributes {
        if filter.is_some_and(|name| name != attr.name) {
            continue;
        }
        map.insert(
            attr.name.clone(),
            json!({
                "type": attr.type_name,
                "desc": attr.description,
                "rw": attr.writable,
            }),
        );
    }
    map
}

fn operation_map(info: &MBeanInfo, filter: Option<&str>) -> Map<String, Value> {
    let mut map = Map::new();
    for op in &info.operations {
        if filter.is_some_and(|name| name != op.name) {
            continue;
        }
        let args: Vec<Value> = op
            .parameters
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "type": p.type_name,
                    "desc": p.description,
                })
            })
            .collect();
        let detail = json!({
            "args": args,
            "ret": op.return_type,
            "desc": op.description,
        });

        // Overloaded names collapse into a list of detail maps.
        match map.remove(&op.name) {
            None => {
                map.insert(op.name.clone(), detail);
            }
            Some(Value::Array(mut overloads)) => {
                overloads.push(detail);
                map.insert(op.name.clone(), Value::Array(overloads));
            }
            Some(first) => {
                map.insert(op.name.clone(), Value::Array(vec![first, detail]));
            }
        }
    }
    map
}

fn notification_map(info: &MBeanInfo, filter: Option<&str>) -> Map<String, Value> {
    let mut map = Map::new();
    for notif in &info.notifications {
        if filter.is_some_and(|name| name != notif.name) {
            continue;
        }
        map.insert(
            notif.name.clone(),
            json!({
                "name": notif.name,
                "desc": notif.description,
                "types": notif.notif_types,
            }),
        );
    }
    map
}

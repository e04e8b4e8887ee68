//! The per-request metadata tree builder

use crate::bean::{MBeanInfo, MBeanServer, ObjectName};
use crate::error::{BridgeError, Result};
use crate::list::path::TreePath;
use crate::list::updater::{AspectKind, ERROR_KEY};
use serde_json::{Map, Value};

/// Scalar marker standing in for elided sub-trees
fn placeholder() -> Value {
    Value::from(1)
}

/// Builds one bean-metadata tree per list request
///
/// The tree nests `domain -> key properties -> aspect -> item -> detail`.
/// Populate it with [`add_bean_info`](Self::add_bean_info) (or
/// [`add_exception`](Self::add_exception) for beans whose introspection
/// failed), then consume it with [`truncate`](Self::truncate).
#[derive(Debug)]
pub struct TreeBuilder {
    max_depth: u32,
    path: TreePath,
    use_canonical_name: bool,
    tree: Map<String, Value>,
}

impl TreeBuilder {
    /// Create a builder for one request
    ///
    /// `path` restricts the output to a sub-tree and is defensively copied.
    /// `max_depth` bounds how many map levels the final tree keeps after path
    /// navigation; 0 means unlimited.
    pub fn new(max_depth: u32, path: &[String], use_canonical_name: bool) -> Self {
        Self {
            max_depth,
            path: TreePath::new(path),
            use_canonical_name,
            tree: Map::new(),
        }
    }

    fn props_key(&self, name: &ObjectName) -> String {
        if self.use_canonical_name {
            name.canonical_key_property_list()
        } else {
            name.key_property_list()
        }
    }

    /// Fast short-circuit for depth-1/2 requests without a path
    ///
    /// With `max_depth` 1 only the domain is recorded, with 2 the
    /// domain/key-property pair, both as placeholder scalars. Returns true
    /// when the short-circuit applied, in which case the caller must skip
    /// bean introspection entirely.
    pub fn handle_first_or_second_level(&mut self, name: &ObjectName) -> bool {
        if !self.path.is_empty() {
            return false;
        }
        match self.max_depth {
            1 => {
                self.tree.insert(name.domain().to_string(), placeholder());
                true
            }
            2 => {
                let props = self.props_key(name);
                let domain = self
                    .tree
                    .entry(name.domain().to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(map) = domain {
                    map.insert(props, placeholder());
                }
                true
            }
            _ => false,
        }
    }

    /// Introspect one bean and merge its metadata into the tree
    ///
    /// With no remaining path this is a full dump of all aspects; otherwise
    /// the next path segment selects exactly one aspect and the segment after
    /// it filters that aspect to a single item.
    pub fn add_bean_info(&mut self, info: &MBeanInfo, name: &ObjectName) -> Result<()> {
        let mut path = self.path.clone();
        // The first two segments address the bean itself and were already
        // used to select it.
        path.pop();
        path.pop();

        let mut bean_map = Map::new();
        match path.pop() {
            None => {
                for aspect in AspectKind::ALL {
                    bean_map.insert(aspect.key().to_string(), aspect.extract(info, None)?);
                }
            }
            Some(segment) => {
                let aspect = AspectKind::from_key(&segment)
                    .ok_or_else(|| BridgeError::illegal_path_element(segment.clone()))?;
                let filter = path.pop();
                let value = aspect.extract(info, filter.as_deref())?;
                let empty = value.as_object().is_some_and(|m| m.is_empty());
                match (empty, filter) {
                    (true, Some(filter)) => {
                        return Err(BridgeError::invalid_path(format!(
                            "No '{}' entry named '{}' for bean '{}'",
                            aspect.key(),
                            filter,
                            name
                        )));
                    }
                    (true, None) => {} // no path into the aspect, nothing to add
                    (false, _) => {
                        bean_map.insert(aspect.key().to_string(), value);
                    }
                }
            }
        }

        self.merge_bean_entry(name, bean_map);
        Ok(())
    }

    /// Record an introspection failure for one bean
    ///
    /// Without a path the error becomes a structured `error` entry so other
    /// beans can still be listed; with a path the request is scoped to this
    /// bean alone and the error is propagated.
    pub fn add_exception(&mut self, name: &ObjectName, err: BridgeError) -> Result<()> {
        if !self.path.is_empty() {
            return Err(err);
        }
        let mut bean_map = Map::new();
        bean_map.insert(ERROR_KEY.to_string(), Value::String(err.to_string()));
        self.merge_bean_entry(name, bean_map);
        Ok(())
    }

    fn merge_bean_entry(&mut self, name: &ObjectName, bean_map: Map<String, Value>) {
        let props = self.props_key(name);
        let domain = self
            .tree
            .entry(name.domain().to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        let mut prune_domain = false;
        if let Value::Object(domain_map) = domain {
            if bean_map.is_empty() {
                domain_map.remove(&props);
            } else {
                domain_map.insert(props, Value::Object(bean_map));
            }
            prune_domain = domain_map.is_empty();
        }
        if prune_domain {
            self.tree.remove(name.domain());
        }
    }

    /// Navigate the stored path and truncate the result to `max_depth`
    ///
    /// Consumes the builder; the tree lives for exactly one request.
    pub fn truncate(mut self) -> Result<Value> {
        let navigated = self.navigate_path()?;
        if self.max_depth == 0 {
            return Ok(navigated);
        }
        Ok(truncate_value(navigated, self.max_depth))
    }

    fn navigate_path(&mut self) -> Result<Value> {
        let mut current = Value::Object(std::mem::take(&mut self.tree));
        while self.path.pop().is_some() {
            let map = match current {
                Value::Object(map) => map,
                leaf => return Ok(leaf),
            };
            if map.is_empty() {
                return Ok(Value::Object(map));
            }
            if map.len() > 1 {
                return Err(BridgeError::internal(format!(
                    "path navigation expects a unique descent point, found {} children",
                    map.len()
                )));
            }
            let (_, child) = map
                .into_iter()
                .next()
                .ok_or_else(|| BridgeError::internal("navigation map vanished"))?;
            current = child;
        }
        Ok(current)
    }
}

/// Replace map levels beyond the depth budget with the placeholder marker
///
/// `depth` counts the map levels still allowed; a map encountered with an
/// exhausted budget collapses to the marker instead of being omitted, so the
/// client can tell "data exists here" from "no data". Non-map values pass
/// through unchanged at any depth.
fn truncate_value(value: Value, depth: u32) -> Value {
    match value {
        Value::Object(map) => {
            if depth == 0 {
                return placeholder();
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, child)| (key, truncate_value(child, depth - 1)))
                    .collect(),
            )
        }
        other => other,
    }
}

/// Run one complete list request against a bean server
///
/// Applies the path's domain/key-property segments as a server-side bean
/// filter, drives the depth short-circuits, converts per-bean introspection
/// failures through [`TreeBuilder::add_exception`], and returns the navigated,
/// truncated tree.
pub fn build_list(
    server: &dyn MBeanServer,
    max_depth: u32,
    path: &[String],
    use_canonical_name: bool,
) -> Result<Value> {
    let mut builder = TreeBuilder::new(max_depth, path, use_canonical_name);
    let domain_filter = path.first();
    let props_filter = path.get(1);

    let mut matched = false;
    for name in server.query_names() {
        if let Some(domain) = domain_filter {
            if name.domain() != domain.as_str() {
                continue;
            }
        }
        if let Some(props) = props_filter {
            if &builder.props_key(&name) != props {
                continue;
            }
        }
        matched = true;
        if builder.handle_first_or_second_level(&name) {
            continue;
        }
        match server.bean_info(&name) {
            Ok(info) => builder.add_bean_info(&info, &name)?,
            Err(err) => builder.add_exception(&name, err)?,
        }
    }
    if !matched && !path.is_empty() {
        return Err(BridgeError::invalid_path(format!(
            "No bean matching path '{}'",
            path.join("/")
        )));
    }
    builder.truncate()
}

//! Navigation paths into the metadata tree
//!
//! A path addresses a sub-tree or leaf, e.g. `["java.lang", "type=Memory",
//! "attr", "HeapMemoryUsage", "used"]`. The segments are immutable; consuming
//! a path only advances a read cursor, so cloning is cheap and the caller's
//! sequence is never mutated.

/// Immutable path segments plus a read cursor
#[derive(Debug, Clone, Default)]
pub struct TreePath {
    segments: Vec<String>,
    cursor: usize,
}

impl TreePath {
    /// Create a path from the given segments
    pub fn new(segments: &[String]) -> Self {
        Self {
            segments: segments.to_vec(),
            cursor: 0,
        }
    }

    /// The empty path
    pub fn empty() -> Self {
        Self::default()
    }

    /// Consume and return the next segment, if any
    pub fn pop(&mut self) -> Option<String> {
        let segment = self.segments.get(self.cursor).cloned();
        if segment.is_some() {
            self.cursor += 1;
        }
        segment
    }

    /// The next segment without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.segments.get(self.cursor).map(String::as_str)
    }

    /// Number of unconsumed segments
    pub fn remaining(&self) -> usize {
        self.segments.len() - self.cursor
    }

    /// Whether all segments have been consumed (or none were given)
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_consumption() {
        let mut path = TreePath::new(&["attr".to_string(), "Uptime".to_string()]);
        assert_eq!(path.remaining(), 2);
        assert_eq!(path.peek(), Some("attr"));
        assert_eq!(path.pop(), Some("attr".to_string()));
        assert_eq!(path.pop(), Some("Uptime".to_string()));
        assert_eq!(path.pop(), None);
        assert!(path.is_empty());
    }

    #[test]
    fn test_clone_keeps_independent_cursor() {
        let mut path = TreePath::new(&["a".to_string(), "b".to_string()]);
        let mut clone = path.clone();
        path.pop();
        assert_eq!(path.remaining(), 1);
        assert_eq!(clone.remaining(), 2);
        assert_eq!(clone.pop(), Some("a".to_string()));
    }

    #[test]
    fn test_empty_path() {
        let mut path = TreePath::empty();
        assert!(path.is_empty());
        assert_eq!(path.pop(), None);
    }
}

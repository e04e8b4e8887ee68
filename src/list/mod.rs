//! Metadata tree builder ("list engine")
//!
//! Walks [`MBeanInfo`](crate::bean::MBeanInfo) descriptors and renders them
//! into a depth-bounded, optionally path-restricted JSON tree of the shape
//! `domain -> key properties -> aspect -> item -> detail`. One
//! [`TreeBuilder`] is created per list request and discarded after
//! [`TreeBuilder::truncate`].

mod builder;
mod path;
mod updater;

pub use builder::{build_list, TreeBuilder};
pub use path::TreePath;
pub use updater::{AspectKind, ERROR_KEY};

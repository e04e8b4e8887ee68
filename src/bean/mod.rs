//! Managed-bean model: descriptors, object names, and the bean server contract
//!
//! The bridge core never talks to a live management agent directly; it consumes
//! immutable [`MBeanInfo`] descriptors supplied by an [`MBeanServer`]
//! implementation and addresses beans through parsed [`ObjectName`]s.

mod name;
mod server;
mod types;

pub use name::ObjectName;
pub use server::{LocalBeanServer, MBeanServer};
pub use types::{
    MBeanAttributeInfo, MBeanInfo, MBeanNotificationInfo, MBeanOperationInfo, MBeanParameterInfo,
};

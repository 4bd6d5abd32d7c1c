//! Persistent installation state.

pub mod registry;

pub use registry::{RegistryError, VData, VersionRegistry};

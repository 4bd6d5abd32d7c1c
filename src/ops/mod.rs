//! High-level operations over the index, downloader, and registry.

pub mod error;
pub mod install;

pub use error::InstallError;
pub use install::{ExecuteReport, Installer};

//! Operation-level errors.

use thiserror::Error;

use crate::core::index::IndexError;
use crate::io::extract::ExtractError;
use crate::store::registry::RegistryError;

#[derive(Error, Debug)]
pub enum InstallError {
    /// The plan carries resolution errors and must not be executed.
    #[error("Plan has resolution errors: {0}")]
    InvalidPlan(String),

    /// Uninstall target has no registered versions.
    #[error("Package not installed: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Directive error: {0}")]
    Directive(String),
}

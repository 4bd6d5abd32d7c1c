//! Network and archive IO.

pub mod download;
pub mod extract;

pub use download::{download_all, DownloadError, TaskResult};
pub use extract::{extract_archive, ArchiveFormat, ExtractError};

//! Terminal output and progress reporting.
//!
//! Core logic never prints directly; it emits [`ProgressEvent`]s through a
//! [`Reporter`], so commands, tests, and any future frontend observe the
//! same stream of state changes.

pub mod progress;
pub mod reporter;

pub use progress::{Phase, ProgressEvent};
pub use reporter::{ConsoleReporter, NullReporter, Reporter};

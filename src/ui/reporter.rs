//! Reporter trait for dependency injection.
//!
//! Lets core logic report progress and status without being coupled to a
//! specific terminal implementation.

use std::io::{self, Write};

use crate::ui::progress::{Phase, ProgressEvent};

pub trait Reporter: Send + Sync {
    /// Observe one progress event.
    fn event(&self, event: &ProgressEvent);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);

    /// Display a final summary line.
    fn summary(&self, installed: usize, skipped: usize, failed: usize);
}

/// Line-oriented reporter writing to stdout/stderr.
///
/// Downloading events are throttled to whole 10% steps so a fast transfer
/// does not flood the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn event(&self, event: &ProgressEvent) {
        let mut out = io::stdout().lock();
        let line = match event.phase {
            Phase::Downloading => {
                let pct = (event.fraction * 100.0) as u32;
                if pct % 10 != 0 {
                    return;
                }
                format!("  {} {} {pct}%", event.phase, event.name)
            }
            Phase::Failed => match &event.detail {
                Some(reason) => format!("  {} {}: {reason}", event.phase, event.name),
                None => format!("  {} {}", event.phase, event.name),
            },
            _ => format!("  {} {}", event.phase, event.name),
        };
        let _ = writeln!(out, "{line}");
    }

    fn info(&self, msg: &str) {
        println!("{msg}");
    }

    fn warning(&self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn error(&self, msg: &str) {
        eprintln!("error: {msg}");
    }

    fn summary(&self, installed: usize, skipped: usize, failed: usize) {
        println!("{installed} installed, {skipped} skipped, {failed} failed");
    }
}

/// Reporter that drops everything. Used in tests and as a default when no
/// frontend is attached.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn event(&self, _event: &ProgressEvent) {}
    fn info(&self, _msg: &str) {}
    fn warning(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn summary(&self, _installed: usize, _skipped: usize, _failed: usize) {}
}

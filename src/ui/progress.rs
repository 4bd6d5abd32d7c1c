//! Progress event model.

use std::fmt;

/// Lifecycle phase of one plan node.
///
/// Phases advance monotonically; `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Downloading,
    Extracting,
    Installing,
    Done,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Pending => "pending",
            Phase::Downloading => "downloading",
            Phase::Extracting => "extracting",
            Phase::Installing => "installing",
            Phase::Done => "done",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One state change for one unit of work, keyed by `name@version`.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub name: String,
    pub phase: Phase,
    /// Completion within the current phase, in `[0.0, 1.0]`; meaningful for
    /// `Downloading`, where it tracks bytes received over content length.
    pub fraction: f64,
    /// Human-readable detail, e.g. a failure reason.
    pub detail: Option<String>,
}

impl ProgressEvent {
    pub fn new(name: &str, phase: Phase) -> Self {
        Self {
            name: name.to_string(),
            phase,
            fraction: if phase.is_terminal() { 1.0 } else { 0.0 },
            detail: None,
        }
    }

    pub fn with_fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Convenience constructor for a failure with a reason.
    pub fn failed(name: &str, reason: impl fmt::Display) -> Self {
        Self::new(name, Phase::Failed).with_detail(reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(Phase::Done.is_terminal());
        assert!(Phase::Failed.is_terminal());
        assert!(!Phase::Downloading.is_terminal());
    }

    #[test]
    fn fraction_is_clamped() {
        let ev = ProgressEvent::new("gcc@15.1.0", Phase::Downloading).with_fraction(1.7);
        assert_eq!(ev.fraction, 1.0);
        let ev = ProgressEvent::new("gcc@15.1.0", Phase::Downloading).with_fraction(-0.2);
        assert_eq!(ev.fraction, 0.0);
    }

    #[test]
    fn failed_carries_reason() {
        let ev = ProgressEvent::failed("gcc@15.1.0", "checksum mismatch");
        assert_eq!(ev.phase, Phase::Failed);
        assert_eq!(ev.detail.as_deref(), Some("checksum mismatch"));
    }
}

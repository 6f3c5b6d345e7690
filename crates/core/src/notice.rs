//! Short-lived user-facing messages.

use std::time::Duration;

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(5000);

/// Label of the dismiss action attached to every notice.
pub const DISMISS_LABEL: &str = "Fechar";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Style class a renderer attaches to the notice, e.g. `snackbar-error`.
    pub fn panel_class(self) -> String {
        format!("snackbar-{}", self.as_str())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An auto-dismissing message describing an operation outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransientNotice {
    pub message: String,
    pub severity: Severity,
    pub action: &'static str,
    pub duration: Duration,
}

impl TransientNotice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            action: DISMISS_LABEL,
            duration: NOTICE_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }
}

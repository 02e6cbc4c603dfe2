use std::fmt;

use log::warn;
use permkit_dialog::DialogError;
use permkit_permission::{Capability, PermissionError};

/// A failure the coordinator absorbed instead of surfacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A status check failed; the capability was recorded as unavailable.
    CheckFailed {
        /// Capability being checked.
        capability: Capability,
        /// Backend error.
        error: PermissionError,
    },
    /// A permission request failed; the capability was recorded as unavailable.
    RequestFailed {
        /// Capability being requested.
        capability: Capability,
        /// Backend error.
        error: PermissionError,
    },
    /// The OS settings app could not be opened.
    OpenSettingsFailed {
        /// Backend error.
        error: PermissionError,
    },
    /// The settings alert could not be shown.
    AlertFailed {
        /// Presenter error.
        error: DialogError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckFailed { capability, error } => {
                write!(f, "{capability} permission check failed: {error}")
            }
            Self::RequestFailed { capability, error } => {
                write!(f, "{capability} permission request failed: {error}")
            }
            Self::OpenSettingsFailed { error } => write!(f, "cannot open settings: {error}"),
            Self::AlertFailed { error } => write!(f, "cannot show settings alert: {error}"),
        }
    }
}

/// Receives the failures the coordinator swallows.
pub trait DiagnosticsSink: Send + Sync {
    /// Record one failure.
    fn record(&self, diagnostic: Diagnostic);
}

/// Writes diagnostics to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_capability() {
        let diagnostic = Diagnostic::RequestFailed {
            capability: Capability::Notification,
            error: PermissionError::NotSupported,
        };
        assert_eq!(
            diagnostic.to_string(),
            "notification permission request failed: operation not supported on this platform"
        );

        let diagnostic = Diagnostic::OpenSettingsFailed {
            error: PermissionError::Platform("refused".into()),
        };
        assert_eq!(
            diagnostic.to_string(),
            "cannot open settings: platform error: refused"
        );
    }
}

use thiserror::Error;

/// Errors that can occur when showing dialogs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The user dismissed the dialog without choosing an action.
    #[error("Dialog dismissed")]
    Cancelled,

    /// An error occurred in the underlying platform implementation.
    #[error("Platform error: {0}")]
    PlatformError(String),

    /// Dialogs are not supported on this platform.
    #[error("Not supported: {0}")]
    NotSupported(String),
}

//! Platform-specific permission implementations.

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

use crate::{Capability, NotificationOptions, PermissionBackend, PermissionError, PermissionStatus};

// Re-export platform implementations
#[cfg(target_os = "windows")]
use self::windows::{check, open_settings, request};

#[cfg(target_os = "linux")]
use self::linux::{check, open_settings, request};

/// [`PermissionBackend`] backed by the platform permission API of the
/// current target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBackend {
    _priv: (),
}

impl SystemBackend {
    /// Create a backend for the current platform.
    #[must_use]
    pub const fn new() -> Self {
        Self { _priv: () }
    }
}

impl PermissionBackend for SystemBackend {
    async fn check(&self, capability: Capability) -> Result<PermissionStatus, PermissionError> {
        check(capability).await
    }

    async fn request(
        &self,
        capability: Capability,
        options: NotificationOptions,
    ) -> Result<PermissionStatus, PermissionError> {
        request(capability, options).await
    }

    async fn open_settings(&self) -> Result<(), PermissionError> {
        open_settings().await
    }
}

// Fallback for unsupported platforms (compile-time stub)
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
async fn check(_capability: Capability) -> Result<PermissionStatus, PermissionError> {
    Ok(PermissionStatus::Unavailable)
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
async fn request(
    _capability: Capability,
    _options: NotificationOptions,
) -> Result<PermissionStatus, PermissionError> {
    Err(PermissionError::NotSupported)
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
async fn open_settings() -> Result<(), PermissionError> {
    Err(PermissionError::NotSupported)
}

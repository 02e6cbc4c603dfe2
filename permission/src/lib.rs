//! Camera and notification permission access.
//!
//! This crate provides the closed status model for the two capabilities a
//! permission settings screen tracks, and a [`PermissionBackend`] seam over
//! the platform permission API: a non-prompting check, a possibly prompting
//! request, and a redirect to the OS settings app.

#![warn(missing_docs)]

/// Platform-specific implementations.
pub mod sys;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub use sys::SystemBackend;

/// An OS-guarded permission domain tracked by the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Access to the device camera.
    Camera,
    /// Permission to post notifications.
    Notification,
}

impl Capability {
    /// Both capabilities, in the order they are checked.
    pub const ALL: [Self; 2] = [Self::Camera, Self::Notification];

    /// Lowercase name used in logs and raw platform payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera" => Ok(Self::Camera),
            "notification" | "notifications" => Ok(Self::Notification),
            other => Err(PermissionError::Platform(format!(
                "unknown capability: {other}"
            ))),
        }
    }
}

/// The status the platform reports for a capability.
///
/// Deserialization goes through [`PermissionStatus::from_raw`], so
/// unrecognized platform values become [`PermissionStatus::Unavailable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// The capability is not available on this device, or the platform
    /// could not be queried.
    #[default]
    Unavailable,
    /// Not granted yet; a request may still show the system prompt.
    Denied,
    /// Permanently denied; only the OS settings app can change it.
    Blocked,
    /// Granted by the user.
    Granted,
    /// Granted with restrictions (e.g. a limited photo selection on iOS).
    Limited,
}

impl PermissionStatus {
    /// Normalize a raw platform status string.
    ///
    /// Matching ignores case and surrounding whitespace. Anything that is not
    /// one of the five known statuses becomes `Unavailable`.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "denied" => Self::Denied,
            "blocked" => Self::Blocked,
            "granted" => Self::Granted,
            "limited" => Self::Limited,
            _ => Self::Unavailable,
        }
    }

    /// Lowercase name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Denied => "denied",
            Self::Blocked => "blocked",
            Self::Granted => "granted",
            Self::Limited => "limited",
        }
    }

    /// Returns `true` if the permission is fully granted.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl<'de> Deserialize<'de> for PermissionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert styles asked for when requesting the notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationOptions {
    /// Show alerts/banners.
    pub alert: bool,
    /// Play sounds.
    pub sound: bool,
    /// Update the app badge.
    pub badge: bool,
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            alert: true,
            sound: true,
            badge: false,
        }
    }
}

/// Errors reported by a permission backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The operation is not supported on this platform.
    #[error("operation not supported on this platform")]
    NotSupported,
    /// The platform permission service could not be reached.
    #[error("permission service unavailable: {0}")]
    Unavailable(String),
    /// The platform reported an error.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Access to the platform permission API.
///
/// Implementations must never show a prompt from [`check`](Self::check).
pub trait PermissionBackend {
    /// Query the current status without prompting.
    ///
    /// # Errors
    /// Returns an error if the platform permission service is unreachable.
    fn check(
        &self,
        capability: Capability,
    ) -> impl Future<Output = Result<PermissionStatus, PermissionError>>;

    /// Request the capability, which may show the system prompt.
    ///
    /// `options` only applies to [`Capability::Notification`].
    ///
    /// # Errors
    /// Returns an error if the request could not be issued.
    fn request(
        &self,
        capability: Capability,
        options: NotificationOptions,
    ) -> impl Future<Output = Result<PermissionStatus, PermissionError>>;

    /// Open this app's page in the OS settings app.
    ///
    /// # Errors
    /// Returns an error if the platform refuses to open the settings app.
    fn open_settings(&self) -> impl Future<Output = Result<(), PermissionError>>;
}

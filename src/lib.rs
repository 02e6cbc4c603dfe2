//! # Permkit
//!
//! Camera and notification permission settings for apps that show an in-app
//! permission screen.
//!
//! Permkit keeps the two permission switches in sync with the OS: it checks
//! both permissions at startup and whenever the app returns to the
//! foreground, requests a permission when the user flips its switch on, and
//! sends the user to the OS settings app when a permission is already granted
//! or permanently blocked.
//!
//! ## Features
//!
//! - `permission`: Permission statuses and platform permission access.
//! - `lifecycle`: Foreground/background lifecycle notifications.
//! - `dialog`: Native alert dialogs with custom actions.
//! - `coordinator`: The permission state coordinator (default; enables the
//!   three above).
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! permkit = "0.1"
//! ```
//!
//! ```rust,no_run
//! use permkit::coordinator::PermissionCoordinator;
//! use permkit::dialog::NativeAlertPresenter;
//! use permkit::permission::{Capability, SystemBackend};
//!
//! async fn settings_screen() {
//!     let coordinator = PermissionCoordinator::new(SystemBackend::new(), NativeAlertPresenter);
//!     coordinator.initialize().await;
//!     if !coordinator.camera_permission().is_granted() {
//!         coordinator.toggle(Capability::Camera).await;
//!     }
//! }
//! ```

#[cfg(feature = "coordinator")]
pub use permkit_coordinator as coordinator;

#[cfg(feature = "dialog")]
pub use permkit_dialog as dialog;

#[cfg(feature = "lifecycle")]
pub use permkit_lifecycle as lifecycle;

#[cfg(feature = "permission")]
pub use permkit_permission as permission;

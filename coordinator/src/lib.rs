//! Permission state coordinator for an in-app permission settings screen.
//!
//! [`PermissionCoordinator`] owns the camera and notification permission
//! statuses. It checks them at startup and whenever the app returns to the
//! foreground, turns a switch toggle into either a permission request or a
//! redirect to the OS settings app, and pushes every state change to
//! subscribed listeners.
//!
//! ```no_run
//! use permkit_coordinator::PermissionCoordinator;
//! use permkit_dialog::NativeAlertPresenter;
//! use permkit_lifecycle::AppLifecycle;
//! use permkit_permission::{Capability, SystemBackend};
//!
//! # async fn app() {
//! let lifecycle = AppLifecycle::new();
//! let coordinator = PermissionCoordinator::new(SystemBackend::new(), NativeAlertPresenter);
//!
//! let _subscription = coordinator.subscribe(|state| {
//!     println!("{} permission(s) needed", state.permissions_needed());
//! });
//!
//! let driver = coordinator.clone();
//! let lifecycle_task = async move { driver.run(&lifecycle).await };
//! let toggle = coordinator.toggle(Capability::Camera);
//! futures::join!(lifecycle_task, toggle);
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod coordinator;
mod diagnostics;
mod listeners;
mod state;

pub use config::{ConfigError, CoordinatorConfig};
pub use coordinator::{AlertResponse, CoordinatorBuilder, PermissionCoordinator, ToggleOutcome};
pub use diagnostics::{Diagnostic, DiagnosticsSink, LogDiagnostics};
pub use listeners::Subscription;
pub use state::CoordinatorState;

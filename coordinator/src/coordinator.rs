use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use permkit_dialog::{ActionRole, AlertPresenter, DialogError};
use permkit_lifecycle::{AppState, LifecycleNotifier};
use permkit_permission::{Capability, PermissionBackend, PermissionStatus};

use crate::listeners::Listeners;
use crate::{
    CoordinatorConfig, CoordinatorState, Diagnostic, DiagnosticsSink, LogDiagnostics, Subscription,
};

/// What the user picked in the settings-redirect alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertResponse {
    /// The alert was dismissed.
    Cancel,
    /// The user chose to open the OS settings app.
    OpenSettings,
    /// The alert could not be shown.
    Failed,
}

/// The path a [`PermissionCoordinator::toggle`] call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The capability was granted, so opening the OS settings app was
    /// attempted.
    OpenedSettings {
        /// Whether the settings app actually opened. A failure has already
        /// been recorded as a diagnostic.
        opened: bool,
    },
    /// A permission request was issued.
    Requested {
        /// Status the request resolved to (now stored).
        status: PermissionStatus,
        /// Response to the settings alert, if the request came back blocked.
        alert: Option<AlertResponse>,
    },
}

struct Inner<B, A> {
    backend: B,
    alerts: A,
    config: CoordinatorConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
    state: Mutex<CoordinatorState>,
    listeners: Listeners,
}

/// Single authority over the camera and notification permission state.
///
/// Clones share the same state, so one instance can be handed to the
/// presentation layer and to the task that drives [`run`](Self::run).
pub struct PermissionCoordinator<B, A> {
    inner: Arc<Inner<B, A>>,
}

impl<B, A> Clone for PermissionCoordinator<B, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, A> fmt::Debug for PermissionCoordinator<B, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionCoordinator")
            .field("state", &self.state())
            .field("listeners", &self.inner.listeners)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`PermissionCoordinator`].
pub struct CoordinatorBuilder<B, A> {
    backend: B,
    alerts: A,
    config: CoordinatorConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl<B, A> fmt::Debug for CoordinatorBuilder<B, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinatorBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<B, A> CoordinatorBuilder<B, A> {
    /// Use the given texts and request options.
    #[must_use]
    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Record swallowed failures in `sink` instead of the log.
    #[must_use]
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Build the coordinator. No OS calls are made.
    #[must_use]
    pub fn build(self) -> PermissionCoordinator<B, A> {
        PermissionCoordinator {
            inner: Arc::new(Inner {
                backend: self.backend,
                alerts: self.alerts,
                config: self.config,
                diagnostics: self.diagnostics,
                state: Mutex::new(CoordinatorState::default()),
                listeners: Listeners::default(),
            }),
        }
    }
}

impl<B, A> PermissionCoordinator<B, A> {
    /// Start building a coordinator over a permission backend and an alert
    /// presenter.
    pub fn builder(backend: B, alerts: A) -> CoordinatorBuilder<B, A> {
        CoordinatorBuilder {
            backend,
            alerts,
            config: CoordinatorConfig::default(),
            diagnostics: Arc::new(LogDiagnostics),
        }
    }

    /// A coordinator with the default config that logs swallowed failures.
    pub fn new(backend: B, alerts: A) -> Self {
        Self::builder(backend, alerts).build()
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// A consistent snapshot of the whole state.
    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        *self.lock()
    }

    /// Current camera permission status.
    #[must_use]
    pub fn camera_permission(&self) -> PermissionStatus {
        self.state().camera()
    }

    /// Current notification permission status.
    #[must_use]
    pub fn notification_permission(&self) -> PermissionStatus {
        self.state().notification()
    }

    /// Number of capabilities that are not granted.
    #[must_use]
    pub fn permissions_needed(&self) -> u8 {
        self.state().permissions_needed()
    }

    /// Current status of one capability.
    #[must_use]
    pub fn status(&self, capability: Capability) -> PermissionStatus {
        self.state().status(capability)
    }

    /// The config in use.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    /// Call `listener` with the new state after every state write.
    ///
    /// Listeners run synchronously on the task that performed the write,
    /// after the state lock is released.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CoordinatorState) + Send + Sync + 'static,
    {
        self.inner.listeners.add(Arc::new(listener))
    }

    fn write(&self, capability: Capability, status: PermissionStatus) {
        let snapshot = {
            let mut state = self.lock();
            state.set(capability, status);
            *state
        };
        debug!(
            "{capability} permission is {status}, {} needed",
            snapshot.permissions_needed()
        );
        self.inner.listeners.notify(&snapshot);
    }

    fn record(&self, diagnostic: Diagnostic) {
        self.inner.diagnostics.record(diagnostic);
    }
}

impl<B, A> PermissionCoordinator<B, A>
where
    B: PermissionBackend,
    A: AlertPresenter,
{
    /// Check both capabilities, camera first, and store the results.
    ///
    /// Checks never prompt. A failed check stores `Unavailable`.
    pub async fn initialize(&self) {
        for capability in Capability::ALL {
            self.check(capability).await;
        }
    }

    /// Re-check both capabilities after the app returned to the foreground.
    pub async fn refresh_on_foreground(&self) {
        debug!("app became active, re-checking permissions");
        self.initialize().await;
    }

    /// React to a lifecycle transition. Only [`AppState::Active`] re-checks.
    pub async fn handle_app_state(&self, state: AppState) {
        if state.is_active() {
            self.refresh_on_foreground().await;
        }
    }

    /// Subscribe to `notifier`, initialize, then re-check on every foreground
    /// transition until the notifier closes.
    pub async fn run<N>(&self, notifier: &N)
    where
        N: LifecycleNotifier + ?Sized,
    {
        // Subscribe first so a transition during the initial checks is kept
        let events = notifier.subscribe();
        self.initialize().await;
        while let Some(state) = events.next().await {
            self.handle_app_state(state).await;
        }
        debug!("lifecycle notifier closed");
    }

    /// The user flipped the switch for `capability`.
    ///
    /// Granted capabilities open the OS settings app. Anything else issues a
    /// request and stores its result; a request that comes back blocked shows
    /// the settings alert.
    pub async fn toggle(&self, capability: Capability) -> ToggleOutcome {
        let current = self.status(capability);
        debug!("toggling {capability} permission (currently {current})");

        if current.is_granted() {
            let opened = self.open_settings().await;
            return ToggleOutcome::OpenedSettings { opened };
        }

        let status = match self
            .inner
            .backend
            .request(capability, self.inner.config.notification_options)
            .await
        {
            Ok(status) => status,
            Err(error) => {
                self.record(Diagnostic::RequestFailed { capability, error });
                PermissionStatus::Unavailable
            }
        };
        self.write(capability, status);

        let alert = if status == PermissionStatus::Blocked {
            Some(self.show_settings_alert().await)
        } else {
            None
        };
        ToggleOutcome::Requested { status, alert }
    }

    /// Open the OS settings app. Failures are recorded and swallowed.
    ///
    /// Returns `true` if the settings app was opened.
    pub async fn open_settings(&self) -> bool {
        match self.inner.backend.open_settings().await {
            Ok(()) => true,
            Err(error) => {
                self.record(Diagnostic::OpenSettingsFailed { error });
                false
            }
        }
    }

    async fn check(&self, capability: Capability) {
        let status = match self.inner.backend.check(capability).await {
            Ok(status) => status,
            Err(error) => {
                self.record(Diagnostic::CheckFailed { capability, error });
                PermissionStatus::Unavailable
            }
        };
        self.write(capability, status);
    }

    async fn show_settings_alert(&self) -> AlertResponse {
        let dialog = self.inner.config.settings_alert();
        match self.inner.alerts.present(&dialog).await {
            Ok(index)
                if dialog
                    .actions
                    .get(index)
                    .is_some_and(|action| action.role != ActionRole::Cancel) =>
            {
                self.open_settings().await;
                AlertResponse::OpenSettings
            }
            Ok(_) | Err(DialogError::Cancelled) => AlertResponse::Cancel,
            Err(error) => {
                self.record(Diagnostic::AlertFailed { error });
                AlertResponse::Failed
            }
        }
    }
}

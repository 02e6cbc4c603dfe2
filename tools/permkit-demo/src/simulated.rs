//! In-memory permission backend driven from the terminal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::info;
use permkit_permission::{
    Capability, NotificationOptions, PermissionBackend, PermissionError, PermissionStatus,
};

use crate::terminal;

/// Pretends to be the OS: keeps one status per capability and asks on the
/// terminal whenever a request would show the system prompt.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    statuses: Arc<Mutex<HashMap<Capability, PermissionStatus>>>,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.set(Capability::Camera, PermissionStatus::Denied);
        backend.set(Capability::Notification, PermissionStatus::Denied);
        backend
    }

    /// Change a status as if edited in the OS settings app.
    pub fn set(&self, capability: Capability, status: PermissionStatus) {
        self.statuses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(capability, status);
    }

    fn get(&self, capability: Capability) -> PermissionStatus {
        self.statuses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&capability)
            .copied()
            .unwrap_or_default()
    }
}

impl PermissionBackend for SimulatedBackend {
    async fn check(&self, capability: Capability) -> Result<PermissionStatus, PermissionError> {
        Ok(self.get(capability))
    }

    async fn request(
        &self,
        capability: Capability,
        options: NotificationOptions,
    ) -> Result<PermissionStatus, PermissionError> {
        let current = self.get(capability);
        if matches!(current, PermissionStatus::Blocked | PermissionStatus::Granted) {
            return Ok(current);
        }

        let question = match capability {
            Capability::Camera => "Allow this app to use the camera?".to_owned(),
            Capability::Notification => format!(
                "Allow this app to send notifications (alert: {}, sound: {}, badge: {})?",
                options.alert, options.sound, options.badge
            ),
        };
        let status = match terminal::ask(&question, &["allow", "deny", "never"])
            .map_err(|e| PermissionError::Platform(e.to_string()))?
        {
            0 => PermissionStatus::Granted,
            1 => PermissionStatus::Denied,
            _ => PermissionStatus::Blocked,
        };
        self.set(capability, status);
        Ok(status)
    }

    async fn open_settings(&self) -> Result<(), PermissionError> {
        info!("opening simulated settings app");
        println!("(settings app) use `set <camera|notification> <status>`, then `foreground`");
        Ok(())
    }
}

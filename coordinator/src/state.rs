use permkit_permission::{Capability, PermissionStatus};

/// Snapshot of the coordinator's permission state.
///
/// `permissions_needed` is derived from the two statuses on every write, so a
/// snapshot never pairs a stale count with fresh statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinatorState {
    camera: PermissionStatus,
    notification: PermissionStatus,
    permissions_needed: u8,
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self::new(PermissionStatus::Unavailable, PermissionStatus::Unavailable)
    }
}

impl CoordinatorState {
    /// A state holding the given statuses.
    #[must_use]
    pub const fn new(camera: PermissionStatus, notification: PermissionStatus) -> Self {
        Self {
            camera,
            notification,
            permissions_needed: needed(camera, notification),
        }
    }

    /// Camera permission status.
    #[must_use]
    pub const fn camera(&self) -> PermissionStatus {
        self.camera
    }

    /// Notification permission status.
    #[must_use]
    pub const fn notification(&self) -> PermissionStatus {
        self.notification
    }

    /// Number of tracked capabilities that are not granted (0 to 2).
    #[must_use]
    pub const fn permissions_needed(&self) -> u8 {
        self.permissions_needed
    }

    /// Status of one capability.
    #[must_use]
    pub const fn status(&self, capability: Capability) -> PermissionStatus {
        match capability {
            Capability::Camera => self.camera,
            Capability::Notification => self.notification,
        }
    }

    /// A copy of this state with one capability's status replaced.
    #[must_use]
    pub const fn with_status(self, capability: Capability, status: PermissionStatus) -> Self {
        match capability {
            Capability::Camera => Self::new(status, self.notification),
            Capability::Notification => Self::new(self.camera, status),
        }
    }

    pub(crate) fn set(&mut self, capability: Capability, status: PermissionStatus) {
        *self = self.with_status(capability, status);
    }
}

const fn needed(camera: PermissionStatus, notification: PermissionStatus) -> u8 {
    (!camera.is_granted()) as u8 + (!notification.is_granted()) as u8
}

//! Linux permission implementation.
//!
//! Traditional Linux desktops have no runtime permission prompts. Access is
//! decided at the system level:
//! - Camera: device nodes in /dev, or the camera desktop portal when sandboxed
//! - Notifications: whether a notification server owns the D-Bus name
//!
//! Checking and requesting therefore report the same thing: whether the
//! capability is usable at all.

use zbus::Connection;

use crate::{Capability, NotificationOptions, PermissionError, PermissionStatus};

const PORTAL_SERVICE: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_PORTAL: &str = "org.freedesktop.portal.Camera";

const NOTIFICATIONS_SERVICE: &str = "org.freedesktop.Notifications";
const NOTIFICATIONS_PATH: &str = "/org/freedesktop/Notifications";

pub(crate) async fn check(capability: Capability) -> Result<PermissionStatus, PermissionError> {
    let connection = Connection::session()
        .await
        .map_err(|e| PermissionError::Unavailable(format!("D-Bus connection failed: {e}")))?;

    match capability {
        Capability::Camera => Ok(check_camera(&connection).await),
        Capability::Notification => Ok(check_notifications(&connection).await),
    }
}

pub(crate) async fn request(
    capability: Capability,
    _options: NotificationOptions,
) -> Result<PermissionStatus, PermissionError> {
    check(capability).await
}

pub(crate) async fn open_settings() -> Result<(), PermissionError> {
    // No desktop-independent settings page for per-app permissions
    Err(PermissionError::NotSupported)
}

async fn check_camera(connection: &Connection) -> PermissionStatus {
    let present = match camera_portal_present(connection).await {
        Ok(present) => present,
        // Not sandboxed, or no portal running: fall back to device nodes
        Err(_) => has_video_device(),
    };

    if present {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Unavailable
    }
}

async fn camera_portal_present(connection: &Connection) -> zbus::Result<bool> {
    let reply: zbus::zvariant::OwnedValue = connection
        .call_method(
            Some(PORTAL_SERVICE),
            PORTAL_PATH,
            Some("org.freedesktop.DBus.Properties"),
            "Get",
            &(CAMERA_PORTAL, "IsCameraPresent"),
        )
        .await?
        .body()
        .deserialize()?;

    Ok(bool::try_from(reply)?)
}

fn has_video_device() -> bool {
    std::fs::read_dir("/dev").is_ok_and(|entries| {
        entries
            .filter_map(Result::ok)
            .any(|entry| entry.file_name().to_string_lossy().starts_with("video"))
    })
}

async fn check_notifications(connection: &Connection) -> PermissionStatus {
    let reply = connection
        .call_method(
            Some(NOTIFICATIONS_SERVICE),
            NOTIFICATIONS_PATH,
            Some(NOTIFICATIONS_SERVICE),
            "GetServerInformation",
            &(),
        )
        .await;

    match reply {
        Ok(_) => PermissionStatus::Granted,
        Err(_) => PermissionStatus::Unavailable,
    }
}

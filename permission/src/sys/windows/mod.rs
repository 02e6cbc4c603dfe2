//! Windows permission implementation using WinRT.

use windows::Devices::Enumeration::{DeviceAccessInformation, DeviceAccessStatus, DeviceClass};
use windows::Foundation::Uri;
use windows::System::Launcher;
use windows::core::HSTRING;

use crate::{Capability, NotificationOptions, PermissionError, PermissionStatus};

// The app's own page lists both camera and notification access; unpackaged
// apps have no such page, so the privacy overview is the fallback.
const SETTINGS_URIS: [&str; 2] = ["ms-settings:appsfeatures-app", "ms-settings:privacy"];

pub(crate) async fn check(capability: Capability) -> Result<PermissionStatus, PermissionError> {
    match capability {
        Capability::Camera => check_camera(),
        // Toast notifications are implicit for desktop apps
        Capability::Notification => Ok(PermissionStatus::Granted),
    }
}

pub(crate) async fn request(
    capability: Capability,
    _options: NotificationOptions,
) -> Result<PermissionStatus, PermissionError> {
    // Desktop apps cannot prompt; the privacy page is the only way to change access
    check(capability).await
}

pub(crate) async fn open_settings() -> Result<(), PermissionError> {
    let mut last = PermissionError::NotSupported;
    for uri in SETTINGS_URIS {
        match launch(uri) {
            Ok(()) => return Ok(()),
            Err(e) => last = e,
        }
    }
    Err(last)
}

fn check_camera() -> Result<PermissionStatus, PermissionError> {
    let access = DeviceAccessInformation::CreateFromDeviceClass(DeviceClass::VideoCapture)
        .map_err(|e| PermissionError::Unavailable(e.message().to_string()))?;
    let status = access
        .CurrentStatus()
        .map_err(|e| PermissionError::Platform(e.message().to_string()))?;

    Ok(match status {
        DeviceAccessStatus::Allowed => PermissionStatus::Granted,
        DeviceAccessStatus::DeniedByUser => PermissionStatus::Denied,
        DeviceAccessStatus::DeniedBySystem => PermissionStatus::Blocked,
        _ => PermissionStatus::Unavailable,
    })
}

fn launch(uri: &str) -> Result<(), PermissionError> {
    let target = Uri::CreateUri(&HSTRING::from(uri))
        .map_err(|e| PermissionError::Platform(e.message().to_string()))?;
    let launched = Launcher::LaunchUriAsync(&target)
        .map_err(|e| PermissionError::Platform(e.message().to_string()))?
        .get()
        .map_err(|e| PermissionError::Platform(e.message().to_string()))?;

    if launched {
        Ok(())
    } else {
        Err(PermissionError::Platform(format!("settings app refused {uri}")))
    }
}

use std::path::Path;

use permkit_dialog::{Dialog, DialogAction, DialogType};
use permkit_permission::NotificationOptions;
use serde::{Deserialize, Serialize};

/// Errors loading a [`CoordinatorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for the config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Texts and request options used by the coordinator.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Title of the settings-redirect alert.
    pub alert_title: String,
    /// Body of the settings-redirect alert.
    pub alert_message: String,
    /// Label of the button that dismisses the alert.
    pub cancel_label: String,
    /// Label of the button that opens the OS settings app.
    pub open_settings_label: String,
    /// Alert styles asked for when requesting notifications.
    pub notification_options: NotificationOptions,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            alert_title: "Permission Required".to_owned(),
            alert_message: "The app permissions can only be changed from the app settings."
                .to_owned(),
            cancel_label: "Cancel".to_owned(),
            open_settings_label: "Open App Settings".to_owned(),
            notification_options: NotificationOptions::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Parse a JSON config.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if `json` is not a valid config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The alert shown when a permission is blocked.
    ///
    /// It offers exactly two actions: cancel first, then open settings, and
    /// cannot be dismissed by tapping outside.
    #[must_use]
    pub fn settings_alert(&self) -> Dialog {
        Dialog::new(&self.alert_title, &self.alert_message)
            .with_type(DialogType::Warning)
            .with_action(DialogAction::cancel(&self.cancel_label))
            .with_action(DialogAction::new(&self.open_settings_label))
            .cancelable(false)
    }
}

#[cfg(test)]
mod tests {
    use permkit_dialog::ActionRole;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            CoordinatorConfig::from_json_str(r#"{"alert_title": "Camera access"}"#).unwrap();
        assert_eq!(config.alert_title, "Camera access");
        assert_eq!(config.cancel_label, "Cancel");
        assert_eq!(config.notification_options, NotificationOptions::default());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = CoordinatorConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CoordinatorConfig::load("/nonexistent/permkit.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn settings_alert_has_cancel_and_open_settings() {
        let dialog = CoordinatorConfig::default().settings_alert();
        assert_eq!(dialog.title, "Permission Required");
        assert!(!dialog.cancelable);
        assert_eq!(dialog.actions.len(), 2);
        assert_eq!(dialog.actions[0].label, "Cancel");
        assert_eq!(dialog.actions[0].role, ActionRole::Cancel);
        assert_eq!(dialog.actions[1].label, "Open App Settings");
        assert_eq!(dialog.actions[1].role, ActionRole::Default);
    }
}

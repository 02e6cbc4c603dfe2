//! Native alert dialogs with custom actions.
//!
//! A [`Dialog`] is a platform-independent description of a blocking alert:
//! title, message and an ordered list of [`DialogAction`]s. An
//! [`AlertPresenter`] shows it and reports which action the user picked.

#![warn(missing_docs)]

mod error;
/// Platform-specific implementations.
pub mod sys;

use std::future::Future;

pub use error::DialogError;
pub use sys::NativeAlertPresenter;

/// Types of dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogType {
    /// Information dialog.
    #[default]
    Info,
    /// Warning dialog.
    Warning,
    /// Error dialog.
    Error,
}

/// How an action button is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionRole {
    /// A regular (usually primary) action.
    #[default]
    Default,
    /// Dismisses the dialog without doing anything.
    Cancel,
    /// An action that destroys data.
    Destructive,
}

/// A button in a [`Dialog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogAction {
    /// Button label.
    pub label: String,
    /// Rendering role.
    pub role: ActionRole,
}

impl DialogAction {
    /// A regular action.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ActionRole::Default,
        }
    }

    /// A cancel action.
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ActionRole::Cancel,
        }
    }
}

/// A native alert dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Title of the dialog.
    pub title: String,
    /// Message content of the dialog.
    pub message: String,
    /// Type/Icon of the dialog.
    pub type_: DialogType,
    /// Buttons, in display order.
    pub actions: Vec<DialogAction>,
    /// Whether tapping outside the dialog dismisses it.
    pub cancelable: bool,
}

impl Dialog {
    /// Create a new dialog with default Info type and no actions.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            type_: DialogType::Info,
            actions: Vec::new(),
            cancelable: true,
        }
    }

    /// Set the dialog type.
    #[must_use]
    pub fn with_type(mut self, type_: DialogType) -> Self {
        self.type_ = type_;
        self
    }

    /// Append an action button.
    #[must_use]
    pub fn with_action(mut self, action: DialogAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Set whether the dialog can be dismissed without picking an action.
    #[must_use]
    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Index of the first cancel action, if any.
    #[must_use]
    pub fn cancel_index(&self) -> Option<usize> {
        self.actions
            .iter()
            .position(|action| action.role == ActionRole::Cancel)
    }

    /// Index of the first non-cancel action, if any.
    #[must_use]
    pub fn primary_index(&self) -> Option<usize> {
        self.actions
            .iter()
            .position(|action| action.role != ActionRole::Cancel)
    }

    /// Index of the action with the given label.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.actions.iter().position(|action| action.label == label)
    }
}

/// Shows dialogs to the user.
pub trait AlertPresenter {
    /// Show the dialog and wait for the user to pick an action.
    ///
    /// Returns the index of the chosen action in [`Dialog::actions`].
    ///
    /// # Errors
    /// Returns [`DialogError::Cancelled`] if the dialog was dismissed without
    /// an action, or another error if it could not be shown.
    fn present(&self, dialog: &Dialog) -> impl Future<Output = Result<usize, DialogError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_dialog() -> Dialog {
        Dialog::new("Permission Required", "Change it in settings.")
            .with_action(DialogAction::cancel("Cancel"))
            .with_action(DialogAction::new("Open App Settings"))
            .cancelable(false)
    }

    #[test]
    fn builder_keeps_action_order() {
        let dialog = settings_dialog();
        let labels: Vec<_> = dialog.actions.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["Cancel", "Open App Settings"]);
        assert!(!dialog.cancelable);
        assert_eq!(dialog.type_, DialogType::Info);
    }

    #[test]
    fn role_lookups() {
        let dialog = settings_dialog();
        assert_eq!(dialog.cancel_index(), Some(0));
        assert_eq!(dialog.primary_index(), Some(1));
        assert_eq!(dialog.index_of("Open App Settings"), Some(1));
        assert_eq!(dialog.index_of("OK"), None);

        let bare = Dialog::new("t", "m");
        assert_eq!(bare.cancel_index(), None);
        assert_eq!(bare.primary_index(), None);
    }
}

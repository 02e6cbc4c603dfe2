use crate::{AlertPresenter, Dialog, DialogError};

/// Placeholder presenter for mobile targets.
///
/// Mobile apps show alerts through their UI toolkit; implement
/// [`AlertPresenter`] there instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAlertPresenter;

impl AlertPresenter for NativeAlertPresenter {
    async fn present(&self, _dialog: &Dialog) -> Result<usize, DialogError> {
        Err(DialogError::NotSupported(
            "native alerts are provided by the app UI on mobile".into(),
        ))
    }
}

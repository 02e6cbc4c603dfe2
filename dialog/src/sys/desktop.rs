use crate::{AlertPresenter, Dialog, DialogError, DialogType};
use futures::channel::oneshot;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Shows dialogs with the desktop message box.
///
/// Message boxes hold at most three buttons; further actions are not shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeAlertPresenter;

impl AlertPresenter for NativeAlertPresenter {
    async fn present(&self, dialog: &Dialog) -> Result<usize, DialogError> {
        let (tx, rx) = oneshot::channel();
        let dialog = dialog.clone();

        std::thread::spawn(move || {
            let level = match dialog.type_ {
                DialogType::Info => MessageLevel::Info,
                DialogType::Warning => MessageLevel::Warning,
                DialogType::Error => MessageLevel::Error,
            };
            let (buttons, order) = buttons(&dialog);

            let result = MessageDialog::new()
                .set_level(level)
                .set_title(&dialog.title)
                .set_description(&dialog.message)
                .set_buttons(buttons)
                .show();

            let _ = tx.send(chosen_index(&dialog, &order, result));
        });

        rx.await
            .map_err(|_| DialogError::PlatformError("Dialog panicked or channel closed".into()))?
            .ok_or(DialogError::Cancelled)
    }
}

/// Primary action first, then the rest in declaration order.
fn display_order(dialog: &Dialog) -> Vec<usize> {
    let primary = dialog.primary_index().unwrap_or(0);
    let mut order = vec![primary];
    order.extend((0..dialog.actions.len()).filter(|&i| i != primary));
    order.truncate(3);
    order.retain(|&i| i < dialog.actions.len());
    order
}

fn buttons(dialog: &Dialog) -> (MessageButtons, Vec<usize>) {
    let order = display_order(dialog);
    let label = |slot: usize| dialog.actions[order[slot]].label.clone();

    let buttons = match order.len() {
        0 => MessageButtons::Ok,
        1 => MessageButtons::OkCustom(label(0)),
        2 => MessageButtons::OkCancelCustom(label(0), label(1)),
        _ => MessageButtons::YesNoCancelCustom(label(0), label(1), label(2)),
    };
    (buttons, order)
}

fn chosen_index(dialog: &Dialog, order: &[usize], result: MessageDialogResult) -> Option<usize> {
    match result {
        MessageDialogResult::Custom(label) => dialog.index_of(&label),
        MessageDialogResult::Ok | MessageDialogResult::Yes => order.first().copied(),
        MessageDialogResult::No => order.get(1).copied(),
        MessageDialogResult::Cancel if order.len() > 1 => order.last().copied(),
        MessageDialogResult::Cancel => None,
    }
}

//! Remesh popup dialog UI rendering
//!
//! Data structures are in state/remesh_dialog.rs.

use crate::i18n::t;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Run,
    Cancel,
}

/// Show the dialog if open. Returns the button the user pressed, if any.
pub fn show(ctx: &egui::Context, state: &mut AppState) -> Option<DialogAction> {
    if !state.remesh_dialog.open {
        return None;
    }

    let mut action = None;
    egui::Window::new(t("dialog.remesh_title"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(280.0);

            super::options::show(ui, &mut state.options, &state.caps);

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            // OK / Cancel buttons
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(t("dialog.cancel")).clicked() {
                        action = Some(DialogAction::Cancel);
                    }
                    if ui.button(t("dialog.ok")).clicked() {
                        action = Some(DialogAction::Run);
                    }
                });
            });
        });

    if action.is_some() {
        state.remesh_dialog.close();
    }
    action
}

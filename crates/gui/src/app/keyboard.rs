//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let busy = state.exchange.is_busy() || state.remesh_pending();

    ctx.input(|i| {
        // Ctrl+R: remesh dialog
        if i.modifiers.command && i.key_pressed(egui::Key::R) && !busy {
            state.open_remesh_dialog();
        }
        // Ctrl+Z: undo
        if i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift {
            state.scene.undo();
        }
        // Ctrl+Shift+Z or Ctrl+Y: redo
        if (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
            || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        {
            state.scene.redo();
        }
        // Escape: close the dialog, else deselect
        if i.key_pressed(egui::Key::Escape) {
            if state.remesh_dialog.open {
                state.remesh_dialog.close();
            } else {
                state.scene.clear_selection();
            }
        }
        // Delete: remove the active object
        if i.key_pressed(egui::Key::Delete) {
            if let Some(id) = state.scene.scene.active.clone() {
                state.scene.remove_object(&id);
            }
        }
        // F: frame all objects
        if i.key_pressed(egui::Key::F) && !i.modifiers.command {
            viewport.frame_scene(state);
        }
    });
}

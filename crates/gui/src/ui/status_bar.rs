use egui::Ui;

use crate::app::warn_color;
use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let count = state.scene.object_count();
        ui.weak(format!("{}: {count}", t("status.objects")));

        ui.separator();

        let sel = state.scene.scene.selected.len();
        if sel > 0 {
            ui.label(format!("{}: {sel}", t("status.selected")));
        } else {
            ui.weak(t("status.ready"));
        }

        if state.exchange.is_busy() || state.remesh_pending() {
            ui.separator();
            ui.colored_label(warn_color(), t("status.running"));
        } else if let Some(status) = &state.status {
            ui.separator();
            ui.label(status);
        }

        // Right-aligned platform and version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("Autoflow v{} · {}", env!("CARGO_PKG_VERSION"), state.caps.platform));
        });
    });
}

//! Autoflow tools panel: options, manifold check and the Remesh button.

use egui::Ui;

use crate::app::{error_color, ok_color, warn_color};
use crate::exchange::LastRun;
use crate::i18n::t;
use crate::manifold;
use crate::state::AppState;

/// Draw the panel. Returns true when Remesh was clicked.
pub fn show(ui: &mut Ui, state: &mut AppState) -> bool {
    ui.heading(t("tools.title"));
    ui.separator();

    let busy = state.exchange.is_busy() || state.remesh_pending();

    ui.add_enabled_ui(!busy, |ui| {
        super::options::show(ui, &mut state.options, &state.caps);
    });

    ui.add_space(8.0);
    let mut clicked = false;
    match state.readiness() {
        Ok(()) => {
            let label = if busy { t("tools.busy") } else { t("tools.remesh") };
            clicked = ui
                .add_enabled(
                    !busy,
                    egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 28.0)),
                )
                .clicked();
        }
        Err(blocker) => {
            ui.add_enabled(
                false,
                egui::Button::new(t("tools.remesh")).min_size(egui::vec2(ui.available_width(), 28.0)),
            );
            ui.colored_label(warn_color(), blocker.to_string());
        }
    }

    ui.add_space(8.0);
    ui.separator();
    show_manifold_check(ui, state);

    if let Some(run) = state.exchange.last_run() {
        ui.add_space(8.0);
        ui.separator();
        match run {
            LastRun::Succeeded(outcome) => {
                ui.colored_label(
                    ok_color(),
                    format!(
                        "{} → {} faces ({:.1}s)",
                        outcome.input_faces,
                        outcome.output_faces,
                        outcome.elapsed.as_secs_f64()
                    ),
                );
                ui.collapsing(t("tools.last_command"), |ui| {
                    ui.monospace(&outcome.command);
                });
            }
            LastRun::Failed { message, .. } => {
                ui.colored_label(error_color(), message);
            }
        }
    }

    clicked
}

fn show_manifold_check(ui: &mut Ui, state: &AppState) {
    let Some(object) = state.scene.active_object() else {
        return;
    };
    let id = ui.make_persistent_id(("manifold_report", &object.id, state.scene.version()));
    let mut summary: Option<(bool, String)> = ui.data(|d| d.get_temp(id));

    if ui.button(t("tools.check_manifold")).clicked() {
        let report = manifold::analyze(&object.mesh);
        let text = if report.is_manifold() {
            t("tools.manifold_ok").to_string()
        } else {
            report.summary()
        };
        let entry = (report.is_manifold(), text);
        ui.data_mut(|d| d.insert_temp(id, entry.clone()));
        summary = Some(entry);
    }

    if let Some((ok, text)) = summary {
        let color = if ok { ok_color() } else { warn_color() };
        ui.colored_label(color, text);
    }
}

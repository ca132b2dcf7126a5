//! Remesh option widgets shared by the tools panel and the popup dialog.

use egui::Ui;
use shared::RemeshOptions;

use crate::i18n::t;
use crate::platform::Capabilities;

/// Draw the option controls. Flip removal is only offered where it can run.
pub fn show(ui: &mut Ui, options: &mut RemeshOptions, caps: &Capabilities) {
    ui.checkbox(&mut options.min_cost_flow, t("opt.min_cost_flow"))
        .on_hover_text(t("opt.min_cost_flow_tip"));
    ui.checkbox(&mut options.sharp_preserving, t("opt.sharp"))
        .on_hover_text(t("opt.sharp_tip"));
    if caps.flip_removal_allowed() {
        ui.checkbox(&mut options.flip_removal, t("opt.flip_removal"))
            .on_hover_text(t("opt.flip_removal_tip"));
    } else {
        options.flip_removal = false;
    }
    ui.checkbox(&mut options.require_manifold, t("opt.require_manifold"))
        .on_hover_text(t("opt.require_manifold_tip"));

    ui.horizontal(|ui| {
        ui.label(t("opt.resolution"));
        ui.add(
            egui::DragValue::new(&mut options.resolution)
                .speed(10.0)
                .range(1..=u32::MAX),
        )
        .on_hover_text(t("opt.resolution_tip"));
    });
    options.clamp_resolution();
}

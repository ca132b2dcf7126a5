//! Object list panel

use egui::Ui;

use crate::i18n::t;
use crate::state::{mesh_stats_label, object_display_name, short_id, AppState};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(t("tree.scene"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let count = state.scene.object_count();
            ui.weak(format!("({count})"));
        });
    });
    ui.separator();

    if state.scene.scene.objects.is_empty() {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("tree.no_objects"));
            ui.add_space(4.0);
            ui.weak(t("tree.import_hint"));
        });
        return;
    }

    // Collect rows first to avoid borrow conflicts
    let rows: Vec<_> = state
        .scene
        .scene
        .objects
        .iter()
        .map(|o| {
            (
                o.id.clone(),
                o.name.clone(),
                object_display_name(o),
                mesh_stats_label(&o.mesh),
                o.visible,
            )
        })
        .collect();

    egui::ScrollArea::vertical()
        .id_salt("scene_tree_scroll")
        .show(ui, |ui| {
            for (id, raw_name, name, stats, visible) in rows {
                let selected = state.scene.scene.is_selected(&id);
                let active = state.scene.scene.active.as_ref() == Some(&id);

                let label_color = if !visible {
                    egui::Color32::from_rgb(100, 100, 100)
                } else if active {
                    egui::Color32::from_rgb(255, 190, 90)
                } else if selected {
                    egui::Color32::from_rgb(100, 200, 255)
                } else {
                    egui::Color32::from_rgb(200, 200, 200)
                };

                let response = ui
                    .selectable_label(selected, egui::RichText::new(&name).color(label_color))
                    .on_hover_text(format!("{stats}\n{}", short_id(&id)));

                if response.clicked() {
                    if ui.input(|i| i.modifiers.command) {
                        state.scene.toggle_selected(&id);
                    } else {
                        state.scene.set_active(&id);
                    }
                }

                response.context_menu(|ui| {
                    let buf_id = ui.make_persistent_id(("rename", &id));
                    let mut buf: String = ui
                        .data(|d| d.get_temp(buf_id))
                        .unwrap_or_else(|| raw_name.clone());
                    let mut renamed = false;
                    ui.horizontal(|ui| {
                        let edit = ui.add(egui::TextEdit::singleline(&mut buf).desired_width(110.0));
                        let submit = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if ui.button(t("tree.rename")).clicked() || submit {
                            renamed = state.scene.rename_object(&id, buf.clone());
                        }
                    });
                    if renamed {
                        ui.data_mut(|d| d.remove::<String>(buf_id));
                        ui.close_menu();
                    } else {
                        ui.data_mut(|d| d.insert_temp(buf_id, buf));
                    }
                    ui.separator();
                    let toggle = if visible { t("tree.hide") } else { t("tree.show") };
                    if ui.button(toggle).clicked() {
                        state.scene.set_visible(&id, !visible);
                        ui.close_menu();
                    }
                    if ui
                        .button(
                            egui::RichText::new(t("tree.delete"))
                                .color(egui::Color32::from_rgb(220, 80, 80)),
                        )
                        .clicked()
                    {
                        state.scene.remove_object(&id);
                        ui.close_menu();
                    }
                });

                ui.weak(format!("   {stats}"));
            }
        });
}

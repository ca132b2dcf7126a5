//! Application menu bar and preferences window

use eframe::egui;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::platform::Platform;
use crate::state::settings::AppSettings;
use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.new")).clicked() {
            state.scene.clear();
            ui.close_menu();
        }
        if ui.button(t("menu.import_obj")).clicked() {
            ui.close_menu();
            if let Some(paths) = rfd::FileDialog::new()
                .set_title(t("menu.import_title"))
                .add_filter("OBJ", &["obj"])
                .pick_files()
            {
                for path in paths {
                    // Errors go to the log and the status bar.
                    let _ = state.import_obj(&path);
                }
                viewport.frame_scene(state);
            }
        }
        if ui
            .add_enabled(
                state.scene.active_object().is_some(),
                egui::Button::new(t("menu.export_obj")),
            )
            .clicked()
        {
            ui.close_menu();
            let file_name = state
                .scene
                .active_object()
                .map(|o| format!("{}.obj", o.name))
                .unwrap_or_else(|| "mesh.obj".to_string());
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.export_title"))
                .add_filter("OBJ", &["obj"])
                .set_file_name(file_name)
                .save_file()
            {
                if let Ok(true) = state.export_active_obj(&path) {
                    tracing::info!("Exported active object to {}", path.display());
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.edit"), |ui| {
        if ui
            .add_enabled(state.scene.can_undo(), egui::Button::new(t("menu.undo")))
            .clicked()
        {
            state.scene.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(state.scene.can_redo(), egui::Button::new(t("menu.redo")))
            .clicked()
        {
            state.scene.redo();
            ui.close_menu();
        }
        ui.separator();
        let active = state.scene.scene.active.clone();
        if ui
            .add_enabled(active.is_some(), egui::Button::new(t("menu.delete")))
            .clicked()
        {
            if let Some(id) = active {
                state.scene.remove_object(&id);
            }
            ui.close_menu();
        }
        if ui.button(t("menu.deselect_all")).clicked() {
            state.scene.clear_selection();
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.tools, t("menu.tools"));
        ui.checkbox(&mut state.panels.scene_tree, t("menu.scene_tree"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            if ui.selectable_label(lang() == Lang::En, "English").clicked() {
                set_lang(Lang::En);
                ui.close_menu();
            }
            if ui.selectable_label(lang() == Lang::Ru, "Русский").clicked() {
                set_lang(Lang::Ru);
                ui.close_menu();
            }
        });
    });
}

/// Show the mesh menu
pub fn mesh_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.mesh"), |ui| {
        let busy = state.exchange.is_busy() || state.remesh_pending();
        if ui
            .add_enabled(!busy, egui::Button::new(t("menu.remesh")))
            .clicked()
        {
            state.open_remesh_dialog();
            ui.close_menu();
        }
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Show the preferences window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_quadriflow_settings(ui, state);
                show_exchange_settings(ui, state);
                show_viewport_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open && state.show_settings_window;
}

fn show_quadriflow_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.quadriflow"));
    ui.horizontal(|ui| {
        ui.label(t("settings.path"));
        ui.add(
            egui::TextEdit::singleline(&mut state.settings.quadriflow.path)
                .desired_width(220.0)
                .hint_text("/usr/local/bin/quadriflow"),
        );
        if ui.button(t("settings.browse")).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("settings.browse_title"))
                .pick_file()
            {
                state.settings.quadriflow.path = path.to_string_lossy().into_owned();
            }
        }
    });
    if let Err(e) = state.settings.quadriflow.resolve_executable() {
        ui.colored_label(crate::app::warn_color(), e.to_string());
    }

    ui.horizontal(|ui| {
        ui.label(t("settings.timeout"));
        ui.add(
            egui::DragValue::new(&mut state.settings.quadriflow.timeout_secs)
                .speed(1.0)
                .range(0..=86_400)
                .suffix(" s"),
        );
    });

    if state.caps.platform == Platform::Linux && !state.caps.flip_removal_allowed() {
        ui.weak(t("settings.sat_missing"));
    }
    ui.add_space(10.0);
}

fn show_exchange_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.exchange"));
    ui.checkbox(
        &mut state.settings.exchange.triangulate_export,
        t("settings.triangulate"),
    );

    ui.horizontal(|ui| {
        ui.label(t("settings.import_mode"));
        egui::ComboBox::from_id_salt("import_mode_combo")
            .selected_text(state.settings.exchange.import_mode.display_name())
            .show_ui(ui, |ui| {
                for mode in crate::state::settings::ImportMode::all() {
                    ui.selectable_value(
                        &mut state.settings.exchange.import_mode,
                        *mode,
                        mode.display_name(),
                    );
                }
            });
    });

    ui.horizontal(|ui| {
        ui.label(t("settings.temp_root"));
        let label = state
            .settings
            .exchange
            .temp_root
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| t("settings.temp_default").to_string());
        ui.weak(label);
        if ui.button(t("settings.browse")).clicked() {
            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                state.settings.exchange.temp_root = Some(dir);
            }
        }
        if state.settings.exchange.temp_root.is_some() && ui.button(t("settings.clear")).clicked() {
            state.settings.exchange.temp_root = None;
        }
    });
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    let viewport = &mut state.settings.viewport;
    color_row(ui, t("settings.bg_color"), &mut viewport.background_color);
    color_row(ui, t("settings.wire_color"), &mut viewport.wire_color);
    color_row(ui, t("settings.active_color"), &mut viewport.active_color);
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}

//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::remesh_dialog::{self, DialogAction};
use crate::ui::{scene_tree, status_bar, tools_panel};
use crate::viewport::ViewportPanel;

pub use styles::{error_color, ok_color, warn_color};

/// Main application
pub struct AutoflowApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl AutoflowApp {
    pub fn new(cc: &eframe::CreationContext<'_>, meshes: &[PathBuf]) -> Self {
        let mut state = AppState::default();

        for path in meshes {
            // Failures are logged and shown in the status bar.
            let _ = state.import_obj(path);
        }

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new();
        viewport.frame_scene(&state);

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport,
            last_font_size,
        }
    }
}

impl eframe::App for AutoflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Blocks until QuadriFlow exits; the previous frame shows the busy state.
        if let Some(Ok(_)) = self.state.run_pending_remesh() {
            self.viewport.frame_scene(&self.state);
        }

        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state, &mut self.viewport);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::mesh_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Remesh dialog (Ctrl+R) ───────────────────────────
        if let Some(DialogAction::Run) = remesh_dialog::show(ctx, &mut self.state) {
            self.state.request_remesh();
            ctx.request_repaint();
        }

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: Autoflow tools ───────────────────────
        if self.state.panels.tools {
            egui::SidePanel::left("tools_panel")
                .default_width(240.0)
                .width_range(180.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    if tools_panel::show(ui, &mut self.state) {
                        self.state.request_remesh();
                        ctx.request_repaint();
                    }
                });
        }

        // ── Right panel: Object list ─────────────────────────
        if self.state.panels.scene_tree {
            egui::SidePanel::right("scene_tree")
                .default_width(220.0)
                .width_range(140.0..=400.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    scene_tree::show(ui, &mut self.state);
                });
        }

        // ── Central panel: wireframe viewport ────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.state.settings.save();
    }
}

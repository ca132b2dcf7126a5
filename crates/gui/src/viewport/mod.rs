//! 3D viewport panel: wireframe drawn with the egui painter

mod camera;

use egui::Ui;
use glam::Vec3;

use crate::state::AppState;
use camera::ArcBallCamera;

/// Pixel radius for click picking
const PICK_RADIUS: f32 = 12.0;

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Point the camera at the bounds of all visible objects
    pub fn frame_scene(&mut self, state: &AppState) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;
        for object in state.scene.scene.objects.iter().filter(|o| o.visible) {
            if let Some((lo, hi)) = object.mesh.bounds() {
                min = min.min(to_vec3(lo));
                max = max.max(to_vec3(hi));
                any = true;
            }
        }
        if any {
            self.camera.frame((min + max) * 0.5, (max - min).length() * 0.5);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        // ── Camera controls ─────────────────────────────
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.camera.rotate(-delta.x * 0.5, delta.y * 0.5);
        }
        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x * 0.01, delta.y * 0.01);
        }

        // ── Scroll zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }

        // ── Object selection via click ──────────────
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.handle_click(pos, rect, state);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }
        self.paint(ui, rect, state);
    }

    fn handle_click(&self, pos: egui::Pos2, rect: egui::Rect, state: &mut AppState) {
        let vp = self.camera.view_projection(rect.width() / rect.height());
        let mut best: Option<(f32, String)> = None;
        for object in state.scene.scene.objects.iter().filter(|o| o.visible) {
            for v in &object.mesh.vertices {
                let Some(screen) = ArcBallCamera::project_with(&vp, to_vec3(*v), rect) else {
                    continue;
                };
                let d = screen.distance(pos);
                if d < PICK_RADIUS && best.as_ref().map_or(true, |(bd, _)| d < *bd) {
                    best = Some((d, object.id.clone()));
                }
            }
        }
        match best {
            Some((_, id)) => state.scene.set_active(&id),
            None => state.scene.clear_selection(),
        }
    }

    fn paint(&self, ui: &Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);
        let colors = &state.settings.viewport;
        painter.rect_filled(rect, 0.0, rgb(colors.background_color));

        let vp = self.camera.view_projection(rect.width() / rect.height());
        draw_axes(&painter, &vp, rect);

        for object in state.scene.scene.objects.iter().filter(|o| o.visible) {
            let selected = state.scene.scene.is_selected(&object.id);
            let color = if selected {
                rgb(colors.active_color)
            } else {
                rgb(colors.wire_color)
            };
            let stroke = egui::Stroke::new(if selected { 1.2 } else { 0.8 }, color);

            let projected: Vec<Option<egui::Pos2>> = object
                .mesh
                .vertices
                .iter()
                .map(|v| ArcBallCamera::project_with(&vp, to_vec3(*v), rect))
                .collect();

            for face in &object.mesh.faces {
                let n = face.len();
                for i in 0..n {
                    let (a, b) = (face[i] as usize, face[(i + 1) % n] as usize);
                    if let (Some(Some(pa)), Some(Some(pb))) = (projected.get(a), projected.get(b)) {
                        painter.line_segment([*pa, *pb], stroke);
                    }
                }
            }
        }

        painter.text(
            egui::pos2(rect.left() + 8.0, rect.bottom() - 8.0),
            egui::Align2::LEFT_BOTTOM,
            format!("Dist: {:.2}", self.camera.distance),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(120, 120, 130),
        );
    }
}

fn draw_axes(painter: &egui::Painter, vp: &glam::Mat4, rect: egui::Rect) {
    let axes = [
        (Vec3::X, egui::Color32::from_rgb(220, 70, 70)),
        (Vec3::Y, egui::Color32::from_rgb(70, 200, 70)),
        (Vec3::Z, egui::Color32::from_rgb(70, 110, 220)),
    ];
    let Some(origin) = ArcBallCamera::project_with(vp, Vec3::ZERO, rect) else {
        return;
    };
    for (dir, color) in axes {
        if let Some(end) = ArcBallCamera::project_with(vp, dir, rect) {
            painter.line_segment([origin, end], egui::Stroke::new(1.5, color));
        }
    }
}

fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

fn rgb(c: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

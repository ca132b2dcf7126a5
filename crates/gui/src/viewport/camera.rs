use glam::{Mat4, Vec3, Vec4};

/// Arc-ball camera for the 3D viewport
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.4,
            distance: 6.0,
            target: Vec3::ZERO,
            fov: 45.0_f32.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.01, 10_000.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        // Pan speed follows the zoom level
        let offset = (right * dx + up * dy) * (self.distance * 0.1);
        self.target += offset;
    }

    /// Look at a bounding sphere so that it fills the view
    pub fn frame(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        let radius = radius.max(1e-3);
        self.distance = radius / (self.fov * 0.5).sin() * 1.1;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip); clip planes follow the distance
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let near = (self.distance * 0.001).max(1e-4);
        let far = self.distance * 100.0;
        Mat4::perspective_rh_gl(self.fov, aspect, near, far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        let right = self.right_vector();
        right.cross(fwd).normalize_or_zero()
    }

    /// Project a 3D point to 2D screen coords with a precomputed view-projection
    pub fn project_with(vp: &Mat4, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let p = *vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    fn project(cam: &ArcBallCamera, point: Vec3) -> Option<egui::Pos2> {
        let r = rect();
        ArcBallCamera::project_with(&cam.view_projection(r.width() / r.height()), point, r)
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut cam = ArcBallCamera::new();
        cam.frame(Vec3::new(1.0, 2.0, 3.0), 2.0);
        let p = project(&cam, cam.target).unwrap();
        assert!((p.x - 400.0).abs() < 1e-2);
        assert!((p.y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_point_behind_camera_is_hidden() {
        let cam = ArcBallCamera::new();
        let behind = cam.eye_position() + (cam.eye_position() - cam.target);
        assert!(project(&cam, behind).is_none());
    }

    #[test]
    fn test_zoom_and_pitch_clamped() {
        let mut cam = ArcBallCamera::new();
        cam.rotate(0.0, 1000.0);
        assert!(cam.pitch <= 1.5);
        for _ in 0..200 {
            cam.zoom(0.5);
        }
        assert!(cam.distance >= 0.01);
    }
}

//! Headless test harness for programmatic scene manipulation.
//!
//! Bundles a scene, remesh options, settings and a mesh exchange so tests
//! and the agent command protocol can drive the full pipeline without a UI.

use std::path::{Path, PathBuf};

use shared::{MeshSnapshot, ObjectId, RemeshOptions, SceneDescription};

use crate::error::{ObjError, RemeshResult};
use crate::exchange::{MeshExchange, RemeshOutcome};
use crate::manifold::ManifoldReport;
use crate::obj::{self, ReadObjError};
use crate::platform::Capabilities;
use crate::state::readiness::{self, Blocker};
use crate::state::scene::SceneState;
use crate::state::settings::AppSettings;
use crate::validation::MeshValidator;

/// Headless test harness: scene, options, settings, and the exchange
pub struct TestHarness {
    pub scene: SceneState,
    pub options: RemeshOptions,
    pub settings: AppSettings,
    pub caps: Capabilities,
    pub exchange: MeshExchange,
}

impl TestHarness {
    /// Create a new empty harness with default settings and the host's capabilities.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::detect())
    }

    /// Create a harness with fixed capabilities.
    pub fn with_capabilities(caps: Capabilities) -> Self {
        Self {
            scene: SceneState::default(),
            options: RemeshOptions::default(),
            settings: AppSettings::default(),
            caps,
            exchange: MeshExchange::new(),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add a mesh object named after the snapshot; it becomes active.
    pub fn add_mesh(&mut self, mesh: MeshSnapshot) -> ObjectId {
        let name = if mesh.name.is_empty() {
            "Mesh".to_string()
        } else {
            mesh.name.clone()
        };
        self.scene.add_object(name, mesh)
    }

    /// Parse OBJ text and add it as a new object
    pub fn load_obj_text(&mut self, name: &str, text: &str) -> Result<ObjectId, ObjError> {
        let mut mesh = obj::parse_obj(text, name)?;
        mesh.name = name.to_string();
        Ok(self.add_mesh(mesh))
    }

    /// Read an OBJ file and add it as a new object named after the file stem
    pub fn load_obj(&mut self, path: &Path) -> Result<ObjectId, ReadObjError> {
        let mesh = obj::load_obj_file(path)?;
        tracing::info!(path = %path.display(), vertices = mesh.vertex_count(), "loaded OBJ");
        Ok(self.add_mesh(mesh))
    }

    /// Write an object's mesh to an OBJ file. Returns false for unknown ids.
    pub fn export_obj(&self, id: &str, path: &Path) -> std::io::Result<bool> {
        let Some(object) = self.scene.get_object(&id.to_string()) else {
            return Ok(false);
        };
        let mut mesh = object.mesh.clone();
        mesh.name = object.name.clone();
        obj::save_obj_file(&mesh, false, path)?;
        Ok(true)
    }

    /// Load a scene (replaces current)
    pub fn load_scene(&mut self, scene: SceneDescription) {
        self.scene.set_scene(scene);
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene: SceneDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.scene.scene).unwrap_or_default()
    }

    /// Delete an object by ID
    pub fn delete(&mut self, id: &str) -> bool {
        self.scene.remove_object(&id.to_string())
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        if self.scene.can_undo() {
            self.scene.undo();
            true
        } else {
            false
        }
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        if self.scene.can_redo() {
            self.scene.redo();
            true
        } else {
            false
        }
    }

    /// Clear the entire scene
    pub fn clear(&mut self) {
        self.scene.clear();
    }

    // ── Selection ─────────────────────────────────────────────

    /// Make an object active and the only selection. Returns false for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        let id = id.to_string();
        if self.scene.get_object(&id).is_none() {
            return false;
        }
        self.scene.set_active(&id);
        true
    }

    /// Rename an object. Returns false for unknown ids or blank names.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        self.scene.rename_object(&id.to_string(), name.to_string())
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.scene.clear_selection();
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn set_options(&mut self, options: RemeshOptions) {
        self.options = options;
    }

    pub fn set_quadriflow_path(&mut self, path: impl Into<PathBuf>) {
        self.settings.quadriflow.path = path.into().to_string_lossy().into_owned();
    }

    /// Put per-run scratch directories under `root`
    pub fn set_temp_root(&mut self, root: impl Into<PathBuf>) {
        self.settings.exchange.temp_root = Some(root.into());
    }

    // ── Remesh + inspection ───────────────────────────────────

    /// Readiness of the Remesh action
    pub fn readiness(&self) -> Result<(), Blocker> {
        readiness::check(&self.settings, &self.scene, &self.caps)
    }

    /// Manifold report for the active object
    pub fn check_manifold(&self) -> Option<ManifoldReport> {
        self.scene
            .active_object()
            .map(|object| MeshValidator::new(&object.mesh).manifold_report())
    }

    /// Run the remesh pipeline on the active object
    pub fn remesh(&mut self) -> RemeshResult<RemeshOutcome> {
        self.exchange
            .run(&mut self.scene, &self.options, &self.settings, &self.caps)
    }

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.scene.object_count()
    }

    pub fn active_id(&self) -> Option<&ObjectId> {
        self.scene.scene.active.as_ref()
    }

    /// Get mesh data for an object ID
    pub fn mesh_of(&self, id: &str) -> Option<&MeshSnapshot> {
        self.scene.get_object(&id.to_string()).map(|o| &o.mesh)
    }

    /// Create a validator for an object's mesh
    pub fn validate_mesh(&self, id: &str) -> Option<MeshValidator<'_>> {
        self.mesh_of(id).map(MeshValidator::new)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::platform::Platform;

    fn harness() -> TestHarness {
        TestHarness::with_capabilities(Capabilities::new(Platform::Linux, false))
    }

    #[test]
    fn test_new_harness_empty() {
        let h = harness();
        assert_eq!(h.object_count(), 0);
        assert!(h.active_id().is_none());
        assert!(h.check_manifold().is_none());
    }

    #[test]
    fn test_add_mesh_becomes_active() {
        let mut h = harness();
        let id = h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        assert_eq!(h.active_id(), Some(&id));
        assert_eq!(h.mesh_of(&id).unwrap().face_count(), 6);
    }

    #[test]
    fn test_load_obj_text() {
        let mut h = harness();
        let text = obj::to_obj_string(&fixtures::tetrahedron_mesh("Tet"), false);
        let id = h.load_obj_text("Imported", &text).unwrap();
        assert_eq!(h.scene.get_object(&id).unwrap().name, "Imported");
        assert!(h.check_manifold().unwrap().is_manifold());

        assert!(h.load_obj_text("Bad", "f 1 2 3\n").is_err());
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_load_and_export_obj_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness();
        let id = h.add_mesh(fixtures::cube_mesh("Cube", 2.0));

        let path = dir.path().join("cube.obj");
        assert!(h.export_obj(&id, &path).unwrap());
        assert!(!h.export_obj("missing", &path).unwrap());

        let loaded = h.load_obj(&path).unwrap();
        assert_eq!(h.scene.get_object(&loaded).unwrap().name, "cube");
        assert_eq!(h.validate_mesh(&loaded).unwrap().dimensions(), [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_rename_is_undoable() {
        let mut h = harness();
        let id = h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        assert!(h.rename(&id, "Body"));
        assert_eq!(h.scene.get_object(&id).unwrap().name, "Body");
        assert!(!h.rename("missing", "X"));
        assert!(h.undo());
        assert_eq!(h.scene.get_object(&id).unwrap().name, "Cube");
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = harness();
        h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        assert!(h.undo());
        assert_eq!(h.object_count(), 0);
        assert!(h.redo());
        assert_eq!(h.object_count(), 1);
        assert!(!h.redo());
    }

    #[test]
    fn test_load_export_json() {
        let mut h = harness();
        h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        let json = h.export_scene_json();

        let mut h2 = harness();
        h2.load_scene_json(&json).unwrap();
        assert_eq!(h2.object_count(), 1);
        assert_eq!(h2.active_id(), h.active_id());
    }

    #[test]
    fn test_select_and_readiness() {
        let mut h = harness();
        let id = h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        h.clear_selection();
        assert_eq!(h.readiness(), Err(Blocker::PathNotSet));

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("quadriflow");
        std::fs::write(&exe, "").unwrap();
        h.set_quadriflow_path(&exe);
        assert_eq!(h.readiness(), Err(Blocker::NoMeshSelected));

        assert!(h.select(&id));
        assert!(!h.select("missing"));
        assert_eq!(h.readiness(), Ok(()));
    }

    #[test]
    fn test_clear_and_delete() {
        let mut h = harness();
        let id = h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        assert!(h.delete(&id));
        assert!(!h.delete(&id));
        h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        h.clear();
        assert_eq!(h.object_count(), 0);
    }
}

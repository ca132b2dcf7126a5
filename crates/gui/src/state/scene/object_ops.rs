//! Object CRUD and selection operations

use shared::{MeshSnapshot, ObjectId, SceneDescription, SceneObject};

use super::SceneState;

impl SceneState {
    /// Add a mesh object; it becomes active and the only selected object.
    pub fn add_object(&mut self, name: String, mesh: MeshSnapshot) -> ObjectId {
        self.save_undo();

        let id = uuid::Uuid::new_v4().to_string();
        self.scene.objects.push(SceneObject {
            id: id.clone(),
            name,
            mesh,
            visible: true,
        });
        self.scene.active = Some(id.clone());
        self.scene.selected = vec![id.clone()];

        self.version += 1;
        id
    }

    /// Remove an object. Returns whether it existed.
    pub fn remove_object(&mut self, id: &ObjectId) -> bool {
        if self.scene.get(id).is_none() {
            return false;
        }
        self.save_undo();

        self.scene.objects.retain(|o| o.id != *id);
        self.scene.selected.retain(|s| s != id);
        if self.scene.active.as_ref() == Some(id) {
            self.scene.active = None;
        }

        self.version += 1;
        true
    }

    /// Swap the geometry of an existing object
    pub fn replace_mesh(&mut self, id: &ObjectId, mesh: MeshSnapshot) -> bool {
        if self.scene.get(id).is_none() {
            return false;
        }
        self.save_undo();
        if let Some(obj) = self.scene.get_mut(id) {
            obj.mesh = mesh;
        }
        self.version += 1;
        true
    }

    /// Rename an object. Blank names are refused.
    pub fn rename_object(&mut self, id: &ObjectId, name: String) -> bool {
        let name = name.trim().to_string();
        if name.is_empty() || self.scene.get(id).is_none() {
            return false;
        }
        self.save_undo();
        if let Some(obj) = self.scene.get_mut(id) {
            obj.name = name;
        }
        self.version += 1;
        true
    }

    /// Set object visibility (not recorded in history)
    pub fn set_visible(&mut self, id: &ObjectId, visible: bool) {
        if let Some(obj) = self.scene.get_mut(id) {
            obj.visible = visible;
            self.version += 1;
        }
    }

    /// Make an object active and the only selected object
    pub fn set_active(&mut self, id: &ObjectId) {
        if self.scene.get(id).is_some() {
            self.scene.active = Some(id.clone());
            self.scene.selected = vec![id.clone()];
            self.version += 1;
        }
    }

    /// Add or remove an object from the selection
    pub fn toggle_selected(&mut self, id: &ObjectId) {
        if self.scene.get(id).is_none() {
            return;
        }
        if let Some(pos) = self.scene.selected.iter().position(|s| s == id) {
            self.scene.selected.remove(pos);
        } else {
            self.scene.selected.push(id.clone());
        }
        self.version += 1;
    }

    /// Clear selection (the active object stays, but is no longer remeshable)
    pub fn clear_selection(&mut self) {
        self.scene.selected.clear();
        self.version += 1;
    }

    /// Replace the whole scene
    pub fn set_scene(&mut self, scene: SceneDescription) {
        self.save_undo();
        self.scene = scene;
        self.version += 1;
    }

    /// Remove every object
    pub fn clear(&mut self) {
        if !self.scene.objects.is_empty() {
            self.save_undo();
        }
        self.scene = SceneDescription::default();
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_add_object_becomes_active() {
        let mut s = SceneState::default();
        let a = s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        let b = s.add_object("B".into(), fixtures::cube_mesh("B", 1.0));
        assert_eq!(s.object_count(), 2);
        assert_eq!(s.scene.active, Some(b.clone()));
        assert_eq!(s.scene.selected, vec![b]);
        assert_ne!(a, s.scene.active.clone().unwrap());
    }

    #[test]
    fn test_remove_clears_active_and_selection() {
        let mut s = SceneState::default();
        let a = s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        assert!(s.remove_object(&a));
        assert!(s.scene.active.is_none());
        assert!(s.scene.selected.is_empty());
        assert!(!s.remove_object(&a));
    }

    #[test]
    fn test_undo_redo_add() {
        let mut s = SceneState::default();
        s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        assert!(s.can_undo());
        s.undo();
        assert_eq!(s.object_count(), 0);
        assert!(s.can_redo());
        s.redo();
        assert_eq!(s.object_count(), 1);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut s = SceneState::default();
        s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        s.undo();
        s.add_object("B".into(), fixtures::cube_mesh("B", 1.0));
        assert!(!s.can_redo());
    }

    #[test]
    fn test_selection_ops() {
        let mut s = SceneState::default();
        let a = s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        let b = s.add_object("B".into(), fixtures::cube_mesh("B", 1.0));

        s.set_active(&a);
        assert_eq!(s.scene.selected, vec![a.clone()]);

        s.toggle_selected(&b);
        assert!(s.scene.is_selected(&b));
        s.toggle_selected(&b);
        assert!(!s.scene.is_selected(&b));

        s.clear_selection();
        assert!(s.scene.selected.is_empty());
        assert_eq!(s.scene.active, Some(a));
    }

    #[test]
    fn test_replace_mesh_and_rename() {
        let mut s = SceneState::default();
        let a = s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        assert!(s.replace_mesh(&a, fixtures::tetrahedron_mesh("T")));
        assert_eq!(s.get_object(&a).unwrap().mesh.vertex_count(), 4);
        assert!(s.rename_object(&a, " Renamed ".into()));
        assert_eq!(s.get_object(&a).unwrap().name, "Renamed");
        assert!(!s.rename_object(&a, "   ".into()));
        assert!(!s.rename_object(&"missing".to_string(), "X".into()));
        s.undo();
        assert_eq!(s.get_object(&a).unwrap().name, "A");
    }

    #[test]
    fn test_version_bumps() {
        let mut s = SceneState::default();
        let v0 = s.version();
        s.add_object("A".into(), fixtures::cube_mesh("A", 1.0));
        assert!(s.version() > v0);
    }
}

//! `MeshHost` implementation backed by the scene

use shared::{MeshSnapshot, ObjectId};

use super::SceneState;
use crate::host::{ActiveMesh, ImportMode, MeshHost};

impl MeshHost for SceneState {
    fn active_mesh(&self) -> Option<ActiveMesh> {
        let obj = self.active_object()?;
        if !self.scene.is_selected(&obj.id) {
            return None;
        }
        let mut mesh = obj.mesh.clone();
        mesh.name = obj.name.clone();
        Some(ActiveMesh {
            id: obj.id.clone(),
            mesh,
        })
    }

    fn insert_remeshed(
        &mut self,
        source: &ObjectId,
        mut mesh: MeshSnapshot,
        mode: ImportMode,
    ) -> ObjectId {
        let source_name = self
            .get_object(source)
            .map(|o| o.name.clone())
            .unwrap_or_else(|| mesh.name.clone());

        if mode == ImportMode::ReplaceActive && self.replace_mesh(source, mesh.clone()) {
            self.set_active(source);
            return source.clone();
        }

        let name = format!("{source_name}_remeshed");
        mesh.name = name.clone();
        self.add_object(name, mesh)
    }
}

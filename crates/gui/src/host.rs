//! Boundary between the remesh pipeline and whatever holds the meshes.
//!
//! The pipeline reads the active mesh and hands back the remeshed result;
//! it never touches the scene otherwise.

use serde::{Deserialize, Serialize};
use shared::{MeshSnapshot, ObjectId};

/// The mesh the user asked to remesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMesh {
    pub id: ObjectId,
    pub mesh: MeshSnapshot,
}

/// What happens to the remeshed geometry on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Add a new `<name>_remeshed` object next to the source
    #[default]
    AddNew,
    /// Swap the geometry of the source object
    ReplaceActive,
}

impl ImportMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ImportMode::AddNew => "Add new object",
            ImportMode::ReplaceActive => "Replace active object",
        }
    }

    pub fn all() -> &'static [ImportMode] {
        &[ImportMode::AddNew, ImportMode::ReplaceActive]
    }
}

/// Access to the host scene used by the remesh pipeline.
pub trait MeshHost {
    /// The selected, active mesh object, if any.
    fn active_mesh(&self) -> Option<ActiveMesh>;

    /// Put the remeshed geometry into the scene and return the id of the
    /// object now holding it. That object becomes active and selected.
    fn insert_remeshed(&mut self, source: &ObjectId, mesh: MeshSnapshot, mode: ImportMode)
        -> ObjectId;
}

//! Scene state management
//!
//! Mesh objects, the active object, the selection, and undo/redo history.

mod display;
mod history;
mod host_impl;
mod object_ops;

pub use display::{mesh_stats_label, object_display_name, short_id};

use shared::{ObjectId, SceneDescription, SceneObject};

/// Scene state with objects and undo/redo history
#[derive(Default)]
pub struct SceneState {
    /// Current scene content
    pub scene: SceneDescription,
    /// Undo stack - previous states
    pub(crate) undo_stack: Vec<SceneDescription>,
    /// Redo stack - undone states
    pub(crate) redo_stack: Vec<SceneDescription>,
    /// Monotonically increasing version counter for redraw invalidation
    pub(crate) version: u64,
}

impl SceneState {
    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get an object by ID
    pub fn get_object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.scene.get(id)
    }

    /// Get mutable object by ID
    pub fn get_object_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.scene.get_mut(id)
    }

    /// The active object, if it still exists
    pub fn active_object(&self) -> Option<&SceneObject> {
        self.scene.active.as_ref().and_then(|id| self.scene.get(id))
    }

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.scene.objects.len()
    }

    /// Bump version without saving undo
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Save current state to undo stack
    pub(crate) fn save_undo(&mut self) {
        self.undo_stack.push(self.scene.clone());
        if self.undo_stack.len() > 50 {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }
}

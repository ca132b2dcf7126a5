//! Display helper functions for scene objects

use shared::{MeshSnapshot, SceneObject};

/// Get display name for an object
pub fn object_display_name(object: &SceneObject) -> String {
    format!("{} ({})", object.name, short_id(&object.id))
}

/// "8 verts, 6 faces" style summary
pub fn mesh_stats_label(mesh: &MeshSnapshot) -> String {
    format!("{} verts, {} faces", mesh.vertex_count(), mesh.face_count())
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

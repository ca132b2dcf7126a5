//! Mesh validation utilities.
//!
//! `MeshValidator` checks snapshot integrity: in-range indices, face arity,
//! finite coordinates. The remesh pipeline runs it on everything QuadriFlow
//! hands back before the result reaches the scene.

use shared::MeshSnapshot;

use crate::manifold::{self, ManifoldReport};

/// Validator for `MeshSnapshot` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshSnapshot,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a MeshSnapshot) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// Check that all face indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.mesh.vertices.len() as u32;
        self.mesh.faces.iter().flatten().all(|&i| i < max_idx)
    }

    /// Check that every face has at least three corners.
    pub fn are_faces_polygons(&self) -> bool {
        self.mesh.faces.iter().all(|f| f.len() >= 3)
    }

    /// Check that every coordinate is a finite number.
    pub fn are_coordinates_finite(&self) -> bool {
        self.mesh
            .vertices
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite()))
    }

    /// Faces that reference the same vertex twice in a row.
    pub fn degenerate_face_count(&self) -> usize {
        self.mesh
            .faces
            .iter()
            .filter(|f| {
                let n = f.len();
                (0..n).any(|i| f[i] == f[(i + 1) % n])
            })
            .count()
    }

    /// Edge/face incidence report for this mesh.
    pub fn manifold_report(&self) -> ManifoldReport {
        manifold::analyze(self.mesh)
    }

    /// Compute the dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> [f64; 3] {
        match self.mesh.bounds() {
            Some((min, max)) => [max[0] - min[0], max[1] - min[1], max[2] - min[2]],
            None => [0.0; 3],
        }
    }

    /// Run all structural checks. Returns a list of error descriptions.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.are_indices_in_range() {
            errors.push(format!(
                "Face index out of range (vertex_count = {})",
                self.vertex_count()
            ));
        }
        if !self.are_faces_polygons() {
            errors.push("Face with fewer than 3 corners".to_string());
        }
        if !self.are_coordinates_finite() {
            errors.push("Non-finite vertex coordinate".to_string());
        }

        errors
    }
}

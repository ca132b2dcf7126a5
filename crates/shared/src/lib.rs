use serde::{Deserialize, Serialize};

mod options;

pub use options::{RemeshOptions, DEFAULT_RESOLUTION};

/// Unique identifier of an object in the scene
pub type ObjectId = String;

/// Geometry of one mesh object as an indexed polygon list.
///
/// Face indices are zero-based into `vertices`. Faces may have any number
/// of corners; the interchange writer can triangulate them on the way out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<Vec<u32>>,
}

impl MeshSnapshot {
    pub fn new(name: impl Into<String>, vertices: Vec<[f64; 3]>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles after fan triangulation of every face.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.len().saturating_sub(2))
            .sum()
    }

    /// A snapshot with no vertices or no faces has nothing to remesh.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Whether every face is a triangle.
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Copy of this snapshot with every polygon fan-triangulated.
    ///
    /// Faces with fewer than three corners are dropped.
    pub fn triangulated(&self) -> MeshSnapshot {
        let mut faces = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }
            for i in 1..face.len() - 1 {
                faces.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        MeshSnapshot {
            name: self.name.clone(),
            vertices: self.vertices.clone(),
            faces,
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
        Some((min, max))
    }
}

/// One mesh object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub mesh: MeshSnapshot,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Scene content: objects plus the active object and the selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub active: Option<ObjectId>,
    #[serde(default)]
    pub selected: Vec<ObjectId>,
}

impl SceneDescription {
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    pub fn is_selected(&self, id: &ObjectId) -> bool {
        self.selected.contains(id)
    }
}

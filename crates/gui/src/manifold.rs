//! Manifold check on edge/face incidence.
//!
//! A mesh passes when every edge borders exactly two faces and the faces
//! around every vertex form a single fan. Loose vertices fail. Winding
//! disagreements across an edge are reported but do not fail the check.

use std::collections::BTreeMap;

use shared::MeshSnapshot;

/// How many faces border an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    Boundary(usize),
    Manifold([usize; 2]),
    NonManifold(Vec<usize>),
}

impl EdgeKind {
    fn insert(&mut self, face: usize) {
        *self = match self {
            EdgeKind::Boundary(a) => EdgeKind::Manifold([*a, face]),
            EdgeKind::Manifold([a, b]) => EdgeKind::NonManifold(vec![*a, *b, face]),
            EdgeKind::NonManifold(fs) => {
                fs.push(face);
                return;
            }
        };
    }

    pub fn faces(&self) -> &[usize] {
        match self {
            EdgeKind::Boundary(f) => std::slice::from_ref(f),
            EdgeKind::Manifold(fs) => fs.as_slice(),
            EdgeKind::NonManifold(fs) => fs.as_slice(),
        }
    }
}

#[derive(Debug, Clone)]
struct EdgeUse {
    kind: EdgeKind,
    /// Number of faces walking the edge from the lower to the higher index
    forward: usize,
}

/// Result of a manifold check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifoldReport {
    pub edge_count: usize,
    /// Edges with a single incident face
    pub boundary_edges: Vec<[u32; 2]>,
    /// Edges with three or more incident faces
    pub non_manifold_edges: Vec<[u32; 2]>,
    /// Vertices whose faces do not form one fan, or that have no faces
    pub non_manifold_vertices: Vec<u32>,
    /// Two-face edges walked in the same direction by both faces
    pub inconsistent_edges: Vec<[u32; 2]>,
}

impl ManifoldReport {
    pub fn is_manifold(&self) -> bool {
        self.boundary_edges.is_empty()
            && self.non_manifold_edges.is_empty()
            && self.non_manifold_vertices.is_empty()
    }

    /// Short description for user-facing messages.
    pub fn summary(&self) -> String {
        if self.is_manifold() {
            return "manifold".to_string();
        }
        let mut parts = Vec::new();
        if !self.boundary_edges.is_empty() {
            parts.push(format!("{} boundary edges", self.boundary_edges.len()));
        }
        if !self.non_manifold_edges.is_empty() {
            parts.push(format!(
                "{} edges shared by 3+ faces",
                self.non_manifold_edges.len()
            ));
        }
        if !self.non_manifold_vertices.is_empty() {
            parts.push(format!(
                "{} non-manifold vertices",
                self.non_manifold_vertices.len()
            ));
        }
        parts.join(", ")
    }
}

/// Whether every edge has exactly two faces and every vertex is a single fan.
pub fn is_manifold(mesh: &MeshSnapshot) -> bool {
    analyze(mesh).is_manifold()
}

/// Edge/face incidence analysis of a mesh.
pub fn analyze(mesh: &MeshSnapshot) -> ManifoldReport {
    let vertex_count = mesh.vertices.len();
    let mut edges: BTreeMap<[u32; 2], EdgeUse> = BTreeMap::new();
    let mut vertex_faces: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];

    for (fi, face) in mesh.faces.iter().enumerate() {
        let n = face.len();
        for i in 0..n {
            let a = face[i];
            let b = face[(i + 1) % n];
            if (a as usize) < vertex_count {
                let faces = &mut vertex_faces[a as usize];
                if faces.last() != Some(&fi) && !faces.contains(&fi) {
                    faces.push(fi);
                }
            }
            if a == b {
                continue;
            }
            let key = [a.min(b), a.max(b)];
            let forward = usize::from(a < b);
            edges
                .entry(key)
                .and_modify(|e| {
                    e.kind.insert(fi);
                    e.forward += forward;
                })
                .or_insert(EdgeUse {
                    kind: EdgeKind::Boundary(fi),
                    forward,
                });
        }
    }

    let mut report = ManifoldReport {
        edge_count: edges.len(),
        ..Default::default()
    };

    let mut fans: Vec<FanSets> = vertex_faces.iter().map(|fs| FanSets::new(fs.len())).collect();

    for (key, edge) in &edges {
        match &edge.kind {
            EdgeKind::Boundary(_) => report.boundary_edges.push(*key),
            EdgeKind::NonManifold(_) => report.non_manifold_edges.push(*key),
            EdgeKind::Manifold(_) => {
                if edge.forward != 1 {
                    report.inconsistent_edges.push(*key);
                }
            }
        }

        let faces = edge.kind.faces();
        if faces.len() < 2 {
            continue;
        }
        for &v in key {
            let v = v as usize;
            if v >= vertex_count {
                continue;
            }
            let local = &vertex_faces[v];
            let Some(first) = local.iter().position(|&f| f == faces[0]) else {
                continue;
            };
            for other in &faces[1..] {
                if let Some(pos) = local.iter().position(|f| f == other) {
                    fans[v].unite(first, pos);
                }
            }
        }
    }

    for (v, fan) in fans.iter_mut().enumerate() {
        if vertex_faces[v].is_empty() || fan.component_count() != 1 {
            report.non_manifold_vertices.push(v as u32);
        }
    }

    report
}

/// Union-find over the faces around one vertex.
struct FanSets {
    parent: Vec<usize>,
}

impl FanSets {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            self.parent[id] = self.parent[self.parent[id]];
            id = self.parent[id];
        }
        id
    }

    fn unite(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }

    fn component_count(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).count()
    }
}

//! Factory functions for creating test data.
//!
//! Meshes with known topology for the manifold check and the remesh
//! pipeline, scene builders, and (on Unix) a stand-in QuadriFlow script.

use shared::*;

// ── Mesh factories ──────────────────────────────────────────────

/// Closed axis-aligned cube centered on the origin: 8 vertices, 6 quads,
/// outward winding.
pub fn cube_mesh(name: &str, size: f64) -> MeshSnapshot {
    let h = size / 2.0;
    MeshSnapshot::new(
        name,
        vec![
            [-h, -h, -h],
            [h, -h, -h],
            [h, h, -h],
            [-h, h, -h],
            [-h, -h, h],
            [h, -h, h],
            [h, h, h],
            [-h, h, h],
        ],
        vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ],
    )
}

/// Closed tetrahedron with consistent winding.
pub fn tetrahedron_mesh(name: &str) -> MeshSnapshot {
    MeshSnapshot::new(
        name,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2], vec![1, 2, 3]],
    )
}

/// Single open quad: four boundary edges.
pub fn plane_mesh(name: &str) -> MeshSnapshot {
    MeshSnapshot::new(
        name,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        vec![vec![0, 1, 2, 3]],
    )
}

/// Three triangles hinged on edge 0–1.
pub fn fin_mesh(name: &str) -> MeshSnapshot {
    MeshSnapshot::new(
        name,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.5, -1.0, 0.0],
            [0.5, 0.0, 1.0],
        ],
        vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]],
    )
}

/// Two closed tetrahedra touching only at vertex 0.
///
/// Every edge has two faces, but the faces around vertex 0 form two fans.
pub fn bowtie_mesh(name: &str) -> MeshSnapshot {
    MeshSnapshot::new(
        name,
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, -1.0],
        ],
        vec![
            vec![0, 2, 1],
            vec![0, 1, 3],
            vec![0, 3, 2],
            vec![1, 2, 3],
            vec![0, 4, 5],
            vec![0, 6, 4],
            vec![0, 5, 6],
            vec![4, 6, 5],
        ],
    )
}

// ── Scene factories ─────────────────────────────────────────────

/// Scene object with a fixed id, visible.
pub fn scene_object(id: &str, mesh: MeshSnapshot) -> SceneObject {
    SceneObject {
        id: id.to_string(),
        name: mesh.name.clone(),
        mesh,
        visible: true,
    }
}

/// Scene holding the given objects with the last one active and selected.
pub fn scene_with(objects: Vec<SceneObject>) -> SceneDescription {
    let active = objects.last().map(|o| o.id.clone());
    SceneDescription {
        selected: active.iter().cloned().collect(),
        active,
        objects,
    }
}

/// Scene with a single cube, active and selected.
pub fn scene_single_cube() -> SceneDescription {
    scene_with(vec![scene_object("cube1", cube_mesh("Cube", 2.0))])
}

// ── Stand-in QuadriFlow ─────────────────────────────────────────

/// Behavior of the stand-in executable written by [`write_fake_quadriflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeQuadriflow {
    /// Copy the `-i` file to the `-o` path and exit 0
    CopyInput,
    /// Print to stderr and exit 1
    Fail,
    /// Exit 0 without writing anything
    NoOutput,
    /// Sleep for the given number of seconds, then copy
    Sleep(u32),
    /// Write the given text as the output file and exit 0
    WriteText(&'static str),
}

/// Write an executable shell script that mimics QuadriFlow's command line.
///
/// The script records its arguments in `args.txt` next to itself.
#[cfg(unix)]
pub fn write_fake_quadriflow(
    dir: &std::path::Path,
    behavior: FakeQuadriflow,
) -> std::io::Result<std::path::PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("quadriflow");
    let args_file = dir.join("args.txt");

    let action = match behavior {
        FakeQuadriflow::CopyInput => "cp \"$in\" \"$out\"".to_string(),
        FakeQuadriflow::Fail => "echo \"cannot load $in\" >&2\nexit 1".to_string(),
        FakeQuadriflow::NoOutput => "echo \"done\"".to_string(),
        FakeQuadriflow::Sleep(secs) => format!("sleep {secs}\ncp \"$in\" \"$out\""),
        FakeQuadriflow::WriteText(text) => {
            format!("cat > \"$out\" <<'AUTOFLOW_EOF'\n{text}\nAUTOFLOW_EOF")
        }
    };

    let body = format!(
        r#"#!/bin/sh
echo "$@" > "{args}"
in=""
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -i) in="$2"; shift ;;
    -o) out="$2"; shift ;;
  esac
  shift
done
{action}
"#,
        args = args_file.display(),
    );

    std::fs::write(&script, body)?;
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
    Ok(script)
}

/// Arguments the stand-in script was last called with.
pub fn recorded_args(dir: &std::path::Path) -> Option<Vec<String>> {
    let text = std::fs::read_to_string(dir.join("args.txt")).ok()?;
    Some(text.split_whitespace().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_factories() {
        let cube = cube_mesh("Cube", 1.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert_eq!(cube.triangle_count(), 12);

        assert_eq!(tetrahedron_mesh("T").face_count(), 4);
        assert_eq!(plane_mesh("P").face_count(), 1);
        assert_eq!(fin_mesh("F").face_count(), 3);
        assert_eq!(bowtie_mesh("B").vertex_count(), 7);
    }

    #[test]
    fn test_cube_bounds_follow_size() {
        let (min, max) = cube_mesh("Cube", 4.0).bounds().unwrap();
        assert_eq!(min, [-2.0, -2.0, -2.0]);
        assert_eq!(max, [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_scene_factories() {
        let scene = scene_single_cube();
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.active.as_deref(), Some("cube1"));
        assert_eq!(scene.selected, vec!["cube1".to_string()]);
        assert!(scene_with(vec![]).active.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_fake_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = write_fake_quadriflow(dir.path(), FakeQuadriflow::Fail).unwrap();
        let mode = script.metadata().unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
        assert!(recorded_args(dir.path()).is_none());
    }
}

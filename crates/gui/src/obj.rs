//! Wavefront OBJ reading and writing.
//!
//! Only positions and polygon faces are exchanged. Texture coordinates,
//! normals, groups and materials in the input are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use shared::MeshSnapshot;
use thiserror::Error;

use crate::error::ObjError;

/// Write a snapshot as OBJ.
///
/// With `triangulate` every polygon is fan-split into triangles first.
pub fn write_obj<W: Write>(mesh: &MeshSnapshot, triangulate: bool, mut out: W) -> io::Result<()> {
    writeln!(out, "# autoflow")?;
    let name = object_name(&mesh.name);
    if !name.is_empty() {
        writeln!(out, "o {name}")?;
    }
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
    }

    let triangulated;
    let faces = if triangulate && !mesh.is_triangulated() {
        triangulated = mesh.triangulated();
        &triangulated.faces
    } else {
        &mesh.faces
    };

    let mut line = String::new();
    for face in faces {
        line.clear();
        line.push('f');
        for &idx in face {
            line.push(' ');
            line.push_str(&(idx as u64 + 1).to_string());
        }
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Object name fit for a single `o` record: control characters become spaces.
fn object_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Render a snapshot to an OBJ string.
pub fn to_obj_string(mesh: &MeshSnapshot, triangulate: bool) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_obj(mesh, triangulate, &mut buf);
    String::from_utf8(buf).unwrap_or_default()
}

/// Errors of [`read_obj`]: either the reader failed or the content is malformed.
#[derive(Debug, Error)]
pub enum ReadObjError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ObjError),
}

/// Read an OBJ stream into one snapshot.
///
/// All objects and groups in the file are merged. The first `o` name becomes
/// the snapshot name, falling back to `default_name`.
pub fn read_obj<R: BufRead>(input: R, default_name: &str) -> Result<MeshSnapshot, ReadObjError> {
    let mut mesh = MeshSnapshot::new(default_name, Vec::new(), Vec::new());
    let mut named = false;

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        parse_line(&line, i + 1, &mut mesh, &mut named)?;
    }
    Ok(mesh)
}

/// Parse OBJ text into one snapshot.
pub fn parse_obj(text: &str, default_name: &str) -> Result<MeshSnapshot, ObjError> {
    let mut mesh = MeshSnapshot::new(default_name, Vec::new(), Vec::new());
    let mut named = false;
    for (i, line) in text.lines().enumerate() {
        parse_line(line, i + 1, &mut mesh, &mut named)?;
    }
    Ok(mesh)
}

/// Read an OBJ file. The mesh is named after the file stem.
pub fn load_obj_file(path: &Path) -> Result<MeshSnapshot, ReadObjError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Mesh".to_string());
    let file = File::open(path)?;
    let mut mesh = read_obj(BufReader::new(file), &stem)?;
    mesh.name = stem;
    Ok(mesh)
}

/// Write a snapshot to an OBJ file, replacing any existing file.
pub fn save_obj_file(mesh: &MeshSnapshot, triangulate: bool, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_obj(mesh, triangulate, BufWriter::new(file))
}

fn parse_line(
    line: &str,
    line_no: usize,
    mesh: &mut MeshSnapshot,
    named: &mut bool,
) -> Result<(), ObjError> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(());
    };

    match keyword {
        "v" => {
            let mut coords = [0.0f64; 3];
            for c in coords.iter_mut() {
                let token = tokens.next().ok_or(ObjError::BadVertex { line: line_no })?;
                *c = parse_number(token, line_no)?;
            }
            mesh.vertices.push(coords);
        }
        "f" => {
            let mut face = Vec::new();
            for token in tokens {
                let index_token = token.split('/').next().unwrap_or("");
                let raw: i64 = index_token.parse().map_err(|_| ObjError::BadNumber {
                    line: line_no,
                    token: token.to_string(),
                })?;
                face.push(resolve_index(raw, mesh.vertices.len(), line_no)?);
            }
            if face.len() < 3 {
                return Err(ObjError::ShortFace { line: line_no });
            }
            mesh.faces.push(face);
        }
        "o" => {
            if !*named {
                let name = tokens.collect::<Vec<_>>().join(" ");
                if !name.is_empty() {
                    mesh.name = name;
                    *named = true;
                }
            }
        }
        // vt, vn, g, s, usemtl, mtllib, l, ...
        _ => {}
    }
    Ok(())
}

fn parse_number(token: &str, line: usize) -> Result<f64, ObjError> {
    token.parse().map_err(|_| ObjError::BadNumber {
        line,
        token: token.to_string(),
    })
}

/// Convert a one-based (or negative, relative) OBJ index to zero-based.
fn resolve_index(raw: i64, vertex_count: usize, line: usize) -> Result<u32, ObjError> {
    let count = vertex_count as i64;
    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count + raw
    } else {
        -1
    };
    if resolved < 0 || resolved >= count {
        return Err(ObjError::IndexOutOfRange { line, index: raw });
    }
    Ok(resolved as u32)
}

//! JSON command protocol for scripted and agent-driven sessions.
//!
//! Commands are tagged objects, e.g. `{"command": "remesh"}`. A batch is a
//! JSON array of commands; every command yields one `CommandResponse`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shared::RemeshOptions;

use crate::exchange::LastRun;
use crate::harness::TestHarness;
use crate::validation::MeshValidator;

/// A command a script or agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Read an OBJ file into a new object
    LoadObj { path: PathBuf },
    /// Parse inline OBJ text into a new object
    LoadObjText { name: String, text: String },
    /// Make an object active and the only selection
    Select { id: String },
    /// Clear selection.
    ClearSelection,
    /// Rename an object
    Rename { id: String, name: String },
    /// Replace the remesh options
    SetOptions { options: RemeshOptions },
    /// Point at the QuadriFlow executable
    SetQuadriflowPath { path: PathBuf },
    /// Manifold report for the active object
    CheckManifold,
    /// Remesh the active object
    Remesh,
    /// Inspect the scene: list all objects.
    Inspect,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Clear the entire scene.
    Clear,
    /// Write an object to an OBJ file
    ExportObj { id: String, path: PathBuf },
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn err_with_data(msg: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: Some(data),
        }
    }
}

fn trace_json(harness: &TestHarness) -> Vec<String> {
    harness
        .exchange
        .trace()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    tracing::debug!(?cmd, "executing command");
    match cmd {
        AgentCommand::LoadObj { path } => match harness.load_obj(&path) {
            Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
            Err(e) => CommandResponse::err(format!("Failed to load {}: {e}", path.display())),
        },

        AgentCommand::LoadObjText { name, text } => match harness.load_obj_text(&name, &text) {
            Ok(id) => CommandResponse::ok_with_data(serde_json::json!({ "id": id })),
            Err(e) => CommandResponse::err(format!("Invalid OBJ: {e}")),
        },

        AgentCommand::Select { id } => {
            if harness.select(&id) {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": [id] }))
            } else {
                CommandResponse::err(format!("Unknown object: {id}"))
            }
        }

        AgentCommand::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::Rename { id, name } => {
            if harness.rename(&id, &name) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("Cannot rename {id} to '{name}'"))
            }
        }

        AgentCommand::SetOptions { options } => {
            harness.set_options(options);
            CommandResponse::ok()
        }

        AgentCommand::SetQuadriflowPath { path } => {
            harness.set_quadriflow_path(path);
            CommandResponse::ok()
        }

        AgentCommand::CheckManifold => match harness.check_manifold() {
            Some(report) => CommandResponse::ok_with_data(serde_json::json!({
                "manifold": report.is_manifold(),
                "summary": report.summary(),
                "edge_count": report.edge_count,
                "boundary_edges": report.boundary_edges.len(),
                "non_manifold_edges": report.non_manifold_edges.len(),
                "non_manifold_vertices": report.non_manifold_vertices.len(),
                "inconsistent_edges": report.inconsistent_edges.len(),
            })),
            None => CommandResponse::err("No active object"),
        },

        AgentCommand::Remesh => match harness.remesh() {
            Ok(outcome) => CommandResponse::ok_with_data(serde_json::json!({
                "source": outcome.source,
                "object": outcome.object,
                "output_vertices": outcome.output_vertices,
                "output_faces": outcome.output_faces,
                "command": outcome.command,
                "trace": trace_json(harness),
            })),
            Err(e) => CommandResponse::err_with_data(
                e.to_string(),
                serde_json::json!({
                    "kind": e.kind(),
                    "trace": trace_json(harness),
                }),
            ),
        },

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = harness
                .scene
                .scene
                .objects
                .iter()
                .map(|object| {
                    let validator = MeshValidator::new(&object.mesh);
                    serde_json::json!({
                        "id": object.id,
                        "name": object.name,
                        "visible": object.visible,
                        "vertices": validator.vertex_count(),
                        "faces": validator.face_count(),
                        "degenerate_faces": validator.degenerate_face_count(),
                        "dimensions": validator.dimensions(),
                    })
                })
                .collect();
            let last_run = harness.exchange.last_run().map(|run| match run {
                LastRun::Succeeded(outcome) => {
                    serde_json::json!({ "success": true, "object": outcome.object })
                }
                LastRun::Failed { kind, message } => {
                    serde_json::json!({ "success": false, "kind": kind, "message": message })
                }
            });
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "active": harness.scene.scene.active,
                "selected": harness.scene.scene.selected,
                "options": harness.options,
                "ready": harness.readiness().err().map(|b| b.to_string()),
                "last_run": last_run,
            }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Clear => {
            harness.clear();
            CommandResponse::ok()
        }

        AgentCommand::ExportObj { id, path } => match harness.export_obj(&id, &path) {
            Ok(true) => CommandResponse::ok_with_data(serde_json::json!({ "path": path })),
            Ok(false) => CommandResponse::err(format!("Unknown object: {id}")),
            Err(e) => CommandResponse::err(format!("Failed to write {}: {e}", path.display())),
        },

        AgentCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::platform::{Capabilities, Platform};

    fn harness() -> TestHarness {
        TestHarness::with_capabilities(Capabilities::new(Platform::Linux, false))
    }

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::Undo));
    }

    #[test]
    fn test_command_serde_set_options_partial() {
        let json = r#"{"command": "set_options", "options": {"min_cost_flow": true, "resolution": 4}}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::SetOptions { options } => {
                assert!(options.min_cost_flow);
                assert!(!options.sharp_preserving);
                assert_eq!(options.resolution, 4);
            }
            _ => panic!("Expected SetOptions"),
        }
    }

    #[test]
    fn test_command_serde_select() {
        let json = r#"{"command": "select", "id": "a"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        match cmd {
            AgentCommand::Select { id } => assert_eq!(id, "a"),
            _ => panic!("Expected Select"),
        }
    }

    #[test]
    fn test_execute_load_obj_text_and_inspect() {
        let mut h = harness();
        let text = crate::obj::to_obj_string(&fixtures::cube_mesh("Cube", 1.0), false);
        let cmd = serde_json::json!({ "command": "load_obj_text", "name": "Cube", "text": text });

        let resp = execute_json(&mut h, &cmd.to_string()).unwrap();
        assert!(resp.success);
        let id = resp.data.unwrap()["id"].as_str().unwrap().to_string();

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["object_count"], 1);
        assert_eq!(data["active"], id.as_str());
        assert_eq!(data["objects"][0]["faces"], 6);
        assert_eq!(data["options"]["resolution"], 1000);
    }

    #[test]
    fn test_execute_rename_shows_in_inspect() {
        let mut h = harness();
        let id = h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let cmd = serde_json::json!({ "command": "rename", "id": id, "name": "Body" });
        assert!(execute_json(&mut h, &cmd.to_string()).unwrap().success);
        let cmd = serde_json::json!({ "command": "rename", "id": id, "name": " " });
        assert!(!execute_json(&mut h, &cmd.to_string()).unwrap().success);

        let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
            .unwrap()
            .data
            .unwrap();
        let object = &data["objects"][0];
        assert_eq!(object["name"], "Body");
        assert_eq!(object["degenerate_faces"], 0);
        assert_eq!(object["dimensions"], serde_json::json!([1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_execute_check_manifold() {
        let mut h = harness();
        let resp = execute_json(&mut h, r#"{"command": "check_manifold"}"#).unwrap();
        assert!(!resp.success);

        h.add_mesh(fixtures::plane_mesh("Plane"));
        let resp = execute_json(&mut h, r#"{"command": "check_manifold"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["manifold"], false);
        assert_eq!(data["boundary_edges"], 4);
    }

    #[test]
    fn test_execute_remesh_without_path_reports_kind() {
        let mut h = harness();
        h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        let resp = execute_json(&mut h, r#"{"command": "remesh"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("QuadriFlow path"));
        let data = resp.data.unwrap();
        assert_eq!(data["kind"], "config");
        assert_eq!(data["trace"], serde_json::json!(["idle", "error"]));
    }

    #[test]
    fn test_execute_select_unknown() {
        let mut h = harness();
        let resp = execute_json(&mut h, r#"{"command": "select", "id": "nope"}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = harness();
        h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.object_count(), 0);

        let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_execute_batch() {
        let mut h = harness();
        let batch = r#"[
            {"command": "set_quadriflow_path", "path": "/opt/quadriflow"},
            {"command": "set_options", "options": {"require_manifold": true}},
            {"command": "clear"}
        ]"#;
        let responses = execute_json_batch(&mut h, batch).unwrap();
        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(h.settings.quadriflow.path, "/opt/quadriflow");
        assert!(h.options.require_manifold);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = harness();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "explode"}"#).is_err());
    }
}

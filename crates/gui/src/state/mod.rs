pub mod readiness;
pub mod remesh_dialog;
pub mod scene;
pub mod settings;

use std::path::Path;

use shared::{ObjectId, RemeshOptions};

use crate::error::RemeshResult;
use crate::exchange::{MeshExchange, RemeshOutcome};
use crate::obj::{self, ReadObjError};
use crate::platform::Capabilities;

pub use readiness::Blocker;
pub use remesh_dialog::RemeshDialog;
pub use scene::{mesh_stats_label, object_display_name, short_id, SceneState};
pub use settings::AppSettings;

/// Panel visibility flags
pub struct PanelVisibility {
    pub scene_tree: bool,
    pub tools: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            scene_tree: true,
            tools: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub scene: SceneState,
    /// Remesh options; session only
    pub options: RemeshOptions,
    pub settings: AppSettings,
    pub caps: Capabilities,
    pub exchange: MeshExchange,
    pub panels: PanelVisibility,
    /// Show settings window
    pub show_settings_window: bool,
    pub remesh_dialog: RemeshDialog,
    /// Last message for the status bar
    pub status: Option<String>,
    /// Remesh asked for by the UI, run at the start of the next frame
    remesh_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::load(), Capabilities::detect())
    }
}

impl AppState {
    pub fn new(settings: AppSettings, caps: Capabilities) -> Self {
        Self {
            scene: SceneState::default(),
            options: RemeshOptions::default(),
            settings,
            caps,
            exchange: MeshExchange::new(),
            panels: PanelVisibility::default(),
            show_settings_window: false,
            remesh_dialog: RemeshDialog::default(),
            status: None,
            remesh_requested: false,
        }
    }

    /// Whether the Remesh action can run right now
    pub fn readiness(&self) -> Result<(), Blocker> {
        readiness::check(&self.settings, &self.scene, &self.caps)
    }

    /// Open the popup dialog, or record why it stays closed.
    pub fn open_remesh_dialog(&mut self) {
        let readiness = self.readiness();
        if let Err(blocker) = &readiness {
            self.status = Some(blocker.to_string());
        }
        self.remesh_dialog.request_open(readiness);
    }

    /// Load an OBJ file as a new active object.
    pub fn import_obj(&mut self, path: &Path) -> Result<ObjectId, ReadObjError> {
        let result = obj::load_obj_file(path).map(|mesh| {
            let name = mesh.name.clone();
            self.scene.add_object(name, mesh)
        });
        match &result {
            Ok(_) => tracing::info!("Imported {}", path.display()),
            Err(e) => {
                tracing::error!("Failed to import {}: {e}", path.display());
                self.status = Some(format!("Import failed: {e}"));
            }
        }
        result
    }

    /// Write the active object to an OBJ file. Returns false without an active object.
    pub fn export_active_obj(&mut self, path: &Path) -> std::io::Result<bool> {
        let Some(object) = self.scene.active_object() else {
            return Ok(false);
        };
        let mut mesh = object.mesh.clone();
        mesh.name = object.name.clone();
        let result = obj::save_obj_file(&mesh, false, path);
        if let Err(e) = &result {
            tracing::error!("Failed to export {}: {e}", path.display());
            self.status = Some(format!("Export failed: {e}"));
        }
        result.map(|()| true)
    }

    /// Queue a remesh so the frame showing the busy state is drawn first.
    pub fn request_remesh(&mut self) {
        self.remesh_requested = true;
    }

    pub fn remesh_pending(&self) -> bool {
        self.remesh_requested
    }

    /// Run a queued remesh, if any.
    pub fn run_pending_remesh(&mut self) -> Option<RemeshResult<RemeshOutcome>> {
        if !std::mem::take(&mut self.remesh_requested) {
            return None;
        }
        Some(self.run_remesh())
    }

    /// Remesh the active object with the current options.
    pub fn run_remesh(&mut self) -> RemeshResult<RemeshOutcome> {
        let result = self
            .exchange
            .run(&mut self.scene, &self.options, &self.settings, &self.caps);
        self.status = Some(match &result {
            Ok(outcome) => format!(
                "Remeshed: {} faces in {:.1}s",
                outcome.output_faces,
                outcome.elapsed.as_secs_f64()
            ),
            Err(e) => format!("Remesh failed ({}): {e}", e.kind()),
        });
        result
    }
}

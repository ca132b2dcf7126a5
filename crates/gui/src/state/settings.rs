//! Application settings (preferences window)
//!
//! Loaded once at startup and written back on "Apply" and at shutdown.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
pub use crate::host::ImportMode;

/// QuadriFlow executable settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadriflowSettings {
    /// Path to the QuadriFlow executable; empty means not set
    pub path: String,
    /// Maximum run time in seconds; 0 allows unlimited time
    pub timeout_secs: u64,
}

impl QuadriflowSettings {
    /// Whether a path has been entered at all
    pub fn path_is_set(&self) -> bool {
        !self.path.trim().is_empty()
    }

    pub fn executable(&self) -> PathBuf {
        PathBuf::from(self.path.trim())
    }

    /// The executable path, checked to be set and present on disk.
    ///
    /// Relative paths are made absolute against the current directory, the
    /// same one the existence check uses. A bare name would otherwise be
    /// looked up on `PATH` when spawned.
    pub fn resolve_executable(&self) -> Result<PathBuf, ConfigError> {
        if !self.path_is_set() {
            return Err(ConfigError::PathNotSet);
        }
        let path = self.executable();
        let path = std::path::absolute(&path).unwrap_or(path);
        if !path.is_file() {
            return Err(ConfigError::PathNotFound(path));
        }
        Ok(path)
    }

    /// Timeout to apply to the child process, if any
    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}

/// How meshes travel to QuadriFlow and back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    /// Split polygons into triangles before export
    pub triangulate_export: bool,
    /// Where the remeshed geometry goes
    pub import_mode: ImportMode,
    /// Parent directory for per-run scratch directories; system temp when unset
    pub temp_root: Option<PathBuf>,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            triangulate_export: true,
            import_mode: ImportMode::AddNew,
            temp_root: None,
        }
    }
}

/// Viewport colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Wireframe color RGB
    pub wire_color: [u8; 3],
    /// Active object wireframe color RGB
    pub active_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            wire_color: [170, 170, 180],
            active_color: [255, 170, 60],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub quadriflow: QuadriflowSettings,
    pub exchange: ExchangeSettings,
    pub viewport: ViewportSettings,
    pub ui: UiSettings,
}

impl AppSettings {
    /// Location of `settings.json` in the per-user config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "autoflow", "autoflow")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to the config directory
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::error!("Failed to save settings to {}: {e}", path.display());
            }
        }
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

//! Checks that decide whether the Remesh action is offered.
//!
//! The tools panel and the popup dialog share these. They need no file I/O
//! beyond an existence check on the executable path.

use thiserror::Error;

use crate::error::ConfigError;
use crate::host::MeshHost;
use crate::platform::Capabilities;
use crate::state::settings::AppSettings;

/// First reason the Remesh action cannot run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Blocker {
    #[error("Set the QuadriFlow path in the preferences")]
    PathNotSet,
    #[error("The QuadriFlow path cannot be found")]
    PathNotFound,
    #[error("Select a mesh object to remesh")]
    NoMeshSelected,
    #[error("Remeshing is only available on Linux and Windows")]
    UnsupportedOs,
}

/// Run the checks in order and report the first failure.
pub fn check<H: MeshHost>(
    settings: &AppSettings,
    host: &H,
    caps: &Capabilities,
) -> Result<(), Blocker> {
    match settings.quadriflow.resolve_executable() {
        Ok(_) => {}
        Err(ConfigError::PathNotSet) => return Err(Blocker::PathNotSet),
        Err(_) => return Err(Blocker::PathNotFound),
    }
    if host.active_mesh().is_none() {
        return Err(Blocker::NoMeshSelected);
    }
    if !caps.platform.is_supported() {
        return Err(Blocker::UnsupportedOs);
    }
    Ok(())
}

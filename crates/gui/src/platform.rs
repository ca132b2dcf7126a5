//! Host platform probing.
//!
//! QuadriFlow is driven on Linux and Windows. The `-sat` flag additionally
//! shells out to `minisat` and `timeout`, so it is offered only on Linux
//! when both are installed.

use std::fmt;
use std::path::{Path, PathBuf};

/// Operating system family the application runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
    Other,
}

impl Platform {
    /// Platform of the running process
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    /// Whether remeshing is offered at all on this platform
    pub fn is_supported(&self) -> bool {
        matches!(self, Platform::Linux | Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Other => "an unsupported OS",
        };
        f.write_str(name)
    }
}

/// What the command builder may emit on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub platform: Platform,
    /// `minisat` and `timeout` are both on `PATH`
    pub sat_tools: bool,
}

impl Capabilities {
    /// Probe the running host.
    pub fn detect() -> Self {
        let platform = Platform::current();
        let sat_tools = platform == Platform::Linux
            && executable_on_path("minisat").is_some()
            && executable_on_path("timeout").is_some();
        tracing::debug!(%platform, sat_tools, "probed host capabilities");
        Self {
            platform,
            sat_tools,
        }
    }

    /// Fixed capabilities, for tests and scripted runs.
    pub fn new(platform: Platform, sat_tools: bool) -> Self {
        Self {
            platform,
            sat_tools,
        }
    }

    /// Whether the `-sat` flag can be used
    pub fn flip_removal_allowed(&self) -> bool {
        self.platform == Platform::Linux && self.sat_tools
    }
}

/// Find an executable by name in the directories listed in `PATH`.
pub fn executable_on_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_platforms() {
        assert!(Platform::Linux.is_supported());
        assert!(Platform::Windows.is_supported());
        assert!(!Platform::MacOs.is_supported());
        assert!(!Platform::Other.is_supported());
    }

    #[test]
    fn test_flip_removal_only_on_linux_with_tools() {
        assert!(Capabilities::new(Platform::Linux, true).flip_removal_allowed());
        assert!(!Capabilities::new(Platform::Linux, false).flip_removal_allowed());
        assert!(!Capabilities::new(Platform::Windows, true).flip_removal_allowed());
        assert!(!Capabilities::new(Platform::MacOs, true).flip_removal_allowed());
    }

    #[test]
    fn test_detect_never_allows_sat_off_linux() {
        let caps = Capabilities::detect();
        if caps.platform != Platform::Linux {
            assert!(!caps.flip_removal_allowed());
        }
    }

    #[test]
    fn test_missing_executable_not_found() {
        assert!(executable_on_path("autoflow-definitely-not-installed-tool").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_sh_found_on_path() {
        assert!(executable_on_path("sh").is_some());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Linux.to_string(), "Linux");
        assert_eq!(Platform::MacOs.to_string(), "macOS");
    }
}

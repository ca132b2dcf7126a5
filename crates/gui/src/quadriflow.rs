//! QuadriFlow command line construction.
//!
//! `quadriflow [-mcf] [-sharp] [-sat] -i <input.obj> -o <output.obj> -f <resolution>`
//!
//! The builder is pure: the same options and paths always give the same
//! argument list. Flag descriptions: <https://github.com/hjwdzh/QuadriFlow>.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use shared::RemeshOptions;

use crate::error::ConfigError;
use crate::platform::Capabilities;

pub const FLAG_MIN_COST_FLOW: &str = "-mcf";
pub const FLAG_SHARP: &str = "-sharp";
pub const FLAG_FLIP_REMOVAL: &str = "-sat";
pub const FLAG_INPUT: &str = "-i";
pub const FLAG_OUTPUT: &str = "-o";
pub const FLAG_RESOLUTION: &str = "-f";

/// A fully resolved QuadriFlow call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadriflowInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl QuadriflowInvocation {
    /// Process builder for this call. Stdio is left to the caller.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Arguments as UTF-8 strings (lossy), for assertions and logs.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Shell-like rendering for log lines.
    pub fn display(&self) -> String {
        let mut line = quote(&self.program.to_string_lossy());
        for arg in self.args_lossy() {
            line.push(' ');
            line.push_str(&quote(&arg));
        }
        line
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// Reject option sets that cannot be turned into a command on this host.
pub fn check_options(options: &RemeshOptions, caps: &Capabilities) -> Result<(), ConfigError> {
    if !options.has_valid_resolution() {
        return Err(ConfigError::InvalidResolution);
    }
    if options.flip_removal && !caps.flip_removal_allowed() {
        return Err(ConfigError::FlipRemovalUnavailable);
    }
    Ok(())
}

/// Map the remesh options onto a QuadriFlow argument list.
///
/// Fails when flip removal is requested on a host that cannot run it, or
/// when the resolution is zero.
pub fn build_invocation(
    options: &RemeshOptions,
    executable: &Path,
    input: &Path,
    output: &Path,
    caps: &Capabilities,
) -> Result<QuadriflowInvocation, ConfigError> {
    check_options(options, caps)?;

    let mut args: Vec<OsString> = Vec::with_capacity(10);
    if options.min_cost_flow {
        args.push(FLAG_MIN_COST_FLOW.into());
    }
    if options.sharp_preserving {
        args.push(FLAG_SHARP.into());
    }
    if options.flip_removal {
        args.push(FLAG_FLIP_REMOVAL.into());
    }
    args.push(FLAG_INPUT.into());
    args.push(input.as_os_str().to_owned());
    args.push(FLAG_OUTPUT.into());
    args.push(output.as_os_str().to_owned());
    args.push(FLAG_RESOLUTION.into());
    args.push(options.resolution.to_string().into());

    Ok(QuadriflowInvocation {
        program: executable.to_path_buf(),
        args,
    })
}

/// Where QuadriFlow writes the result for a given input file.
///
/// `mesh.obj` → `mesh_remeshed.obj` in the same directory.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}_remeshed.{}", ext.to_string_lossy()),
        None => format!("{stem}_remeshed"),
    };
    input.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    fn linux_with_sat() -> Capabilities {
        Capabilities::new(Platform::Linux, true)
    }

    fn build(options: &RemeshOptions, caps: &Capabilities) -> Result<Vec<String>, ConfigError> {
        build_invocation(
            options,
            Path::new("/opt/quadriflow"),
            Path::new("/tmp/in.obj"),
            Path::new("/tmp/in_remeshed.obj"),
            caps,
        )
        .map(|inv| inv.args_lossy())
    }

    fn all_option_combinations() -> Vec<RemeshOptions> {
        let mut out = Vec::new();
        for bits in 0..16u8 {
            out.push(RemeshOptions {
                min_cost_flow: bits & 1 != 0,
                sharp_preserving: bits & 2 != 0,
                flip_removal: bits & 4 != 0,
                require_manifold: bits & 8 != 0,
                resolution: 1 + bits as u32,
            });
        }
        out
    }

    #[test]
    fn test_min_cost_flow_example() {
        let options = RemeshOptions {
            min_cost_flow: true,
            resolution: 4,
            ..Default::default()
        };
        let args = build(&options, &linux_with_sat()).unwrap();
        assert_eq!(
            args,
            vec!["-mcf", "-i", "/tmp/in.obj", "-o", "/tmp/in_remeshed.obj", "-f", "4"]
        );
        assert!(!args.iter().any(|a| a == "-sharp" || a == "-sat"));
    }

    #[test]
    fn test_flags_match_options_for_every_combination() {
        let caps = linux_with_sat();
        for options in all_option_combinations() {
            let args = build(&options, &caps).unwrap();
            assert_eq!(args.iter().any(|a| a == "-mcf"), options.min_cost_flow);
            assert_eq!(args.iter().any(|a| a == "-sharp"), options.sharp_preserving);
            assert_eq!(args.iter().any(|a| a == "-sat"), options.flip_removal);

            let n = args.len();
            assert_eq!(&args[n - 6..n - 2], &["-i", "/tmp/in.obj", "-o", "/tmp/in_remeshed.obj"]);
            assert_eq!(args[n - 2], "-f");
            assert_eq!(args[n - 1], options.resolution.to_string());
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        let caps = linux_with_sat();
        for options in all_option_combinations() {
            assert_eq!(build(&options, &caps).unwrap(), build(&options, &caps).unwrap());
        }
    }

    #[test]
    fn test_all_flags_order() {
        let options = RemeshOptions {
            min_cost_flow: true,
            sharp_preserving: true,
            flip_removal: true,
            ..Default::default()
        };
        let args = build(&options, &linux_with_sat()).unwrap();
        assert_eq!(&args[..4], &["-mcf", "-sharp", "-sat", "-i"]);
    }

    #[test]
    fn test_sat_never_emitted_off_linux() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Other] {
            let caps = Capabilities::new(platform, true);
            for options in all_option_combinations() {
                match build(&options, &caps) {
                    Ok(args) => assert!(!args.iter().any(|a| a == "-sat")),
                    Err(e) => {
                        assert!(options.flip_removal);
                        assert!(matches!(e, ConfigError::FlipRemovalUnavailable));
                    }
                }
            }
        }
    }

    #[test]
    fn test_sat_needs_solver_tools() {
        let options = RemeshOptions {
            flip_removal: true,
            ..Default::default()
        };
        let err = build(&options, &Capabilities::new(Platform::Linux, false)).unwrap_err();
        assert!(matches!(err, ConfigError::FlipRemovalUnavailable));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let options = RemeshOptions {
            resolution: 0,
            ..Default::default()
        };
        let err = build(&options, &linux_with_sat()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidResolution));
    }

    #[test]
    fn test_output_path_naming() {
        assert_eq!(
            output_path_for(Path::new("/tmp/s/Cube.obj")),
            PathBuf::from("/tmp/s/Cube_remeshed.obj")
        );
        assert_eq!(
            output_path_for(Path::new("/tmp/s/mesh")),
            PathBuf::from("/tmp/s/mesh_remeshed")
        );
    }

    #[test]
    fn test_display_quotes_spaces() {
        let inv = build_invocation(
            &RemeshOptions::default(),
            Path::new("/opt/my tools/quadriflow"),
            Path::new("/tmp/in.obj"),
            Path::new("/tmp/out.obj"),
            &linux_with_sat(),
        )
        .unwrap();
        assert!(inv.display().starts_with("\"/opt/my tools/quadriflow\" -i"));
        assert!(inv.display().ends_with("-f 1000"));
    }
}

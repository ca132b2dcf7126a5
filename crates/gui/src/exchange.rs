//! Mesh exchange with the external remesher.
//!
//! One run walks `Idle → Exporting → Invoking → Importing → Done`, or drops
//! to `Error` from any step. The active mesh is written to a scratch
//! directory, QuadriFlow is run on it, and the result is read back into the
//! host. The scratch directory is a [`tempfile::TempDir`] owned by the run,
//! so it is removed on every exit path.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use shared::{MeshSnapshot, ObjectId, RemeshOptions};
use tempfile::TempDir;

use crate::error::{
    ConfigError, ExportError, ImportError, ProcessError, RemeshError, RemeshResult,
    ValidationError,
};
use crate::host::{ActiveMesh, MeshHost};
use crate::manifold;
use crate::obj::{self, ReadObjError};
use crate::platform::Capabilities;
use crate::quadriflow::{self, QuadriflowInvocation};
use crate::state::settings::AppSettings;
use crate::validation::MeshValidator;

const SESSION_PREFIX: &str = "autoflow-";
const STDOUT_LOG: &str = "quadriflow.stdout.log";
const STDERR_LOG: &str = "quadriflow.stderr.log";
const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Lines of stderr kept for error messages
const STDERR_TAIL_LINES: usize = 20;

/// Step of a remesh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    Exporting,
    Invoking,
    Importing,
    Done,
    Error,
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangeState::Idle => "idle",
            ExchangeState::Exporting => "exporting",
            ExchangeState::Invoking => "invoking",
            ExchangeState::Importing => "importing",
            ExchangeState::Done => "done",
            ExchangeState::Error => "error",
        };
        f.write_str(name)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RemeshOutcome {
    /// Object that was remeshed
    pub source: ObjectId,
    /// Object now holding the remeshed geometry
    pub object: ObjectId,
    pub input_faces: usize,
    pub output_vertices: usize,
    pub output_faces: usize,
    /// Command line that was run, for logs and the status bar
    pub command: String,
    pub elapsed: Duration,
}

/// What the last run ended with, kept for display.
#[derive(Debug, Clone, PartialEq)]
pub enum LastRun {
    Succeeded(RemeshOutcome),
    Failed { kind: &'static str, message: String },
}

/// Driver of remesh runs. Holds no mesh data between runs.
#[derive(Debug)]
pub struct MeshExchange {
    state: ExchangeState,
    in_flight: bool,
    trace: Vec<ExchangeState>,
    last: Option<LastRun>,
}

impl Default for MeshExchange {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshExchange {
    pub fn new() -> Self {
        Self {
            state: ExchangeState::Idle,
            in_flight: false,
            trace: Vec::new(),
            last: None,
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Whether a run is in progress
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// States entered by the most recent run, starting with `Idle`.
    pub fn trace(&self) -> &[ExchangeState] {
        &self.trace
    }

    /// Whether the most recent run entered `state`
    pub fn reached(&self, state: ExchangeState) -> bool {
        self.trace.contains(&state)
    }

    pub fn last_run(&self) -> Option<&LastRun> {
        self.last.as_ref()
    }

    /// Remesh the host's active mesh.
    ///
    /// Every failure aborts only this run; the exchange is back in `Idle`
    /// when this returns.
    pub fn run<H: MeshHost>(
        &mut self,
        host: &mut H,
        options: &RemeshOptions,
        settings: &AppSettings,
        caps: &Capabilities,
    ) -> RemeshResult<RemeshOutcome> {
        if self.in_flight {
            tracing::warn!("remesh requested while another run is in flight");
            return Err(RemeshError::Busy);
        }
        self.in_flight = true;
        self.trace.clear();
        self.trace.push(ExchangeState::Idle);

        let result = self.run_steps(host, options, settings, caps);

        match &result {
            Ok(outcome) => {
                self.enter(ExchangeState::Done);
                tracing::info!(
                    object = %outcome.object,
                    vertices = outcome.output_vertices,
                    faces = outcome.output_faces,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "remesh finished"
                );
                self.last = Some(LastRun::Succeeded(outcome.clone()));
            }
            Err(e) => {
                self.enter(ExchangeState::Error);
                tracing::error!(kind = e.kind(), "remesh failed: {e}");
                self.last = Some(LastRun::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }

        self.state = ExchangeState::Idle;
        self.in_flight = false;
        result
    }

    fn enter(&mut self, next: ExchangeState) {
        tracing::debug!(from = %self.state, to = %next, "exchange transition");
        self.state = next;
        self.trace.push(next);
    }

    fn run_steps<H: MeshHost>(
        &mut self,
        host: &mut H,
        options: &RemeshOptions,
        settings: &AppSettings,
        caps: &Capabilities,
    ) -> RemeshResult<RemeshOutcome> {
        let started = Instant::now();

        let executable = preflight_executable(settings, caps)?;
        let active = host.active_mesh().ok_or(ExportError::NoActiveMesh)?;
        if options.require_manifold {
            let report = manifold::analyze(&active.mesh);
            if !report.is_manifold() {
                return Err(ValidationError::NonManifold(report.summary()).into());
            }
        }
        quadriflow::check_options(options, caps)?;

        self.enter(ExchangeState::Exporting);
        let session = create_session_dir(settings.exchange.temp_root.as_deref())?;
        let input = export_mesh(&active, session.path(), settings.exchange.triangulate_export)?;
        let output = quadriflow::output_path_for(&input);
        let invocation = quadriflow::build_invocation(options, &executable, &input, &output, caps)?;

        self.enter(ExchangeState::Invoking);
        let stderr = invoke(&invocation, session.path(), settings.quadriflow.timeout())?;

        match std::fs::metadata(&output) {
            Ok(meta) if meta.len() > 0 => {}
            _ => {
                return Err(ImportError::MissingOutput {
                    path: output,
                    stderr,
                }
                .into())
            }
        }

        self.enter(ExchangeState::Importing);
        let mesh = import_mesh(&output, &format!("{}_remeshed", active.mesh.name))?;
        let (output_vertices, output_faces) = (mesh.vertex_count(), mesh.face_count());
        let object = host.insert_remeshed(&active.id, mesh, settings.exchange.import_mode);
        let outcome = RemeshOutcome {
            source: active.id,
            object,
            input_faces: active.mesh.face_count(),
            output_vertices,
            output_faces,
            command: invocation.display(),
            elapsed: started.elapsed(),
        };

        // `session` drops here and takes the scratch files with it.
        Ok(outcome)
    }
}

/// Executable path and platform checks that need no mesh.
fn preflight_executable(settings: &AppSettings, caps: &Capabilities) -> Result<PathBuf, ConfigError> {
    let executable = settings.quadriflow.resolve_executable()?;
    if !caps.platform.is_supported() {
        return Err(ConfigError::UnsupportedPlatform(caps.platform));
    }
    Ok(executable)
}

fn create_session_dir(temp_root: Option<&Path>) -> Result<TempDir, ExportError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SESSION_PREFIX);
    let dir = match temp_root {
        Some(root) => {
            std::fs::create_dir_all(root).map_err(|source| ExportError::Io {
                path: root.to_path_buf(),
                source,
            })?;
            builder.tempdir_in(root).map_err(|source| ExportError::Io {
                path: root.to_path_buf(),
                source,
            })?
        }
        None => builder.tempdir().map_err(|source| ExportError::Io {
            path: std::env::temp_dir(),
            source,
        })?,
    };
    tracing::debug!(dir = %dir.path().display(), "created session directory");
    Ok(dir)
}

/// File stem safe for any file system
fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "mesh".to_string()
    } else {
        stem
    }
}

fn export_mesh(active: &ActiveMesh, dir: &Path, triangulate: bool) -> Result<PathBuf, ExportError> {
    let mesh = &active.mesh;
    if mesh.is_empty() {
        return Err(ExportError::EmptyMesh(mesh.name.clone()));
    }

    let path = dir.join(format!("{}.obj", sanitize_file_stem(&mesh.name)));
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(io_err)?;
    obj::write_obj(mesh, triangulate, BufWriter::new(file)).map_err(io_err)?;

    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        triangulate,
        "exported active mesh"
    );
    Ok(path)
}

/// Log file for one child stream, inside the session directory.
fn open_log(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run QuadriFlow and wait for it. Returns the tail of its stderr.
fn invoke(
    invocation: &QuadriflowInvocation,
    dir: &Path,
    timeout: Option<Duration>,
) -> RemeshResult<String> {
    let stdout_path = dir.join(STDOUT_LOG);
    let stderr_path = dir.join(STDERR_LOG);
    let stdout = open_log(&stdout_path)?;
    let stderr = open_log(&stderr_path)?;

    tracing::info!(command = %invocation.display(), "running QuadriFlow");
    let mut child = invocation
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::PermissionDenied {
                ProcessError::PermissionDenied {
                    path: invocation.program.clone(),
                }
            } else {
                ProcessError::Spawn {
                    path: invocation.program.clone(),
                    source,
                }
            }
        })?;

    let status = wait_with_timeout(&mut child, timeout)?;
    let stderr = read_log_tail(&stderr_path);
    tracing::debug!(?status, "QuadriFlow exited");

    if !status.success() {
        return Err(ProcessError::Failed {
            code: status.code(),
            stderr,
        }
        .into());
    }
    Ok(stderr)
}

fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, ProcessError> {
    let Some(limit) = timeout else {
        return child.wait().map_err(ProcessError::Wait);
    };

    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(ProcessError::Wait)? {
            return Ok(status);
        }
        if started.elapsed() >= limit {
            tracing::warn!(secs = limit.as_secs(), "QuadriFlow timed out, killing it");
            if let Err(e) = child.kill() {
                tracing::warn!("failed to kill QuadriFlow: {e}");
            }
            let _ = child.wait();
            return Err(ProcessError::TimedOut {
                secs: limit.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn read_log_tail(path: &Path) -> String {
    let Ok(bytes) = std::fs::read(path) else {
        return String::new();
    };
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n").trim().to_string()
}

fn import_mesh(path: &Path, default_name: &str) -> Result<MeshSnapshot, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut mesh = obj::read_obj(BufReader::new(file), default_name).map_err(|e| match e {
        ReadObjError::Io(source) => ImportError::Io {
            path: path.to_path_buf(),
            source,
        },
        ReadObjError::Parse(e) => ImportError::Malformed(e),
    })?;
    mesh.name = default_name.to_string();

    if mesh.is_empty() {
        return Err(ImportError::Empty);
    }
    let problems = MeshValidator::new(&mesh).validate_all();
    if !problems.is_empty() {
        return Err(ImportError::Invalid(problems.join("; ")));
    }

    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "imported remeshed mesh"
    );
    Ok(mesh)
}

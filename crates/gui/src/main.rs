mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::exchange`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use autoflow_gui_lib::{command, exchange, harness, manifold, platform, state};

use std::path::PathBuf;

use app::AutoflowApp;

/// Command line of the binary
#[derive(Debug, Default)]
struct CliArgs {
    /// OBJ files to load at startup
    meshes: Vec<PathBuf>,
    /// JSON command file to run headless
    batch: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoflow_gui=info,autoflow_gui_lib=info".into()),
        )
        .init();

    let args = parse_args(std::env::args().skip(1));

    if let Some(batch) = args.batch {
        std::process::exit(run_batch(&batch, &args.meshes));
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Autoflow - QuadriFlow remesher")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let meshes = args.meshes;
    if let Err(e) = eframe::run_native(
        "autoflow-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(AutoflowApp::new(cc, &meshes)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> CliArgs {
    let mut out = CliArgs::default();
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mesh" => match args.next() {
                Some(path) => out.meshes.push(PathBuf::from(path)),
                None => tracing::warn!("--mesh needs a file path"),
            },
            "--batch" => match args.next() {
                Some(path) => out.batch = Some(PathBuf::from(path)),
                None => tracing::warn!("--batch needs a file path"),
            },
            other => tracing::warn!("Ignoring unknown argument {other}"),
        }
    }
    out
}

/// Run a JSON command file against a headless harness and print the
/// responses. Returns the process exit code.
fn run_batch(path: &std::path::Path, meshes: &[PathBuf]) -> i32 {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read command file {}: {e}", path.display());
            return 2;
        }
    };

    let mut harness = harness::TestHarness::new();
    harness.settings = state::AppSettings::load();
    for mesh in meshes {
        if let Err(e) = harness.load_obj(mesh) {
            tracing::error!("Failed to load {}: {e}", mesh.display());
            return 2;
        }
    }

    match command::execute_json_batch(&mut harness, &json) {
        Ok(responses) => {
            let failed = responses.iter().filter(|r| !r.success).count();
            match serde_json::to_string_pretty(&responses) {
                Ok(text) => println!("{text}"),
                Err(e) => tracing::error!("Failed to serialize responses: {e}"),
            }
            tracing::info!("Ran {} commands, {failed} failed", responses.len());
            i32::from(failed > 0)
        }
        Err(e) => {
            tracing::error!("{e}");
            2
        }
    }
}

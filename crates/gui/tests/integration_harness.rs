//! Integration tests for TestHarness.
//!
//! Drives the full remesh pipeline against a stand-in QuadriFlow script.

use autoflow_gui_lib::exchange::ExchangeState;
use autoflow_gui_lib::fixtures;
use autoflow_gui_lib::harness::TestHarness;
use autoflow_gui_lib::platform::{Capabilities, Platform};
use autoflow_gui_lib::state::Blocker;
use shared::RemeshOptions;

fn linux_harness() -> TestHarness {
    TestHarness::with_capabilities(Capabilities::new(Platform::Linux, false))
}

#[test]
fn test_harness_undo_redo_cycle() {
    let mut h = linux_harness();
    h.add_mesh(fixtures::cube_mesh("a", 1.0));
    h.add_mesh(fixtures::cube_mesh("b", 2.0));
    assert_eq!(h.object_count(), 2);

    assert!(h.undo());
    assert_eq!(h.object_count(), 1);
    assert!(h.undo());
    assert_eq!(h.object_count(), 0);
    assert!(!h.undo()); // nothing to undo

    assert!(h.redo());
    assert!(h.redo());
    assert_eq!(h.object_count(), 2);
    assert!(!h.redo()); // nothing to redo
}

#[test]
fn test_harness_obj_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Cube.obj");

    let mut h = linux_harness();
    let id = h.add_mesh(fixtures::cube_mesh("Cube", 2.0));
    assert!(h.export_obj(&id, &path).unwrap());

    let loaded = h.load_obj(&path).unwrap();
    let mesh = h.mesh_of(&loaded).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    // Export triangulates by default
    assert_eq!(mesh.face_count(), 12);
    assert!(h.validate_mesh(&loaded).unwrap().validate_all().is_empty());
}

#[test]
fn test_harness_readiness_order() {
    let mut h = linux_harness();
    h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
    assert!(matches!(h.readiness(), Err(Blocker::PathNotSet)));

    let dir = tempfile::tempdir().unwrap();
    h.set_quadriflow_path(dir.path().join("missing"));
    assert!(matches!(h.readiness(), Err(Blocker::PathNotFound)));

    std::fs::write(dir.path().join("missing"), "").unwrap();
    h.clear_selection();
    assert!(matches!(h.readiness(), Err(Blocker::NoMeshSelected)));
}

#[test]
fn test_harness_manifold_report() {
    let mut h = linux_harness();
    assert!(h.check_manifold().is_none());

    h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
    assert!(h.check_manifold().unwrap().is_manifold());

    h.add_mesh(fixtures::fin_mesh("Fin"));
    let report = h.check_manifold().unwrap();
    assert!(!report.is_manifold());
    assert!(!report.non_manifold_edges.is_empty());
}

#[cfg(unix)]
mod pipeline {
    use super::*;
    use autoflow_gui_lib::fixtures::{recorded_args, write_fake_quadriflow, FakeQuadriflow};
    use autoflow_gui_lib::state::settings::ImportMode;

    struct Rig {
        h: TestHarness,
        bin: tempfile::TempDir,
        scratch: tempfile::TempDir,
    }

    fn rig(behavior: FakeQuadriflow) -> Rig {
        let bin = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let exe = write_fake_quadriflow(bin.path(), behavior).unwrap();
        let mut h = linux_harness();
        h.set_quadriflow_path(exe);
        h.set_temp_root(scratch.path());
        Rig { h, bin, scratch }
    }

    fn scratch_is_empty(dir: &tempfile::TempDir) -> bool {
        std::fs::read_dir(dir.path()).unwrap().next().is_none()
    }

    #[test]
    fn test_remesh_adds_new_object() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        let source = r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let outcome = r.h.remesh().unwrap();
        assert_eq!(outcome.source, source);
        assert_ne!(outcome.object, source);
        assert_eq!(r.h.object_count(), 2);
        assert_eq!(r.h.active_id(), Some(&outcome.object));
        assert_eq!(
            r.h.scene.get_object(&outcome.object).unwrap().name,
            "Cube_remeshed"
        );
        assert_eq!(
            r.h.exchange.trace(),
            &[
                ExchangeState::Idle,
                ExchangeState::Exporting,
                ExchangeState::Invoking,
                ExchangeState::Importing,
                ExchangeState::Done,
            ]
        );
        assert_eq!(r.h.exchange.state(), ExchangeState::Idle);
        assert!(scratch_is_empty(&r.scratch));
    }

    #[test]
    fn test_remesh_replace_mode_keeps_object_count() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        r.h.settings.exchange.import_mode = ImportMode::ReplaceActive;
        let source = r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let outcome = r.h.remesh().unwrap();
        assert_eq!(outcome.object, source);
        assert_eq!(r.h.object_count(), 1);
        assert!(r.h.mesh_of(&source).unwrap().is_triangulated());
    }

    #[test]
    fn test_min_cost_flow_arguments() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        r.h.set_options(RemeshOptions {
            min_cost_flow: true,
            resolution: 4,
            ..Default::default()
        });

        r.h.remesh().unwrap();
        let args = recorded_args(r.bin.path()).unwrap();
        assert_eq!(args.len(), 7);
        assert_eq!(args[0], "-mcf");
        assert_eq!(args[1], "-i");
        assert!(args[2].ends_with("Cube.obj"));
        assert_eq!(args[3], "-o");
        assert!(args[4].ends_with("Cube_remeshed.obj"));
        assert_eq!(&args[5..], &["-f", "4"]);
        assert!(!args.iter().any(|a| a == "-sharp" || a == "-sat"));
    }

    #[test]
    fn test_process_failure_ends_in_error_and_cleans_up() {
        let mut r = rig(FakeQuadriflow::Fail);
        r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let err = r.h.remesh().unwrap_err();
        assert_eq!(err.kind(), "process");
        assert!(err.to_string().contains("cannot load"));
        assert!(r.h.exchange.reached(ExchangeState::Invoking));
        assert!(!r.h.exchange.reached(ExchangeState::Importing));
        assert_eq!(r.h.exchange.trace().last(), Some(&ExchangeState::Error));
        assert_eq!(r.h.object_count(), 1);
        assert!(scratch_is_empty(&r.scratch));
    }

    #[test]
    fn test_missing_output_is_import_error() {
        let mut r = rig(FakeQuadriflow::NoOutput);
        r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let err = r.h.remesh().unwrap_err();
        assert_eq!(err.kind(), "import");
        assert_eq!(r.h.object_count(), 1);
    }

    #[test]
    fn test_required_manifold_blocks_before_export() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        r.h.add_mesh(fixtures::fin_mesh("Fin"));
        r.h.set_options(RemeshOptions {
            require_manifold: true,
            ..Default::default()
        });

        let err = r.h.remesh().unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(!r.h.exchange.reached(ExchangeState::Exporting));
        assert!(recorded_args(r.bin.path()).is_none());
        assert!(scratch_is_empty(&r.scratch));
    }

    #[test]
    fn test_required_manifold_passes_closed_mesh() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        r.h.add_mesh(fixtures::tetrahedron_mesh("Tet"));
        r.h.set_options(RemeshOptions {
            require_manifold: true,
            ..Default::default()
        });

        r.h.remesh().unwrap();
        assert!(r.h.exchange.reached(ExchangeState::Exporting));
        assert_eq!(r.h.object_count(), 2);
    }

    #[test]
    fn test_non_manifold_allowed_when_not_required() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        r.h.add_mesh(fixtures::fin_mesh("Fin"));

        r.h.remesh().unwrap();
        assert_eq!(r.h.object_count(), 2);
    }

    #[test]
    fn test_timeout_kills_process() {
        let mut r = rig(FakeQuadriflow::Sleep(10));
        r.h.settings.quadriflow.timeout_secs = 1;
        r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));

        let started = std::time::Instant::now();
        let err = r.h.remesh().unwrap_err();
        assert_eq!(err.kind(), "process");
        assert!(started.elapsed() < std::time::Duration::from_secs(8));
        assert!(scratch_is_empty(&r.scratch));
    }

    #[test]
    fn test_undo_after_remesh_removes_result() {
        let mut r = rig(FakeQuadriflow::CopyInput);
        r.h.add_mesh(fixtures::cube_mesh("Cube", 1.0));
        r.h.remesh().unwrap();
        assert_eq!(r.h.object_count(), 2);

        assert!(r.h.undo());
        assert_eq!(r.h.object_count(), 1);
    }
}

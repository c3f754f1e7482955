//! Shipped scenario files.
//!
//! Loads every YAML scenario under `scenarios/` and replays the first few
//! moves to make sure the files stay in sync with the configuration schema.
//!
//! Run with: `cargo test --test scenario_files`

use drishti_mcl::{Scenario, ScenarioConfig};
use std::path::{Path, PathBuf};

// ============================================================================
// Helpers
// ============================================================================

fn scenario_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn load(name: &str) -> ScenarioConfig {
    let path = scenario_path(name);
    ScenarioConfig::load(&path)
        .unwrap_or_else(|e| panic!("failed to load {}: {}", path.display(), e))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_l_room_runs() {
    let config = load("l_room.yaml");
    assert_eq!(config.moves.len(), 25);
    assert!(config.map.environment.is_free(config.start));
    assert!(config.filter.scan_window.is_none());

    let mut scenario = Scenario::new(config).unwrap();
    let report = scenario.run(Some(5)).unwrap();

    assert_eq!(report.steps.len(), 5);
    assert_eq!(report.rejected_moves(), 0);
    assert_eq!(scenario.filter().state().iterations, 5);
    assert_eq!(scenario.filter().num_particles(), 400);
    assert!(report.steps.iter().all(|s| s.error.is_finite() && s.neff >= 1.0));
}

#[test]
fn test_forward_lidar_renders_rays() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = load("forward_lidar.yaml");
    assert!(config.filter.scan_window.is_some());
    assert!(config.render_rays);
    config.render = Some(dir.path().to_path_buf());

    let mut scenario = Scenario::new(config).unwrap();
    assert!(scenario.filter().scan_window().is_some());
    let report = scenario.run(Some(2)).unwrap();

    assert_eq!(report.steps.len(), 2);
    assert_eq!(report.rejected_moves(), 0);
    assert!(dir.path().join("frame_0001.png").exists());
}

#[test]
fn test_every_shipped_scenario_loads() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    let mut count = 0;
    for entry in std::fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "yaml") {
            let config = ScenarioConfig::load(&path).unwrap();
            assert!(!config.moves.is_empty(), "{} has no moves", path.display());
            count += 1;
        }
    }
    assert!(count >= 2);
}

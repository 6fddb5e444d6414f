//! Tests d'intégration du rendu complet sur la collection de test

use std::path::{Path, PathBuf};

use preschool_map::{Config, RenderStatus, Session};
use subzone::Mode;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../subzone/tests/fixtures/subzones.geojson")
}

fn session() -> Session {
    let config = Config {
        data_path: fixture_path(),
        fit_view: true,
        ..Config::from_preset("singapore").unwrap()
    };
    Session::open(config)
}

#[test]
fn test_render_writes_every_view() {
    let session = session();
    assert!(session.load_error.is_none());
    assert_eq!(session.checksum.len(), 64);

    let selection = session
        .selection(Some(Mode::DemandMismatch), Some(2024), Some("ALPHA".to_string()))
        .unwrap();
    let output = std::env::temp_dir().join("preschool_map_render_smoke");
    let report = session.render(&selection, &output).unwrap();

    assert_eq!(report.features_loaded, 4);
    assert_eq!(report.features_rendered, 3);
    assert_eq!(report.features_excluded, 1);
    assert_eq!(report.malformed_series, 1);
    // DELTA a une série illisible
    assert_eq!(report.status, RenderStatus::Degraded);
    assert_eq!(report.outputs.len(), 5);

    let map: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("map.geojson")).unwrap()).unwrap();
    let features = map["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    assert!(features
        .iter()
        .all(|f| f["properties"]["SUBZONE_N"] != "CHARLIE"));

    let table = std::fs::read_to_string(output.join("table.csv")).unwrap();
    let first_row = table.lines().nth(1).unwrap();
    assert!(first_row.starts_with("ALPHA,"));

    let series: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("series.json")).unwrap()).unwrap();
    assert_eq!(series["subzone"], "ALPHA");
    assert_eq!(series["points"].as_array().unwrap().len(), 2);

    let legend: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("legend.json")).unwrap()).unwrap();
    assert!(legend["gradient"]
        .as_str()
        .unwrap()
        .starts_with("linear-gradient(to right, rgb(255,255,204)"));

    let view: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.join("view.json")).unwrap()).unwrap();
    assert!((view["longitude"].as_f64().unwrap() - 103.83).abs() < 1e-9);

    std::fs::remove_dir_all(output).ok();
}

#[test]
fn test_render_unknown_subzone_skips_series() {
    let session = session();
    let selection = session
        .selection(Some(Mode::Population), Some(2025), Some("NOWHERE".to_string()))
        .unwrap();
    let output = std::env::temp_dir().join("preschool_map_render_unknown");
    let report = session.render(&selection, &output).unwrap();

    assert_eq!(report.unknown_subzone.as_deref(), Some("NOWHERE"));
    assert!(!output.join("series.json").exists());

    std::fs::remove_dir_all(output).ok();
}

#[test]
fn test_render_on_missing_dataset_is_empty() {
    let session = Session::open(Config {
        data_path: std::env::temp_dir().join("preschool_map_absent.geojson"),
        ..Config::default()
    });
    let selection = session.selection(None, None, None).unwrap();
    let output = std::env::temp_dir().join("preschool_map_render_empty");
    let report = session.render(&selection, &output).unwrap();

    assert_eq!(report.status, RenderStatus::Empty);
    assert!(report.load_error.is_some());
    let table = std::fs::read_to_string(output.join("table.csv")).unwrap();
    assert_eq!(table.lines().count(), 1);

    std::fs::remove_dir_all(output).ok();
}

//! Export de la vue carte en GeoJSON
//!
//! Seules les sous-zones peuplées l'année sélectionnée sont écrites. Chaque
//! feature porte sa couleur, son contour et les champs de l'infobulle.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};
use serde_json::json;

use subzone::{Dashboard, EnrichedFeature, Mode};

/// Construit la FeatureCollection de la carte
pub fn map_view_collection(dashboard: &Dashboard<'_>, id_key: &str) -> FeatureCollection {
    let mode = dashboard.selection.mode;
    let year = dashboard.selection.year;

    let features = dashboard
        .map_features()
        .map(|f| Feature {
            bbox: None,
            geometry: f.feature.geometry.clone(),
            id: None,
            properties: Some(properties(f, mode, year, id_key)),
            foreign_members: None,
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Exporte la vue carte, retourne le nombre de features écrites
pub fn export_map_view(dashboard: &Dashboard<'_>, id_key: &str, output_path: &Path) -> Result<usize> {
    let collection = map_view_collection(dashboard, id_key);
    let count = collection.features.len();

    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &GeoJson::FeatureCollection(collection))?;
    writer.flush()?;

    Ok(count)
}

fn properties(f: &EnrichedFeature<'_>, mode: Mode, year: u16, id_key: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert(id_key.to_string(), JsonValue::from(f.id()));
    props.insert("population".to_string(), json!(f.population));
    props.insert("capacity".to_string(), json!(f.feature.capacity));
    if mode == Mode::DemandMismatch {
        props.insert("net_supply".to_string(), json!(f.net_supply));
    }
    props.insert("fill_color".to_string(), json!(f.paint.fill));
    props.insert("stroke_width".to_string(), json!(f.paint.stroke_width));
    props.insert(
        "tooltip".to_string(),
        JsonValue::from(tooltip_html(&f.tooltip(mode, year))),
    );
    props
}

/// Infobulle en tableau HTML
fn tooltip_html(rows: &[(String, String)]) -> String {
    let mut html = String::from(r#"<table style="border-collapse: collapse;">"#);
    for (label, value) in rows {
        html.push_str(&format!(
            r#"<tr><td style="padding-right: 10px;"><b>{}:</b></td><td>{}</td></tr>"#,
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</table>");
    html
}

/// Échappe une chaîne pour HTML
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use subzone::{FeatureStore, Selection, Series, SubzoneFeature};

    fn store() -> FeatureStore {
        let mut a = SubzoneFeature::new("A & B");
        a.capacity = 30;
        a.population = [(2024, 12.0)].into_iter().collect();
        a.net_supply = [(2024, -4.0)].into_iter().collect();

        let mut empty = SubzoneFeature::new("EMPTY");
        empty.population = [(2024, 0.0)].into_iter().collect();

        FeatureStore::from_features(vec![a, empty])
    }

    #[test]
    fn test_map_view_properties() {
        let store = store();
        let dashboard = Dashboard::compute(&store, &Selection::new(Mode::DemandMismatch, 2024));
        let collection = map_view_collection(&dashboard, "SUBZONE_N");

        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.property("SUBZONE_N"), Some(&json!("A & B")));
        assert_eq!(feature.property("stroke_width"), Some(&json!(50)));
        assert_eq!(feature.property("fill_color"), Some(&json!([153, 0, 0])));
        assert_eq!(feature.property("net_supply"), Some(&json!(-4.0)));

        let tooltip = feature.property("tooltip").unwrap().as_str().unwrap();
        assert!(tooltip.contains("A &amp; B"));
        assert!(tooltip.contains("Preschool children Population (2024)"));
    }

    #[test]
    fn test_population_mode_has_no_net_supply() {
        let store = store();
        let dashboard = Dashboard::compute(&store, &Selection::new(Mode::Population, 2024));
        let collection = map_view_collection(&dashboard, "SUBZONE_N");
        assert!(collection.features[0].property("net_supply").is_none());
        assert_eq!(collection.features[0].property("stroke_width"), Some(&json!(5)));
    }

    #[test]
    fn test_export_map_view() {
        let store = store();
        let dashboard = Dashboard::compute(&store, &Selection::new(Mode::DemandMismatch, 2024));
        let output_path = std::env::temp_dir().join("preschool_map_view_test.geojson");

        let count = export_map_view(&dashboard, "SUBZONE_N", &output_path).unwrap();
        assert_eq!(count, 1);

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains(r#""type":"FeatureCollection""#));
        assert!(!content.contains("EMPTY"));

        std::fs::remove_file(output_path).ok();
    }

    #[test]
    fn test_non_numeric_population_is_written() {
        let mut gap = SubzoneFeature::new("GAP");
        gap.population = Series::new().with_non_numeric(2024);
        gap.net_supply = [(2024, -5.0)].into_iter().collect();
        let store = FeatureStore::from_features(vec![gap]);

        let dashboard = Dashboard::compute(&store, &Selection::new(Mode::DemandMismatch, 2024));
        let collection = map_view_collection(&dashboard, "SUBZONE_N");
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.property("population"), Some(&JsonValue::Null));
        assert_eq!(feature.property("fill_color"), Some(&json!([153, 0, 0])));

        let tooltip = feature.property("tooltip").unwrap().as_str().unwrap();
        assert!(tooltip.contains("n/a"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("<b>\"x\"</b>"), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }
}

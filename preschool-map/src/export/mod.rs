//! Modules d'export (GeoJSON, CSV, JSON)

pub mod geojson;
pub mod json;
pub mod table;

pub use self::geojson::export_map_view;
pub use self::json::write_json;
pub use self::table::export_table_csv;

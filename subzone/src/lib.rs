//! # subzone
//!
//! Coloration par sous-zone de l'écart offre/demande de places préscolaires,
//! ou de la population d'âge préscolaire, sur plusieurs années de projection.
//!
//! ## Chaîne de calcul
//!
//! 1. [`FeatureStore`]: collection GeoJSON chargée une fois, immuable
//! 2. [`ValueRange`]: bornes globales (toutes sous-zones, toutes années)
//! 3. [`color::paint`]: couleur de remplissage et épaisseur de contour
//! 4. [`Dashboard`]: carte, tableau trié, série temporelle, légende
//!
//! Le calcul complet est relancé à chaque changement de [`Selection`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use subzone::{Dashboard, FeatureStore, Mode, Schema, Selection};
//! use std::path::Path;
//!
//! let store = FeatureStore::load(Path::new("subzones.geojson"), &Schema::default())?;
//! let selection = Selection::new(Mode::DemandMismatch, 2024).with_subzone("BEDOK NORTH");
//! let dashboard = Dashboard::compute(&store, &selection);
//!
//! for row in dashboard.table() {
//!     println!("{}: {:?}", row.id, row.net_supply);
//! }
//! ```

pub mod color;
pub mod error;
pub mod legend;
pub mod range;
pub mod series;
pub mod store;
pub mod types;
pub mod view;
pub mod viewport;

pub use color::{Paint, Rgb};
pub use error::SubzoneError;
pub use legend::Legend;
pub use range::ValueRange;
pub use series::{Series, Year};
pub use store::FeatureStore;
pub use types::{Mode, Schema, Selection, SubzoneFeature, DEFAULT_YEARS};
pub use view::{
    display_value, time_series, Dashboard, EnrichedFeature, SeriesPoint, TableRow, TimeSeries,
};
pub use viewport::ViewState;

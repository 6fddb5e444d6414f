//! Vue initiale de la carte

use geo::{BoundingRect, Geometry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::FeatureStore;

/// Centre, zoom et inclinaison de la carte
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    #[serde(default)]
    pub pitch: f64,
}

impl Default for ViewState {
    /// Singapour
    fn default() -> Self {
        Self {
            latitude: 1.3521,
            longitude: 103.8198,
            zoom: 11.0,
            pitch: 0.0,
        }
    }
}

impl ViewState {
    /// Centre la vue sur l'emprise des géométries, en gardant le zoom de
    /// `fallback`. Retourne `fallback` si aucune géométrie n'est exploitable.
    pub fn fit(store: &FeatureStore, fallback: ViewState) -> ViewState {
        let bounds = store
            .features()
            .iter()
            .filter_map(|f| f.geometry.clone())
            .filter_map(|g| Geometry::<f64>::try_from(g).ok())
            .filter_map(|g| g.bounding_rect())
            .reduce(|a, b| {
                geo::Rect::new(
                    geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            });

        match bounds {
            Some(rect) => {
                let center = rect.center();
                debug!(lon = center.x, lat = center.y, "Fitted view to data");
                ViewState {
                    latitude: center.y,
                    longitude: center.x,
                    ..fallback
                }
            }
            None => fallback,
        }
    }
}

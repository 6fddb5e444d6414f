//! Chargement de la collection de sous-zones (GeoJSON)
//!
//! La collection est chargée une fois puis traitée comme immuable. Les
//! problèmes propres à une feature (identifiant manquant, série illisible)
//! ne bloquent jamais le chargement: ils sont conservés dans `warnings`.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geojson::{Feature, GeoJson};
use serde_json::Value;
use tracing::{debug, info};

use crate::series::Series;
use crate::types::{Schema, SubzoneFeature};
use crate::SubzoneError;

/// Collection immuable des sous-zones
#[derive(Debug, Default)]
pub struct FeatureStore {
    features: Vec<SubzoneFeature>,
    warnings: Vec<SubzoneError>,
}

impl FeatureStore {
    /// Construit une collection depuis des features déjà décodées
    pub fn from_features(features: Vec<SubzoneFeature>) -> Self {
        let mut seen = HashSet::new();
        let mut warnings = Vec::new();
        let features = features
            .into_iter()
            .filter(|f| {
                let fresh = seen.insert(f.id.clone());
                if !fresh {
                    warnings.push(SubzoneError::DuplicateId(f.id.clone()));
                }
                fresh
            })
            .collect();

        Self { features, warnings }
    }

    /// Charge un fichier GeoJSON
    pub fn load(path: &Path, schema: &Schema) -> Result<Self, SubzoneError> {
        let file = File::open(path)?;
        let store = Self::from_reader(BufReader::new(file), schema)?;
        info!(
            path = %path.display(),
            features = store.len(),
            warnings = store.warnings.len(),
            "Loaded subzones"
        );
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R, schema: &Schema) -> Result<Self, SubzoneError> {
        let geojson = GeoJson::from_reader(reader)?;
        Self::from_geojson(geojson, schema)
    }

    pub fn from_geojson_str(text: &str, schema: &Schema) -> Result<Self, SubzoneError> {
        let geojson: GeoJson = text.parse()?;
        Self::from_geojson(geojson, schema)
    }

    pub fn from_geojson(geojson: GeoJson, schema: &Schema) -> Result<Self, SubzoneError> {
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            GeoJson::Feature(_) => return Err(SubzoneError::NotAFeatureCollection("Feature")),
            GeoJson::Geometry(_) => return Err(SubzoneError::NotAFeatureCollection("Geometry")),
        };

        let mut features = Vec::with_capacity(collection.features.len());
        let mut warnings = Vec::new();

        for (index, feature) in collection.features.into_iter().enumerate() {
            match decode_feature(index, feature, schema, &mut warnings) {
                Some(f) => features.push(f),
                None => debug!(index, "Skipping feature without id"),
            }
        }

        let mut store = Self::from_features(features);
        warnings.append(&mut store.warnings);
        store.warnings = warnings;
        Ok(store)
    }

    pub fn features(&self) -> &[SubzoneFeature] {
        &self.features
    }

    pub fn get(&self, id: &str) -> Option<&SubzoneFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Identifiants dans l'ordre du fichier (options du sélecteur)
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Erreurs non fatales rencontrées au chargement
    pub fn warnings(&self) -> &[SubzoneError] {
        &self.warnings
    }

    /// Nombre de séries illisibles remplacées par une série vide
    pub fn malformed_series(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, SubzoneError::MalformedSeries { .. }))
            .count()
    }
}

fn decode_feature(
    index: usize,
    feature: Feature,
    schema: &Schema,
    warnings: &mut Vec<SubzoneError>,
) -> Option<SubzoneFeature> {
    let id = match feature.property(&schema.id).and_then(id_from_value) {
        Some(id) => id,
        None => {
            warnings.push(SubzoneError::MissingId {
                index,
                key: schema.id.clone(),
            });
            return None;
        }
    };

    let mut decode_series = |attribute: &str| {
        Series::decode(feature.property(attribute)).unwrap_or_else(|| {
            debug!(subzone = %id, attribute, "Malformed series, using empty series");
            warnings.push(SubzoneError::malformed_series(&id, attribute));
            Series::new()
        })
    };
    let population = decode_series(schema.population.as_str());
    let net_supply = decode_series(schema.net_supply.as_str());

    let capacity = feature
        .property(&schema.capacity)
        .and_then(capacity_from_value)
        .unwrap_or(0);

    Some(SubzoneFeature {
        geometry: feature.geometry,
        id,
        capacity,
        population,
        net_supply,
    })
}

fn id_from_value(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn capacity_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}

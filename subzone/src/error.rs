//! Types d'erreurs pour le crate subzone

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement des sous-zones
#[derive(Debug, Error)]
pub enum SubzoneError {
    /// Erreur d'I/O lors de la lecture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON illisible
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Fichier GeoJSON invalide
    #[error("Invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Le document n'est pas une FeatureCollection
    #[error("Expected a FeatureCollection, found {0}")]
    NotAFeatureCollection(&'static str),

    /// Feature sans identifiant de sous-zone (ignorée)
    #[error("Feature #{index} has no {key} attribute")]
    MissingId { index: usize, key: String },

    /// Identifiant déjà présent dans la collection (ignorée)
    #[error("Duplicate subzone id: {0}")]
    DuplicateId(String),

    /// Série annuelle illisible, remplacée par une série vide
    #[error("Malformed {attribute} series for {subzone}")]
    MalformedSeries { subzone: String, attribute: String },
}

impl SubzoneError {
    /// Crée une erreur de série malformée avec contexte
    pub fn malformed_series(subzone: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MalformedSeries {
            subzone: subzone.into(),
            attribute: attribute.into(),
        }
    }
}

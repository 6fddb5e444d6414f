//! Bornes de normalisation globales
//!
//! Les bornes couvrent toutes les sous-zones et toutes les années du mode
//! actif, pas seulement l'année affichée: les couleurs restent comparables
//! quand l'utilisateur change d'année.

use serde::Serialize;

use crate::store::FeatureStore;
use crate::types::Mode;

/// Bornes (min, max) pour un mode donné
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Parcourt toute la collection pour le mode actif.
    ///
    /// - `Population`: seules les valeurs strictement positives comptent,
    ///   `max` vaut 1 à défaut. `min` n'intervient pas dans la normalisation.
    /// - `DemandMismatch`: toutes les valeurs, (0, 1) à défaut.
    pub fn scan(store: &FeatureStore, mode: Mode) -> Self {
        let values = store
            .features()
            .iter()
            .flat_map(|f| mode.series(f).values())
            .filter(|v| v.is_finite());

        let extremes = match mode {
            Mode::Population => extremes(values.filter(|&v| v > 0.0)),
            Mode::DemandMismatch => extremes(values),
        };

        extremes
            .map(|(min, max)| Self { min, max })
            .unwrap_or(Self { min: 0.0, max: 1.0 })
    }

    /// Étendue nulle: la normalisation vaut 0
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Position de `value` dans [min, max], 0 si l'étendue est nulle
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }

    /// Position de `value` dans [0, max]
    pub fn normalize_from_zero(&self, value: f64) -> f64 {
        if self.max == 0.0 {
            0.0
        } else {
            value / self.max
        }
    }
}

fn extremes(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubzoneFeature;

    fn feature(id: &str, pop: &[(u16, f64)], net: &[(u16, f64)]) -> SubzoneFeature {
        let mut f = SubzoneFeature::new(id);
        f.population = pop.iter().copied().collect();
        f.net_supply = net.iter().copied().collect();
        f
    }

    #[test]
    fn test_scan_mismatch_all_years() {
        let store = FeatureStore::from_features(vec![
            feature("A", &[], &[(2024, -10.0), (2025, 5.0)]),
            feature("B", &[], &[(2024, 20.0), (2025, -3.0)]),
        ]);
        let range = ValueRange::scan(&store, Mode::DemandMismatch);
        assert_eq!(range, ValueRange::new(-10.0, 20.0));
    }

    #[test]
    fn test_scan_population_ignores_zero() {
        let store = FeatureStore::from_features(vec![
            feature("A", &[(2024, 0.0), (2025, 40.0)], &[]),
            feature("B", &[(2024, 10.0)], &[]),
        ]);
        let range = ValueRange::scan(&store, Mode::Population);
        assert_eq!(range.max, 40.0);
        assert_eq!(range.min, 10.0);
    }

    #[test]
    fn test_scan_defaults() {
        let store = FeatureStore::from_features(vec![feature("A", &[(2024, 0.0)], &[])]);
        assert_eq!(
            ValueRange::scan(&store, Mode::Population),
            ValueRange::new(0.0, 1.0)
        );
        assert_eq!(
            ValueRange::scan(&FeatureStore::default(), Mode::DemandMismatch),
            ValueRange::new(0.0, 1.0)
        );
    }

    #[test]
    fn test_normalize_degenerate() {
        let range = ValueRange::new(4.0, 4.0);
        assert!(range.is_degenerate());
        assert_eq!(range.normalize(4.0), 0.0);
    }

    #[test]
    fn test_normalize() {
        let range = ValueRange::new(-10.0, 20.0);
        assert_eq!(range.normalize(-10.0), 0.0);
        assert_eq!(range.normalize(20.0), 1.0);
        assert_eq!(range.normalize(5.0), 0.5);
        assert_eq!(range.normalize_from_zero(10.0), 0.5);
    }
}

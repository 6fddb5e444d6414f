//! Projection des sous-zones pour l'affichage: carte, tableau, série temporelle
//!
//! Tout est recalculé à chaque changement de sélection, à partir de la
//! collection immuable. Aucun état n'est conservé entre deux appels.

use serde::Serialize;
use tracing::debug;

use crate::color::{self, Paint};
use crate::legend::Legend;
use crate::range::ValueRange;
use crate::series::Year;
use crate::store::FeatureStore;
use crate::types::{Mode, Selection, SubzoneFeature};

/// Sous-zone enrichie des valeurs et du style de l'année sélectionnée
#[derive(Debug, Clone, Copy)]
pub struct EnrichedFeature<'a> {
    pub feature: &'a SubzoneFeature,
    /// `None` si la valeur de l'année n'est pas numérique
    pub population: Option<f64>,
    pub net_supply: f64,
    pub paint: Paint,
}

impl<'a> EnrichedFeature<'a> {
    pub fn id(&self) -> &'a str {
        &self.feature.id
    }

    /// Exclue de la carte et du tableau: population exactement nulle
    pub fn is_unpopulated(&self) -> bool {
        self.population == Some(0.0)
    }

    /// Lignes de l'infobulle (libellé, valeur)
    pub fn tooltip(&self, mode: Mode, year: Year) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Subzone".to_string(), self.feature.id.clone()),
            (
                format!("Preschool children Population ({})", year),
                display_value(self.population),
            ),
            (
                "Preschool Capacity".to_string(),
                self.feature.capacity.to_string(),
            ),
        ];
        if mode == Mode::DemandMismatch {
            rows.push(("Net Supply".to_string(), self.net_supply.to_string()));
        }
        rows
    }
}

/// Ligne du tableau récapitulatif
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub population: Option<f64>,
    pub capacity: i64,
    /// Renseigné uniquement en mode écart offre/demande
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_supply: Option<f64>,
}

/// Point (année, valeur) d'une série temporelle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: Year,
    /// `None` pour une année renseignée sans valeur numérique
    pub value: Option<f64>,
}

/// Série temporelle d'une sous-zone pour le mode actif
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub subzone: String,
    pub mode: Mode,
    /// Triés par année croissante, éventuellement vide
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// Nom de la courbe
    pub fn y_label(&self) -> &'static str {
        match self.mode {
            Mode::DemandMismatch => "Net Supply",
            Mode::Population => "Population",
        }
    }

    /// Légende des axes affichée sous le graphique
    pub fn axis_caption(&self) -> &'static str {
        match self.mode {
            Mode::DemandMismatch => "X-axis: Years, Y-axis: Mismatch of Demand and Supply",
            Mode::Population => "X-axis: Years, Y-axis: population of preschool aged residents",
        }
    }
}

/// Série temporelle d'une sous-zone.
///
/// `None` si l'identifiant est inconnu, à distinguer d'une série présente
/// mais sans points.
pub fn time_series(store: &FeatureStore, id: &str, mode: Mode) -> Option<TimeSeries> {
    let feature = store.get(id)?;
    let points = mode
        .series(feature)
        .points()
        .map(|(year, value)| SeriesPoint { year, value })
        .collect();

    Some(TimeSeries {
        subzone: feature.id.clone(),
        mode,
        points,
    })
}

/// Résultat complet d'un calcul pour une sélection
#[derive(Debug)]
pub struct Dashboard<'a> {
    pub selection: Selection,
    pub range: ValueRange,
    pub legend: Legend,
    /// Toutes les sous-zones, y compris celles sans population
    pub features: Vec<EnrichedFeature<'a>>,
    /// Série de la sous-zone sélectionnée (`None` si absente ou inconnue)
    pub series: Option<TimeSeries>,
}

impl<'a> Dashboard<'a> {
    /// Bornes → couleurs → vues, en un seul passage
    pub fn compute(store: &'a FeatureStore, selection: &Selection) -> Self {
        let mode = selection.mode;
        let year = selection.year;
        let range = ValueRange::scan(store, mode);

        let features: Vec<_> = store
            .features()
            .iter()
            .map(|feature| {
                let population = feature.population.value_at(year);
                let net_supply = feature.net_supply.numeric_at(year);
                EnrichedFeature {
                    feature,
                    population,
                    net_supply,
                    paint: color::paint(mode, &range, population, net_supply),
                }
            })
            .collect();

        let series = selection
            .subzone
            .as_deref()
            .and_then(|id| time_series(store, id, mode));

        debug!(
            mode = %mode,
            year,
            min = range.min,
            max = range.max,
            features = features.len(),
            series = series.is_some(),
            "Dashboard computed"
        );

        Self {
            selection: selection.clone(),
            range,
            legend: Legend::for_mode(mode),
            features,
            series,
        }
    }

    /// Sous-zones affichées sur la carte (population non nulle)
    pub fn map_features(&self) -> impl Iterator<Item = &EnrichedFeature<'a>> {
        self.features.iter().filter(|f| !f.is_unpopulated())
    }

    /// Nombre de sous-zones masquées faute de population
    pub fn excluded(&self) -> usize {
        self.features.iter().filter(|f| f.is_unpopulated()).count()
    }

    pub fn get(&self, id: &str) -> Option<&EnrichedFeature<'a>> {
        self.features.iter().find(|f| f.feature.id == id)
    }

    /// Tableau trié: offre nette croissante (pire déficit en tête) ou
    /// population décroissante selon le mode
    pub fn table(&self) -> Vec<TableRow> {
        let mode = self.selection.mode;
        let mut rows: Vec<_> = self
            .map_features()
            .map(|f| TableRow {
                id: f.feature.id.clone(),
                population: f.population,
                capacity: f.feature.capacity,
                net_supply: (mode == Mode::DemandMismatch).then_some(f.net_supply),
            })
            .collect();

        match mode {
            Mode::DemandMismatch => rows.sort_by(|a, b| {
                a.net_supply
                    .unwrap_or(0.0)
                    .total_cmp(&b.net_supply.unwrap_or(0.0))
            }),
            // Populations non numériques en fin de tableau
            Mode::Population => rows.sort_by(|a, b| {
                let key = |row: &TableRow| row.population.unwrap_or(f64::NEG_INFINITY);
                key(b).total_cmp(&key(a))
            }),
        }
        rows
    }
}

/// Valeur affichée, `n/a` si elle n'est pas numérique
pub fn display_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

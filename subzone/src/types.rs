//! Types de données pour le crate subzone

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::series::{Series, Year};

/// Années de projection proposées par défaut
pub const DEFAULT_YEARS: [Year; 5] = [2024, 2025, 2026, 2027, 2028];

/// Métrique affichée sur la carte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Écart entre capacité et demande (`net_supply`)
    #[default]
    DemandMismatch,
    /// Population d'âge préscolaire (`pop`)
    Population,
}

impl Mode {
    /// Libellé affiché à l'utilisateur
    pub fn label(self) -> &'static str {
        match self {
            Mode::DemandMismatch => "mismatch of demand and supply",
            Mode::Population => "population of preschool aged residents",
        }
    }

    /// Série utilisée par ce mode
    pub fn series(self, feature: &SubzoneFeature) -> &Series {
        match self {
            Mode::DemandMismatch => &feature.net_supply,
            Mode::Population => &feature.population,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "demand_mismatch" | "mismatch" | "net_supply" => Ok(Mode::DemandMismatch),
            "population" | "pop" => Ok(Mode::Population),
            other => Err(format!(
                "unknown mode '{}', expected demand_mismatch or population",
                other
            )),
        }
    }
}

/// Sélection courante de l'utilisateur.
///
/// Possédée par l'interface et passée telle quelle au calcul; le crate ne
/// conserve aucun état de session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: Mode,
    pub year: Year,
    /// Sous-zone dont on affiche la série temporelle
    pub subzone: Option<String>,
}

impl Selection {
    pub fn new(mode: Mode, year: Year) -> Self {
        Self {
            mode,
            year,
            subzone: None,
        }
    }

    pub fn with_subzone(self, subzone: impl Into<String>) -> Self {
        Self {
            subzone: Some(subzone.into()),
            ..self
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Mode::default(), DEFAULT_YEARS[0])
    }
}

/// Une sous-zone avec sa géométrie et ses séries annuelles
#[derive(Debug, Clone)]
pub struct SubzoneFeature {
    /// Nom de la sous-zone (clé de jointure unique)
    pub id: String,

    /// Géométrie transmise telle quelle au rendu
    pub geometry: Option<geojson::Geometry>,

    /// Capacité d'accueil préscolaire (statique)
    pub capacity: i64,

    /// Population d'âge préscolaire par année
    pub population: Series,

    /// Capacité moins demande par année (négatif = sous-capacité)
    pub net_supply: Series,
}

impl SubzoneFeature {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            geometry: None,
            capacity: 0,
            population: Series::new(),
            net_supply: Series::new(),
        }
    }
}

/// Noms des attributs lus dans le fichier source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_capacity")]
    pub capacity: String,
    #[serde(default = "default_population")]
    pub population: String,
    #[serde(default = "default_net_supply")]
    pub net_supply: String,
}

fn default_id() -> String {
    "SUBZONE_N".to_string()
}

fn default_capacity() -> String {
    "capacity".to_string()
}

fn default_population() -> String {
    "pop".to_string()
}

fn default_net_supply() -> String {
    "net_supply".to_string()
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            id: default_id(),
            capacity: default_capacity(),
            population: default_population(),
            net_supply: default_net_supply(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("mismatch".parse::<Mode>(), Ok(Mode::DemandMismatch));
        assert_eq!("demand-mismatch".parse::<Mode>(), Ok(Mode::DemandMismatch));
        assert_eq!("Population".parse::<Mode>(), Ok(Mode::Population));
        assert!("heat".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_series() {
        let mut feature = SubzoneFeature::new("BEDOK NORTH");
        feature.population = [(2024, 10.0)].into_iter().collect();
        feature.net_supply = [(2024, -2.0)].into_iter().collect();

        assert_eq!(Mode::Population.series(&feature).value_at(2024), Some(10.0));
        assert_eq!(Mode::DemandMismatch.series(&feature).value_at(2024), Some(-2.0));
    }

    #[test]
    fn test_selection_with_subzone() {
        let selection = Selection::new(Mode::Population, 2026).with_subzone("TAMPINES EAST");
        assert_eq!(selection.year, 2026);
        assert_eq!(selection.subzone.as_deref(), Some("TAMPINES EAST"));
    }

    #[test]
    fn test_schema_partial_json() {
        let schema: Schema = serde_json::from_str(r#"{"id": "NAME"}"#).unwrap();
        assert_eq!(schema.id, "NAME");
        assert_eq!(schema.population, "pop");
    }
}

//! Configuration du tableau de bord

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use subzone::{Mode, Schema, ViewState, Year, DEFAULT_YEARS};

/// Variable d'environnement qui remplace `data_path`
pub const DATA_ENV: &str = "PRESCHOOL_MAP_DATA";

/// Erreurs de sélection refusées avant tout calcul
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Year {year} is not offered (available: {available:?})")]
    YearNotOffered { year: Year, available: Vec<Year> },

    #[error("No year configured")]
    NoYears,
}

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Fichier GeoJSON des sous-zones
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Années proposées dans le sélecteur
    #[serde(default = "default_years")]
    pub years: Vec<Year>,

    /// Année sélectionnée au démarrage (première année à défaut)
    #[serde(default)]
    pub default_year: Option<Year>,

    #[serde(default)]
    pub default_mode: Mode,

    /// Noms des attributs du fichier source
    #[serde(default)]
    pub schema: Schema,

    /// Vue initiale de la carte
    #[serde(default)]
    pub view: ViewState,

    /// Centrer la vue sur l'emprise des données
    #[serde(default)]
    pub fit_view: bool,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/2019_sub_zone_final_form.geojson")
}

fn default_years() -> Vec<Year> {
    DEFAULT_YEARS.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            years: default_years(),
            default_year: None,
            default_mode: Mode::default(),
            schema: Schema::default(),
            view: ViewState::default(),
            fit_view: false,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "singapore" => Self::load_embedded(include_str!("presets/singapore.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: singapore", preset),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Nom de preset ou chemin vers un fichier JSON
    pub fn resolve(spec: &str) -> Result<Self> {
        match spec {
            "singapore" => Self::from_preset(spec),
            _ => Self::load(Path::new(spec)),
        }
    }

    /// Applique `PRESCHOOL_MAP_DATA` si défini
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(DATA_ENV) {
            if !path.trim().is_empty() {
                self.data_path = PathBuf::from(path);
            }
        }
    }

    /// Année retenue au démarrage
    pub fn initial_year(&self) -> Result<Year, SelectionError> {
        match self.default_year {
            Some(year) => self.validate_year(year),
            None => self.years.first().copied().ok_or(SelectionError::NoYears),
        }
    }

    /// Vérifie qu'une année fait partie des années proposées
    pub fn validate_year(&self, year: Year) -> Result<Year, SelectionError> {
        if self.years.contains(&year) {
            Ok(year)
        } else {
            Err(SelectionError::YearNotOffered {
                year,
                available: self.years.clone(),
            })
        }
    }
}

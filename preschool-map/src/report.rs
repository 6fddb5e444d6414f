//! Rapport de rendu avec graceful degradation
//!
//! Résume une exécution: jeu de données utilisé, sélection, nombre de
//! sous-zones affichées ou masquées, problèmes non fataux rencontrés.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use subzone::{Mode, ValueRange, Year};

/// Statut global du rendu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderStatus {
    /// Rendu complet sans problème
    Success,
    /// Rendu produit malgré des données manquantes ou illisibles
    Degraded,
    /// Aucune sous-zone affichée
    Empty,
}

/// Rapport complet d'un rendu
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub mode: Mode,
    pub year: Year,
    /// Fichier source
    pub dataset: String,
    /// Checksum blake3 du fichier source (vide si illisible)
    pub checksum: String,
    /// Erreur de chargement, si le fichier n'a pas pu être lu
    pub load_error: Option<String>,
    pub range: ValueRange,
    pub duration_secs: f64,
    pub status: RenderStatus,

    /// Nombre de sous-zones chargées
    pub features_loaded: usize,
    /// Nombre de sous-zones sur la carte
    pub features_rendered: usize,
    /// Nombre de sous-zones masquées (population nulle)
    pub features_excluded: usize,
    /// Séries illisibles remplacées par une série vide
    pub malformed_series: usize,
    /// Problèmes non fataux du chargement
    pub warnings: Vec<String>,
    /// Sous-zone demandée mais absente de la collection
    pub unknown_subzone: Option<String>,
    /// Fichiers produits
    pub outputs: Vec<String>,
}

impl RenderReport {
    /// Crée un nouveau rapport pour une sélection
    pub fn new(mode: Mode, year: Year, dataset: &Path) -> Self {
        Self {
            mode,
            year,
            dataset: dataset.display().to_string(),
            checksum: String::new(),
            load_error: None,
            range: ValueRange::new(0.0, 1.0),
            duration_secs: 0.0,
            status: RenderStatus::Success,
            features_loaded: 0,
            features_rendered: 0,
            features_excluded: 0,
            malformed_series: 0,
            warnings: Vec::new(),
            unknown_subzone: None,
            outputs: Vec::new(),
        }
    }

    /// Enregistre un fichier produit
    pub fn record_output(&mut self, path: &Path) {
        self.outputs.push(path.display().to_string());
    }

    /// Définit la durée du rendu
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.features_rendered == 0 {
            RenderStatus::Empty
        } else if self.load_error.is_some()
            || !self.warnings.is_empty()
            || self.unknown_subzone.is_some()
        {
            RenderStatus::Degraded
        } else {
            RenderStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("RENDER REPORT - {} ({})", self.mode, self.year);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.3}s", self.duration_secs);
        println!("Dataset: {}", self.dataset);
        if !self.checksum.is_empty() {
            println!("Checksum: {}", self.checksum);
        }
        if let Some(ref error) = self.load_error {
            println!("Load error: {}", error);
        }

        println!("\n--- SUMMARY ---");
        println!(
            "Subzones: {} loaded, {} rendered, {} hidden (no population)",
            self.features_loaded, self.features_rendered, self.features_excluded
        );
        println!("Range: min {} / max {}", self.range.min, self.range.max);
        if let Some(ref id) = self.unknown_subzone {
            println!("Unknown subzone: {} (no time series)", id);
        }

        if !self.warnings.is_empty() {
            println!("\n--- WARNINGS ({}) ---", self.warnings.len());
            for w in self.warnings.iter().take(10) {
                println!("  {}", w);
            }
            if self.warnings.len() > 10 {
                println!("  ... and {} more", self.warnings.len() - 10);
            }
        }

        if !self.outputs.is_empty() {
            println!("\n--- OUTPUTS ---");
            for o in &self.outputs {
                println!("  {}", o);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} {}: {} rendered, {} hidden, {} warnings",
            self.mode,
            self.year,
            self.features_rendered,
            self.features_excluded,
            self.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RenderReport {
        RenderReport::new(Mode::DemandMismatch, 2024, Path::new("subzones.geojson"))
    }

    #[test]
    fn test_finalize_success() {
        let mut report = report();
        report.features_rendered = 3;
        report.finalize();
        assert_eq!(report.status, RenderStatus::Success);
    }

    #[test]
    fn test_finalize_degraded() {
        let mut report = report();
        report.features_rendered = 3;
        report.warnings.push("Malformed net_supply series for X".to_string());
        report.finalize();
        assert_eq!(report.status, RenderStatus::Degraded);
    }

    #[test]
    fn test_finalize_empty() {
        let mut report = report();
        report.load_error = Some("I/O error".to_string());
        report.finalize();
        assert_eq!(report.status, RenderStatus::Empty);
    }

    #[test]
    fn test_summary() {
        let mut report = report();
        report.features_rendered = 10;
        report.features_excluded = 2;
        let summary = report.summary();
        assert!(summary.contains("mismatch of demand and supply 2024"));
        assert!(summary.contains("10 rendered"));
    }

    #[test]
    fn test_save_to_file() {
        let path = std::env::temp_dir().join("preschool_map_report_test.json");
        report().save_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#""mode": "demand_mismatch""#));
        std::fs::remove_file(path).ok();
    }
}

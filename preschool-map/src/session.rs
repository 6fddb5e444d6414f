//! Session de rendu: collection chargée une fois, sélections successives
//!
//! Un échec de chargement n'interrompt pas la session: il est journalisé une
//! fois et les calculs portent alors sur une collection vide.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use subzone::{Dashboard, FeatureStore, Mode, Selection, ViewState, Year};

use crate::config::{Config, SelectionError};
use crate::export;
use crate::report::RenderReport;

pub struct Session {
    pub config: Config,
    pub store: FeatureStore,
    /// Erreur de chargement du fichier source
    pub load_error: Option<String>,
    /// Checksum blake3 du fichier source
    pub checksum: String,
}

impl Session {
    /// Charge le fichier désigné par la configuration
    pub fn open(config: Config) -> Self {
        let path = config.data_path.clone();
        let (store, load_error) = match FeatureStore::load(&path, &config.schema) {
            Ok(store) => (store, None),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load the subzone GeoJSON file");
                (FeatureStore::default(), Some(e.to_string()))
            }
        };

        for w in store.warnings() {
            warn!("{}", w);
        }

        let checksum = if load_error.is_none() {
            compute_file_checksum(&path).unwrap_or_else(|e| {
                warn!("Failed to compute checksum for {}: {}", path.display(), e);
                String::new()
            })
        } else {
            String::new()
        };

        Self {
            config,
            store,
            load_error,
            checksum,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    /// Construit la sélection à partir des choix de l'utilisateur, en
    /// complétant avec les valeurs par défaut de la configuration
    pub fn selection(
        &self,
        mode: Option<Mode>,
        year: Option<Year>,
        subzone: Option<String>,
    ) -> Result<Selection, SelectionError> {
        let year = match year {
            Some(year) => self.config.validate_year(year)?,
            None => self.config.initial_year()?,
        };
        let mut selection = Selection::new(mode.unwrap_or(self.config.default_mode), year);

        if let Some(id) = subzone {
            if !self.store.contains(&id) {
                warn!(subzone = %id, "Unknown subzone, no time series");
            }
            selection = selection.with_subzone(id);
        }
        Ok(selection)
    }

    /// Vue initiale de la carte
    pub fn view_state(&self) -> ViewState {
        if self.config.fit_view {
            ViewState::fit(&self.store, self.config.view)
        } else {
            self.config.view
        }
    }

    pub fn dashboard(&self, selection: &Selection) -> Dashboard<'_> {
        Dashboard::compute(&self.store, selection)
    }

    /// Calcule la sélection et écrit toutes les vues dans `output_dir`
    pub fn render(&self, selection: &Selection, output_dir: &Path) -> Result<RenderReport> {
        let started_at = Instant::now();
        std::fs::create_dir_all(output_dir)
            .context(format!("Failed to create directory: {}", output_dir.display()))?;

        let dashboard = self.dashboard(selection);
        let id_key = self.config.schema.id.as_str();
        let mut report = self.base_report(&dashboard);

        let map_path = output_dir.join("map.geojson");
        export::export_map_view(&dashboard, id_key, &map_path)?;
        report.record_output(&map_path);

        let table_path = output_dir.join("table.csv");
        export::export_table_csv(&dashboard.table(), selection.mode, id_key, &table_path)?;
        report.record_output(&table_path);

        let legend_path = output_dir.join("legend.json");
        export::write_json(&dashboard.legend, &legend_path)?;
        report.record_output(&legend_path);

        let view_path = output_dir.join("view.json");
        export::write_json(&self.view_state(), &view_path)?;
        report.record_output(&view_path);

        if let Some(series) = &dashboard.series {
            let series_path = output_dir.join("series.json");
            export::write_json(series, &series_path)?;
            report.record_output(&series_path);
        }

        report.set_duration(started_at.elapsed());
        report.finalize();
        info!(
            output = %output_dir.display(),
            status = ?report.status,
            rendered = report.features_rendered,
            "Render finished"
        );
        Ok(report)
    }

    /// Rapport pré-rempli avec les compteurs du calcul
    pub fn base_report(&self, dashboard: &Dashboard<'_>) -> RenderReport {
        let selection = &dashboard.selection;
        let mut report = RenderReport::new(selection.mode, selection.year, self.data_path());
        report.checksum = self.checksum.clone();
        report.load_error = self.load_error.clone();
        report.range = dashboard.range;
        report.features_loaded = self.store.len();
        report.features_rendered = dashboard.map_features().count();
        report.features_excluded = dashboard.excluded();
        report.malformed_series = self.store.malformed_series();
        report.warnings = self.store.warnings().iter().map(|w| w.to_string()).collect();
        report.unknown_subzone = selection
            .subzone
            .clone()
            .filter(|_| dashboard.series.is_none());
        report
    }
}

/// Calcule le checksum blake3 d'un fichier
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 65536]; // 64KB buffer

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize().as_bytes()))
}

/// Chemin de données effectif: argument CLI, sinon variable d'environnement,
/// sinon configuration
pub fn resolve_data_path(config: &mut Config, cli_override: Option<PathBuf>) {
    config.apply_env();
    if let Some(path) = cli_override {
        config.data_path = path;
    }
}

//! Définition et implémentation des commandes CLI
//!
//! - `render`: toutes les vues dans un répertoire
//! - `table`: tableau trié en console
//! - `series`: série temporelle d'une sous-zone
//! - `subzones`: options du sélecteur de sous-zone

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use preschool_map::export::table::format_table;
use preschool_map::Session;
use subzone::{display_value, time_series, Mode, Year};

#[derive(Subcommand)]
pub enum Commands {
    /// Render map, table, legend and time series files
    Render {
        /// Display mode: demand-mismatch or population
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Forecast year (must be one of the configured years)
        #[arg(short, long)]
        year: Option<Year>,

        /// Subzone whose time series is exported
        #[arg(short, long)]
        subzone: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Also save the render report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the sorted subzone table
    Table {
        #[arg(short, long)]
        mode: Option<Mode>,

        #[arg(short, long)]
        year: Option<Year>,
    },

    /// Print the time series of one subzone
    Series {
        #[arg(short, long)]
        mode: Option<Mode>,

        #[arg(short, long)]
        subzone: String,
    },

    /// List subzone ids
    Subzones,
}

/// Exécute la commande render
pub fn cmd_render(
    session: &Session,
    mode: Option<Mode>,
    year: Option<Year>,
    subzone: Option<String>,
    output: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    let selection = session.selection(mode, year, subzone)?;
    info!(
        mode = %selection.mode,
        year = selection.year,
        output = %output.display(),
        "Starting render"
    );

    let report = session.render(&selection, output)?;
    report.display();

    if let Some(path) = report_path {
        report.save_to_file(path)?;
        println!("Report saved to {}", path.display());
    }
    Ok(())
}

/// Exécute la commande table
pub fn cmd_table(session: &Session, mode: Option<Mode>, year: Option<Year>) -> Result<()> {
    let selection = session.selection(mode, year, None)?;
    let dashboard = session.dashboard(&selection);

    println!("Current Mode: {} ({})", selection.mode, selection.year);
    print!(
        "{}",
        format_table(&dashboard.table(), selection.mode, &session.config.schema.id)
    );
    println!("{}", dashboard.legend.caption);
    Ok(())
}

/// Exécute la commande series
pub fn cmd_series(session: &Session, mode: Option<Mode>, subzone: &str) -> Result<()> {
    let mode = mode.unwrap_or(session.config.default_mode);

    match time_series(&session.store, subzone, mode) {
        None => println!("Subzone not found: {}", subzone),
        Some(series) if series.points.is_empty() => {
            println!("{}: no data points", series.subzone);
        }
        Some(series) => {
            println!("{} - {}", series.subzone, series.y_label());
            for point in &series.points {
                println!("  {}  {}", point.year, display_value(point.value));
            }
            println!("{}", series.axis_caption());
        }
    }
    Ok(())
}

/// Exécute la commande subzones
pub fn cmd_subzones(session: &Session) -> Result<()> {
    for id in session.store.ids() {
        println!("{}", id);
    }
    Ok(())
}

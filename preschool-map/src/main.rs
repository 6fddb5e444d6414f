//! Point d'entrée CLI pour preschool-map

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use preschool_map::session::resolve_data_path;
use preschool_map::{Config, Session};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Carte des sous-zones: écart offre/demande préscolaire ou population
#[derive(Parser)]
#[command(name = "preschool-map")]
#[command(author, version)]
#[command(about = "Subzone level demand for preschools: colored map, table and time series")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Preset (singapore) ou chemin vers une config JSON
    #[arg(long, default_value = "singapore", global = true)]
    config: String,

    /// Fichier GeoJSON des sous-zones (remplace la config et PRESCHOOL_MAP_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let mut config = Config::resolve(&cli.config)?;
    resolve_data_path(&mut config, cli.data);
    info!(config = %cli.config, data = %config.data_path.display(), "Opening session");

    let session = Session::open(config);

    match cli.command {
        Commands::Render {
            mode,
            year,
            subzone,
            output,
            report,
        } => cli::cmd_render(&session, mode, year, subzone, &output, report.as_deref())?,
        Commands::Table { mode, year } => cli::cmd_table(&session, mode, year)?,
        Commands::Series { mode, subzone } => cli::cmd_series(&session, mode, &subzone)?,
        Commands::Subzones => cli::cmd_subzones(&session)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}

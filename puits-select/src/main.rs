//! Point d'entrée CLI pour puits-select

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod export;
mod sink;
mod source;

use cli::Commands;

/// Analyse de la disponibilité des logs de puits par sélection polygonale
#[derive(Parser)]
#[command(name = "puits-select")]
#[command(author, version)]
#[command(about = "Sélectionne les puits dans un polygone, classe leur complétude de logs et exporte le rapport")]
#[command(
    long_about = "Moteur de sélection spatiale pour jeux de puits.\n\nCharge un fichier de puits (well_name, lon, lat, type + colonnes de logs), applique un polygone (fichier de sommets ou script de session), classe chaque puits contenu selon la complétude de ses logs, puis exporte report.json et selection.geojson."
)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Select {
            records,
            polygon,
            output,
            config,
        } => {
            info!(records = %records.display(), polygon = %polygon.display(), "Sélection");
            cli::cmd_select(&records, &polygon, &output, config.as_deref())?;
        }
        Commands::Session {
            records,
            script,
            output,
            config,
        } => {
            info!(records = %records.display(), script = %script.display(), "Session");
            cli::cmd_session(&records, &script, &output, config.as_deref())?;
        }
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

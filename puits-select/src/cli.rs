//! Définition et implémentation des commandes CLI
//!
//! CLI simplifiée:
//! - `select`: sélection en un coup (fichier polygone → rapport)
//! - `session`: rejoue un script d'événements d'interaction

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Subcommand;
use geo::Coord;
use tracing::{info, warn};

use geoselect::{Controller, SelectError, SelectionState};

use crate::config::Config;
use crate::export::FileReportSink;
use crate::sink::ConsoleSink;
use crate::source;

#[derive(Subcommand)]
pub enum Commands {
    /// Select wells inside a polygon and export the report
    Select {
        /// Path to the well records file (delimited text: ; , or tab)
        #[arg(short, long)]
        records: PathBuf,

        /// Path to the polygon file (one "lon lat" pair per line)
        #[arg(short, long)]
        polygon: PathBuf,

        /// Output directory for report.json and selection.geojson
        #[arg(short, long, default_value = "./out")]
        output: PathBuf,

        /// Path to a JSON config (default: embedded preset)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay a scripted interaction session (vertex/close/clear/export)
    Session {
        /// Path to the well records file
        #[arg(short, long)]
        records: PathBuf,

        /// Path to the event script, one event per line
        #[arg(short, long)]
        script: PathBuf,

        /// Output directory for export artifacts
        #[arg(short, long, default_value = "./out")]
        output: PathBuf,

        /// Path to a JSON config (default: embedded preset)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Exécute la commande select
pub fn cmd_select(
    records: &Path,
    polygon: &Path,
    output: &Path,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let wells = source::load_wells(records, &config)?;
    let vertices = read_polygon(polygon)?;

    let state = SelectionState::new(wells, config.required_logs.clone());
    let mut controller = Controller::new(state, ConsoleSink);

    // Le fichier polygone joue le rôle de la surface de dessin :
    // un flux de sommets puis une fermeture
    for vertex in vertices {
        controller.add_vertex(vertex);
    }
    controller.close_polygon();

    let mut persister = FileReportSink::new(output);
    match controller.export(&mut persister) {
        Ok(report) => {
            report.display();
            Ok(())
        }
        Err(SelectError::EmptyExport) => {
            warn!("No wells inside the polygon, nothing exported");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Exécute la commande session
pub fn cmd_session(
    records: &Path,
    script: &Path,
    output: &Path,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let wells = source::load_wells(records, &config)?;

    let state = SelectionState::new(wells, config.required_logs.clone());
    let mut controller = Controller::new(state, ConsoleSink);
    let mut persister = FileReportSink::new(output);

    let content = std::fs::read_to_string(script)
        .context(format!("Failed to read script file: {}", script.display()))?;

    let mut exports = 0usize;
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("vertex") => {
                let vertex = parse_vertex(&tokens.collect::<Vec<_>>().join(" "))
                    .context(format!("Invalid vertex at line {}", line_no + 1))?;
                controller.add_vertex(vertex);
            }
            Some("close") => controller.close_polygon(),
            Some("clear") => controller.clear(),
            Some("export") => match controller.export(&mut persister) {
                Ok(report) => {
                    report.display();
                    exports += 1;
                }
                Err(SelectError::EmptyExport) => {
                    warn!(line = line_no + 1, "Nothing to export, no artifacts produced");
                }
                Err(e) => return Err(e.into()),
            },
            Some(event) => {
                warn!(line = line_no + 1, event, "Ignoring unknown event");
            }
            None => {}
        }
    }

    info!(exports, "Session finished");
    Ok(())
}

/// Charge la configuration donnée, sinon le preset embarqué
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::default_preset(),
    }
}

/// Lit un fichier polygone : un sommet "lon lat" (ou "lon,lat") par
/// ligne, lignes vides et commentaires `#` ignorés
fn read_polygon(path: &Path) -> Result<Vec<Coord>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read polygon file: {}", path.display()))?;

    let mut vertices = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let vertex =
            parse_vertex(line).context(format!("Invalid vertex at line {}", line_no + 1))?;
        vertices.push(vertex);
    }

    if vertices.len() < 3 {
        bail!(
            "Polygon file needs at least 3 vertices, got {}",
            vertices.len()
        );
    }
    Ok(vertices)
}

/// Parse un sommet "lon lat", séparateur espace, virgule ou point-virgule
fn parse_vertex(raw: &str) -> Result<Coord> {
    let mut parts = raw
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|p| !p.is_empty());

    let lon_raw = parts.next().ok_or_else(|| anyhow!("missing longitude"))?;
    let lat_raw = parts.next().ok_or_else(|| anyhow!("missing latitude"))?;
    if parts.next().is_some() {
        bail!("expected exactly two coordinates, got more: {raw:?}");
    }

    let lon: f64 = fast_float::parse(lon_raw).map_err(|_| anyhow!("invalid longitude: {lon_raw:?}"))?;
    let lat: f64 = fast_float::parse(lat_raw).map_err(|_| anyhow!("invalid latitude: {lat_raw:?}"))?;

    Ok(Coord { x: lon, y: lat })
}

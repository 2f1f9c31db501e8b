//! Collaborateur de persistance : écriture des artefacts d'export
//!
//! Produit deux fichiers dans le répertoire de sortie :
//! - `report.json` : le rapport structuré (table résumé + table des puits)
//! - `selection.geojson` : l'instantané de rendu (polygone + puits avec
//!   leur classe d'affichage), trace durable de la scène affichée

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::{json, Map};
use tracing::info;

use geoselect::{DisplayClass, ReportSink, SceneSnapshot, SelectError, SelectionReport};

/// Nom de l'artefact rapport
pub const REPORT_FILENAME: &str = "report.json";

/// Nom de l'artefact scène
pub const SCENE_FILENAME: &str = "selection.geojson";

/// Persistance fichier : écrit rapport et scène dans un répertoire
#[derive(Debug)]
pub struct FileReportSink {
    out_dir: PathBuf,
}

impl FileReportSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Chemin de l'artefact rapport
    pub fn report_path(&self) -> PathBuf {
        self.out_dir.join(REPORT_FILENAME)
    }

    /// Chemin de l'artefact scène
    pub fn scene_path(&self) -> PathBuf {
        self.out_dir.join(SCENE_FILENAME)
    }

    fn write_artifacts(&self, report: &SelectionReport, scene: &SceneSnapshot) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir).context(format!(
            "Failed to create output directory: {}",
            self.out_dir.display()
        ))?;

        write_report(report, &self.report_path())?;
        write_scene(scene, &self.scene_path())?;

        info!(
            report = %self.report_path().display(),
            scene = %self.scene_path().display(),
            "Artifacts written"
        );
        Ok(())
    }
}

impl ReportSink for FileReportSink {
    fn persist(
        &mut self,
        report: &SelectionReport,
        scene: &SceneSnapshot,
    ) -> Result<(), SelectError> {
        self.write_artifacts(report, scene)
            .map_err(|e| SelectError::persistence(format!("{e:#}")))
    }
}

/// Écrit le rapport en JSON indenté
fn write_report(report: &SelectionReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .context(format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

/// Écrit la scène en GeoJSON : une feature polygone + une feature point
/// par puits avec sa classe et sa couleur
fn write_scene(scene: &SceneSnapshot, path: &Path) -> Result<()> {
    let mut features = Vec::with_capacity(scene.wells.len() + 1);

    if scene.polygon.len() >= 3 {
        let mut ring: Vec<Vec<f64>> = scene.polygon.iter().map(|v| vec![v.x, v.y]).collect();
        // Anneau GeoJSON explicitement fermé
        ring.push(ring[0].clone());

        let mut props = Map::new();
        props.insert("role".to_string(), json!("polygon"));
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(props),
            foreign_members: None,
        });
    }

    for well in &scene.wells {
        let mut props = Map::new();
        props.insert("name".to_string(), json!(well.name));
        props.insert("class".to_string(), json!(well.class.as_str()));
        props.insert("marker-color".to_string(), json!(class_color(well.class)));
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![well.lon, well.lat]))),
            id: None,
            properties: Some(props),
            foreign_members: None,
        });
    }

    let collection = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });

    let file = File::create(path)
        .context(format!("Failed to create scene file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{}", collection)?;
    writer.flush()?;
    Ok(())
}

/// Couleur de rendu d'une classe d'affichage
fn class_color(class: DisplayClass) -> &'static str {
    match class {
        DisplayClass::Outside => "lightgray",
        DisplayClass::InsideComplete => "green",
        DisplayClass::InsideIncomplete => "orange",
    }
}

//! Rapport de sélection pour l'export
//!
//! Transforme un snapshot de sélection en rapport structuré : compteurs,
//! répartition par type de puits et table détaillée par puits. Le rapport
//! est remis tel quel au collaborateur de persistance, qui décide du
//! format et de l'emplacement des artefacts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{LogKind, SceneSnapshot, Snapshot};
use crate::SelectError;

/// Compteurs agrégés d'une sélection
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Nombre de puits dans le polygone
    pub n_wells: usize,

    /// Surface approchée, arrondie à 3 décimales
    pub area_km2: f64,

    /// Puits avec tous les logs requis
    pub logs_complete: usize,

    /// Puits avec au moins un log requis manquant
    pub logs_incomplete: usize,

    /// Répartition par type de puits (ordre déterministe)
    pub by_type: BTreeMap<String, usize>,
}

/// Ligne détaillée d'un puits contenu
#[derive(Debug, Clone, Serialize)]
pub struct WellRow {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub lon: f64,
    pub lat: f64,

    /// Drapeau de présence pour chaque type de log suivi, dans l'ordre
    /// canonique des colonnes ([`LogKind::ALL`])
    #[serde(serialize_with = "serialize_log_flags")]
    pub logs: Vec<(&'static str, bool)>,

    pub logs_complete: bool,
}

/// Sérialise les drapeaux de logs en objet JSON, ordre des colonnes
/// préservé
fn serialize_log_flags<S>(flags: &[(&'static str, bool)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(flags.len()))?;
    for (label, present) in flags {
        map.serialize_entry(label, present)?;
    }
    map.end()
}

/// Rapport structuré d'une sélection : table résumé + table des puits
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub summary: ReportSummary,
    pub records: Vec<WellRow>,
}

/// Collaborateur de persistance : écrit le rapport et l'instantané de
/// rendu vers un stockage durable. Le contrat du moteur s'arrête à la
/// remise du rapport ; format et emplacement sont l'affaire de
/// l'implémentation.
pub trait ReportSink {
    fn persist(
        &mut self,
        report: &SelectionReport,
        scene: &SceneSnapshot,
    ) -> Result<(), SelectError>;
}

/// Construit le rapport depuis un snapshot frais.
///
/// Échoue avec [`SelectError::EmptyExport`] si aucun puits n'est dans le
/// polygone (ou si aucun polygone n'a été fermé) : rien à exporter,
/// aucun artefact ne doit être produit.
pub fn build_summary(snapshot: &Snapshot<'_>) -> Result<SelectionReport, SelectError> {
    if snapshot.wells.is_empty() {
        return Err(SelectError::EmptyExport);
    }

    let n_wells = snapshot.wells.len();
    let logs_complete = snapshot
        .wells
        .iter()
        .filter(|(_, status)| status.logs_complete)
        .count();

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for (well, _) in &snapshot.wells {
        *by_type.entry(well.kind.clone()).or_default() += 1;
    }

    let records = snapshot
        .wells
        .iter()
        .map(|(well, status)| WellRow {
            name: well.name.clone(),
            kind: well.kind.clone(),
            lon: well.lon,
            lat: well.lat,
            logs: LogKind::ALL
                .into_iter()
                .map(|k| (k.as_str(), well.logs.is_present(k)))
                .collect(),
            logs_complete: status.logs_complete,
        })
        .collect();

    Ok(SelectionReport {
        summary: ReportSummary {
            n_wells,
            area_km2: round3(snapshot.area_km2),
            logs_complete,
            logs_incomplete: n_wells - logs_complete,
            by_type,
        },
        records,
    })
}

/// Arrondi à 3 décimales
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl SelectionReport {
    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SELECTION REPORT");
        println!("{}", "=".repeat(60));

        println!("\n--- SUMMARY ---");
        println!("Wells in polygon: {}", self.summary.n_wells);
        println!("Approx. area: {:.3} km²", self.summary.area_km2);
        println!(
            "Logs: {} complete, {} incomplete",
            self.summary.logs_complete, self.summary.logs_incomplete
        );

        if !self.summary.by_type.is_empty() {
            println!("\n--- BY TYPE ---");
            for (kind, count) in &self.summary.by_type {
                println!("  {}: {}", kind, count);
            }
        }

        println!("\n--- WELLS ---");
        for row in &self.records {
            let present: Vec<&str> = row
                .logs
                .iter()
                .filter(|(_, present)| *present)
                .map(|(label, _)| *label)
                .collect();
            let logs = if present.is_empty() {
                "No logs".to_string()
            } else {
                present.join(", ")
            };
            println!(
                "  {} ({}) [{}]: {}",
                row.name,
                row.kind,
                if row.logs_complete {
                    "complete"
                } else {
                    "incomplete"
                },
                logs
            );
        }

        println!("\n{}", "=".repeat(60));
    }
}

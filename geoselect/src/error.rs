//! Types d'erreurs pour le crate geoselect

use thiserror::Error;

/// Erreurs pouvant survenir dans le moteur de sélection.
///
/// Les défaillances géométriques (polygone dégénéré) et les logs absents
/// ne sont pas des erreurs : elles sont traitées localement avec des
/// valeurs par défaut sûres.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Export demandé sans puits dans le polygone courant
    #[error("nothing to export: no wells inside the current polygon")]
    EmptyExport,

    /// Libellé de colonne ne correspondant à aucun type de log connu
    #[error("unknown log kind: {0}")]
    UnknownLogKind(String),

    /// Échec du collaborateur de persistance
    #[error("persistence failed: {reason}")]
    Persistence { reason: String },
}

impl SelectError {
    /// Crée une erreur de persistance avec contexte
    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::Persistence {
            reason: reason.into(),
        }
    }
}

//! Types de données pour le crate geoselect

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::SelectError;

/// Types de log suivis pour chaque puits (ensemble fermé)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    #[serde(rename = "GR")]
    Gr,
    #[serde(rename = "RHOB")]
    Rhob,
    #[serde(rename = "NPHI")]
    Nphi,
    #[serde(rename = "DT")]
    Dt,
    #[serde(rename = "RES")]
    Res,
    #[serde(rename = "Checkshot")]
    Checkshot,
}

impl LogKind {
    /// Tous les types de log, dans l'ordre canonique des colonnes
    pub const ALL: [LogKind; 6] = [
        LogKind::Gr,
        LogKind::Rhob,
        LogKind::Nphi,
        LogKind::Dt,
        LogKind::Res,
        LogKind::Checkshot,
    ];

    /// Libellé canonique de la colonne
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Gr => "GR",
            LogKind::Rhob => "RHOB",
            LogKind::Nphi => "NPHI",
            LogKind::Dt => "DT",
            LogKind::Res => "RES",
            LogKind::Checkshot => "Checkshot",
        }
    }

    /// Résout un libellé de colonne vers un type de log.
    ///
    /// Insensible à la casse. Accepte aussi "Chekshot", orthographe
    /// présente dans les jeux de données historiques.
    pub fn from_label(label: &str) -> Result<Self, SelectError> {
        match label.trim().to_ascii_uppercase().as_str() {
            "GR" => Ok(LogKind::Gr),
            "RHOB" => Ok(LogKind::Rhob),
            "NPHI" => Ok(LogKind::Nphi),
            "DT" => Ok(LogKind::Dt),
            "RES" => Ok(LogKind::Res),
            "CHECKSHOT" | "CHEKSHOT" => Ok(LogKind::Checkshot),
            _ => Err(SelectError::UnknownLogKind(label.to_string())),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            LogKind::Gr => 0,
            LogKind::Rhob => 1,
            LogKind::Nphi => 2,
            LogKind::Dt => 3,
            LogKind::Res => 4,
            LogKind::Checkshot => 5,
        }
    }
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disponibilité des logs d'un puits.
///
/// Un type de log jamais renseigné est lu comme absent : une colonne
/// manquante dans la source n'est pas une erreur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogAvailability {
    present: [bool; LogKind::ALL.len()],
}

impl LogAvailability {
    /// Marque un type de log comme présent ou absent
    pub fn set(&mut self, kind: LogKind, present: bool) {
        self.present[kind.index()] = present;
    }

    /// Vrai si le log est marqué présent
    pub fn is_present(&self, kind: LogKind) -> bool {
        self.present[kind.index()]
    }

    /// Vrai si tous les types requis sont présents
    pub fn complete(&self, required: &[LogKind]) -> bool {
        required.iter().all(|k| self.is_present(*k))
    }

    /// Types de log présents, dans l'ordre canonique
    pub fn present_kinds(&self) -> impl Iterator<Item = LogKind> + '_ {
        LogKind::ALL.into_iter().filter(|k| self.is_present(*k))
    }

    /// Construit une disponibilité depuis une liste de logs présents
    pub fn from_present(kinds: &[LogKind]) -> Self {
        let mut avail = Self::default();
        for kind in kinds {
            avail.set(*kind, true);
        }
        avail
    }
}

/// Un puits : données source immuables, chargées une fois
#[derive(Debug, Clone, PartialEq)]
pub struct Well {
    /// Nom du puits (unique dans le jeu de données)
    pub name: String,

    /// Longitude en degrés WGS84
    pub lon: f64,

    /// Latitude en degrés WGS84
    pub lat: f64,

    /// Type de puits (libellé catégoriel, ex: "Exploration")
    pub kind: String,

    /// Disponibilité des logs
    pub logs: LogAvailability,
}

impl Well {
    /// Position du puits en coordonnées géographiques
    pub fn position(&self) -> Coord {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Classification dérivée d'un puits, recalculée à chaque changement
/// de polygone.
///
/// `logs_complete` est indépendant de `inside_polygon` : la complétude
/// ne dépend que des logs du puits, jamais de la sélection spatiale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WellStatus {
    /// Vrai si le puits est dans le polygone courant
    pub inside_polygon: bool,

    /// Vrai si tous les logs requis sont présents
    pub logs_complete: bool,
}

/// Classe d'affichage d'un puits, consommée par le collaborateur de
/// visualisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayClass {
    Outside,
    InsideComplete,
    InsideIncomplete,
}

impl DisplayClass {
    /// Dérive la classe d'affichage depuis la classification
    pub fn from_status(status: WellStatus) -> Self {
        match (status.inside_polygon, status.logs_complete) {
            (false, _) => DisplayClass::Outside,
            (true, true) => DisplayClass::InsideComplete,
            (true, false) => DisplayClass::InsideIncomplete,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayClass::Outside => "outside",
            DisplayClass::InsideComplete => "inside-complete",
            DisplayClass::InsideIncomplete => "inside-incomplete",
        }
    }
}

impl std::fmt::Display for DisplayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vue empruntée sur le résultat d'une évaluation de polygone.
///
/// La durée de vie lie la vue à l'état de sélection : l'exportateur doit
/// redemander un snapshot à chaque export, il ne peut pas en retenir une
/// copie périmée.
#[derive(Debug)]
pub struct Snapshot<'a> {
    /// Sommets du polygone fermé (vide si aucune sélection)
    pub polygon: &'a [Coord],

    /// Puits contenus dans le polygone, avec leur classification
    pub wells: Vec<(&'a Well, WellStatus)>,

    /// Surface approximative du polygone en km²
    pub area_km2: f64,
}

/// Un puits tel que rendu par la visualisation
#[derive(Debug, Clone, PartialEq)]
pub struct SceneWell {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub class: DisplayClass,
}

/// Instantané de rendu transmis au collaborateur de visualisation,
/// puis joint au rapport lors d'un export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    /// Sommets du polygone fermé
    pub polygon: Vec<Coord>,

    /// Tous les puits avec leur classe d'affichage
    pub wells: Vec<SceneWell>,

    /// Résumé textuel affichable tel quel
    pub summary: String,
}

//! Configuration du système

use std::path::Path;

use anyhow::{Context, Result};
use geoselect::LogKind;
use serde::{Deserialize, Serialize};

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Types de log requis pour qu'un puits soit "complet"
    #[serde(default = "default_required_logs")]
    pub required_logs: Vec<LogKind>,

    /// Valeurs de cellule normalisées vers "présent" (insensible à la
    /// casse) ; tout le reste vaut absent
    #[serde(default = "default_truthy")]
    pub truthy: Vec<String>,
}

fn default_required_logs() -> Vec<LogKind> {
    LogKind::ALL.to_vec()
}

fn default_truthy() -> Vec<String> {
    ["yes", "y", "true", "1", "x"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            required_logs: default_required_logs(),
            truthy: default_truthy(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Configuration par défaut embarquée
    pub fn default_preset() -> Result<Self> {
        serde_json::from_str(include_str!("presets/default.json"))
            .context("Failed to parse embedded config")
    }

    /// Normalise une valeur de cellule oui/non vers un booléen
    pub fn is_truthy(&self, raw: &str) -> bool {
        let value = raw.trim();
        self.truthy.iter().any(|t| t.eq_ignore_ascii_case(value))
    }
}

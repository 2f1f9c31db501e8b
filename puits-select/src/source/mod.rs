//! Source de données : chargement des puits depuis un fichier délimité
//!
//! Contrat d'entrée du moteur : colonnes `well_name`, `lon`, `lat`,
//! `type`, plus une colonne par type de log avec des valeurs oui/non
//! normalisées en booléens avant d'atteindre le cœur. Les lignes
//! malformées sont ignorées avec un warning (dégradation gracieuse) ;
//! un fichier illisible ou un en-tête incomplet est une erreur remontée
//! avant la construction du moteur.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use memchr::memchr_iter;
use tracing::{debug, info, warn};

use geoselect::{LogAvailability, LogKind, Well};

use crate::config::Config;

/// Positions des colonnes reconnues dans l'en-tête
#[derive(Debug)]
struct HeaderMap {
    name: usize,
    lon: usize,
    lat: usize,
    kind: usize,
    logs: Vec<(LogKind, usize)>,
}

/// Charge le jeu de puits depuis un fichier délimité (`;`, `,` ou tab)
pub fn load_wells(path: &Path, config: &Config) -> Result<Vec<Well>> {
    let raw = std::fs::read(path)
        .context(format!("Failed to read records file: {}", path.display()))?;
    let content = decode(&raw);
    let wells = parse_wells(&content, config)?;

    info!(path = %path.display(), wells = wells.len(), "Records loaded");
    Ok(wells)
}

/// Décode les bytes : UTF-8 en chemin rapide, sinon WINDOWS_1252
/// (encodage habituel des exports tableur)
fn decode(data: &[u8]) -> Cow<'_, str> {
    match simdutf8::basic::from_utf8(data) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(data);
            Cow::Owned(decoded.into_owned())
        }
    }
}

/// Parse le contenu décodé
fn parse_wells(content: &str, config: &Config) -> Result<Vec<Well>> {
    let mut lines = content.lines().enumerate();

    let Some((_, header)) = lines.next() else {
        bail!("Records file is empty");
    };
    let delimiter = sniff_delimiter(header);
    let header_fields = split_fields(header, delimiter);
    let map = map_header(&header_fields)?;

    let mut wells = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line, delimiter);
        match parse_row(&fields, &map, config) {
            Ok(well) => {
                if !seen.insert(well.name.clone()) {
                    warn!(line = line_no + 1, name = %well.name, "Skipping duplicate well name");
                    continue;
                }
                wells.push(well);
            }
            Err(reason) => {
                warn!(line = line_no + 1, %reason, "Skipping malformed row");
            }
        }
    }

    if wells.is_empty() {
        warn!("No well records loaded");
    }
    Ok(wells)
}

/// Devine le délimiteur depuis l'en-tête (`;`, `,` ou tab, au plus
/// fréquent)
fn sniff_delimiter(header: &str) -> u8 {
    let bytes = header.as_bytes();
    let candidates = [b';', b',', b'\t'];

    candidates
        .into_iter()
        .max_by_key(|&d| memchr_iter(d, bytes).count())
        .filter(|&d| memchr_iter(d, bytes).count() > 0)
        .unwrap_or(b',')
}

/// Découpe une ligne sur le délimiteur (positions via memchr)
fn split_fields(line: &str, delimiter: u8) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;

    for pos in memchr_iter(delimiter, bytes) {
        fields.push(line[start..pos].trim());
        start = pos + 1;
    }
    fields.push(line[start..].trim());
    fields
}

/// Résout les positions des colonnes reconnues.
///
/// `well_name`, `lon`, `lat` et `type` sont obligatoires ; les colonnes
/// de log sont optionnelles (absente = log absent pour tous les puits),
/// les colonnes inconnues sont ignorées.
fn map_header(fields: &[&str]) -> Result<HeaderMap> {
    let mut name = None;
    let mut lon = None;
    let mut lat = None;
    let mut kind = None;
    let mut logs = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        match field.to_ascii_lowercase().as_str() {
            "well_name" => name = Some(i),
            "lon" => lon = Some(i),
            "lat" => lat = Some(i),
            "type" => kind = Some(i),
            _ => match LogKind::from_label(field) {
                Ok(log_kind) => logs.push((log_kind, i)),
                Err(_) => debug!(column = field, "Ignoring unknown column"),
            },
        }
    }

    let (Some(name), Some(lon), Some(lat), Some(kind)) = (name, lon, lat, kind) else {
        bail!("Missing required columns: expected well_name, lon, lat, type");
    };

    Ok(HeaderMap {
        name,
        lon,
        lat,
        kind,
        logs,
    })
}

/// Parse une ligne de données vers un puits
fn parse_row(fields: &[&str], map: &HeaderMap, config: &Config) -> std::result::Result<Well, String> {
    let get = |i: usize| -> std::result::Result<&str, String> {
        fields
            .get(i)
            .copied()
            .ok_or_else(|| format!("missing field at column {}", i + 1))
    };

    let name = get(map.name)?;
    if name.is_empty() {
        return Err("empty well name".to_string());
    }

    let lon: f64 = fast_float::parse(get(map.lon)?)
        .map_err(|_| format!("invalid longitude: {:?}", get(map.lon).unwrap_or("")))?;
    let lat: f64 = fast_float::parse(get(map.lat)?)
        .map_err(|_| format!("invalid latitude: {:?}", get(map.lat).unwrap_or("")))?;

    let mut logs = LogAvailability::default();
    for (log_kind, i) in &map.logs {
        // Champ manquant ou valeur non reconnue = log absent, pas une erreur
        let present = fields.get(*i).map_or(false, |v| config.is_truthy(v));
        logs.set(*log_kind, present);
    }

    Ok(Well {
        name: name.to_string(),
        lon,
        lat,
        kind: get(map.kind)?.to_string(),
        logs,
    })
}

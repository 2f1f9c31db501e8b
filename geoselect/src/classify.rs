//! Classification des puits par contenance et complétude des logs

use geo::Coord;

use crate::geometry;
use crate::types::{LogKind, Well, WellStatus};

/// Classifie un lot de puits contre un polygone.
///
/// Fonction pure : un seul appel de contenance groupé pour tous les
/// puits, et `logs_complete` vrai si et seulement si chaque type requis
/// est marqué présent, indépendamment de la contenance. Un polygone
/// dégénéré classe tous les puits à l'extérieur.
pub fn classify(wells: &[Well], polygon: &[Coord], required: &[LogKind]) -> Vec<WellStatus> {
    let points: Vec<Coord> = wells.iter().map(Well::position).collect();
    let inside = geometry::contains_points(polygon, &points);

    wells
        .iter()
        .zip(inside)
        .map(|(well, inside_polygon)| WellStatus {
            inside_polygon,
            logs_complete: well.logs.complete(required),
        })
        .collect()
}

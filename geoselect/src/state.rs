//! État de sélection : polygone courant, classifications et surface
//!
//! Propriété exclusive du contrôleur d'interaction ; aucun autre
//! composant ne le mute. Les mutations passent uniquement par
//! [`SelectionState::apply_polygon`] et [`SelectionState::clear`].

use geo::Coord;
use tracing::debug;

use crate::classify::classify;
use crate::geometry;
use crate::types::{LogKind, Snapshot, Well, WellStatus};

/// État mutable de la sélection spatiale courante.
///
/// Invariant : le sous-ensemble contenu (exposé par [`snapshot`]) est
/// toujours exactement l'ensemble des puits dont `inside_polygon` est
/// vrai sous le polygone courant, jamais périmé.
///
/// [`snapshot`]: SelectionState::snapshot
#[derive(Debug)]
pub struct SelectionState {
    wells: Vec<Well>,
    status: Vec<WellStatus>,
    polygon: Vec<Coord>,
    area_km2: f64,
    required: Vec<LogKind>,
}

impl SelectionState {
    /// Crée un état vide (aucun polygone) sur un jeu de puits immuable
    pub fn new(wells: Vec<Well>, required: Vec<LogKind>) -> Self {
        let status = vec![WellStatus::default(); wells.len()];
        Self {
            wells,
            status,
            polygon: Vec::new(),
            area_km2: 0.0,
            required,
        }
    }

    /// Jeu de puits source
    pub fn wells(&self) -> &[Well] {
        &self.wells
    }

    /// Classifications courantes, parallèles à [`wells`]
    ///
    /// [`wells`]: SelectionState::wells
    pub fn status(&self) -> &[WellStatus] {
        &self.status
    }

    /// Sommets du polygone courant (vide si aucune sélection)
    pub fn polygon(&self) -> &[Coord] {
        &self.polygon
    }

    /// Surface du dernier polygone appliqué, en km²
    pub fn area_km2(&self) -> f64 {
        self.area_km2
    }

    /// Types de log requis pour la complétude
    pub fn required_logs(&self) -> &[LogKind] {
        &self.required
    }

    /// Applique un polygone fermé et reclassifie tous les puits.
    ///
    /// Le nouveau vecteur de classifications et la surface sont calculés
    /// en entier avant que le moindre champ ne soit remplacé : aucun
    /// état partiel n'est observable. Un polygone de moins de 3 sommets
    /// est appliqué avec les valeurs par défaut sûres (surface nulle,
    /// aucun puits contenu).
    pub fn apply_polygon(&mut self, vertices: &[Coord]) {
        let status = classify(&self.wells, vertices, &self.required);
        let area_km2 = geometry::approximate_area_km2(vertices);
        let contained = status.iter().filter(|s| s.inside_polygon).count();

        self.polygon = vertices.to_vec();
        self.status = status;
        self.area_km2 = area_km2;

        debug!(
            vertices = vertices.len(),
            contained,
            area_km2,
            "Polygon applied"
        );
    }

    /// Réinitialise la sélection : polygone vide, classifications à
    /// faux, surface nulle. Idempotent.
    pub fn clear(&mut self) {
        self.polygon.clear();
        self.status = vec![WellStatus::default(); self.wells.len()];
        self.area_km2 = 0.0;

        debug!("Selection cleared");
    }

    /// Nombre de puits dans le polygone courant
    pub fn contained_count(&self) -> usize {
        self.status.iter().filter(|s| s.inside_polygon).count()
    }

    /// Vue fraîche sur le résultat courant : polygone, puits contenus
    /// et surface. À redemander à chaque export.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let wells = self
            .wells
            .iter()
            .zip(&self.status)
            .filter(|(_, status)| status.inside_polygon)
            .map(|(well, status)| (well, *status))
            .collect();

        Snapshot {
            polygon: &self.polygon,
            wells,
            area_km2: self.area_km2,
        }
    }
}

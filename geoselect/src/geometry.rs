//! Utilitaires géométriques : test de contenance et surface approchée
//!
//! Les polygones sont des séquences ordonnées de sommets (lon, lat) en
//! degrés WGS84, avec une arête de fermeture implicite entre le dernier
//! et le premier sommet. Un polygone de moins de 3 sommets est dégénéré :
//! surface nulle, aucun point contenu.

use geo::Coord;

/// Kilomètres par degré de latitude (approximation sphérique locale)
pub const KM_PER_DEG_LAT: f64 = 111.32;

/// Tolérance pour les tests d'appartenance à une arête
const EDGE_EPSILON: f64 = 1e-12;

/// Teste la contenance d'un lot de points dans un polygone.
///
/// Ray casting pair/impair, correct pour les polygones non convexes.
/// Règle de bord : un point exactement sur une arête ou un sommet du
/// polygone compte comme intérieur (la sélection est inclusive).
///
/// Retourne tout-faux si le polygone a moins de 3 sommets.
pub fn contains_points(polygon: &[Coord], points: &[Coord]) -> Vec<bool> {
    if polygon.len() < 3 {
        return vec![false; points.len()];
    }

    points
        .iter()
        .map(|p| point_in_polygon(polygon, *p))
        .collect()
}

/// Test pair/impair pour un point unique
fn point_in_polygon(polygon: &[Coord], p: Coord) -> bool {
    let n = polygon.len();
    let mut inside = false;

    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[j];
        let b = polygon[i];

        // Règle de bord : sur l'arête = intérieur
        if on_segment(a, b, p) {
            return true;
        }

        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}

/// Vrai si p est sur le segment [a, b], à tolérance près
fn on_segment(a: Coord, b: Coord, p: Coord) -> bool {
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);

    // Arête de longueur nulle (sommet dupliqué, anneau explicitement
    // fermé) : seul le sommet lui-même est dessus
    if len_sq <= EDGE_EPSILON {
        return (p.x - a.x).abs() <= EDGE_EPSILON && (p.y - a.y).abs() <= EDGE_EPSILON;
    }

    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }

    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    dot >= -EDGE_EPSILON && dot <= len_sq + EDGE_EPSILON
}

/// Surface approchée d'un polygone en km².
///
/// Approximation plane locale : les sommets sont projetés dans un repère
/// plat centré sur la latitude moyenne (111.32 km/deg en latitude,
/// 111.32 * cos(lat moyenne) en longitude), puis formule du lacet.
/// Valide pour des régions assez petites pour que la courbure soit
/// négligeable ; le contrat est cette formule exacte, pas une surface
/// géodésique.
///
/// Retourne 0.0 si le polygone a moins de 3 sommets.
pub fn approximate_area_km2(polygon: &[Coord]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mean_lat = polygon.iter().map(|v| v.y).sum::<f64>() / polygon.len() as f64;
    let km_per_deg_lon = KM_PER_DEG_LAT * mean_lat.to_radians().cos();

    let xs: Vec<f64> = polygon.iter().map(|v| v.x * km_per_deg_lon).collect();
    let ys: Vec<f64> = polygon.iter().map(|v| v.y * KM_PER_DEG_LAT).collect();

    let n = xs.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += xs[i] * ys[j] - xs[j] * ys[i];
    }

    area.abs() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f64, y: f64) -> Coord {
        Coord { x, y }
    }

    fn unit_square() -> Vec<Coord> {
        vec![
            coord(-1.0, -1.0),
            coord(1.0, -1.0),
            coord(1.0, 1.0),
            coord(-1.0, 1.0),
        ]
    }

    #[test]
    fn test_square_containment() {
        let square = unit_square();
        let points = vec![
            coord(0.0, 0.0),   // centre
            coord(0.9, 0.9),   // proche du coin, intérieur
            coord(1.5, 0.0),   // extérieur à droite
            coord(0.0, -2.0),  // extérieur en bas
            coord(-3.0, 3.0),  // loin
        ];

        let inside = contains_points(&square, &points);
        assert_eq!(inside, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_boundary_counts_as_inside() {
        let square = unit_square();
        let points = vec![
            coord(1.0, 0.0),   // milieu d'arête
            coord(-1.0, -1.0), // sommet
            coord(0.0, 1.0),   // milieu d'arête haute
        ];

        let inside = contains_points(&square, &points);
        assert_eq!(inside, vec![true, true, true]);
    }

    #[test]
    fn test_concave_polygon() {
        // Polygone en L : l'encoche (2, 2) est hors du polygone
        let l_shape = vec![
            coord(0.0, 0.0),
            coord(3.0, 0.0),
            coord(3.0, 1.0),
            coord(1.0, 1.0),
            coord(1.0, 3.0),
            coord(0.0, 3.0),
        ];

        let points = vec![
            coord(0.5, 0.5), // dans la base
            coord(0.5, 2.5), // dans la branche verticale
            coord(2.0, 2.0), // dans l'encoche, dehors
            coord(2.0, 0.5), // dans la base
        ];

        let inside = contains_points(&l_shape, &points);
        assert_eq!(inside, vec![true, true, false, true]);
    }

    #[test]
    fn test_explicitly_closed_ring() {
        // Convention GeoJSON : premier sommet répété en dernier. L'arête
        // de fermeture dégénérée ne doit pas capturer tout le plan.
        let ring = vec![
            coord(0.0, 0.0),
            coord(1.0, 0.0),
            coord(1.0, 1.0),
            coord(0.0, 1.0),
            coord(0.0, 0.0),
        ];

        let points = vec![
            coord(0.5, 0.5),   // intérieur
            coord(50.0, -30.0), // très loin
            coord(0.0, 0.0),   // sommet dupliqué
            coord(2.0, 0.5),   // extérieur proche
        ];

        let inside = contains_points(&ring, &points);
        assert_eq!(inside, vec![true, false, true, false]);
    }

    #[test]
    fn test_duplicate_vertex_mid_polygon() {
        // Double-clic au même endroit pendant le tracé
        let polygon = vec![
            coord(0.0, 0.0),
            coord(1.0, 0.0),
            coord(1.0, 0.0),
            coord(1.0, 1.0),
            coord(0.0, 1.0),
        ];

        let points = vec![
            coord(0.5, 0.5),
            coord(50.0, -30.0),
            coord(1.0, 0.0), // le sommet dupliqué reste sur le bord
        ];

        let inside = contains_points(&polygon, &points);
        assert_eq!(inside, vec![true, false, true]);
    }

    #[test]
    fn test_degenerate_polygons() {
        let points = vec![coord(0.0, 0.0), coord(1.0, 1.0)];

        assert_eq!(contains_points(&[], &points), vec![false, false]);
        assert_eq!(
            contains_points(&[coord(0.0, 0.0)], &points),
            vec![false, false]
        );
        assert_eq!(
            contains_points(&[coord(0.0, 0.0), coord(2.0, 2.0)], &points),
            vec![false, false]
        );

        assert_eq!(approximate_area_km2(&[]), 0.0);
        assert_eq!(approximate_area_km2(&[coord(0.0, 0.0)]), 0.0);
        assert_eq!(
            approximate_area_km2(&[coord(0.0, 0.0), coord(1.0, 1.0)]),
            0.0
        );
    }

    #[test]
    fn test_no_points() {
        let square = unit_square();
        assert!(contains_points(&square, &[]).is_empty());
    }

    #[test]
    fn test_area_square_at_equator() {
        // Carré de 2° de côté centré sur l'équateur : cos(0) = 1
        let area = approximate_area_km2(&unit_square());
        let expected = 2.0 * KM_PER_DEG_LAT * 2.0 * KM_PER_DEG_LAT;
        assert!(
            (area - expected).abs() < 1e-6,
            "area={area}, expected={expected}"
        );
    }

    #[test]
    fn test_area_square_at_latitude() {
        // Carré de s degrés de côté centré à 48.85°N (Paris)
        let s = 0.5;
        let lat0: f64 = 48.85;
        let square = vec![
            coord(2.0, lat0 - s / 2.0),
            coord(2.0 + s, lat0 - s / 2.0),
            coord(2.0 + s, lat0 + s / 2.0),
            coord(2.0, lat0 + s / 2.0),
        ];

        let area = approximate_area_km2(&square);
        let expected = s * KM_PER_DEG_LAT * s * KM_PER_DEG_LAT * lat0.to_radians().cos();
        assert!(
            (area - expected).abs() < 1e-9,
            "area={area}, expected={expected}"
        );
    }

    #[test]
    fn test_area_independent_of_winding() {
        let cw: Vec<Coord> = unit_square().into_iter().rev().collect();
        let area_ccw = approximate_area_km2(&unit_square());
        let area_cw = approximate_area_km2(&cw);
        assert!((area_ccw - area_cw).abs() < 1e-9);
    }
}

//! Contrôleur d'interaction : machine à états du tracé de polygone
//!
//! Reçoit les événements bruts de la surface de dessin (ajout de sommet,
//! fermeture, effacement, export), les traite un par un jusqu'au bout,
//! et délègue tout l'affichage au collaborateur de visualisation notifié.
//! Un seul polygone vit à la fois.

use geo::Coord;
use tracing::{debug, info};

use crate::report::{self, ReportSink, SelectionReport};
use crate::state::SelectionState;
use crate::types::{DisplayClass, SceneSnapshot, SceneWell};
use crate::SelectError;

/// Phase du cycle de tracé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawPhase {
    /// Aucun sommet posé
    #[default]
    Idle,
    /// Polygone ouvert, au moins un sommet posé
    Drawing,
    /// Polygone fermé, état de sélection à jour
    Closed,
}

/// Collaborateur de visualisation, notifié après chaque fermeture ou
/// effacement. Pure notification, sans retour.
pub trait VisualSink {
    /// Reçoit l'instantané de rendu (classes par puits + résumé)
    fn render(&mut self, scene: &SceneSnapshot);

    /// Efface tout affichage transitoire
    fn clear(&mut self);
}

/// Contrôleur du cycle de vie du polygone.
///
/// Propriétaire exclusif de l'état de sélection. Transition notable :
/// poser un sommet depuis `Closed` démarre un nouveau polygone sans
/// effacement explicite ; le résultat précédent reste affiché jusqu'à la
/// fermeture suivante, qui le remplace en bloc.
#[derive(Debug)]
pub struct Controller<S: VisualSink> {
    state: SelectionState,
    sink: S,
    phase: DrawPhase,
    pending: Vec<Coord>,
    scene: Option<SceneSnapshot>,
}

impl<S: VisualSink> Controller<S> {
    pub fn new(state: SelectionState, sink: S) -> Self {
        Self {
            state,
            sink,
            phase: DrawPhase::Idle,
            pending: Vec::new(),
            scene: None,
        }
    }

    /// Phase courante de la machine à états
    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// État de sélection (lecture seule)
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Sommets du polygone en cours de tracé
    pub fn pending_vertices(&self) -> &[Coord] {
        &self.pending
    }

    /// Dernier instantané de rendu (None après effacement)
    pub fn scene(&self) -> Option<&SceneSnapshot> {
        self.scene.as_ref()
    }

    /// Pose un sommet. Depuis `Closed`, démarre un nouveau polygone ;
    /// le résultat précédent reste affiché jusqu'à la prochaine
    /// fermeture.
    pub fn add_vertex(&mut self, vertex: Coord) {
        match self.phase {
            DrawPhase::Idle | DrawPhase::Closed => {
                self.pending.clear();
                self.pending.push(vertex);
                self.phase = DrawPhase::Drawing;
                debug!(lon = vertex.x, lat = vertex.y, "New polygon started");
            }
            DrawPhase::Drawing => {
                self.pending.push(vertex);
            }
        }
    }

    /// Ferme le polygone en cours : applique la sélection et notifie la
    /// visualisation. Ignoré hors de la phase `Drawing`.
    ///
    /// Une fermeture à moins de 3 sommets n'est pas une erreur : la
    /// sélection est appliquée avec les valeurs par défaut sûres.
    pub fn close_polygon(&mut self) {
        if self.phase != DrawPhase::Drawing {
            debug!(phase = ?self.phase, "close_polygon ignored");
            return;
        }

        let vertices = std::mem::take(&mut self.pending);
        self.state.apply_polygon(&vertices);

        let scene = build_scene(&self.state);
        self.sink.render(&scene);
        self.scene = Some(scene);
        self.phase = DrawPhase::Closed;

        info!(
            vertices = vertices.len(),
            contained = self.state.contained_count(),
            area_km2 = self.state.area_km2(),
            "Polygon closed"
        );
    }

    /// Réinitialise tout : état de sélection, tracé en cours, affichage.
    /// Valide depuis n'importe quelle phase (abandonne un tracé ouvert),
    /// idempotent.
    pub fn clear(&mut self) {
        self.state.clear();
        self.pending.clear();
        self.scene = None;
        self.sink.clear();
        self.phase = DrawPhase::Idle;

        info!("Selection cleared");
    }

    /// Construit le rapport depuis un snapshot frais et le remet au
    /// collaborateur de persistance avec l'instantané de rendu courant.
    ///
    /// Échoue avec [`SelectError::EmptyExport`] si aucun puits n'est
    /// sélectionné ; aucun artefact n'est produit et l'état reste
    /// intact.
    pub fn export(&self, persister: &mut dyn ReportSink) -> Result<SelectionReport, SelectError> {
        let snapshot = self.state.snapshot();
        let report = report::build_summary(&snapshot)?;
        let scene = self.scene.as_ref().ok_or(SelectError::EmptyExport)?;

        persister.persist(&report, scene)?;

        info!(
            wells = report.summary.n_wells,
            area_km2 = report.summary.area_km2,
            "Report persisted"
        );
        Ok(report)
    }
}

/// Construit l'instantané de rendu : classe d'affichage de chaque puits
/// et résumé textuel dans le format de la zone d'information
fn build_scene(state: &SelectionState) -> SceneSnapshot {
    let wells: Vec<SceneWell> = state
        .wells()
        .iter()
        .zip(state.status())
        .map(|(well, status)| SceneWell {
            name: well.name.clone(),
            lon: well.lon,
            lat: well.lat,
            class: DisplayClass::from_status(*status),
        })
        .collect();

    let mut lines = Vec::new();
    lines.push(format!("Wells in polygon: {}", state.contained_count()));
    lines.push(format!("Approx. area: {:.2} km²", state.area_km2()));

    let contained: Vec<_> = state
        .wells()
        .iter()
        .zip(state.status())
        .filter(|(_, status)| status.inside_polygon)
        .collect();
    if !contained.is_empty() {
        lines.push(String::new());
        for (well, _) in contained {
            let present: Vec<&str> = well.logs.present_kinds().map(|k| k.as_str()).collect();
            let logs = if present.is_empty() {
                "No logs".to_string()
            } else {
                present.join(", ")
            };
            lines.push(format!("{} ({}): {}", well.name, well.kind, logs));
        }
    }

    SceneSnapshot {
        polygon: state.polygon().to_vec(),
        wells,
        summary: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogAvailability, LogKind, Well};

    /// Sink de test : enregistre les notifications reçues
    #[derive(Default)]
    struct RecordingSink {
        renders: Vec<SceneSnapshot>,
        clears: usize,
    }

    impl VisualSink for RecordingSink {
        fn render(&mut self, scene: &SceneSnapshot) {
            self.renders.push(scene.clone());
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    /// Persistance de test : compte les rapports reçus
    #[derive(Default)]
    struct RecordingPersister {
        persisted: usize,
    }

    impl ReportSink for RecordingPersister {
        fn persist(
            &mut self,
            _report: &SelectionReport,
            _scene: &SceneSnapshot,
        ) -> Result<(), SelectError> {
            self.persisted += 1;
            Ok(())
        }
    }

    fn well(name: &str, lon: f64, lat: f64, present: &[LogKind]) -> Well {
        Well {
            name: name.to_string(),
            lon,
            lat,
            kind: "Exploration".to_string(),
            logs: LogAvailability::from_present(present),
        }
    }

    fn controller() -> Controller<RecordingSink> {
        let wells = vec![
            well("W-01", 0.0, 0.0, &LogKind::ALL),
            well("W-02", 0.5, 0.5, &[LogKind::Gr]),
            well("W-03", 5.0, 5.0, &LogKind::ALL),
        ];
        let state = SelectionState::new(wells, LogKind::ALL.to_vec());
        Controller::new(state, RecordingSink::default())
    }

    fn draw_unit_square(ctl: &mut Controller<RecordingSink>) {
        ctl.add_vertex(Coord { x: -1.0, y: -1.0 });
        ctl.add_vertex(Coord { x: 1.0, y: -1.0 });
        ctl.add_vertex(Coord { x: 1.0, y: 1.0 });
        ctl.add_vertex(Coord { x: -1.0, y: 1.0 });
        ctl.close_polygon();
    }

    #[test]
    fn test_lifecycle_idle_drawing_closed() {
        let mut ctl = controller();
        assert_eq!(ctl.phase(), DrawPhase::Idle);

        ctl.add_vertex(Coord { x: -1.0, y: -1.0 });
        assert_eq!(ctl.phase(), DrawPhase::Drawing);
        assert_eq!(ctl.pending_vertices().len(), 1);

        ctl.add_vertex(Coord { x: 1.0, y: -1.0 });
        ctl.add_vertex(Coord { x: 1.0, y: 1.0 });
        ctl.add_vertex(Coord { x: -1.0, y: 1.0 });
        assert_eq!(ctl.pending_vertices().len(), 4);

        ctl.close_polygon();
        assert_eq!(ctl.phase(), DrawPhase::Closed);
        assert!(ctl.pending_vertices().is_empty());
        assert_eq!(ctl.state().contained_count(), 2);
    }

    #[test]
    fn test_close_notifies_sink() {
        let mut ctl = controller();
        draw_unit_square(&mut ctl);

        assert_eq!(ctl.sink.renders.len(), 1);
        let scene = &ctl.sink.renders[0];
        assert_eq!(scene.wells.len(), 3);
        assert_eq!(scene.wells[0].class, DisplayClass::InsideComplete);
        assert_eq!(scene.wells[1].class, DisplayClass::InsideIncomplete);
        assert_eq!(scene.wells[2].class, DisplayClass::Outside);
        assert!(scene.summary.contains("Wells in polygon: 2"));
        assert!(scene.summary.contains("W-02 (Exploration): GR"));
    }

    #[test]
    fn test_close_ignored_outside_drawing() {
        let mut ctl = controller();
        ctl.close_polygon();
        assert_eq!(ctl.phase(), DrawPhase::Idle);
        assert!(ctl.sink.renders.is_empty());

        draw_unit_square(&mut ctl);
        ctl.close_polygon();
        assert_eq!(ctl.phase(), DrawPhase::Closed);
        assert_eq!(ctl.sink.renders.len(), 1);
    }

    #[test]
    fn test_degenerate_closure_is_safe() {
        let mut ctl = controller();
        ctl.add_vertex(Coord { x: 0.0, y: 0.0 });
        ctl.add_vertex(Coord { x: 1.0, y: 0.0 });
        ctl.close_polygon();

        assert_eq!(ctl.phase(), DrawPhase::Closed);
        assert_eq!(ctl.state().contained_count(), 0);
        assert_eq!(ctl.state().area_km2(), 0.0);
    }

    #[test]
    fn test_new_polygon_from_closed_overwrites_on_next_close() {
        let mut ctl = controller();
        draw_unit_square(&mut ctl);
        assert_eq!(ctl.state().contained_count(), 2);

        // Nouveau tracé sans Clear : le résultat précédent reste affiché
        ctl.add_vertex(Coord { x: 4.0, y: 4.0 });
        assert_eq!(ctl.phase(), DrawPhase::Drawing);
        assert_eq!(ctl.state().contained_count(), 2);
        assert!(ctl.scene().is_some());

        ctl.add_vertex(Coord { x: 6.0, y: 4.0 });
        ctl.add_vertex(Coord { x: 6.0, y: 6.0 });
        ctl.add_vertex(Coord { x: 4.0, y: 6.0 });
        ctl.close_polygon();

        // Remplacement en bloc à la fermeture
        assert_eq!(ctl.state().contained_count(), 1);
        assert_eq!(ctl.sink.renders.len(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut ctl = controller();
        draw_unit_square(&mut ctl);

        ctl.clear();
        assert_eq!(ctl.phase(), DrawPhase::Idle);
        assert_eq!(ctl.state().contained_count(), 0);
        assert!(ctl.scene().is_none());
        assert_eq!(ctl.sink.clears, 1);

        // Idempotent
        ctl.clear();
        assert_eq!(ctl.phase(), DrawPhase::Idle);
        assert_eq!(ctl.sink.clears, 2);
    }

    #[test]
    fn test_clear_abandons_open_drawing() {
        let mut ctl = controller();
        ctl.add_vertex(Coord { x: 0.0, y: 0.0 });
        ctl.add_vertex(Coord { x: 1.0, y: 0.0 });

        ctl.clear();
        assert_eq!(ctl.phase(), DrawPhase::Idle);
        assert!(ctl.pending_vertices().is_empty());
    }

    #[test]
    fn test_export_guard_without_selection() {
        let ctl = controller();
        let mut persister = RecordingPersister::default();

        let result = ctl.export(&mut persister);
        assert!(matches!(result, Err(SelectError::EmptyExport)));
        assert_eq!(persister.persisted, 0);
    }

    #[test]
    fn test_export_after_close() {
        let mut ctl = controller();
        draw_unit_square(&mut ctl);
        let mut persister = RecordingPersister::default();

        let report = ctl.export(&mut persister).unwrap();
        assert_eq!(persister.persisted, 1);
        assert_eq!(report.summary.n_wells, 2);
        assert_eq!(report.summary.logs_complete, 1);
        assert_eq!(report.summary.logs_incomplete, 1);
    }

    #[test]
    fn test_export_after_clear_is_empty() {
        let mut ctl = controller();
        draw_unit_square(&mut ctl);
        ctl.clear();

        let mut persister = RecordingPersister::default();
        assert!(matches!(
            ctl.export(&mut persister),
            Err(SelectError::EmptyExport)
        ));
    }
}

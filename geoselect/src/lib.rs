//! # geoselect
//!
//! Moteur de sélection spatiale et de classification de puits.
//!
//! L'utilisateur trace un polygone arbitraire sur une carte ; le moteur
//! détermine quels puits tombent dedans, calcule la surface approchée du
//! polygone, classe chaque puits contenu selon la complétude de ses logs
//! et expose le résultat pour le résumé et l'export.
//!
//! ## Features
//!
//! - Test de contenance pair/impair, correct pour les polygones non convexes
//! - Surface par approximation plane locale (formule du lacet)
//! - Machine à états du tracé (idle → drawing → closed → cleared)
//! - Rapport structuré remis à un collaborateur de persistance
//!
//! Le moteur est monothread et piloté par événements : chaque événement
//! d'interaction est traité jusqu'au bout avant le suivant. Le rendu, le
//! chargement des données et l'écriture des artefacts sont des
//! collaborateurs externes derrière les traits [`VisualSink`] et
//! [`ReportSink`].
//!
//! ## Usage
//!
//! ```rust
//! use geo::Coord;
//! use geoselect::{Controller, LogKind, SceneSnapshot, SelectionState, VisualSink};
//!
//! struct NullSink;
//! impl VisualSink for NullSink {
//!     fn render(&mut self, _scene: &SceneSnapshot) {}
//!     fn clear(&mut self) {}
//! }
//!
//! let state = SelectionState::new(vec![], LogKind::ALL.to_vec());
//! let mut controller = Controller::new(state, NullSink);
//!
//! controller.add_vertex(Coord { x: -1.0, y: -1.0 });
//! controller.add_vertex(Coord { x: 1.0, y: -1.0 });
//! controller.add_vertex(Coord { x: 0.0, y: 1.0 });
//! controller.close_polygon();
//!
//! assert!(controller.state().area_km2() > 0.0);
//! ```

pub mod classify;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod report;
pub mod state;
pub mod types;

pub use controller::{Controller, DrawPhase, VisualSink};
pub use error::SelectError;
pub use report::{build_summary, ReportSink, SelectionReport};
pub use state::SelectionState;
pub use types::{
    DisplayClass, LogAvailability, LogKind, SceneSnapshot, SceneWell, Snapshot, Well, WellStatus,
};

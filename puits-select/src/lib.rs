//! # puits-select
//!
//! Analyse de la disponibilité des logs de puits par sélection polygonale.
//!
//! Coquille applicative autour du moteur [`geoselect`] : chargement des
//! puits depuis un fichier délimité, pilotage du contrôleur
//! d'interaction, visualisation console et écriture des artefacts
//! d'export (rapport JSON + scène GeoJSON).
//!
//! ## Usage CLI
//!
//! ```bash
//! # Sélection en un coup : polygone depuis un fichier de sommets
//! puits-select select --records ./wells.csv --polygon ./zone.txt --output ./out
//!
//! # Rejouer une session d'interaction scriptée
//! puits-select session --records ./wells.csv --script ./session.txt --output ./out
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod sink;
pub mod source;

pub use config::Config;
pub use export::FileReportSink;
pub use sink::ConsoleSink;

//! Collaborateur de visualisation console
//!
//! Remplace la carte interactive : affiche après chaque fermeture de
//! polygone le résumé textuel et la répartition des classes, et signale
//! les effacements. Notification pure, sans état.

use std::collections::BTreeMap;

use geoselect::{SceneSnapshot, VisualSink};

/// Sink console : imprime le résumé de chaque scène rendue
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl VisualSink for ConsoleSink {
    fn render(&mut self, scene: &SceneSnapshot) {
        let mut by_class: BTreeMap<&str, usize> = BTreeMap::new();
        for well in &scene.wells {
            *by_class.entry(well.class.as_str()).or_default() += 1;
        }

        println!("\n{}", "=".repeat(60));
        println!("Polygon updated");
        for (class, count) in &by_class {
            println!("  {}: {}", class, count);
        }
        println!();
        println!("{}", scene.summary);
        println!("{}", "=".repeat(60));
    }

    fn clear(&mut self) {
        println!("\n[Clear] polygon and selection reset");
    }
}

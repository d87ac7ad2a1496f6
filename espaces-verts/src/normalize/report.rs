//! Rapport de normalisation avec graceful degradation
//!
//! Collecte les compteurs de la passe de normalisation: lignes lues,
//! lignes retenues par catégorie, cellules dégradées. Affichage console
//! et sauvegarde JSON.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::DatasetError;

/// Statut global de la normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NormalizeStatus {
    /// Toutes les lignes lues ont été retenues
    Complete,
    /// Des lignes ont été écartées (catégorie hors liste) ou des cellules dégradées
    Partial,
    /// Aucune ligne retenue
    Empty,
}

/// Rapport complet d'une passe de normalisation
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    /// Durée de la passe
    pub duration_secs: f64,
    /// Statut global
    pub status: NormalizeStatus,

    // Compteurs globaux
    /// Lignes lues dans l'export brut
    pub rows_read: usize,
    /// Lignes retenues après filtrage par catégorie
    pub rows_kept: usize,
    /// Lignes écartées (catégorie hors de la liste autorisée)
    pub rows_dropped: usize,
    /// Cellules geo_point illisibles (lat/lon laissées vides)
    pub coord_failures: usize,
    /// Valeurs nb_entites réparées (absentes ou ≤ 0 → 1)
    pub entity_repairs: usize,

    /// Lignes retenues par catégorie
    pub by_category: HashMap<String, usize>,
}

impl Default for NormalizeReport {
    fn default() -> Self {
        Self {
            duration_secs: 0.0,
            status: NormalizeStatus::Complete,
            rows_read: 0,
            rows_kept: 0,
            rows_dropped: 0,
            coord_failures: 0,
            entity_repairs: 0,
            by_category: HashMap::new(),
        }
    }
}

impl NormalizeReport {
    /// Enregistre une ligne retenue
    pub fn record_kept(&mut self, categorie: &str) {
        self.rows_kept += 1;
        *self.by_category.entry(categorie.to_string()).or_default() += 1;
    }

    /// Enregistre une ligne écartée
    pub fn record_dropped(&mut self) {
        self.rows_dropped += 1;
    }

    /// Pourcentage de lignes retenues (0 si rien n'a été lu)
    pub fn retention_pct(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            self.rows_kept as f64 * 100.0 / self.rows_read as f64
        }
    }

    /// Définit la durée de la passe
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.rows_kept == 0 {
            NormalizeStatus::Empty
        } else if self.rows_dropped > 0 || self.coord_failures > 0 || self.entity_repairs > 0 {
            NormalizeStatus::Partial
        } else {
            NormalizeStatus::Complete
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("NORMALIZE REPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Rows: {} read, {} kept ({:.1}%), {} dropped",
            self.rows_read,
            self.rows_kept,
            self.retention_pct(),
            self.rows_dropped
        );
        if self.coord_failures > 0 {
            println!("Unparseable geo_point cells: {}", self.coord_failures);
        }
        if self.entity_repairs > 0 {
            println!("Repaired nb_entites values: {}", self.entity_repairs);
        }

        if !self.by_category.is_empty() {
            println!("\n--- BY CATEGORY ---");
            let mut categories: Vec<_> = self.by_category.iter().collect();
            categories.sort_by_key(|(k, _)| k.as_str());
            for (categorie, count) in categories {
                println!("  {}: {}", categorie, count);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), DatasetError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour les logs
    pub fn summary(&self) -> String {
        format!(
            "{} read, {} kept ({:.1}%), {} dropped",
            self.rows_read,
            self.rows_kept,
            self.retention_pct(),
            self.rows_dropped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_default() {
        let report = NormalizeReport::default();
        assert_eq!(report.status, NormalizeStatus::Complete);
        assert_eq!(report.rows_read, 0);
        assert_eq!(report.retention_pct(), 0.0);
    }

    #[test]
    fn test_record_kept_by_category() {
        let mut report = NormalizeReport::default();
        report.record_kept("Parc");
        report.record_kept("Parc");
        report.record_kept("Square");

        assert_eq!(report.rows_kept, 3);
        assert_eq!(report.by_category.get("Parc"), Some(&2));
        assert_eq!(report.by_category.get("Square"), Some(&1));
    }

    #[test]
    fn test_retention_pct() {
        let mut report = NormalizeReport::default();
        report.rows_read = 200;
        report.rows_kept = 150;
        assert!((report.retention_pct() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finalize_statuses() {
        let mut report = NormalizeReport::default();
        report.rows_read = 10;
        report.rows_kept = 10;
        report.finalize();
        assert_eq!(report.status, NormalizeStatus::Complete);

        report.rows_dropped = 2;
        report.finalize();
        assert_eq!(report.status, NormalizeStatus::Partial);

        report.rows_kept = 0;
        report.finalize();
        assert_eq!(report.status, NormalizeStatus::Empty);
    }

    #[test]
    fn test_summary_contains_counts() {
        let mut report = NormalizeReport::default();
        report.rows_read = 100;
        report.rows_kept = 80;
        report.rows_dropped = 20;
        let summary = report.summary();
        assert!(summary.contains("100 read"));
        assert!(summary.contains("80 kept"));
    }
}

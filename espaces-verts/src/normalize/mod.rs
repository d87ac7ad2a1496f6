//! Pipeline de normalisation: export brut → CSV normalisé
//!
//! Transformation pure, une passe, sans état externe. Les étapes s'exécutent
//! dans un ordre imposé, chacune dépendant de la forme produite par la
//! précédente:
//!
//! 1. renommage des colonnes (+ drop-list)
//! 2. découpage du geo_point "lat,lon" (ligne par ligne)
//! 3. booléens tri-état
//! 4. élimination de la sentinelle 9999 (années et surfaces)
//! 5. recast entier (identifiants, années, compteurs)
//! 6. filtrage par catégorie autorisée
//! 7. réparation de nb_entites (absent ou ≤ 0 → 1)
//!
//! Une colonne attendue absente est tolérée: l'étape concernée est sautée.
//! Une cellule illisible dégrade en valeur absente, jamais en erreur.

pub mod rename;
pub mod report;
pub mod values;

use std::time::Instant;

use tracing::{info, warn};

use crate::table::Table;
pub use report::{NormalizeReport, NormalizeStatus};
pub use values::SENTINEL;

/// Catégories conservées après normalisation (liste fermée)
pub const ALLOWED_CATEGORIES: &[&str] = &[
    "Bois",
    "Cimetière",
    "Esplanade",
    "Jardin",
    "Jardin d'immeubles",
    "Jardin partagé",
    "Jardinet",
    "Mail",
    "Parc",
    "Pelouse",
    "Promenade",
    "Square",
];

/// Champs année soumis à la sentinelle 9999
const YEAR_COLUMNS: &[&str] = &["annee_ouverture", "annee_renovation", "annee_changement_nom"];

/// Champs surface soumis à la sentinelle 9999
const SURFACE_COLUMNS: &[&str] = &[
    "surface_totale_reelle_m2",
    "surface_calculee_m2",
    "surface_horticole_m2",
];

/// Champs recastés en entier
const INTEGER_COLUMNS: &[&str] = &[
    "id",
    "code_postal",
    "annee_ouverture",
    "annee_renovation",
    "annee_changement_nom",
    "nb_entites",
];

/// Champs drapeaux normalisés en booléen tri-état
const FLAG_COLUMNS: &[&str] = &["presence_cloture", "ouverture_24h"];

/// Normalise une table brute en place et retourne le rapport de la passe
pub fn normalize(table: &mut Table) -> NormalizeReport {
    let started_at = Instant::now();
    let mut report = NormalizeReport {
        rows_read: table.len(),
        ..Default::default()
    };

    rename::apply(table);
    split_coordinates(table, &mut report);
    normalize_flags(table);
    remove_sentinels(table);
    recast_integers(table);
    filter_categories(table, &mut report);
    repair_entity_counts(table, &mut report);

    report.set_duration(started_at.elapsed());
    report.finalize();

    info!("Normalization done: {}", report.summary());
    report
}

/// Étape 2: découpe geo_point en latitude/longitude, ligne par ligne.
///
/// Une cellule mal formée laisse lat/lon vides pour cette ligne seulement.
fn split_coordinates(table: &mut Table, report: &mut NormalizeReport) {
    let Some(source_idx) = table.column_index("geo_point") else {
        return;
    };

    let lat_idx = table.push_column("latitude");
    let lon_idx = table.push_column("longitude");

    for row in 0..table.len() {
        let raw = table
            .cell_mut(row, source_idx)
            .map(|c| c.clone())
            .unwrap_or_default();
        if raw.trim().is_empty() {
            continue;
        }
        match values::split_geo_point(&raw) {
            Some((lat, lon)) => {
                if let Some(cell) = table.cell_mut(row, lat_idx) {
                    *cell = lat.to_string();
                }
                if let Some(cell) = table.cell_mut(row, lon_idx) {
                    *cell = lon.to_string();
                }
            }
            None => {
                warn!(row, value = raw.as_str(), "Unparseable geo_point, leaving lat/lon empty");
                report.coord_failures += 1;
            }
        }
    }
}

/// Étape 3: booléens tri-état pour les colonnes drapeaux
fn normalize_flags(table: &mut Table) {
    for column in FLAG_COLUMNS {
        table.map_column(column, |raw| {
            values::render_tristate_bool(values::parse_tristate_bool(raw))
        });
    }
}

/// Étape 4: coercion numérique puis élimination de la sentinelle 9999
fn remove_sentinels(table: &mut Table) {
    for column in YEAR_COLUMNS.iter().chain(SURFACE_COLUMNS) {
        table.map_column(column, |raw| {
            values::render_number(values::parse_number_without_sentinel(raw))
        });
    }
}

/// Étape 5: recast entier des identifiants, années et compteurs
fn recast_integers(table: &mut Table) {
    for column in INTEGER_COLUMNS {
        table.map_column(column, values::recast_integer);
    }
}

/// Étape 6: ne conserve que les lignes des catégories autorisées
fn filter_categories(table: &mut Table, report: &mut NormalizeReport) {
    let Some(idx) = table.column_index("categorie") else {
        // Pas de colonne catégorie: rien à filtrer, tout est retenu
        for _ in 0..table.len() {
            report.record_kept("");
        }
        return;
    };

    table.retain_rows(|row| {
        let categorie = row[idx].trim();
        if ALLOWED_CATEGORIES.contains(&categorie) {
            report.record_kept(categorie);
            true
        } else {
            report.record_dropped();
            false
        }
    });

    info!(
        kept = report.rows_kept,
        read = report.rows_read,
        pct = format!("{:.1}", report.retention_pct()).as_str(),
        "Category filter applied"
    );
}

/// Étape 7: nb_entites absent ou ≤ 0 → 1, le reste passe tel quel
fn repair_entity_counts(table: &mut Table, report: &mut NormalizeReport) {
    let mut repairs = 0usize;
    table.map_column("nb_entites", |raw| {
        match values::parse_number(raw) {
            Some(n) if n > 0.0 => format!("{}", n.trunc() as i64),
            _ => {
                repairs += 1;
                "1".to_string()
            }
        }
    });
    report.entity_repairs = repairs;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table() -> Table {
        Table::new(
            vec![
                "Nom de l'espace vert".into(),
                "Catégorie".into(),
                "Surface totale réelle (m²)".into(),
                "Année de l'ouverture".into(),
                "Ouvert 24h".into(),
                "Nombre d'entités".into(),
                "Geo point".into(),
                "URL Plan".into(),
            ],
            vec![
                vec![
                    "Parc de Bercy".into(),
                    "Parc".into(),
                    "140000".into(),
                    "1997".into(),
                    "Non".into(),
                    "2".into(),
                    "48.835, 2.382".into(),
                    "http://plan/1".into(),
                ],
                vec![
                    "Square des Batignolles".into(),
                    "Square".into(),
                    "9999".into(),
                    "9999".into(),
                    "Oui".into(),
                    "0".into(),
                    "pas des coordonnées".into(),
                    "http://plan/2".into(),
                ],
                vec![
                    "Talus de la Petite Ceinture".into(),
                    "Talus".into(),
                    "1200".into(),
                    "1985".into(),
                    "".into(),
                    "".into(),
                    "".into(),
                    "http://plan/3".into(),
                ],
            ],
        )
    }

    #[test]
    fn test_full_pipeline() {
        let mut table = raw_table();
        let report = normalize(&mut table);

        // Catégorie hors liste écartée
        assert_eq!(table.len(), 2);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.rows_dropped, 1);

        // Drop-list appliquée
        assert_eq!(table.column_index("URL Plan"), None);

        // Sentinelle 9999 éliminée
        assert_eq!(table.cell(1, "surface_totale_reelle_m2"), Some(""));
        assert_eq!(table.cell(1, "annee_ouverture"), Some(""));
        assert_eq!(table.cell(0, "surface_totale_reelle_m2"), Some("140000"));

        // Booléens tri-état
        assert_eq!(table.cell(0, "ouverture_24h"), Some("false"));
        assert_eq!(table.cell(1, "ouverture_24h"), Some("true"));

        // nb_entites réparé
        assert_eq!(table.cell(0, "nb_entites"), Some("2"));
        assert_eq!(table.cell(1, "nb_entites"), Some("1"));
        assert_eq!(report.entity_repairs, 1);
    }

    #[test]
    fn test_coordinate_split_is_per_row() {
        let mut table = raw_table();
        let report = normalize(&mut table);

        // Ligne valide découpée
        assert_eq!(table.cell(0, "latitude"), Some("48.835"));
        assert_eq!(table.cell(0, "longitude"), Some("2.382"));

        // Ligne illisible: lat/lon vides pour elle seule, pas d'abandon global
        assert_eq!(table.cell(1, "latitude"), Some(""));
        assert_eq!(table.cell(1, "longitude"), Some(""));
        assert_eq!(report.coord_failures, 1);
    }

    #[test]
    fn test_missing_columns_tolerated() {
        let mut table = Table::new(
            vec!["Catégorie".into()],
            vec![vec!["Parc".into()], vec!["Jardin".into()]],
        );
        let report = normalize(&mut table);
        assert_eq!(table.len(), 2);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.status, NormalizeStatus::Complete);
    }

    #[test]
    fn test_allow_list_cardinality() {
        assert_eq!(ALLOWED_CATEGORIES.len(), 12);
    }

    #[test]
    fn test_no_sentinel_survives() {
        let mut table = Table::new(
            vec![
                "Catégorie".into(),
                "Année de rénovation".into(),
                "Surface calculée (m²)".into(),
                "Surface horticole (m²)".into(),
            ],
            vec![vec![
                "Parc".into(),
                "9999".into(),
                "9999.0".into(),
                "350".into(),
            ]],
        );
        normalize(&mut table);
        for column in ["annee_renovation", "surface_calculee_m2", "surface_horticole_m2"] {
            assert_ne!(table.cell(0, column), Some("9999"), "{column}");
        }
        assert_eq!(table.cell(0, "surface_horticole_m2"), Some("350"));
    }
}

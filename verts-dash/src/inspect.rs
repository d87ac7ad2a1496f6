//! Diagnostics du jeu de données normalisé
//!
//! Équivalent console d'une page "qualité des données": dimensions, valeurs
//! manquantes, répartition par catégorie, plus grandes surfaces, couverture
//! des coordonnées. Lecture seule, tolérant aux colonnes absentes.

use espaces_verts::{Dataset, GreenSpace};

use crate::presentation::decade_bucket;

/// Valeurs manquantes d'une colonne
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCount {
    pub column: &'static str,
    pub missing: usize,
}

/// Synthèse calculée sur le jeu de données chargé
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Nombre d'enregistrements
    pub rows: usize,
    /// Valeurs manquantes par colonne, ordre décroissant
    pub missing: Vec<MissingCount>,
    /// Répartition par catégorie, ordre décroissant de fréquence
    pub by_category: Vec<(String, usize)>,
    /// Ouvertures par décennie, ordre chronologique (base des graphiques agrégés)
    pub by_decade: Vec<(i32, usize)>,
    /// Enregistrements sans latitude/longitude
    pub without_coords: usize,
}

/// Calcule la synthèse du jeu de données
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let records = dataset.records();

    let mut missing = vec![
        count_missing("nom", records, |s| s.nom.is_none()),
        count_missing("typologie", records, |s| s.typologie.is_none()),
        count_missing("categorie", records, |s| s.categorie.is_none()),
        count_missing("code_postal", records, |s| s.code_postal.is_none()),
        count_missing("surface_totale_reelle_m2", records, |s| {
            s.surface_totale_reelle_m2.is_none()
        }),
        count_missing("surface_calculee_m2", records, |s| {
            s.surface_calculee_m2.is_none()
        }),
        count_missing("surface_horticole_m2", records, |s| {
            s.surface_horticole_m2.is_none()
        }),
        count_missing("presence_cloture", records, |s| s.presence_cloture.is_none()),
        count_missing("ouverture_24h", records, |s| s.ouverture_24h.is_none()),
        count_missing("annee_ouverture", records, |s| s.annee_ouverture.is_none()),
        count_missing("geo_shape", records, |s| s.geo_shape.is_none()),
        count_missing("latitude", records, |s| s.latitude.is_none()),
        count_missing("longitude", records, |s| s.longitude.is_none()),
    ];
    missing.sort_by(|a, b| b.missing.cmp(&a.missing).then(a.column.cmp(b.column)));

    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for space in records {
        if let Some(categorie) = &space.categorie {
            *counts.entry(categorie.clone()).or_default() += 1;
        }
    }
    let mut by_category: Vec<(String, usize)> = counts.into_iter().collect();
    by_category.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut decades: std::collections::HashMap<i32, usize> = std::collections::HashMap::new();
    for space in records {
        if let Some(year) = space.annee_ouverture {
            *decades.entry(decade_bucket(year)).or_default() += 1;
        }
    }
    let mut by_decade: Vec<(i32, usize)> = decades.into_iter().collect();
    by_decade.sort_by_key(|(decade, _)| *decade);

    let without_coords = records.iter().filter(|s| !s.has_coordinates()).count();

    DatasetSummary {
        rows: records.len(),
        missing,
        by_category,
        by_decade,
        without_coords,
    }
}

fn count_missing<F>(column: &'static str, records: &[GreenSpace], is_missing: F) -> MissingCount
where
    F: Fn(&GreenSpace) -> bool,
{
    MissingCount {
        column,
        missing: records.iter().filter(|s| is_missing(s)).count(),
    }
}

/// Les `n` plus grands enregistrements pour une surface donnée
pub fn top_by_surface<'a, F>(
    records: &'a [GreenSpace],
    surface: F,
    n: usize,
) -> Vec<(&'a GreenSpace, f64)>
where
    F: Fn(&GreenSpace) -> Option<f64>,
{
    let mut with_surface: Vec<(&GreenSpace, f64)> = records
        .iter()
        .filter_map(|s| surface(s).map(|v| (s, v)))
        .collect();
    // Tri décroissant stable; les NaN sont déjà exclus par la coercion
    with_surface.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    with_surface.truncate(n);
    with_surface
}

/// Affiche la synthèse sur la console
pub fn display(summary: &DatasetSummary, dataset: &Dataset) {
    println!("\n{}", "=".repeat(60));
    println!("DATASET SUMMARY");
    println!("{}", "=".repeat(60));

    println!("\nRows: {}", summary.rows);

    println!("\n--- MISSING VALUES ---");
    for entry in &summary.missing {
        println!("  {}: {}", entry.column, entry.missing);
    }

    println!("\n--- BY CATEGORY ---");
    for (categorie, count) in &summary.by_category {
        println!("  {}: {}", categorie, count);
    }

    if !summary.by_decade.is_empty() {
        println!("\n--- OPENINGS BY DECADE ---");
        for (decade, count) in &summary.by_decade {
            println!("  {}: {}", decade, count);
        }
    }

    println!("\n--- TOP 10 BY SURFACE (totale réelle) ---");
    for (space, surface) in top_by_surface(dataset.records(), |s| s.surface_totale_reelle_m2, 10) {
        println!(
            "  {} ({}): {} m²",
            space.nom.as_deref().unwrap_or("?"),
            space.categorie.as_deref().unwrap_or("?"),
            surface as i64
        );
    }

    println!("\n--- COORDINATES ---");
    println!("  rows without coordinates: {}", summary.without_coords);

    println!("\n{}", "=".repeat(60));
}

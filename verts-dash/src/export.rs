//! Exports de la vue filtrée: CSV et GeoJSON
//!
//! Instantanés dérivés, en lecture seule, de la sélection courante. Le CSV
//! reprend le délimiteur `;` du jeu de données; le GeoJSON est écrit en
//! streaming, feature par feature.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use espaces_verts::geometry::parse_geo_shape;
use espaces_verts::GreenSpace;

use crate::presentation::{arrondissement_label, join_address};

/// Colonnes de l'export CSV, mélange de champs bruts et dérivés
pub const EXPORT_COLUMNS: &[&str] = &[
    "nom",
    "categorie",
    "adresse",
    "arrondissement",
    "code_postal",
    "surface_m2",
    "annee_ouverture",
    "ouverture_24h",
    "presence_cloture",
];

/// Écrit la sélection en CSV délimité par `;` avec la liste de colonnes fixe.
///
/// Relire l'export avec le même délimiteur reproduit le nombre de lignes et
/// les valeurs non nulles de chaque colonne exportée.
pub fn write_csv(selection: &[&GreenSpace], output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;

    writer.write_record(EXPORT_COLUMNS)?;

    for space in selection {
        writer.write_record(&[
            space.nom.clone().unwrap_or_default(),
            space.categorie.clone().unwrap_or_default(),
            join_address(space),
            arrondissement_label(space),
            space.code_postal.clone().unwrap_or_default(),
            space
                .merged_surface_m2()
                .map(|s| format!("{}", s.round() as i64))
                .unwrap_or_default(),
            space
                .annee_ouverture
                .map(|y| y.to_string())
                .unwrap_or_default(),
            render_flag(space.ouverture_24h),
            render_flag(space.presence_cloture),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn render_flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "true".to_string(),
        Some(false) => "false".to_string(),
        None => String::new(),
    }
}

/// Exporte les géométries de la sélection en FeatureCollection GeoJSON.
///
/// Une cellule geo_shape mal formée fait sauter la feature avec un warning,
/// jamais échouer l'export. Retourne le nombre de features écrites.
pub fn write_geojson(selection: &[&GreenSpace], output_path: &Path) -> Result<usize> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    write!(writer, r#"{{"type":"FeatureCollection","features":["#)?;

    let mut written = 0usize;
    for space in selection {
        let Some(raw_shape) = space.geo_shape.as_deref() else {
            continue;
        };
        let Some(geometry) = parse_geo_shape(raw_shape) else {
            warn!(id = ?space.id, "Skipping feature with malformed geo_shape");
            continue;
        };

        if written > 0 {
            write!(writer, ",")?;
        }
        write_feature(&mut writer, space, &geometry)?;
        written += 1;
    }

    write!(writer, "]}}")?;
    writer.flush()?;

    Ok(written)
}

/// Écrit une feature GeoJSON (géométrie + propriétés d'affichage)
fn write_feature<W: Write>(
    writer: &mut W,
    space: &GreenSpace,
    geometry: &geojson::Geometry,
) -> Result<()> {
    write!(writer, r#"{{"type":"Feature","geometry":"#)?;
    serde_json::to_writer(&mut *writer, geometry)?;

    write!(
        writer,
        r#","properties":{{"nom":"{}","categorie":"{}","arrondissement":"{}"}}}}"#,
        escape_json(space.nom.as_deref().unwrap_or("")),
        escape_json(space.categorie.as_deref().unwrap_or("")),
        escape_json(&arrondissement_label(space)),
    )?;

    Ok(())
}

/// Échappe une chaîne pour JSON
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

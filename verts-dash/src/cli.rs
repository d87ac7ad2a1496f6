//! Définition et implémentation des commandes CLI
//!
//! Quatre commandes:
//! - `normalize`: export brut → CSV normalisé (+ rapport)
//! - `inspect`: diagnostics du CSV normalisé
//! - `export`: vue filtrée → CSV (et GeoJSON optionnel)
//! - `history`: vue historique d'une année → GeoJSON + viewport

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use espaces_verts::{normalize, Dataset, Table};

use crate::export;
use crate::filter::{kpis, FilterSet, TriStateFilter};
use crate::history;
use crate::inspect;
use crate::presentation::format_surface;

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize the raw open data export into the dashboard CSV
    Normalize {
        /// Path to the raw semicolon-delimited export
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the normalized CSV to write
        #[arg(short, long)]
        output: PathBuf,

        /// Optional path for the JSON normalization report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print diagnostics about a normalized dataset
    Inspect {
        /// Path to the normalized CSV
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Export the filtered view as CSV (and optionally GeoJSON)
    Export {
        /// Path to the normalized CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the CSV export to write
        #[arg(short, long)]
        output: PathBuf,

        /// Categories to keep (repeatable); none = no restriction
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Arrondissement labels to keep (repeatable, e.g. "1er", "12e", "Bagneux")
        #[arg(long = "arrondissement")]
        arrondissements: Vec<String>,

        /// Minimum surface in m² (unknown surfaces always pass)
        #[arg(long)]
        min_surface: Option<f64>,

        /// Keep only spaces open 24h (yes) or not (no); omit for either
        #[arg(long)]
        open_24h: Option<FlagChoice>,

        /// Keep only enclosed spaces (yes) or not (no); omit for either
        #[arg(long)]
        enclosure: Option<FlagChoice>,

        /// Keep only geolocated records
        #[arg(long)]
        with_coords: bool,

        /// Also write the selection geometries as GeoJSON next to the CSV
        #[arg(long)]
        geojson: Option<PathBuf>,
    },

    /// Compute the historical view for a given year
    History {
        /// Path to the normalized CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Selected year of the time slider
        #[arg(short, long)]
        year: i32,

        /// Path of the GeoJSON FeatureCollection to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Choix oui/non d'un drapeau tri-état sur la ligne de commande
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FlagChoice {
    Yes,
    No,
}

impl From<Option<FlagChoice>> for TriStateFilter {
    fn from(choice: Option<FlagChoice>) -> Self {
        match choice {
            None => TriStateFilter::Any,
            Some(FlagChoice::Yes) => TriStateFilter::Yes,
            Some(FlagChoice::No) => TriStateFilter::No,
        }
    }
}

/// Exécute la commande normalize
pub fn cmd_normalize(input: &Path, output: &Path, report_path: Option<&Path>) -> Result<()> {
    info!(input = %input.display(), output = %output.display(), "Starting normalization");

    let mut table = Table::read_csv(input)
        .with_context(|| format!("Failed to read raw export: {}", input.display()))?;

    let report = normalize::normalize(&mut table);

    table
        .write_csv(output)
        .with_context(|| format!("Failed to write normalized CSV: {}", output.display()))?;

    report.display();

    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    println!(
        "Normalized dataset written to {} ({} rows)",
        output.display(),
        table.len()
    );

    Ok(())
}

/// Exécute la commande inspect
pub fn cmd_inspect(input: &Path) -> Result<()> {
    let dataset = load_dataset(input)?;
    let summary = inspect::summarize(&dataset);
    inspect::display(&summary, &dataset);
    Ok(())
}

/// Exécute la commande export
#[allow(clippy::too_many_arguments)]
pub fn cmd_export(
    input: &Path,
    output: &Path,
    categories: Vec<String>,
    arrondissements: Vec<String>,
    min_surface: Option<f64>,
    open_24h: Option<FlagChoice>,
    enclosure: Option<FlagChoice>,
    with_coords: bool,
    geojson: Option<&Path>,
) -> Result<()> {
    let dataset = load_dataset(input)?;

    let filter = FilterSet {
        categories,
        arrondissements,
        min_surface,
        open_24h: open_24h.into(),
        enclosure: enclosure.into(),
        require_coords: with_coords,
    };

    let selection = filter.apply(dataset.records());

    if selection.is_empty() {
        // État vide informatif, pas une erreur
        println!("No record matches the current filters.");
        return Ok(());
    }

    let stats = kpis(&selection);
    println!("=== Filtered view ===");
    println!("Records: {}", stats.count);
    println!("Categories: {}", stats.categories);
    println!("Total known surface (m²): {}", stats.total_surface);

    export::write_csv(&selection, output)?;
    println!("CSV written to {}", output.display());

    if let Some(geojson_path) = geojson {
        let written = export::write_geojson(&selection, geojson_path)?;
        println!(
            "GeoJSON written to {} ({} features)",
            geojson_path.display(),
            written
        );
    }

    Ok(())
}

/// Exécute la commande history
pub fn cmd_history(input: &Path, year: i32, output: &Path) -> Result<()> {
    let dataset = load_dataset(input)?;

    let selection = history::spaces_open_by(dataset.records(), year);
    let viewport = history::viewport(&selection, year);
    let image = history::era_image(year);

    println!("=== Year {} ===", year);
    println!("Spaces already open: {}", selection.len());
    println!("Era illustration: {}", image);
    println!(
        "Viewport: center ({:.4}, {:.4}), zoom {}",
        viewport.center.0, viewport.center.1, viewport.zoom
    );

    let known_surface: Option<f64> = selection
        .iter()
        .filter_map(|s| s.merged_surface_m2())
        .reduce(|a, b| a + b);
    println!(
        "Total known surface (m²): {}",
        if known_surface.is_some() {
            format_surface(known_surface)
        } else {
            "—".to_string()
        }
    );

    let written = export::write_geojson(&selection, output)?;
    println!(
        "GeoJSON written to {} ({} features)",
        output.display(),
        written
    );

    Ok(())
}

/// Charge le CSV normalisé; fichier absent = erreur fatale avec contexte
fn load_dataset(input: &Path) -> Result<Dataset> {
    let dataset = Dataset::load(input)
        .with_context(|| format!("Failed to load dataset: {}", input.display()))?;
    info!(rows = dataset.len(), "Dataset loaded");
    Ok(dataset)
}

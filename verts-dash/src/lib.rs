//! # verts-dash
//!
//! Moteur du tableau de bord des espaces verts parisiens: filtrage,
//! dérivations de présentation, vue historique, exports CSV/GeoJSON.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Export brut → CSV normalisé
//! verts-dash normalize --input espaces_verts.csv --output espaces_verts_normalized.csv
//!
//! # Vue filtrée → CSV
//! verts-dash export --input espaces_verts_normalized.csv --output parcs.csv \
//!     --category Parc --min-surface 10000
//!
//! # Vue historique de 1900 → GeoJSON
//! verts-dash history --input espaces_verts_normalized.csv --year 1900 --output 1900.geojson
//! ```

pub mod export;
pub mod filter;
pub mod history;
pub mod inspect;
pub mod presentation;

pub use filter::{FilterSet, TriStateFilter};
pub use history::Viewport;

//! # espaces-verts
//!
//! Normalisation du jeu de données open data des espaces verts parisiens.
//!
//! ## Features
//!
//! - Lecture/écriture des CSV délimités par `;` (UTF-8)
//! - Pipeline de normalisation: renommage, sentinelle 9999, booléens
//!   tri-état, découpage lat/lon, filtrage par catégorie
//! - Enregistrements typés tolérants aux cellules illisibles
//! - Décodage GeoJSON du champ geo_shape
//!
//! ## Usage
//!
//! ```rust,ignore
//! use espaces_verts::{normalize, Table};
//! use std::path::Path;
//!
//! let mut table = Table::read_csv(Path::new("espaces_verts.csv"))?;
//! let report = normalize::normalize(&mut table);
//! table.write_csv(Path::new("espaces_verts_normalized.csv"))?;
//! println!("{}", report.summary());
//! ```

pub mod error;
pub mod geometry;
pub mod normalize;
pub mod record;
pub mod table;

pub use error::DatasetError;
pub use normalize::{normalize, NormalizeReport, ALLOWED_CATEGORIES, SENTINEL};
pub use record::{Dataset, GreenSpace};
pub use table::Table;

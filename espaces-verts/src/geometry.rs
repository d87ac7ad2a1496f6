//! Décodage des géométries GeoJSON du champ geo_shape
//!
//! Chaque cellule geo_shape contient, quand elle est présente, un objet
//! géométrie GeoJSON encodé en JSON. Un JSON mal formé vaut géométrie
//! absente pour la ligne concernée, jamais une erreur fatale.

use geojson::Geometry;
use tracing::warn;

/// Décode une cellule geo_shape; mal formée ou vide → `None`
pub fn parse_geo_shape(raw: &str) -> Option<Geometry> {
    let v = raw.trim();
    if v.is_empty() {
        return None;
    }
    match serde_json::from_str::<Geometry>(v) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            warn!(error = %e, "Malformed geo_shape, treating as absent");
            None
        }
    }
}

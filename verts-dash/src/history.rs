//! Vue historique à curseur temporel
//!
//! Pour une année Y choisie: sous-ensemble des espaces déjà ouverts (année
//! d'ouverture connue et ≤ Y), illustration d'époque, et viewport de carte.
//! Vue en lecture seule, recalculée entièrement à chaque déplacement du
//! curseur.

use espaces_verts::GreenSpace;

/// Borne supérieure d'époque → illustration.
///
/// Table ordonnée, plages contiguës et exhaustives du minimum au maximum du
/// jeu de données; évaluation linéaire, première borne ≥ Y gagnante.
pub const ERA_IMAGES: &[(i32, &str)] = &[
    (1799, "img/paris_ancien_regime.jpg"),
    (1860, "img/paris_haussmann.jpg"),
    (1914, "img/paris_belle_epoque.jpg"),
    (1945, "img/paris_entre_deux_guerres.jpg"),
    (1980, "img/paris_trente_glorieuses.jpg"),
    (2030, "img/paris_contemporain.jpg"),
];

/// Avant cette année, le viewport se recentre sur le point le plus ancien
/// s'il est unique (les premières décennies ne comptent qu'une poignée
/// d'espaces, souvent excentrés)
pub const EARLY_VIEW_CUTOFF: i32 = 1800;

/// Centre de repli quand la sélection ne porte aucun point (Paris)
pub const CITY_CENTER: (f64, f64) = (48.8566, 2.3522);

/// Zoom de repli sur le centre-ville
pub const CITY_ZOOM: u8 = 12;

/// Zoom rapproché pour un point unique
pub const CLOSE_ZOOM: u8 = 15;

/// Viewport de carte: centre (lat, lon) et niveau de zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: (f64, f64),
    pub zoom: u8,
}

/// Sous-ensemble historique: espaces dont l'année d'ouverture est connue
/// et ≤ `year`. L'année inconnue exclut, l'ordre d'entrée est préservé.
pub fn spaces_open_by<'a>(records: &'a [GreenSpace], year: i32) -> Vec<&'a GreenSpace> {
    records
        .iter()
        .filter(|s| matches!(s.annee_ouverture, Some(y) if y <= year))
        .collect()
}

/// Illustration d'époque pour une année: première plage dont la borne
/// supérieure est ≥ Y. Années au-delà de la table: dernière illustration.
pub fn era_image(year: i32) -> &'static str {
    ERA_IMAGES
        .iter()
        .find(|(upper, _)| *upper >= year)
        .map(|(_, image)| *image)
        .unwrap_or(ERA_IMAGES[ERA_IMAGES.len() - 1].1)
}

/// Calcule le viewport pour le sous-ensemble historique d'une année.
///
/// 0 point → centre-ville fixe; 1 point → zoom rapproché dessus;
/// n points → centre de la bounding box, zoom selon l'étendue. Exception:
/// avant [`EARLY_VIEW_CUTOFF`], si un seul enregistrement porte l'année
/// d'ouverture la plus ancienne de la sélection, on se recentre dessus.
pub fn viewport(selection: &[&GreenSpace], year: i32) -> Viewport {
    let points: Vec<(f64, f64)> = selection
        .iter()
        .filter_map(|s| Some((s.latitude?, s.longitude?)))
        .collect();

    if year < EARLY_VIEW_CUTOFF {
        if let Some(space) = single_earliest(selection) {
            if let (Some(lat), Some(lon)) = (space.latitude, space.longitude) {
                return Viewport {
                    center: (lat, lon),
                    zoom: CLOSE_ZOOM,
                };
            }
        }
    }

    match points.as_slice() {
        [] => Viewport {
            center: CITY_CENTER,
            zoom: CITY_ZOOM,
        },
        [point] => Viewport {
            center: *point,
            zoom: CLOSE_ZOOM,
        },
        points => {
            let rect = bounding_rect(points);
            let span = (rect.width()).max(rect.height());
            Viewport {
                center: (rect.center().y, rect.center().x),
                zoom: zoom_for_span(span),
            }
        }
    }
}

/// L'enregistrement portant la plus petite année d'ouverture, s'il est seul
fn single_earliest<'a>(selection: &[&'a GreenSpace]) -> Option<&'a GreenSpace> {
    let earliest_year = selection.iter().filter_map(|s| s.annee_ouverture).min()?;
    let mut earliest = selection
        .iter()
        .filter(|s| s.annee_ouverture == Some(earliest_year));
    let first = *earliest.next()?;
    if earliest.next().is_none() {
        Some(first)
    } else {
        None
    }
}

/// Bounding box des points (x = lon, y = lat)
fn bounding_rect(points: &[(f64, f64)]) -> geo::Rect {
    let mut min = geo::Coord {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };
    let mut max = geo::Coord {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    };
    for &(lat, lon) in points {
        min.x = min.x.min(lon);
        min.y = min.y.min(lat);
        max.x = max.x.max(lon);
        max.y = max.y.max(lat);
    }
    geo::Rect::new(min, max)
}

/// Niveau de zoom selon l'étendue de la bounding box (en degrés).
///
/// Paliers fixes, du plus large au plus serré.
fn zoom_for_span(span: f64) -> u8 {
    match span {
        s if s > 0.2 => 11,
        s if s > 0.1 => 12,
        s if s > 0.05 => 13,
        _ => 14,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(year: Option<i32>, lat: f64, lon: f64) -> GreenSpace {
        GreenSpace {
            annee_ouverture: year,
            latitude: Some(lat),
            longitude: Some(lon),
            ..Default::default()
        }
    }

    #[test]
    fn test_spaces_open_by_bounds() {
        let records = vec![
            space(Some(1635), 48.843, 2.356),
            space(Some(1862), 48.888, 2.316),
            space(Some(1997), 48.835, 2.382),
            space(None, 48.85, 2.35),
        ];

        let selection = spaces_open_by(&records, 1900);
        assert_eq!(selection.len(), 2);
        assert!(selection.iter().all(|s| s.annee_ouverture.unwrap() <= 1900));

        // Borne incluse
        assert_eq!(spaces_open_by(&records, 1862).len(), 2);
        // Année inconnue toujours exclue
        assert_eq!(spaces_open_by(&records, 3000).len(), 3);
        assert_eq!(spaces_open_by(&records, 1600).len(), 0);
    }

    #[test]
    fn test_era_image_lookup() {
        assert_eq!(era_image(1650), "img/paris_ancien_regime.jpg");
        assert_eq!(era_image(1799), "img/paris_ancien_regime.jpg");
        assert_eq!(era_image(1800), "img/paris_haussmann.jpg");
        assert_eq!(era_image(1900), "img/paris_belle_epoque.jpg");
        assert_eq!(era_image(2024), "img/paris_contemporain.jpg");
        // Au-delà de la table: dernière illustration
        assert_eq!(era_image(2500), "img/paris_contemporain.jpg");
    }

    #[test]
    fn test_era_table_contiguous() {
        let mut previous = i32::MIN;
        for (upper, _) in ERA_IMAGES {
            assert!(*upper > previous, "era bounds must be increasing");
            previous = *upper;
        }
    }

    #[test]
    fn test_viewport_empty_selection() {
        let viewport = viewport(&[], 1900);
        assert_eq!(viewport.center, CITY_CENTER);
        assert_eq!(viewport.zoom, CITY_ZOOM);
    }

    #[test]
    fn test_viewport_single_point() {
        let records = vec![space(Some(1850), 48.843, 2.356)];
        let selection: Vec<&GreenSpace> = records.iter().collect();
        let viewport = viewport(&selection, 1900);
        assert_eq!(viewport.center, (48.843, 2.356));
        assert_eq!(viewport.zoom, CLOSE_ZOOM);
    }

    #[test]
    fn test_viewport_bounding_box() {
        let records = vec![
            space(Some(1850), 48.80, 2.30),
            space(Some(1860), 48.90, 2.40),
        ];
        let selection: Vec<&GreenSpace> = records.iter().collect();
        let viewport = viewport(&selection, 1900);
        assert!((viewport.center.0 - 48.85).abs() < 1e-9);
        assert!((viewport.center.1 - 2.35).abs() < 1e-9);
        // Étendue 0.1 (lat et lon): palier 12
        assert_eq!(viewport.zoom, 12);
    }

    #[test]
    fn test_zoom_breakpoints() {
        assert_eq!(zoom_for_span(0.3), 11);
        assert_eq!(zoom_for_span(0.15), 12);
        assert_eq!(zoom_for_span(0.07), 13);
        assert_eq!(zoom_for_span(0.01), 14);
    }

    #[test]
    fn test_early_era_recenters_on_single_earliest() {
        let records = vec![
            space(Some(1635), 48.843, 2.356),
            space(Some(1770), 48.80, 2.30),
        ];
        let selection: Vec<&GreenSpace> = records.iter().collect();
        let viewport = viewport(&selection, 1780);
        assert_eq!(viewport.center, (48.843, 2.356));
        assert_eq!(viewport.zoom, CLOSE_ZOOM);
    }

    #[test]
    fn test_early_era_exception_needs_unique_earliest() {
        // Deux enregistrements à l'année minimale: règle générale
        let records = vec![
            space(Some(1635), 48.80, 2.30),
            space(Some(1635), 48.90, 2.40),
        ];
        let selection: Vec<&GreenSpace> = records.iter().collect();
        let viewport = viewport(&selection, 1700);
        assert!((viewport.center.0 - 48.85).abs() < 1e-9);
        assert_ne!(viewport.zoom, CLOSE_ZOOM);
    }
}

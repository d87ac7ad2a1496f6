//! Coercion des valeurs cellule par cellule
//!
//! Toutes les fonctions dégradent en `None` sur entrée illisible: une cellule
//! mal formée ne doit jamais interrompre la normalisation.

/// Valeur sentinelle du producteur de données signifiant "inconnu"
///
/// Convention du jeu de données source, vérifiée après coercion numérique.
pub const SENTINEL: f64 = 9999.0;

/// Coerce une cellule en nombre; vide ou illisible → `None`
pub fn parse_number(raw: &str) -> Option<f64> {
    let v = raw.trim();
    if v.is_empty() {
        return None;
    }
    // Les exports tableur utilisent parfois la virgule décimale
    let normalized = v.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce en nombre puis élimine la sentinelle 9999
pub fn parse_number_without_sentinel(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|&n| n != SENTINEL)
}

/// Booléen tri-état depuis le texte libre du producteur.
///
/// Insensible à la casse; tout texte non reconnu (y compris vide) → `None`,
/// jamais une erreur.
pub fn parse_tristate_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "oui" | "o" | "yes" | "y" | "true" => Some(true),
        "non" | "n" | "no" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Découpe une cellule "lat,lon" en deux flottants.
///
/// Le découpage est évalué ligne par ligne: une cellule mal formée ne
/// concerne qu'elle-même. La virgule décimale n'est pas ambiguë ici, le
/// producteur sépare toujours lat et lon par une virgule et utilise le point
/// décimal dans ce champ.
pub fn split_geo_point(raw: &str) -> Option<(f64, f64)> {
    let (lat, lon) = raw.trim().split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    if lat.is_finite() && lon.is_finite() {
        Some((lat, lon))
    } else {
        None
    }
}

/// Rend une cellule numérique sous forme entière ("12.0" → "12").
///
/// Cellule vide ou illisible → cellule vide (valeur absente).
pub fn recast_integer(raw: &str) -> String {
    match parse_number(raw) {
        Some(n) => format!("{}", n.trunc() as i64),
        None => String::new(),
    }
}

/// Formate un flottant optionnel pour l'écriture CSV (absent → cellule vide)
pub fn render_number(value: Option<f64>) -> String {
    match value {
        // Entier exact rendu sans partie décimale
        Some(n) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(n) => n.to_string(),
        None => String::new(),
    }
}

/// Formate un booléen tri-état pour l'écriture CSV
pub fn render_tristate_bool(value: Option<bool>) -> String {
    match value {
        Some(true) => "true".to_string(),
        Some(false) => "false".to_string(),
        None => String::new(),
    }
}

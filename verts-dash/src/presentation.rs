//! Dérivations de présentation
//!
//! Champs calculés pour l'affichage et l'export uniquement, jamais
//! réinjectés dans le filtrage qui les précède. Chaque dérivation est une
//! fonction pure de l'enregistrement, les chaînes de repli sont des listes
//! ordonnées évaluées de haut en bas, premier cas gagnant.

use espaces_verts::GreenSpace;

/// Préfixe des codes postaux parisiens intra-muros
const PARIS_PREFIX: &str = "75";

/// Communes hors Paris propre, par code postal exact.
///
/// Propriétés de la Ville de Paris situées en banlieue (cimetières
/// extra-muros pour l'essentiel). Table fermée, consultation par clé exacte.
pub const COMMUNES_HORS_PARIS: &[(&str, &str)] = &[
    ("92220", "Bagneux"),
    ("92240", "Malakoff"),
    ("93400", "Saint-Ouen"),
    ("93500", "Pantin"),
    ("94200", "Ivry-sur-Seine"),
    ("94320", "Thiais"),
];

/// Couleur d'affichage par catégorie (clé exacte, défaut neutre)
pub const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Bois", "#1b5e20"),
    ("Cimetière", "#757575"),
    ("Esplanade", "#8d6e63"),
    ("Jardin", "#43a047"),
    ("Jardin d'immeubles", "#7cb342"),
    ("Jardin partagé", "#9ccc65"),
    ("Jardinet", "#aed581"),
    ("Mail", "#a1887f"),
    ("Parc", "#2e7d32"),
    ("Pelouse", "#c0ca33"),
    ("Promenade", "#00897b"),
    ("Square", "#66bb6a"),
];

/// Couleur pour une catégorie inconnue
pub const DEFAULT_COLOR: &str = "#9e9e9e";

/// Libellé d'arrondissement ou de commune pour un enregistrement.
///
/// Ordre de précédence, premier cas gagnant:
/// 1. code postal dans la table des communes hors Paris
/// 2. code postal "75…" dont les deux derniers chiffres donnent 1..=20
/// 3. champ commune libre non vide
/// 4. code postal brut
pub fn arrondissement_label(space: &GreenSpace) -> String {
    if let Some(code) = space.code_postal.as_deref() {
        if let Some((_, commune)) = COMMUNES_HORS_PARIS.iter().find(|(cp, _)| *cp == code) {
            return commune.to_string();
        }
        if let Some(label) = paris_arrondissement(code) {
            return label;
        }
    }
    if let Some(commune) = space.commune.as_deref().filter(|c| !c.trim().is_empty()) {
        return commune.trim().to_string();
    }
    space.code_postal.clone().unwrap_or_default()
}

/// "1er" pour le 1ᵉʳ arrondissement, "{n}e" pour 2..=20, sinon `None`
fn paris_arrondissement(code_postal: &str) -> Option<String> {
    let code = code_postal.trim();
    if !code.starts_with(PARIS_PREFIX) || code.len() != 5 {
        return None;
    }
    let n: u32 = code.get(3..5)?.parse().ok()?;
    match n {
        1 => Some("1er".to_string()),
        2..=20 => Some(format!("{}e", n)),
        _ => None,
    }
}

/// Formate une surface en entier avec séparateur de milliers espace.
///
/// 12000 → "12 000"; absente → chaîne vide ("inconnu" n'est pas "zéro").
pub fn format_surface(surface: Option<f64>) -> String {
    let Some(surface) = surface else {
        return String::new();
    };
    let digits = format!("{}", surface.round() as i64);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    format!("{}{}", sign, grouped)
}

/// Concatène les fragments d'adresse non vides, dans l'ordre du schéma.
///
/// Les fragments "nan" hérités d'exports tableur sont ignorés; les espaces
/// internes sont réduits à un seul.
pub fn join_address(space: &GreenSpace) -> String {
    space
        .address_fragments()
        .iter()
        .flatten()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty() && !fragment.eq_ignore_ascii_case("nan"))
        .map(|fragment| fragment.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Décennie d'une année: multiple de dix inférieur (1987 → 1980)
pub fn decade_bucket(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Couleur d'affichage pour une catégorie
pub fn category_color(categorie: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(key, _)| *key == categorie)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

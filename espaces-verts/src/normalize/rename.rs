//! Renommage des colonnes de l'export brut vers le schéma interne
//!
//! Les en-têtes de l'export open data sont des libellés français lisibles;
//! le tableau de bord attend des identifiants snake_case stables. Les
//! colonnes non mappées passent telles quelles, celles de la drop-list sont
//! supprimées quoi qu'il arrive.

use crate::table::Table;

/// Libellé brut → identifiant interne
pub const RENAME_MAP: &[(&str, &str)] = &[
    ("Identifiant espace vert", "id"),
    ("Nom de l'espace vert", "nom"),
    ("Typologie d'espace vert", "typologie"),
    ("Catégorie", "categorie"),
    ("Adresse - Numéro", "adresse_numero"),
    ("Adresse - Complément", "adresse_complement"),
    ("Adresse - Type voie", "adresse_type_voie"),
    ("Adresse - Libellé voie", "adresse_libelle_voie"),
    ("Code postal", "code_postal"),
    ("Commune", "commune"),
    ("Surface totale réelle (m²)", "surface_totale_reelle_m2"),
    ("Surface calculée (m²)", "surface_calculee_m2"),
    ("Surface horticole (m²)", "surface_horticole_m2"),
    ("Présence clôture", "presence_cloture"),
    ("Ouvert 24h", "ouverture_24h"),
    ("Périmètre (m)", "perimetre_m"),
    ("Année de l'ouverture", "annee_ouverture"),
    ("Année de rénovation", "annee_renovation"),
    ("Année du changement de nom", "annee_changement_nom"),
    ("Nombre d'entités", "nb_entites"),
    ("Geo Shape", "geo_shape"),
    ("Geo point", "geo_point"),
];

/// Colonnes supprimées de l'export, mappées ou non
pub const DROP_COLUMNS: &[&str] = &[
    "URL Plan",
    "Compétence",
    "Ancien nom de l'espace vert",
    "N° Voirie Pair",
    "N° Voirie Impair",
];

/// Applique la drop-list puis le renommage
pub fn apply(table: &mut Table) {
    for column in DROP_COLUMNS {
        table.drop_column(column);
    }
    for (from, to) in RENAME_MAP {
        table.rename_column(from, to);
    }
}

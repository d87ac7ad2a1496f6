//! Moteur de filtrage du tableau de bord
//!
//! Conjonction (ET logique) de prédicats indépendants, chacun optionnel.
//! Le filtrage emprunte le jeu de données, préserve l'ordre d'entrée et
//! est idempotent sur données inchangées.
//!
//! Sémantique de la sélection vide: une liste de catégories (ou
//! d'arrondissements) vide signifie "aucune restriction". C'est la lecture
//! majoritaire des variantes du tableau de bord d'origine, retenue ici comme
//! règle unique.

use espaces_verts::GreenSpace;

use crate::presentation::{arrondissement_label, format_surface};

/// Contrainte sur un drapeau tri-état
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriStateFilter {
    /// Indifférent: aucune restriction
    #[default]
    Any,
    /// Seulement les enregistrements explicitement à vrai
    Yes,
    /// Seulement les enregistrements explicitement à faux
    No,
}

impl TriStateFilter {
    fn matches(self, value: Option<bool>) -> bool {
        match self {
            Self::Any => true,
            Self::Yes => value == Some(true),
            Self::No => value == Some(false),
        }
    }
}

/// Ensemble de prédicats choisis par l'utilisateur
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    /// Catégories retenues; vide = aucune restriction
    pub categories: Vec<String>,
    /// Libellés d'arrondissement retenus; vide = aucune restriction
    pub arrondissements: Vec<String>,
    /// Surface minimale en m² sur la surface fusionnée.
    ///
    /// Une surface inconnue passe le seuil: "inconnu" n'est pas "zéro".
    pub min_surface: Option<f64>,
    /// Contrainte sur l'ouverture 24h/24
    pub open_24h: TriStateFilter,
    /// Contrainte sur la présence de clôture
    pub enclosure: TriStateFilter,
    /// Mode strict: ne garder que les enregistrements géolocalisés
    pub require_coords: bool,
}

impl FilterSet {
    /// L'enregistrement satisfait-il tous les prédicats
    pub fn matches(&self, space: &GreenSpace) -> bool {
        if !self.categories.is_empty() {
            let Some(categorie) = space.categorie.as_deref() else {
                return false;
            };
            if !self.categories.iter().any(|c| c == categorie) {
                return false;
            }
        }

        if !self.arrondissements.is_empty() {
            let label = arrondissement_label(space);
            if !self.arrondissements.iter().any(|a| *a == label) {
                return false;
            }
        }

        if let Some(min) = self.min_surface {
            // Seule une surface connue peut échouer au seuil
            if let Some(surface) = space.merged_surface_m2() {
                if surface < min {
                    return false;
                }
            }
        }

        if !self.open_24h.matches(space.ouverture_24h) {
            return false;
        }
        if !self.enclosure.matches(space.presence_cloture) {
            return false;
        }

        if self.require_coords && !space.has_coordinates() {
            return false;
        }

        true
    }

    /// Applique les prédicats, sans modifier le jeu de données.
    ///
    /// Déterministe et stable: l'ordre relatif des enregistrements retenus
    /// est celui de l'entrée.
    pub fn apply<'a>(&self, records: &'a [GreenSpace]) -> Vec<&'a GreenSpace> {
        records.iter().filter(|space| self.matches(space)).collect()
    }
}

/// Indicateurs affichés au-dessus des vues filtrées
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    /// Nombre d'enregistrements retenus
    pub count: usize,
    /// Nombre de catégories distinctes dans la sélection
    pub categories: usize,
    /// Somme des surfaces connues, formatée ("—" si aucune)
    pub total_surface: String,
}

/// Calcule les indicateurs d'une sélection filtrée
pub fn kpis(selection: &[&GreenSpace]) -> Kpis {
    let mut categories: Vec<&str> = selection
        .iter()
        .filter_map(|s| s.categorie.as_deref())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    let surfaces: Vec<f64> = selection
        .iter()
        .filter_map(|s| s.merged_surface_m2())
        .collect();
    let total_surface = if surfaces.is_empty() {
        "—".to_string()
    } else {
        format_surface(Some(surfaces.iter().sum()))
    };

    Kpis {
        count: selection.len(),
        categories: categories.len(),
        total_surface,
    }
}

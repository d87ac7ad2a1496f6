//! Enregistrements typés du jeu de données normalisé
//!
//! Le CSV normalisé est chargé une fois en mémoire puis traité comme
//! immuable pour la durée de la session (load-once, read-many). Le parsing
//! par champ est tolérant: une cellule illisible devient `None`, jamais une
//! erreur.

use std::path::Path;

use crate::table::Table;
use crate::normalize::values;
use crate::DatasetError;

/// Un espace vert, une ligne du jeu de données normalisé
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreenSpace {
    pub id: Option<i64>,
    pub nom: Option<String>,
    pub typologie: Option<String>,
    pub categorie: Option<String>,
    pub adresse_numero: Option<String>,
    pub adresse_complement: Option<String>,
    pub adresse_type_voie: Option<String>,
    pub adresse_libelle_voie: Option<String>,
    pub code_postal: Option<String>,
    pub commune: Option<String>,
    pub surface_totale_reelle_m2: Option<f64>,
    pub surface_calculee_m2: Option<f64>,
    pub surface_horticole_m2: Option<f64>,
    pub presence_cloture: Option<bool>,
    pub ouverture_24h: Option<bool>,
    pub perimetre_m: Option<f64>,
    pub annee_ouverture: Option<i32>,
    pub annee_renovation: Option<i32>,
    pub annee_changement_nom: Option<i32>,
    /// Toujours ≥ 1 après normalisation
    pub nb_entites: i64,
    /// Géométrie GeoJSON brute, décodée à la demande (voir [`crate::geometry`])
    pub geo_shape: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GreenSpace {
    /// Les deux coordonnées sont-elles présentes
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Surface fusionnée: réelle, sinon calculée, sinon horticole.
    ///
    /// Chaîne de repli ordonnée, premier champ non nul gagnant.
    pub fn merged_surface_m2(&self) -> Option<f64> {
        self.surface_totale_reelle_m2
            .or(self.surface_calculee_m2)
            .or(self.surface_horticole_m2)
    }

    /// Fragments d'adresse dans l'ordre des colonnes du schéma
    pub fn address_fragments(&self) -> [Option<&str>; 4] {
        [
            self.adresse_numero.as_deref(),
            self.adresse_complement.as_deref(),
            self.adresse_type_voie.as_deref(),
            self.adresse_libelle_voie.as_deref(),
        ]
    }
}

/// Jeu de données chargé en mémoire, immuable pour la session
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<GreenSpace>,
}

impl Dataset {
    /// Charge le CSV normalisé (délimité par `;`)
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let table = Table::read_csv(path)?;
        Ok(Self::from_table(&table))
    }

    /// Construit le jeu de données depuis une table déjà lue
    pub fn from_table(table: &Table) -> Self {
        let records = (0..table.len())
            .map(|row| record_from_row(table, row))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[GreenSpace] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn text(table: &Table, row: usize, column: &str) -> Option<String> {
    table
        .cell(row, column)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number(table: &Table, row: usize, column: &str) -> Option<f64> {
    table.cell(row, column).and_then(values::parse_number)
}

fn integer(table: &Table, row: usize, column: &str) -> Option<i64> {
    number(table, row, column).map(|n| n.trunc() as i64)
}

fn year(table: &Table, row: usize, column: &str) -> Option<i32> {
    integer(table, row, column).map(|n| n as i32)
}

fn tristate(table: &Table, row: usize, column: &str) -> Option<bool> {
    table.cell(row, column).and_then(values::parse_tristate_bool)
}

fn record_from_row(table: &Table, row: usize) -> GreenSpace {
    GreenSpace {
        id: integer(table, row, "id"),
        nom: text(table, row, "nom"),
        typologie: text(table, row, "typologie"),
        categorie: text(table, row, "categorie"),
        adresse_numero: text(table, row, "adresse_numero"),
        adresse_complement: text(table, row, "adresse_complement"),
        adresse_type_voie: text(table, row, "adresse_type_voie"),
        adresse_libelle_voie: text(table, row, "adresse_libelle_voie"),
        code_postal: text(table, row, "code_postal"),
        commune: text(table, row, "commune"),
        surface_totale_reelle_m2: number(table, row, "surface_totale_reelle_m2"),
        surface_calculee_m2: number(table, row, "surface_calculee_m2"),
        surface_horticole_m2: number(table, row, "surface_horticole_m2"),
        presence_cloture: tristate(table, row, "presence_cloture"),
        ouverture_24h: tristate(table, row, "ouverture_24h"),
        perimetre_m: number(table, row, "perimetre_m"),
        annee_ouverture: year(table, row, "annee_ouverture"),
        annee_renovation: year(table, row, "annee_renovation"),
        annee_changement_nom: year(table, row, "annee_changement_nom"),
        // ≥ 1 garanti par la normalisation; 1 par défaut si la colonne manque
        nb_entites: integer(table, row, "nb_entites").filter(|&n| n >= 1).unwrap_or(1),
        geo_shape: text(table, row, "geo_shape"),
        latitude: number(table, row, "latitude"),
        longitude: number(table, row, "longitude"),
    }
}

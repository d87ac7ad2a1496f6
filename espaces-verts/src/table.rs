//! Table tabulaire dynamique (en-têtes + cellules texte)
//!
//! L'export brut de l'open data parisien transporte des colonnes hors du
//! schéma stable, la normalisation opère donc sur une table générique plutôt
//! que sur des enregistrements typés. Le typage n'intervient qu'au chargement
//! du CSV normalisé (voir [`crate::record`]).

use std::path::Path;

use crate::DatasetError;

/// Délimiteur de champ des exports open data parisiens
pub const DELIMITER: u8 = b';';

/// Table en mémoire: une ligne d'en-tête, des cellules texte.
///
/// Les cellules vides représentent les valeurs absentes. L'ordre des colonnes
/// est significatif et préservé par toutes les opérations.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Crée une table à partir d'en-têtes et de lignes déjà découpées
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Lit un CSV délimité par `;` (UTF-8, en-tête obligatoire)
    pub fn read_csv(path: &Path) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(DatasetError::invalid_header(
                path.display().to_string(),
                "header row is empty",
            ));
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            // Lignes courtes complétées par des cellules vides, lignes longues tronquées
            let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Écrit la table en CSV délimité par `;`, ordre des colonnes préservé
    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(path)?;

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// En-têtes, dans l'ordre des colonnes
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Nombre de lignes
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// La table est-elle vide (aucune ligne)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index d'une colonne par nom exact
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cellule (ligne, colonne par nom); `None` si la colonne est absente
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Itère sur les lignes
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Renomme une colonne; sans effet si elle est absente
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.column_index(from) {
            self.headers[idx] = to.to_string();
        }
    }

    /// Supprime une colonne et ses cellules; sans effet si elle est absente
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.headers.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Ajoute une colonne vide à la fin et retourne son index
    pub fn push_column(&mut self, name: &str) -> usize {
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    /// Applique `f` à chaque cellule d'une colonne; sans effet si absente
    pub fn map_column<F>(&mut self, column: &str, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(idx) = self.column_index(column) {
            for row in &mut self.rows {
                row[idx] = f(&row[idx]);
            }
        }
    }

    /// Conserve les lignes pour lesquelles `keep` retourne vrai.
    ///
    /// Le prédicat reçoit la ligne complète; l'ordre relatif est préservé.
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| keep(row.as_slice()));
    }

    /// Accès mutable à une cellule par index de colonne
    pub(crate) fn cell_mut(&mut self, row: usize, column_idx: usize) -> Option<&mut String> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column_idx))
    }
}

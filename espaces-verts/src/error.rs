//! Types d'erreurs pour le crate espaces-verts

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement ou de la normalisation
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Erreur d'I/O lors de la lecture ou de l'écriture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur du lecteur/écrivain CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Erreur de sérialisation JSON (rapport, géométrie)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// En-tête absent ou vide dans le fichier source
    #[error("Invalid header in {file}: {reason}")]
    InvalidHeader { file: String, reason: String },

    /// Ligne dont la largeur ne correspond pas à l'en-tête
    #[error("Row {row} has {found} fields, header has {expected}")]
    RowWidthMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl DatasetError {
    /// Crée une erreur d'en-tête avec contexte
    pub fn invalid_header(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

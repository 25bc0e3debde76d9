//! Error types for data preparation

use thiserror::Error;

/// Result type alias for data preparation
pub type Result<T> = std::result::Result<T, DataError>;

/// Load-time failures. Any of these stops the run before the engine sees the data.
#[derive(Error, Debug)]
pub enum DataError {
    /// Input file could not be opened
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },

    /// Input could not be parsed as CSV
    #[error("CSV error in {table} table: {source}")]
    Csv { table: &'static str, source: csv::Error },

    /// A required header is absent
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    /// The defense table has none of the recognised team key columns
    #[error("defense table must include a team column (one of: {candidates})")]
    MissingTeamColumn { candidates: String },
}

impl DataError {
    pub(crate) fn csv(table: &'static str, source: csv::Error) -> Self {
        Self::Csv { table, source }
    }
}

use aspect_model::{ModelError, RowId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Add-row count below 1; surfaced before any mutation.
    #[error("row count must be at least 1")]
    InvalidRowCount,
    /// An edit or identifier request named a row id not in the store.
    #[error("row {0} not found")]
    RowNotFound(RowId),
    /// Two rows with the same id were loaded into one store.
    #[error("duplicate row id: {0}")]
    DuplicateRowId(RowId),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, TableError>;

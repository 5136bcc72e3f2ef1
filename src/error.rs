use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop the dashboard before anything is rendered.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error("File not found: {}", path.display())]
    DataNotFound { path: PathBuf },

    #[error("Required column '{missing}' not found in the dataset")]
    SchemaResolution { missing: &'static str },

    #[error("Unknown wine type: {value}")]
    UnknownWine { value: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type PairingResult<T> = std::result::Result<T, PairingError>;

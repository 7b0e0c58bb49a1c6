use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StaffingError {
    #[error("dataset is missing required column '{field}'")]
    MissingField { field: String },

    #[error("failed to load dataset from {path}: {reason}")]
    DatasetLoad { path: PathBuf, reason: String },

    #[error("failed to read dataset: {0}")]
    InvalidDataset(String),

    #[error("unsupported dataset format: {0}. Expected .csv, .xlsx or .json")]
    UnsupportedDataset(String),

    #[error("failed to load policy from {path}: {reason}")]
    PolicyLoad { path: PathBuf, reason: String },

    #[error("invalid policy: {0}")]
    PolicyInvalid(String),

    #[error("institution '{0}' not found in dataset")]
    UnknownInstitution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to read dataset file: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Fractional relaxation is infeasible: {0}")]
    RelaxationInfeasible(String),

    #[error("No resource nodes loaded, the placement pipeline requires at least one node")]
    NoNodes,

    #[error("No service modules loaded, the placement pipeline requires at least one service")]
    NoServices,

    #[error("Link '{link}' references the unknown endpoint '{endpoint}'")]
    UnknownEndpoint { link: String, endpoint: String },
}

pub type Result<T> = std::result::Result<T, Error>;

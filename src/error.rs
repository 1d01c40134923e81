use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Data access errors (load + normalise)
// ---------------------------------------------------------------------------

/// Everything that can go wrong between the file on disk and the
/// normalised vehicle table. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable Arrow column: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("row {row}: `{column}` has non-integral value {value}")]
    NonIntegral {
        row: usize,
        column: &'static str,
        value: f64,
    },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

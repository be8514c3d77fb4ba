//! Error types shared across the FoodGram workspace

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading or parsing ingredient seed data
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("seed file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read seed file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV seed data: {0}")]
    Csv(#[from] csv::Error),
}

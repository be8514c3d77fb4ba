//! Error taxonomy for the operations binary
//!
//! Startup steps fail the process on the first unhandled error; the one
//! deliberate exception is the missing-seed-file branch, which is a warning
//! rather than an error (see `seed`).

use foodgram_shared::SeedError;
use std::path::PathBuf;
use thiserror::Error;

/// Operations error type
#[derive(Error, Debug)]
pub enum OpsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("migration failed")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("static collection failed at {path}")]
    StaticCollect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to hash admin password: {0}")]
    PasswordHash(String),

    #[error("failed to launch application server `{command}`")]
    ServerSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for operations steps
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_errors_pass_through() {
        let err = OpsError::from(SeedError::FileNotFound(PathBuf::from("data/x.json")));
        assert!(err.to_string().contains("data/x.json"));
    }
}

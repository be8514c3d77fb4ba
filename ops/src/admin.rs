//! Administrative-account provisioning
//!
//! The entrypoint conditionally creates a superuser from environment
//! configuration: the step is skipped unless email, username and password
//! are all configured, and an existing account with the configured email is
//! left untouched.

use crate::config::AdminConfig;
use crate::error::{OpsError, OpsResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use foodgram_shared::validation;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tracing::info;

/// Password hashing using Argon2id
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    pub fn hash(password: &str) -> OpsResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| OpsError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Hash a password on the blocking thread pool
    ///
    /// Argon2 is intentionally CPU-intensive; this keeps it off the async
    /// runtime during startup.
    pub async fn hash_async(password: SecretString) -> OpsResult<String> {
        tokio::task::spawn_blocking(move || Self::hash(password.expose_secret()))
            .await
            .map_err(|e| OpsError::PasswordHash(format!("task join error: {e}")))?
    }

    /// Verify a password against a stored hash
    pub fn verify(password: &str, hash: &str) -> OpsResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| OpsError::PasswordHash(format!("invalid hash format: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Validated admin credentials; the password never appears in Debug output
pub struct AdminCredentials {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    password: SecretString,
}

impl AdminCredentials {
    /// Build credentials from configuration
    ///
    /// Returns `Ok(None)` when the step is unconfigured; a configured but
    /// invalid field is a configuration error.
    pub fn from_config(config: &AdminConfig) -> OpsResult<Option<Self>> {
        let (Some(email), Some(username), Some(password)) =
            (&config.email, &config.username, &config.password)
        else {
            return Ok(None);
        };

        validation::validate_email(email).map_err(OpsError::Config)?;
        validation::validate_username(username).map_err(OpsError::Config)?;
        validation::validate_password(password).map_err(OpsError::Config)?;

        let first_name = config.first_name.clone().unwrap_or_default();
        let last_name = config.last_name.clone().unwrap_or_default();
        validation::validate_person_name(&first_name).map_err(OpsError::Config)?;
        validation::validate_person_name(&last_name).map_err(OpsError::Config)?;

        Ok(Some(Self {
            email: email.clone(),
            username: username.clone(),
            first_name,
            last_name,
            password: SecretString::new(password.clone()),
        }))
    }
}

/// How the provisioning step concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOutcome {
    /// A new superuser was created
    Created { email: String },
    /// A user with the configured email already exists; left untouched
    AlreadyExists { email: String },
    /// Credentials not configured; step skipped
    Skipped,
}

/// Conditionally create the administrative account
pub async fn ensure_admin(pool: &PgPool, config: &AdminConfig) -> OpsResult<AdminOutcome> {
    let Some(credentials) = AdminCredentials::from_config(config)? else {
        info!("Admin credentials not configured, skipping superuser creation");
        return Ok(AdminOutcome::Skipped);
    };

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(&credentials.email)
        .fetch_one(pool)
        .await?;

    if exists {
        info!(email = %credentials.email, "Superuser already exists, leaving untouched");
        return Ok(AdminOutcome::AlreadyExists {
            email: credentials.email,
        });
    }

    let password_hash = PasswordService::hash_async(credentials.password).await?;

    sqlx::query(
        r#"
        INSERT INTO users (email, username, first_name, last_name, password_hash, is_staff, is_superuser)
        VALUES ($1, $2, $3, $4, $5, TRUE, TRUE)
        "#,
    )
    .bind(&credentials.email)
    .bind(&credentials.username)
    .bind(&credentials.first_name)
    .bind(&credentials.last_name)
    .bind(&password_hash)
    .execute(pool)
    .await?;

    info!(email = %credentials.email, "Superuser created");
    Ok(AdminOutcome::Created {
        email: credentials.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hash = PasswordService::hash(password).unwrap();

        assert!(PasswordService::verify(password, &hash).unwrap());
        assert!(!PasswordService::verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Salts are random, hashes must differ
        assert_ne!(hash1, hash2);
        assert!(PasswordService::verify(password, &hash1).unwrap());
        assert!(PasswordService::verify(password, &hash2).unwrap());
    }

    #[test]
    fn unconfigured_credentials_are_none() {
        let config = AdminConfig::default();
        assert!(AdminCredentials::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn invalid_email_is_a_config_error() {
        let config = AdminConfig {
            email: Some("not-an-email".to_string()),
            username: Some("admin".to_string()),
            password: Some("changeme123".to_string()),
            ..AdminConfig::default()
        };
        assert!(matches!(
            AdminCredentials::from_config(&config),
            Err(OpsError::Config(_))
        ));
    }

    #[test]
    fn valid_config_builds_credentials() {
        let config = AdminConfig {
            email: Some("admin@foodgram.example".to_string()),
            username: Some("admin".to_string()),
            password: Some("changeme123".to_string()),
            first_name: Some("Site".to_string()),
            last_name: None,
        };
        let credentials = AdminCredentials::from_config(&config).unwrap().unwrap();
        assert_eq!(credentials.email, "admin@foodgram.example");
        assert_eq!(credentials.first_name, "Site");
        assert_eq!(credentials.last_name, "");
    }
}

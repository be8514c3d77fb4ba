//! Integration tests for the conditional superuser-provisioning step

mod common;

use foodgram_ops::admin::{self, AdminOutcome, PasswordService};
use foodgram_ops::config::AdminConfig;

fn configured_admin() -> AdminConfig {
    AdminConfig {
        email: Some("admin@foodgram.example".to_string()),
        username: Some("admin".to_string()),
        password: Some("changeme123".to_string()),
        first_name: Some("Site".to_string()),
        last_name: Some("Admin".to_string()),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn creates_superuser_when_configured_and_absent() {
    let db = common::TestDb::new().await;
    db.cleanup().await;

    let outcome = admin::ensure_admin(&db.pool, &configured_admin())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AdminOutcome::Created {
            email: "admin@foodgram.example".to_string()
        }
    );

    let (hash, is_superuser): (String, bool) =
        sqlx::query_as("SELECT password_hash, is_superuser FROM users WHERE email = $1")
            .bind("admin@foodgram.example")
            .fetch_one(&db.pool)
            .await
            .unwrap();

    assert!(is_superuser);
    assert!(PasswordService::verify("changeme123", &hash).unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn existing_account_is_left_untouched() {
    let db = common::TestDb::new().await;
    db.cleanup().await;

    admin::ensure_admin(&db.pool, &configured_admin())
        .await
        .unwrap();

    let mut changed = configured_admin();
    changed.password = Some("different-password".to_string());
    let outcome = admin::ensure_admin(&db.pool, &changed).await.unwrap();

    assert_eq!(
        outcome,
        AdminOutcome::AlreadyExists {
            email: "admin@foodgram.example".to_string()
        }
    );

    // The original password still verifies
    let (hash,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE email = $1")
        .bind("admin@foodgram.example")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert!(PasswordService::verify("changeme123", &hash).unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn unconfigured_credentials_skip_the_step() {
    let db = common::TestDb::new().await;
    db.cleanup().await;

    let outcome = admin::ensure_admin(&db.pool, &AdminConfig::default())
        .await
        .unwrap();

    assert_eq!(outcome, AdminOutcome::Skipped);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

//! Conditional ingredient seeding
//!
//! On startup, after migrations: count rows in `ingredients`. If the table
//! is empty, look for a seed file in the configured data directory
//! (`ingredients.json` preferred over `ingredients.csv`) and import it. A
//! missing seed file is a warning, not a failure; a non-empty table skips
//! the import entirely.
//!
//! The gate is split into a pure decision (`plan_seed`) and an executor so
//! the decision table can be tested without a database.

use crate::error::OpsResult;
use foodgram_shared::{ingredients, SeedFormat};
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Well-known seed file names inside the data directory
pub const JSON_SEED_FILE: &str = "ingredients.json";
pub const CSV_SEED_FILE: &str = "ingredients.csv";

/// What the seeding step decided to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedPlan {
    /// Table empty and a seed file exists: import it
    Import { path: PathBuf, format: SeedFormat },
    /// Table already populated: never import, regardless of file presence
    SkipNonEmpty { existing: i64 },
    /// Table empty but no seed file found: warn and continue startup
    SkipMissingFile,
}

/// Probe the data directory for a seed file, preferring JSON over CSV
pub fn discover_seed_file(data_dir: &Path) -> Option<(PathBuf, SeedFormat)> {
    let json = data_dir.join(JSON_SEED_FILE);
    if json.is_file() {
        return Some((json, SeedFormat::Json));
    }
    let csv = data_dir.join(CSV_SEED_FILE);
    if csv.is_file() {
        return Some((csv, SeedFormat::Csv));
    }
    None
}

/// The seeding decision, as a pure function of the row count and the
/// discovered file
pub fn plan_seed(existing: i64, discovered: Option<(PathBuf, SeedFormat)>) -> SeedPlan {
    if existing > 0 {
        return SeedPlan::SkipNonEmpty { existing };
    }
    match discovered {
        Some((path, format)) => SeedPlan::Import { path, format },
        None => SeedPlan::SkipMissingFile,
    }
}

/// Count existing ingredient rows
pub async fn count_ingredients(pool: &PgPool) -> OpsResult<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Totals from one import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows newly inserted
    pub inserted: u64,
    /// Rows already present (unique-constraint no-ops)
    pub duplicates: u64,
    /// Records dropped by the parser for missing or invalid fields
    pub skipped: usize,
}

/// Import ingredient records from a seed file
///
/// Inserts are get-or-create style: `ON CONFLICT DO NOTHING` on the
/// `(name, measurement_unit)` unique constraint, so re-running an import
/// never duplicates rows. There is no surrounding transaction; a failure
/// mid-file leaves earlier rows in place, matching the no-rollback contract
/// of the startup sequence.
pub async fn import_ingredients(
    pool: &PgPool,
    path: &Path,
    format: SeedFormat,
) -> OpsResult<ImportReport> {
    let batch = ingredients::parse_seed_file(path, format)?;
    if batch.skipped > 0 {
        warn!(
            skipped = batch.skipped,
            "Skipped seed records with missing or invalid fields"
        );
    }

    let mut report = ImportReport {
        skipped: batch.skipped,
        ..ImportReport::default()
    };

    for record in &batch.records {
        let result = sqlx::query(
            r#"
            INSERT INTO ingredients (name, measurement_unit)
            VALUES ($1, $2)
            ON CONFLICT (name, measurement_unit) DO NOTHING
            "#,
        )
        .bind(&record.name)
        .bind(&record.measurement_unit)
        .execute(pool)
        .await?;

        if result.rows_affected() == 1 {
            report.inserted += 1;
        } else {
            report.duplicates += 1;
        }
    }

    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        skipped = report.skipped,
        format = %format,
        "Ingredient import finished"
    );
    Ok(report)
}

/// How the seeding step concluded
#[derive(Debug)]
pub enum SeedOutcome {
    Imported(ImportReport),
    SkippedNonEmpty(i64),
    SkippedMissingFile,
}

/// Run the full conditional seeding step
pub async fn seed_ingredients(pool: &PgPool, data_dir: &Path) -> OpsResult<SeedOutcome> {
    let existing = count_ingredients(pool).await?;

    match plan_seed(existing, discover_seed_file(data_dir)) {
        SeedPlan::Import { path, format } => {
            info!(
                path = %path.display(),
                %format,
                "Ingredient table is empty, importing seed data"
            );
            let report = import_ingredients(pool, &path, format).await?;
            Ok(SeedOutcome::Imported(report))
        }
        SeedPlan::SkipNonEmpty { existing } => {
            info!(existing, "Ingredients already present, skipping import");
            Ok(SeedOutcome::SkippedNonEmpty(existing))
        }
        SeedPlan::SkipMissingFile => {
            warn!(
                "No {} or {} found in {}; continuing without seed data",
                JSON_SEED_FILE,
                CSV_SEED_FILE,
                data_dir.display()
            );
            Ok(SeedOutcome::SkippedMissingFile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn json_discovery() -> Option<(PathBuf, SeedFormat)> {
        Some((PathBuf::from("data/ingredients.json"), SeedFormat::Json))
    }

    fn csv_discovery() -> Option<(PathBuf, SeedFormat)> {
        Some((PathBuf::from("data/ingredients.csv"), SeedFormat::Csv))
    }

    #[rstest]
    #[case::empty_table_json(0, json_discovery(), SeedFormat::Json)]
    #[case::empty_table_csv(0, csv_discovery(), SeedFormat::Csv)]
    fn empty_table_with_file_imports(
        #[case] existing: i64,
        #[case] discovered: Option<(PathBuf, SeedFormat)>,
        #[case] expected_format: SeedFormat,
    ) {
        let expected_path = discovered.as_ref().unwrap().0.clone();
        match plan_seed(existing, discovered) {
            SeedPlan::Import { path, format } => {
                assert_eq!(path, expected_path);
                assert_eq!(format, expected_format);
            }
            other => panic!("expected import plan, got {other:?}"),
        }
    }

    #[test]
    fn empty_table_without_file_warns_and_continues() {
        assert_eq!(plan_seed(0, None), SeedPlan::SkipMissingFile);
    }

    #[rstest]
    #[case::with_json(json_discovery())]
    #[case::with_csv(csv_discovery())]
    #[case::without_file(None)]
    fn non_empty_table_never_imports(#[case] discovered: Option<(PathBuf, SeedFormat)>) {
        assert_eq!(
            plan_seed(42, discovered),
            SeedPlan::SkipNonEmpty { existing: 42 }
        );
    }

    #[test]
    fn discovery_prefers_json_over_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(JSON_SEED_FILE), "[]").unwrap();
        fs::write(dir.path().join(CSV_SEED_FILE), "").unwrap();

        let (path, format) = discover_seed_file(dir.path()).unwrap();
        assert_eq!(format, SeedFormat::Json);
        assert!(path.ends_with(JSON_SEED_FILE));
    }

    #[test]
    fn discovery_falls_back_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CSV_SEED_FILE), "flour,g\n").unwrap();

        let (path, format) = discover_seed_file(dir.path()).unwrap();
        assert_eq!(format, SeedFormat::Csv);
        assert!(path.ends_with(CSV_SEED_FILE));
    }

    #[test]
    fn discovery_returns_none_for_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_seed_file(dir.path()).is_none());
    }
}

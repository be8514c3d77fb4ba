//! Static-asset collection
//!
//! The `collectstatic` step of the container boot: copy every file from the
//! configured source directories into the static root, overwriting what is
//! already there. The static root is a shared volume the gateway serves
//! under `/static/`.

use crate::error::{OpsError, OpsResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Totals from one collection run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectReport {
    /// Files copied into the static root
    pub copied: usize,
    /// Source directories that existed and were walked
    pub sources_walked: usize,
}

/// Copy all files from `sources` into `static_root`, preserving relative
/// paths and overwriting existing files
///
/// Later sources win over earlier ones when paths collide, matching the
/// first-found-last-copied order of the sequential copy. A missing source
/// directory is warned about and skipped.
pub fn collect_static(sources: &[PathBuf], static_root: &Path) -> OpsResult<CollectReport> {
    fs::create_dir_all(static_root).map_err(|source| OpsError::StaticCollect {
        path: static_root.to_path_buf(),
        source,
    })?;

    let mut report = CollectReport::default();

    for source_dir in sources {
        if !source_dir.is_dir() {
            warn!(source = %source_dir.display(), "Static source directory missing, skipping");
            continue;
        }
        report.sources_walked += 1;

        for entry in WalkDir::new(source_dir) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source_dir).to_path_buf();
                OpsError::StaticCollect {
                    path,
                    source: e.into(),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .expect("walkdir yields paths under its root");
            let destination = static_root.join(relative);

            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|source| OpsError::StaticCollect {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            fs::copy(entry.path(), &destination).map_err(|source| OpsError::StaticCollect {
                path: destination.clone(),
                source,
            })?;
            report.copied += 1;
        }
    }

    info!(
        copied = report.copied,
        sources = report.sources_walked,
        root = %static_root.display(),
        "Static assets collected"
    );
    Ok(report)
}

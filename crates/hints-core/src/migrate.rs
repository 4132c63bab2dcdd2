//! Migration driver
//!
//! Loads hint documents, runs the v0 → v1 transform and writes the result
//! back over the original file. Scenarios are processed one at a time and
//! the first failure is returned to the caller.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::codec::{save_typed, DocumentCodec};
use crate::config::HINTS_FILE_NAME;
use crate::document::{ScenarioDocV0, ScenarioDocV1, SchemaVersion};
use crate::error::{MigrateError, TransformError};
use crate::sink::OutputSink;
use crate::transform::transform_v0_to_v1;

/// Finds the hint documents of every scenario under a root
pub trait ScenarioLocator {
    /// Hint document paths, one per scenario
    ///
    /// # Errors
    /// Returns [`MigrateError::Enumerate`] if the root cannot be listed.
    fn hint_documents(&self, root: &Path) -> Result<Vec<PathBuf>, MigrateError>;
}

/// Treats each immediate subdirectory of the root as a scenario
///
/// Subdirectories are visited in name order; plain files are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScenarioLocator;

impl ScenarioLocator for FsScenarioLocator {
    fn hint_documents(&self, root: &Path) -> Result<Vec<PathBuf>, MigrateError> {
        let enumerate = |source| MigrateError::Enumerate {
            path: root.to_path_buf(),
            source,
        };

        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(root).map_err(enumerate)? {
            let entry = entry.map_err(enumerate)?;
            if entry.file_type().map_err(enumerate)?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        Ok(dirs
            .into_iter()
            .map(|dir| dir.join(HINTS_FILE_NAME))
            .collect())
    }
}

/// What happened to one hint document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    /// Rewritten in the v1 shape
    Migrated {
        /// Task groups written
        tasks: usize,
        /// Hints across all tasks
        hints: usize,
    },
    /// Already v1; left untouched
    AlreadyCurrent,
}

/// Per-scenario results of a batch migration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Hint document path and its status, in processing order
    pub entries: Vec<(PathBuf, MigrationStatus)>,
}

impl MigrationReport {
    /// Number of documents rewritten
    #[must_use]
    pub fn migrated(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, MigrationStatus::Migrated { .. }))
            .count()
    }

    /// Number of documents already in the current schema
    #[must_use]
    pub fn already_current(&self) -> usize {
        self.entries.len() - self.migrated()
    }
}

/// Collaborators for the migration driver
#[derive(Clone, Copy)]
pub struct MigrationContext<'a> {
    /// Reads and writes hint documents
    pub codec: &'a dyn DocumentCodec,
    /// Enumerates scenarios for batch runs
    pub locator: &'a dyn ScenarioLocator,
    /// Receives progress messages
    pub sink: &'a dyn OutputSink,
}

impl std::fmt::Debug for MigrationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationContext").finish_non_exhaustive()
    }
}

/// Transform a raw document if it is still v0
///
/// Returns `None` for documents already in the v1 shape.
///
/// # Errors
/// Returns [`TransformError`] for unrecognized shapes and malformed hints.
pub fn upgrade_document(doc: Value) -> Result<Option<ScenarioDocV1>, TransformError> {
    match SchemaVersion::detect(&doc) {
        Some(SchemaVersion::V1) => Ok(None),
        Some(SchemaVersion::V0) => transform_v0_to_v1(ScenarioDocV0::from_value(doc)?).map(Some),
        None => Err(TransformError::UnrecognizedShape(
            "expected a v0 sequence or a v1 mapping".to_string(),
        )),
    }
}

/// Migrate one hint document in place
///
/// # Errors
/// Returns [`MigrateError`] if the document cannot be loaded, transformed or
/// written. Nothing is written on failure.
pub fn migrate_one(ctx: &MigrationContext<'_>, path: &Path) -> Result<MigrationStatus, MigrateError> {
    let doc = ctx.codec.load(path)?;

    let upgraded = upgrade_document(doc).map_err(|source| MigrateError::Transform {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(v1) = upgraded else {
        ctx.sink.info(&format!("{} is already migrated", path.display()));
        return Ok(MigrationStatus::AlreadyCurrent);
    };

    save_typed(ctx.codec, path, &v1)?;

    let status = MigrationStatus::Migrated {
        tasks: v1.tasks.len(),
        hints: v1.hint_count(),
    };
    ctx.sink.info(&format!(
        "Migrated {} ({} tasks, {} hints)",
        path.display(),
        v1.tasks.len(),
        v1.hint_count()
    ));
    Ok(status)
}

/// Migrate every scenario under `root`, in order
///
/// # Errors
/// Stops at and returns the first failure; scenarios before it stay
/// migrated.
pub fn migrate_all(ctx: &MigrationContext<'_>, root: &Path) -> Result<MigrationReport, MigrateError> {
    let paths = ctx.locator.hint_documents(root)?;
    tracing::info!("Found {} scenarios under {}", paths.len(), root.display());

    let mut report = MigrationReport::default();
    for path in paths {
        let status = migrate_one(ctx, &path)?;
        report.entries.push((path, status));
    }

    Ok(report)
}

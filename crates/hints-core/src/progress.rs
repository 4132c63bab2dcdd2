//! Progress store
//!
//! Maps task id to the index of the last hint shown. A missing key means no
//! hint has been shown for that task yet, which is distinct from index 0.
//!
//! Updates return a new store; persistence is a separate step so the
//! navigator's transitions stay pure.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::codec::{save_typed, DocumentCodec};
use crate::error::{CodecError, ProgressError};

/// Last-seen hint index per task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProgressStore {
    entries: IndexMap<String, usize>,
}

impl ProgressStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last hint index shown for `task`, if any
    #[inline]
    #[must_use]
    pub fn last_seen(&self, task: &str) -> Option<usize> {
        self.entries.get(task).copied()
    }

    /// Copy of this store with `task` set to `index`
    #[must_use]
    pub fn with_last_seen(&self, task: &str, index: usize) -> Self {
        let mut next = self.clone();
        next.entries.insert(task.to_string(), index);
        next
    }

    /// Number of tasks with recorded progress
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no progress has been recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a store from a parsed progress document
    ///
    /// `null` (an empty file) is an empty store.
    ///
    /// # Errors
    /// Returns [`ProgressError::InvalidEntry`] for keys or values that are
    /// not a task id and a non-negative integer.
    pub fn from_value(doc: Value, path: &Path) -> Result<Self, ProgressError> {
        let map = match doc {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(map) => map,
            _ => {
                return Err(CodecError::structure(path, "progress file must be a mapping").into())
            }
        };

        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let task = match key {
                Value::String(s) => s,
                other => {
                    return Err(ProgressError::InvalidEntry {
                        task: format!("{other:?}"),
                    })
                }
            };
            let index = value
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| ProgressError::InvalidEntry { task: task.clone() })?;
            entries.insert(task, index);
        }

        Ok(Self { entries })
    }
}

/// Progress store persisted through a [`DocumentCodec`]
pub struct ProgressFile<'a> {
    codec: &'a dyn DocumentCodec,
    path: PathBuf,
}

impl<'a> ProgressFile<'a> {
    /// Bind a progress file path to a codec
    pub fn new(codec: &'a dyn DocumentCodec, path: impl Into<PathBuf>) -> Self {
        Self {
            codec,
            path: path.into(),
        }
    }

    /// Path of the progress file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store; a missing file is an empty store
    ///
    /// # Errors
    /// Returns [`ProgressError`] on any other read or parse failure.
    pub fn load(&self) -> Result<ProgressStore, ProgressError> {
        match self.codec.load(&self.path) {
            Ok(doc) => ProgressStore::from_value(doc, &self.path),
            Err(e) if e.is_not_found() => {
                tracing::debug!("No progress file at {}, starting fresh", self.path.display());
                Ok(ProgressStore::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the file with the whole store
    ///
    /// # Errors
    /// Returns [`ProgressError`] if the write fails.
    pub fn save(&self, store: &ProgressStore) -> Result<(), ProgressError> {
        save_typed(self.codec, &self.path, store)?;
        Ok(())
    }
}

impl std::fmt::Debug for ProgressFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::YamlCodec;

    #[test]
    fn absent_key_differs_from_zero() {
        let store = ProgressStore::new().with_last_seen("task1", 0);
        assert_eq!(store.last_seen("task1"), Some(0));
        assert_eq!(store.last_seen("task2"), None);
    }

    #[test]
    fn with_last_seen_leaves_original_untouched() {
        let before = ProgressStore::new().with_last_seen("task1", 0);
        let after = before.with_last_seen("task1", 1);

        assert_eq!(before.last_seen("task1"), Some(0));
        assert_eq!(after.last_seen("task1"), Some(1));
    }

    #[test]
    fn from_value_rejects_negative_index() {
        let doc: Value = serde_yaml::from_str("task1: -1\n").unwrap();
        let err = ProgressStore::from_value(doc, Path::new("p.yaml")).unwrap_err();
        assert!(matches!(err, ProgressError::InvalidEntry { task } if task == "task1"));
    }

    #[test]
    fn from_value_null_is_empty() {
        let store = ProgressStore::from_value(Value::Null, Path::new("p.yaml")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_missing_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let file = ProgressFile::new(&YamlCodec, dir.path().join("progress.yaml"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn file_persists_every_task() {
        let dir = tempfile::tempdir().unwrap();
        let file = ProgressFile::new(&YamlCodec, dir.path().join("progress.yaml"));

        let store = ProgressStore::new()
            .with_last_seen("task1", 2)
            .with_last_seen("task2", 0);
        file.save(&store).unwrap();

        assert_eq!(file.load().unwrap(), store);
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "task1: 2\ntask2: 0\n"
        );
    }

    #[test]
    fn file_with_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.yaml");
        std::fs::write(&path, "- a\n- b\n").unwrap();

        let err = ProgressFile::new(&YamlCodec, &path).load().unwrap_err();
        assert!(matches!(err, ProgressError::Codec(CodecError::Structure { .. })));
    }
}

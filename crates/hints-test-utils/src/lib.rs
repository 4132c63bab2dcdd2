//! Testing utilities for the scenario hints workspace
//!
//! In-memory collaborators and document fixtures.

#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use hints_core::error::CodecError;
use hints_core::{DocumentCodec, Level, OutputSink};
use serde_yaml::{Mapping, Value};

/// Sink that keeps every message for later assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl OutputSink for RecordingSink {
    fn emit(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

/// Codec backed by a map of path to document
#[derive(Debug, Default)]
pub struct MemoryCodec {
    files: RefCell<HashMap<PathBuf, Value>>,
    read_only: RefCell<HashSet<PathBuf>>,
    saves: RefCell<usize>,
}

impl MemoryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, doc: Value) -> Self {
        self.insert(path, doc);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, doc: Value) {
        self.files.borrow_mut().insert(path.into(), doc);
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Value> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Make every later save to `path` fail with a permission error
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.read_only.borrow_mut().insert(path.into());
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl DocumentCodec for MemoryCodec {
    fn load(&self, path: &Path) -> Result<Value, CodecError> {
        self.get(path).ok_or_else(|| {
            CodecError::io_error(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }

    fn save(&self, path: &Path, doc: &Value) -> Result<(), CodecError> {
        if self.read_only.borrow().contains(path) {
            return Err(CodecError::io_error(
                path,
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        *self.saves.borrow_mut() += 1;
        self.insert(path, doc.clone());
        Ok(())
    }
}

/// Legacy `[{general_overview}, {hints}]` document
pub fn v0_document(overview: &[(&str, Value)], hints: &[(&str, &str)]) -> Value {
    let overview: Mapping = overview
        .iter()
        .map(|(k, v)| (Value::from(*k), v.clone()))
        .collect();
    let hints: Mapping = hints
        .iter()
        .map(|(k, v)| (Value::from(*k), Value::from(*v)))
        .collect();

    let mut first = Mapping::new();
    first.insert("general_overview".into(), Value::Mapping(overview));
    let mut second = Mapping::new();
    second.insert("hints".into(), Value::Mapping(hints));

    Value::Sequence(vec![Value::Mapping(first), Value::Mapping(second)])
}

/// Migrated task document; sort order is taken from the id's last digit
pub fn task_document(tasks: &[(&str, &[&str])]) -> Value {
    let mut task_map = Mapping::new();
    for (id, hints) in tasks {
        let sort_order = id
            .chars()
            .next_back()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0);
        let hints: Vec<Value> = hints
            .iter()
            .map(|text| {
                let mut hint = Mapping::new();
                hint.insert("text".into(), Value::from(*text));
                Value::Mapping(hint)
            })
            .collect();

        let mut group = Mapping::new();
        group.insert("sort-order".into(), Value::from(sort_order));
        group.insert("hints".into(), Value::Sequence(hints));
        task_map.insert(Value::from(*id), Value::Mapping(group));
    }

    let mut doc = Mapping::new();
    doc.insert("kind".into(), Value::from(hints_core::document::SCENARIO_KIND_V1));
    doc.insert("general_overview".into(), Value::Mapping(Mapping::new()));
    doc.insert("tasks".into(), Value::Mapping(task_map));
    Value::Mapping(doc)
}

/// Progress document `{task: index}`
pub fn progress_document(entries: &[(&str, u64)]) -> Value {
    Value::Mapping(
        entries
            .iter()
            .map(|(k, v)| (Value::from(*k), Value::from(*v)))
            .collect(),
    )
}

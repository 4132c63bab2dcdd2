//! Hint document shapes
//!
//! Two on-disk schemas exist:
//! - **v0**: a two-element sequence `[{general_overview}, {hints}]` where each
//!   hint is a `"<taskId>: <text>"` string
//! - **v1**: a mapping tagged with [`SCENARIO_KIND_V1`], hints grouped by task

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::TransformError;

/// Version tag written into every migrated document
pub const SCENARIO_KIND_V1: &str = "cp.simulator/scenario:1.0.0";

/// Overview key removed during migration
pub const NUM_HINTS_KEY: &str = "num-hints";

/// Schema version of a loaded hint document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Legacy two-element sequence
    V0,
    /// Task-grouped mapping tagged with `kind`
    V1,
}

impl SchemaVersion {
    /// Detect the schema of a raw document tree
    ///
    /// Returns `None` when the tree matches neither shape.
    #[must_use]
    pub fn detect(doc: &Value) -> Option<Self> {
        match doc {
            Value::Sequence(_) => Some(Self::V0),
            Value::Mapping(map) => match map.get("kind").and_then(Value::as_str) {
                Some(SCENARIO_KIND_V1) => Some(Self::V1),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Legacy hint document
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDocV0 {
    /// Free-form overview, still carrying `num-hints`
    pub general_overview: Mapping,
    /// Hint strings keyed by arbitrary labels, in file order
    pub hints: Mapping,
}

impl ScenarioDocV0 {
    /// Read the legacy shape out of a raw document tree
    ///
    /// # Errors
    /// Returns [`TransformError`] if the tree is not a two-element sequence
    /// carrying `general_overview` and `hints` mappings.
    pub fn from_value(doc: Value) -> Result<Self, TransformError> {
        let Value::Sequence(mut items) = doc else {
            return Err(TransformError::UnrecognizedShape(
                "expected a top-level sequence".to_string(),
            ));
        };
        if items.len() != 2 {
            return Err(TransformError::UnrecognizedShape(format!(
                "expected 2 top-level elements, found {}",
                items.len()
            )));
        }

        let hints_item = items.pop().unwrap_or(Value::Null);
        let overview_item = items.pop().unwrap_or(Value::Null);

        Ok(Self {
            general_overview: take_section(overview_item, "general_overview")?,
            hints: take_section(hints_item, "hints")?,
        })
    }
}

fn take_section(item: Value, key: &'static str) -> Result<Mapping, TransformError> {
    let Value::Mapping(mut outer) = item else {
        return Err(TransformError::MissingSection(key));
    };
    match outer.remove(key) {
        Some(Value::Mapping(section)) => Ok(section),
        Some(Value::Null) => Ok(Mapping::new()),
        _ => Err(TransformError::MissingSection(key)),
    }
}

/// One hint, as stored in v1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Hint body shown to the user
    pub text: String,
}

impl Hint {
    /// Create hint from text
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Hints belonging to one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    /// Display order of the task
    #[serde(rename = "sort-order")]
    pub sort_order: u32,
    /// Hints in reveal order
    #[serde(default)]
    pub hints: Vec<Hint>,
}

impl TaskGroup {
    /// Create empty group
    #[inline]
    #[must_use]
    pub fn new(sort_order: u32) -> Self {
        Self {
            sort_order,
            hints: Vec::new(),
        }
    }

    /// Number of hints for the task
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Whether the task has no hints
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

/// Migrated hint document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDocV1 {
    /// Schema tag, always [`SCENARIO_KIND_V1`] for migrated documents
    pub kind: String,
    /// Overview without `num-hints`
    pub general_overview: Mapping,
    /// Tasks in first-seen order
    pub tasks: IndexMap<String, TaskGroup>,
}

impl ScenarioDocV1 {
    /// Total number of hints across all tasks
    #[must_use]
    pub fn hint_count(&self) -> usize {
        self.tasks.values().map(TaskGroup::len).sum()
    }
}

/// Task document read by the hint navigator
///
/// Only `tasks` is consulted; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskDocument {
    /// Tasks keyed by id
    #[serde(default)]
    pub tasks: IndexMap<String, TaskGroup>,
}

impl TaskDocument {
    /// Look up a task
    #[inline]
    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&TaskGroup> {
        self.tasks.get(task_id)
    }
}

impl From<ScenarioDocV1> for TaskDocument {
    fn from(doc: ScenarioDocV1) -> Self {
        Self { tasks: doc.tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn detects_versions() {
        let v0 = yaml("- general_overview: {}\n- hints: {}\n");
        assert_eq!(SchemaVersion::detect(&v0), Some(SchemaVersion::V0));

        let v1 = yaml("kind: cp.simulator/scenario:1.0.0\ngeneral_overview: {}\ntasks: {}\n");
        assert_eq!(SchemaVersion::detect(&v1), Some(SchemaVersion::V1));

        let other = yaml("kind: something/else:2.0.0\n");
        assert_eq!(SchemaVersion::detect(&other), None);
        assert_eq!(SchemaVersion::detect(&Value::Null), None);
    }

    #[test]
    fn v0_from_value() {
        let doc = ScenarioDocV0::from_value(yaml(
            r#"
- general_overview:
    num-hints: 2
    title: Escape
- hints:
    b: "task2: second"
    a: "task1: first"
"#,
        ))
        .unwrap();

        assert_eq!(doc.general_overview.len(), 2);
        let keys: Vec<_> = doc.hints.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn v0_rejects_wrong_arity() {
        let err = ScenarioDocV0::from_value(yaml("- general_overview: {}\n")).unwrap_err();
        assert!(matches!(err, TransformError::UnrecognizedShape(_)));
    }

    #[test]
    fn v0_rejects_missing_hints() {
        let err =
            ScenarioDocV0::from_value(yaml("- general_overview: {}\n- other: {}\n")).unwrap_err();
        assert!(matches!(err, TransformError::MissingSection("hints")));
    }

    #[test]
    fn v1_serializes_with_sort_order_key() {
        let mut tasks = IndexMap::new();
        let mut group = TaskGroup::new(1);
        group.hints.push(Hint::new("Do X"));
        tasks.insert("task1".to_string(), group);

        let doc = ScenarioDocV1 {
            kind: SCENARIO_KIND_V1.to_string(),
            general_overview: Mapping::new(),
            tasks,
        };

        let out = serde_yaml::to_string(&doc).unwrap();
        assert!(out.starts_with("kind: cp.simulator/scenario:1.0.0"));
        assert!(out.contains("sort-order: 1"));
        assert_eq!(doc.hint_count(), 1);
    }

    #[test]
    fn task_document_ignores_extra_keys() {
        let doc: TaskDocument = serde_yaml::from_str(
            r#"
kind: cp.simulator/scenario:1.0.0
general_overview:
  title: Escape
tasks:
  task1:
    sort-order: 1
    hints:
      - text: look around
"#,
        )
        .unwrap();

        assert_eq!(doc.task("task1").map(TaskGroup::len), Some(1));
        assert!(doc.task("task9").is_none());
    }
}

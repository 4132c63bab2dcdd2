//! v0 → v1 hint document transform
//!
//! Pure functions, no I/O. Hint order within a task is the order in which
//! hints appear in the v0 `hints` mapping; it is never re-sorted.

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::document::{Hint, ScenarioDocV0, ScenarioDocV1, TaskGroup, NUM_HINTS_KEY, SCENARIO_KIND_V1};
use crate::error::{MalformedReason, TransformError};

/// Separator between task id and hint body in v0 hint strings
pub const HINT_SEPARATOR: &str = ": ";

/// A v0 hint string split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintLine<'a> {
    /// Task id, e.g. `task3`
    pub task_id: &'a str,
    /// Digit at the end of the task id
    pub sort_order: u32,
    /// Text after the first separator
    pub body: &'a str,
}

/// Split a `"<taskId>: <text>"` string on its first separator
///
/// # Errors
/// Returns [`TransformError::MalformedHint`] when the separator is missing,
/// the task id is empty, or the task id does not end in an ASCII digit.
pub fn parse_hint(text: &str) -> Result<HintLine<'_>, TransformError> {
    let (task_id, body) = text
        .split_once(HINT_SEPARATOR)
        .ok_or_else(|| TransformError::malformed(text, MalformedReason::MissingSeparator))?;

    let last = task_id
        .chars()
        .next_back()
        .ok_or_else(|| TransformError::malformed(text, MalformedReason::EmptyTaskId))?;

    let sort_order = last
        .to_digit(10)
        .ok_or_else(|| TransformError::malformed(text, MalformedReason::NoSortDigit))?;

    Ok(HintLine {
        task_id,
        sort_order,
        body,
    })
}

/// Group prefixed hints by task
///
/// Tasks appear in first-seen order; each task's hints keep encounter order
/// and lose their `<taskId>: ` prefix.
///
/// # Errors
/// Fails on the first malformed hint.
pub fn group_hints_by_task(hints: &[Hint]) -> Result<IndexMap<String, TaskGroup>, TransformError> {
    let mut tasks: IndexMap<String, TaskGroup> = IndexMap::new();

    for hint in hints {
        let line = parse_hint(&hint.text)?;
        tasks
            .entry(line.task_id.to_string())
            .or_insert_with(|| TaskGroup::new(line.sort_order))
            .hints
            .push(Hint::new(line.body));
    }

    Ok(tasks)
}

/// Rewrite a legacy document into the task-grouped v1 shape
///
/// # Errors
/// Returns [`TransformError`] if a hint value is not a string or a hint
/// string is malformed.
pub fn transform_v0_to_v1(doc: ScenarioDocV0) -> Result<ScenarioDocV1, TransformError> {
    let ScenarioDocV0 {
        mut general_overview,
        hints,
    } = doc;

    general_overview.shift_remove(NUM_HINTS_KEY);

    let flattened = hints
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok(Hint { text }),
            _ => Err(TransformError::NonStringHint {
                key: key_label(&key),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScenarioDocV1 {
        kind: SCENARIO_KIND_V1.to_string(),
        general_overview,
        tasks: group_hints_by_task(&flattened)?,
    })
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

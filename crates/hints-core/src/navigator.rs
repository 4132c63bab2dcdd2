//! Hint navigator
//!
//! [`HintNavigator`] answers reveal queries against a loaded task document
//! and a progress snapshot without touching disk. The `next_hint`,
//! `show_hints` and `show_hint` commands wrap it with load, persist and
//! report steps.
//!
//! Unknown tasks and exhausted hint lists are outcomes, not errors.

use std::path::Path;

use crate::codec::{load_typed, DocumentCodec};
use crate::document::{TaskDocument, TaskGroup};
use crate::error::NavigatorError;
use crate::progress::{ProgressFile, ProgressStore};
use crate::sink::OutputSink;
use crate::state_machine::{self, Transition};

const UNKNOWN_TASK: &str = "Cannot find task";
const ALL_SEEN: &str = "You have seen all the hints for this task";
const NOTHING_SEEN: &str = "You have not seen any hints for this task";

/// Result of advancing to the next hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A new hint was revealed and progress moved to `index`
    Revealed {
        /// Position of the revealed hint
        index: usize,
        /// Hint text
        text: String,
    },
    /// Every hint has been shown already
    NoMoreHints,
    /// Task is not in the task document
    UnknownTask,
}

/// Outcome of [`HintNavigator::advance`] plus the store to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceStep {
    /// What the user should see
    pub outcome: AdvanceOutcome,
    /// Updated store, present only when progress changed
    pub store: Option<ProgressStore>,
}

/// Result of listing every hint seen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealUpToOutcome {
    /// Hints seen so far, in order
    Revealed {
        /// Hint texts from the first up to the last seen
        hints: Vec<String>,
        /// Whether the last hint has been seen
        exhausted: bool,
    },
    /// No hint has been shown for this task yet
    NothingSeen,
    /// Task is not in the task document
    UnknownTask,
}

/// Result of showing a hint by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOneOutcome {
    /// Hint at the requested index
    Revealed {
        /// Requested position
        index: usize,
        /// Hint text
        text: String,
    },
    /// Index is past the task's last hint
    NoSuchHint {
        /// Requested position
        index: usize,
    },
    /// Task is not in the task document
    UnknownTask,
}

/// Reveal queries over one task document
#[derive(Debug, Clone, Copy)]
pub struct HintNavigator<'a> {
    tasks: &'a TaskDocument,
}

impl<'a> HintNavigator<'a> {
    /// Create navigator over a task document
    #[inline]
    #[must_use]
    pub fn new(tasks: &'a TaskDocument) -> Self {
        Self { tasks }
    }

    fn group(&self, task: &str) -> Option<&'a TaskGroup> {
        self.tasks.task(task)
    }

    /// Compute the next reveal for `task`
    ///
    /// The returned store is a new value; `progress` is never modified.
    #[must_use]
    pub fn advance(&self, task: &str, progress: &ProgressStore) -> AdvanceStep {
        let Some(group) = self.group(task) else {
            return AdvanceStep {
                outcome: AdvanceOutcome::UnknownTask,
                store: None,
            };
        };

        match state_machine::advance(progress.last_seen(task), group.len()) {
            Transition::Reveal(index) => AdvanceStep {
                outcome: AdvanceOutcome::Revealed {
                    index,
                    text: group.hints[index].text.clone(),
                },
                store: Some(progress.with_last_seen(task, index)),
            },
            Transition::Exhausted => AdvanceStep {
                outcome: AdvanceOutcome::NoMoreHints,
                store: None,
            },
        }
    }

    /// Every hint of `task` seen so far
    #[must_use]
    pub fn reveal_up_to(&self, task: &str, progress: &ProgressStore) -> RevealUpToOutcome {
        let Some(group) = self.group(task) else {
            return RevealUpToOutcome::UnknownTask;
        };

        let last_seen = progress.last_seen(task);
        match state_machine::seen_range(last_seen, group.len()) {
            None => RevealUpToOutcome::NothingSeen,
            Some(range) => RevealUpToOutcome::Revealed {
                hints: group.hints[range].iter().map(|h| h.text.clone()).collect(),
                exhausted: state_machine::is_exhausted(last_seen, group.len()),
            },
        }
    }

    /// The hint of `task` at `index`
    #[must_use]
    pub fn reveal_one(&self, task: &str, index: usize) -> RevealOneOutcome {
        let Some(group) = self.group(task) else {
            return RevealOneOutcome::UnknownTask;
        };

        match group.hints.get(index) {
            Some(hint) => RevealOneOutcome::Revealed {
                index,
                text: hint.text.clone(),
            },
            None => RevealOneOutcome::NoSuchHint { index },
        }
    }
}

impl AdvanceOutcome {
    /// Write the outcome to `sink`
    pub fn report(&self, task: &str, sink: &dyn OutputSink) {
        match self {
            Self::Revealed { text, .. } => sink.info(text),
            Self::NoMoreHints => sink.info(ALL_SEEN),
            Self::UnknownTask => sink.warn(&format!("{UNKNOWN_TASK} {task}")),
        }
    }
}

impl RevealUpToOutcome {
    /// Write the outcome to `sink`
    pub fn report(&self, task: &str, sink: &dyn OutputSink) {
        match self {
            Self::Revealed { hints, exhausted } => {
                for text in hints {
                    sink.info(text);
                }
                if *exhausted {
                    sink.info(ALL_SEEN);
                }
            }
            Self::NothingSeen => sink.info(NOTHING_SEEN),
            Self::UnknownTask => sink.warn(&format!("{UNKNOWN_TASK} {task}")),
        }
    }
}

impl RevealOneOutcome {
    /// Write the outcome to `sink`
    pub fn report(&self, task: &str, sink: &dyn OutputSink) {
        match self {
            Self::Revealed { text, .. } => sink.info(text),
            Self::NoSuchHint { index } => {
                sink.info(&format!("There is no hint {index} for this task"));
            }
            Self::UnknownTask => sink.warn(&format!("{UNKNOWN_TASK} {task}")),
        }
    }
}

/// Collaborators for the navigation commands
#[derive(Clone, Copy)]
pub struct NavigatorContext<'a> {
    /// Loads the task document and progress file
    pub codec: &'a dyn DocumentCodec,
    /// Receives hints and notices
    pub sink: &'a dyn OutputSink,
    /// Task document of the running scenario
    pub tasks_path: &'a Path,
    /// Progress store of the running scenario
    pub progress_path: &'a Path,
}

impl NavigatorContext<'_> {
    fn load_tasks(&self) -> Result<TaskDocument, NavigatorError> {
        Ok(load_typed(self.codec, self.tasks_path)?)
    }

    fn progress_file(&self) -> ProgressFile<'_> {
        ProgressFile::new(self.codec, self.progress_path)
    }
}

impl std::fmt::Debug for NavigatorContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigatorContext")
            .field("tasks_path", &self.tasks_path)
            .field("progress_path", &self.progress_path)
            .finish_non_exhaustive()
    }
}

/// Reveal the next hint for `task` and record it
///
/// The whole progress store is persisted before the hint is reported.
///
/// # Errors
/// Returns [`NavigatorError`] if the task document or progress file cannot
/// be read, or the progress file cannot be written.
pub fn next_hint(ctx: &NavigatorContext<'_>, task: &str) -> Result<AdvanceOutcome, NavigatorError> {
    let progress_file = ctx.progress_file();
    let progress = progress_file.load()?;
    let tasks = ctx.load_tasks()?;

    let step = HintNavigator::new(&tasks).advance(task, &progress);
    if let Some(store) = &step.store {
        progress_file.save(store)?;
        tracing::debug!(task, "Progress recorded");
    }

    step.outcome.report(task, ctx.sink);
    Ok(step.outcome)
}

/// Show every hint of `task` seen so far
///
/// # Errors
/// Returns [`NavigatorError`] if the task document or progress file cannot
/// be read.
pub fn show_hints(
    ctx: &NavigatorContext<'_>,
    task: &str,
) -> Result<RevealUpToOutcome, NavigatorError> {
    let progress = ctx.progress_file().load()?;
    let tasks = ctx.load_tasks()?;

    let outcome = HintNavigator::new(&tasks).reveal_up_to(task, &progress);
    outcome.report(task, ctx.sink);
    Ok(outcome)
}

/// Show the hint of `task` at `index`, without recording progress
///
/// # Errors
/// Returns [`NavigatorError`] if the task document cannot be read.
pub fn show_hint(
    ctx: &NavigatorContext<'_>,
    task: &str,
    index: usize,
) -> Result<RevealOneOutcome, NavigatorError> {
    let tasks = ctx.load_tasks()?;

    let outcome = HintNavigator::new(&tasks).reveal_one(task, index);
    outcome.report(task, ctx.sink);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Hint;

    fn two_hint_tasks() -> TaskDocument {
        let mut group = TaskGroup::new(1);
        group.hints = vec![Hint::new("look around"), Hint::new("check the logs")];
        let mut doc = TaskDocument::default();
        doc.tasks.insert("task1".to_string(), group);
        doc.tasks.insert("task2".to_string(), TaskGroup::new(2));
        doc
    }

    #[test]
    fn advance_from_unseen() {
        let tasks = two_hint_tasks();
        let step = HintNavigator::new(&tasks).advance("task1", &ProgressStore::new());

        assert_eq!(
            step.outcome,
            AdvanceOutcome::Revealed {
                index: 0,
                text: "look around".to_string()
            }
        );
        assert_eq!(step.store.unwrap().last_seen("task1"), Some(0));
    }

    #[test]
    fn advance_at_end_keeps_store() {
        let tasks = two_hint_tasks();
        let progress = ProgressStore::new().with_last_seen("task1", 1);
        let step = HintNavigator::new(&tasks).advance("task1", &progress);

        assert_eq!(step.outcome, AdvanceOutcome::NoMoreHints);
        assert!(step.store.is_none());
    }

    #[test]
    fn advance_on_task_without_hints() {
        let tasks = two_hint_tasks();
        let step = HintNavigator::new(&tasks).advance("task2", &ProgressStore::new());

        assert_eq!(step.outcome, AdvanceOutcome::NoMoreHints);
        assert!(step.store.is_none());
    }

    #[test]
    fn unknown_task_everywhere() {
        let tasks = two_hint_tasks();
        let nav = HintNavigator::new(&tasks);
        let progress = ProgressStore::new();

        assert_eq!(nav.advance("ghost", &progress).outcome, AdvanceOutcome::UnknownTask);
        assert_eq!(nav.reveal_up_to("ghost", &progress), RevealUpToOutcome::UnknownTask);
        assert_eq!(nav.reveal_one("ghost", 0), RevealOneOutcome::UnknownTask);
    }

    #[test]
    fn reveal_up_to_partial() {
        let tasks = two_hint_tasks();
        let progress = ProgressStore::new().with_last_seen("task1", 0);

        assert_eq!(
            HintNavigator::new(&tasks).reveal_up_to("task1", &progress),
            RevealUpToOutcome::Revealed {
                hints: vec!["look around".to_string()],
                exhausted: false
            }
        );
    }

    #[test]
    fn reveal_up_to_nothing_seen() {
        let tasks = two_hint_tasks();
        assert_eq!(
            HintNavigator::new(&tasks).reveal_up_to("task1", &ProgressStore::new()),
            RevealUpToOutcome::NothingSeen
        );
    }

    #[test]
    fn reveal_one_out_of_range() {
        let tasks = two_hint_tasks();
        assert_eq!(
            HintNavigator::new(&tasks).reveal_one("task1", 5),
            RevealOneOutcome::NoSuchHint { index: 5 }
        );
    }
}

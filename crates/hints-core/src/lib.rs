//! Scenario hints core
//!
//! Maintains per-scenario hint documents and tracks how far a user has paged
//! through the hints of each task.
//!
//! # Core Operations
//!
//! - **Migrate**: rewrite legacy `hints.yaml` documents into the versioned,
//!   task-grouped shape
//! - **Navigate**: reveal hints for a task one at a time, remembering
//!   progress across invocations
//!
//! # Architecture
//!
//! ```text
//! migrate:  ScenarioLocator → DocumentCodec (load) → transform → DocumentCodec (save)
//! navigate: DocumentCodec (tasks + progress) → HintNavigator → ProgressFile (save) → OutputSink
//! ```
//!
//! Every operation receives its collaborators explicitly, so tests can
//! substitute in-memory codecs and recording sinks.
//!
//! # Example
//!
//! ```rust,ignore
//! use hints_core::prelude::*;
//!
//! let ctx = NavigatorContext {
//!     codec: &YamlCodec,
//!     sink: &WriterSink::stdout(),
//!     tasks_path: Path::new("tasks.yaml"),
//!     progress_path: Path::new(".hints-progress.yaml"),
//! };
//! next_hint(&ctx, "task1")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod migrate;
pub mod navigator;
pub mod progress;
pub mod sink;
pub mod state_machine;
pub mod transform;

pub use codec::{DocumentCodec, YamlCodec};
pub use config::ToolConfig;
pub use document::{Hint, ScenarioDocV0, ScenarioDocV1, SchemaVersion, TaskDocument, TaskGroup};
pub use error::{CodecError, MigrateError, NavigatorError, ProgressError, TransformError};
pub use sink::{Level, OutputSink, WriterSink};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving migrations and hint navigation
    pub use crate::codec::{DocumentCodec, YamlCodec};
    pub use crate::config::ToolConfig;
    pub use crate::document::{TaskDocument, TaskGroup};
    pub use crate::error::{MigrateError, NavigatorError};
    pub use crate::migrate::{
        migrate_all, migrate_one, FsScenarioLocator, MigrationContext, MigrationReport,
        MigrationStatus, ScenarioLocator,
    };
    pub use crate::navigator::{
        next_hint, show_hint, show_hints, AdvanceOutcome, HintNavigator, NavigatorContext,
        RevealOneOutcome, RevealUpToOutcome,
    };
    pub use crate::progress::{ProgressFile, ProgressStore};
    pub use crate::sink::{OutputSink, WriterSink};
    pub use crate::transform::transform_v0_to_v1;
}

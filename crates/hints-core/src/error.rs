//! Error types for scenario hint tooling
//!
//! Provides error handling for:
//! - Document load/save (codec boundary)
//! - v0 → v1 transformation (malformed input)
//! - Migration orchestration
//! - Progress persistence and hint navigation
//!
//! Unknown tasks and exhausted hint lists are not errors; the navigator
//! reports them as outcomes.

use std::path::PathBuf;

/// Errors at the document codec boundary
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// IO error during file read or write
    #[error("io error on {path}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid YAML
    #[error("syntax error in {path}")]
    Syntax {
        /// Document that failed to parse
        path: PathBuf,
        /// Parser error with location
        #[source]
        source: serde_yaml::Error,
    },

    /// Document could not be serialized
    #[error("serialization failed for {path}")]
    Serialize {
        /// Destination of the document
        path: PathBuf,
        /// Serializer error
        #[source]
        source: serde_yaml::Error,
    },

    /// Document parsed but does not have the expected structure
    #[error("unexpected document structure in {path}: {message}")]
    Structure {
        /// Offending document
        path: PathBuf,
        /// What was expected
        message: String,
    },
}

impl CodecError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create structure error for path
    pub fn structure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Structure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the underlying cause is a missing file
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Errors while rewriting a v0 document into the v1 shape
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Hint string does not follow `<taskId>: <text>`
    #[error("malformed hint {hint:?}: {reason}")]
    MalformedHint {
        /// The rejected hint string
        hint: String,
        /// Why it was rejected
        reason: MalformedReason,
    },

    /// Hint value is not a string
    #[error("hint {key:?} is not a string")]
    NonStringHint {
        /// Key of the hint in the `hints` section
        key: String,
    },

    /// A required top-level section is absent
    #[error("missing section: {0}")]
    MissingSection(&'static str),

    /// Top-level document shape is neither v0 nor v1
    #[error("unrecognized document shape: {0}")]
    UnrecognizedShape(String),
}

impl TransformError {
    /// Create malformed hint error
    pub fn malformed(hint: impl Into<String>, reason: MalformedReason) -> Self {
        Self::MalformedHint {
            hint: hint.into(),
            reason,
        }
    }
}

/// Why a hint string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// No `": "` separator
    MissingSeparator,
    /// Separator present but nothing before it
    EmptyTaskId,
    /// Task id's last character is not an ASCII digit
    NoSortDigit,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::MissingSeparator => "missing \": \" separator",
            Self::EmptyTaskId => "empty task id",
            Self::NoSortDigit => "task id does not end in a digit",
        };
        f.write_str(reason)
    }
}

/// Errors during migration of one or many scenarios
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Loading or saving a hint document failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Hint document could not be transformed
    #[error("transform failed for {path}")]
    Transform {
        /// Hint document being migrated
        path: PathBuf,
        /// Transform failure
        #[source]
        source: TransformError,
    },

    /// Scenario directory could not be listed
    #[error("cannot enumerate scenarios under {path}")]
    Enumerate {
        /// Scenarios root
        path: PathBuf,
        /// Listing failure
        #[source]
        source: std::io::Error,
    },
}

/// Errors reading or writing the progress store
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Progress file could not be read or written
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Progress entry is not a non-negative integer
    #[error("invalid progress entry for task {task:?}")]
    InvalidEntry {
        /// Key of the rejected entry
        task: String,
    },
}

/// Errors while navigating hints
#[derive(Debug, thiserror::Error)]
pub enum NavigatorError {
    /// Task document could not be loaded
    #[error("cannot load task document")]
    TaskDocument(#[from] CodecError),

    /// Progress store could not be loaded or persisted
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_hint_display() {
        let err = TransformError::malformed("task: nope", MalformedReason::NoSortDigit);
        assert_eq!(
            err.to_string(),
            "malformed hint \"task: nope\": task id does not end in a digit"
        );
    }

    #[test]
    fn not_found_detection() {
        let err = CodecError::io_error(
            "missing.yaml",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_not_found());

        let err = CodecError::io_error(
            "locked.yaml",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(!err.is_not_found());
    }

    fn chain(err: &dyn std::error::Error) -> Vec<String> {
        std::iter::successors(Some(err), |e| e.source())
            .map(ToString::to_string)
            .collect()
    }

    fn missing(path: &str) -> CodecError {
        CodecError::io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        )
    }

    #[test]
    fn error_conversions() {
        let codec = CodecError::structure("tasks.yaml", "not a mapping");
        let nav: NavigatorError = codec.into();
        assert!(matches!(nav, NavigatorError::TaskDocument(_)));

        let progress: ProgressError = missing("progress.yaml").into();
        let nav: NavigatorError = progress.into();
        assert!(matches!(nav, NavigatorError::Progress(ProgressError::Codec(_))));
    }

    #[test]
    fn cause_chain_names_each_cause_once() {
        let nav = NavigatorError::from(missing("missing.yaml"));
        assert_eq!(
            chain(&nav),
            vec!["cannot load task document", "io error on missing.yaml", "no such file"]
        );

        let nav = NavigatorError::from(ProgressError::from(missing("progress.yaml")));
        assert_eq!(chain(&nav), vec!["io error on progress.yaml", "no such file"]);

        let migrate = MigrateError::Transform {
            path: "s/hints.yaml".into(),
            source: TransformError::malformed("oops", MalformedReason::MissingSeparator),
        };
        assert_eq!(
            chain(&migrate),
            vec![
                "transform failed for s/hints.yaml",
                "malformed hint \"oops\": missing \": \" separator"
            ]
        );
    }
}

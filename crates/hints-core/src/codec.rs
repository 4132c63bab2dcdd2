//! Document codec boundary
//!
//! The only place that touches hint and progress files. Everything above
//! this layer works with parsed trees, so tests can swap in an in-memory
//! codec.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_yaml::Value;

use crate::error::CodecError;

/// Load and save structured documents
pub trait DocumentCodec {
    /// Parse the document at `path` into a tree
    ///
    /// # Errors
    /// Returns [`CodecError`] if the file cannot be read or parsed.
    fn load(&self, path: &Path) -> Result<Value, CodecError>;

    /// Serialize `doc` and overwrite the file at `path`
    ///
    /// # Errors
    /// Returns [`CodecError`] if serialization or the write fails.
    fn save(&self, path: &Path, doc: &Value) -> Result<(), CodecError>;
}

/// Load a document and deserialize it into `T`
///
/// # Errors
/// Returns [`CodecError::Structure`] when the tree does not match `T`.
pub fn load_typed<T: DeserializeOwned>(
    codec: &dyn DocumentCodec,
    path: &Path,
) -> Result<T, CodecError> {
    let value = codec.load(path)?;
    serde_yaml::from_value(value).map_err(|e| CodecError::structure(path, e.to_string()))
}

/// Serialize `doc` into a tree and save it
///
/// # Errors
/// Returns [`CodecError::Serialize`] if `doc` cannot be represented as YAML.
pub fn save_typed<T: Serialize>(
    codec: &dyn DocumentCodec,
    path: &Path,
    doc: &T,
) -> Result<(), CodecError> {
    let value = serde_yaml::to_value(doc).map_err(|source| CodecError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    codec.save(path, &value)
}

/// YAML files on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl YamlCodec {
    /// Create new YAML codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentCodec for YamlCodec {
    fn load(&self, path: &Path) -> Result<Value, CodecError> {
        tracing::debug!("Loading {}", path.display());
        let content =
            std::fs::read_to_string(path).map_err(|e| CodecError::io_error(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| CodecError::Syntax {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save(&self, path: &Path, doc: &Value) -> Result<(), CodecError> {
        tracing::debug!("Writing {}", path.display());
        let content = serde_yaml::to_string(doc).map_err(|source| CodecError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(|e| CodecError::io_error(path, e))
    }
}

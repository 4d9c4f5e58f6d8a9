//! Offline Generation Service answering from a JSON fixture file.
//!
//! The fixture is one JSON object keyed by shape name:
//!
//! ```json
//! {
//!   "architecture": { "overview": "...", "tech_stack": [], "modules": [] },
//!   "generated_file": [ { "path": "a.ts", ... }, { "path": "b.ts", ... } ],
//!   "text": "free text answer"
//! }
//! ```
//!
//! An array value is served one entry per call, wrapping around at the end.

use async_trait::async_trait;
use buildcrew_application::{GenerationError, GenerationService};
use buildcrew_domain::ResponseShape;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Key used for `generate_text` answers
const TEXT_KEY: &str = "text";

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Fixture must be a JSON object keyed by shape name")]
    NotAnObject,
}

pub struct FixtureGenerationService {
    entries: Map<String, Value>,
    cursors: Mutex<HashMap<String, usize>>,
}

impl FixtureGenerationService {
    pub fn from_value(value: Value) -> Result<Self, FixtureError> {
        match value {
            Value::Object(entries) => Ok(Self {
                entries,
                cursors: Mutex::new(HashMap::new()),
            }),
            _ => Err(FixtureError::NotAnObject),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value = serde_json::from_str(&text).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(value)
    }

    /// Shape names this fixture can answer
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn next(&self, key: &str) -> Result<Value, GenerationError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| GenerationError::Other(format!("no fixture entry for '{}'", key)))?;

        match entry {
            Value::Array(items) if items.is_empty() => Err(GenerationError::Other(format!(
                "fixture entry '{}' is empty",
                key
            ))),
            Value::Array(items) => {
                let mut cursors = self
                    .cursors
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                let cursor = cursors.entry(key.to_string()).or_default();
                let item = items[*cursor % items.len()].clone();
                *cursor += 1;
                Ok(item)
            }
            other => Ok(other.clone()),
        }
    }
}

#[async_trait]
impl GenerationService for FixtureGenerationService {
    async fn generate_structured(
        &self,
        _prompt: &str,
        shape: &ResponseShape,
    ) -> Result<Value, GenerationError> {
        debug!("Serving fixture for '{}'", shape.name);
        self.next(shape.name)
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
        match self.next(TEXT_KEY)? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }
}

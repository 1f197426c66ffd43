//! Page data provider for the template rule.
//!
//! Loads one JSON document per page key from the data directory at startup
//! into an immutable map; template resolution looks its key up
//! synchronously. The store never changes mid-build.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde_json::Value as JsonValue;

use crate::debug;

/// Immutable page-key → data map.
#[derive(Debug, Default)]
pub struct PageStore {
    dir: PathBuf,
    data: FxHashMap<String, JsonValue>,
}

impl PageStore {
    /// Load every `<key>.json` document under `dir`.
    ///
    /// A missing directory yields an empty store (projects without
    /// templates never touch it); a present but malformed document is an
    /// error.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut data = FxHashMap::default();

        if dir.is_dir() {
            for entry in fs::read_dir(dir)
                .with_context(|| format!("cannot read page data directory {}", dir.display()))?
            {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let content = fs::read_to_string(&path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                let value: JsonValue = serde_json::from_str(&content)
                    .with_context(|| format!("invalid JSON in {}", path.display()))?;
                data.insert(key.to_string(), value);
            }
            debug!("pages"; "loaded {} page data document(s) from {}", data.len(), dir.display());
        } else {
            debug!("pages"; "no page data directory at {}", dir.display());
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            data,
        })
    }

    /// Empty store rooted at `dir` (for tests and template-free projects).
    pub fn empty(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            data: FxHashMap::default(),
        }
    }

    /// Synchronous lookup by page key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// Where a key's document would live - used in error messages.
    pub fn expected_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

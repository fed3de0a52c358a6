//! Field-level movie cache.
//!
//! The cache maps a query key (the lowercased input line) to a record of
//! named fields. It lives in memory for the duration of a run and is
//! written back as one JSON document.
//!
//! Writes to disk happen only on [`FieldCache::persist`] and
//! [`FieldCache::delete`]. [`FieldCache::set`] stays in memory; callers flush
//! after each unit of work.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use marquee_common::{Error, FieldValue, Result};
use tracing::{debug, info};

/// Fields stored for one movie.
pub type MovieRecord = BTreeMap<String, FieldValue>;

/// In-memory view of the cache file.
#[derive(Debug)]
pub struct FieldCache {
    path: PathBuf,
    movies: BTreeMap<String, MovieRecord>,
}

impl FieldCache {
    /// Open the cache at `path`, creating an empty cache file if none exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let movies = if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            };
            let cache = Self { path, movies };
            debug!(path = ?cache.path, movies = cache.len(), "Loaded movie cache");
            return Ok(cache);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let cache = Self {
            path,
            movies: BTreeMap::new(),
        };
        cache.persist()?;
        info!(path = ?cache.path, "Created empty movie cache");
        Ok(cache)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.movies.contains_key(key)
    }

    pub fn record(&self, key: &str) -> Option<&MovieRecord> {
        self.movies.get(key)
    }

    /// Insert or overwrite one field, creating the record if needed.
    pub fn set(&mut self, key: &str, field: &str, value: impl Into<FieldValue>) {
        self.movies
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
    }

    /// The stored value, if the field has ever been written.
    pub fn value(&self, key: &str, field: &str) -> Option<&FieldValue> {
        self.movies.get(key).and_then(|record| record.get(field))
    }

    /// Whether the field has been written, even with an empty value.
    pub fn has(&self, key: &str, field: &str) -> bool {
        self.value(key, field).is_some()
    }

    /// The field rendered as text; `""` when the record or field is absent.
    pub fn get(&self, key: &str, field: &str) -> String {
        self.value(key, field)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// The field as a number; `0.0` when absent or not numeric.
    pub fn get_number(&self, key: &str, field: &str) -> f64 {
        self.value(key, field)
            .and_then(FieldValue::as_number)
            .unwrap_or(0.0)
    }

    /// Remove a movie and persist immediately. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        if self.movies.remove(key).is_none() {
            return Ok(false);
        }
        self.persist()?;
        info!(query = %key, "Deleted movie from cache");
        Ok(true)
    }

    /// Every field name seen on any record.
    pub fn all_field_names(&self) -> BTreeSet<String> {
        self.movies
            .values()
            .flat_map(|record| record.keys().cloned())
            .collect()
    }

    /// Write the whole document back to disk.
    ///
    /// The document goes to a temporary file in the same directory first and
    /// is then renamed over the cache file, so a crash leaves either the old
    /// or the new document, never a partial one.
    pub fn persist(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let json = serde_json::to_string_pretty(&self.movies)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        debug!(path = ?self.path, movies = self.len(), "Persisted movie cache");
        Ok(())
    }
}

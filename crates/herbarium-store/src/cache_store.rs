//! Durable TTL cache for pipeline stage outputs
//!
//! One JSON file per asset key. Each entry stores the key, the computed
//! value, and the epoch second it was written. A lookup deserializes the
//! stored value into the caller's type, and a miss returns the computed
//! value through the same serde round trip, so hits and misses are
//! indistinguishable to callers.
//!
//! Failure policy:
//! - unreadable or corrupt entries count as misses and get rewritten
//! - compute errors propagate unchanged and write nothing
//! - IO errors while persisting fail the lookup

use crate::error::StoreError;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Freshness window for cached entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTtl {
    /// Entries older than this many seconds are recomputed
    Seconds(u64),
    /// Entries never expire
    Unbounded,
}

impl CacheTtl {
    /// Parse a TTL string: "90s", "30m", "4h", "1d", a bare number of
    /// seconds, or "unbounded"
    pub fn parse(s: &str) -> Result<CacheTtl, StoreError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unbounded") || trimmed == "*" {
            return Ok(CacheTtl::Unbounded);
        }

        let (digits, multiplier) = match trimmed.chars().last() {
            Some('s') => (&trimmed[..trimmed.len() - 1], 1),
            Some('m') => (&trimmed[..trimmed.len() - 1], 60),
            Some('h') => (&trimmed[..trimmed.len() - 1], 3600),
            Some('d') => (&trimmed[..trimmed.len() - 1], 86400),
            _ => (trimmed, 1),
        };

        let seconds: u64 = digits
            .trim()
            .parse()
            .map_err(|_| StoreError::invalid_ttl(format!("cannot parse '{}'", s)))?;
        Ok(CacheTtl::Seconds(seconds * multiplier))
    }

    /// Whether an entry written at `stored_at` is still fresh at `now`
    ///
    /// Ages are compared in whole seconds; an entry exactly as old as the
    /// window is still fresh.
    pub fn is_fresh(&self, stored_at: i64, now: i64) -> bool {
        match self {
            CacheTtl::Unbounded => true,
            CacheTtl::Seconds(limit) => {
                let limit = i64::try_from(*limit).unwrap_or(i64::MAX);
                now.saturating_sub(stored_at) <= limit
            }
        }
    }
}

/// On-disk representation of one cached asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    /// Epoch seconds at write time
    pub stored_at: i64,
}

/// Entry count and total size of a cache directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub total_bytes: u64,
}

/// File-per-key cache rooted at a directory
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open a cache directory, creating it if needed
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, StoreError> {
        let root = dir.into();
        fs::create_dir_all(&root)?;
        Ok(CacheStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the cached value for `key` when fresh, otherwise run
    /// `compute`, persist its output, and return it
    ///
    /// # Arguments
    /// * `key` - Asset key, sanitized into the entry file name
    /// * `ttl` - Freshness window applied to an existing entry
    /// * `compute` - Producer invoked on a miss; its error type only needs
    ///   a conversion from `StoreError` so store failures surface through
    ///   the same channel
    pub fn get_or_compute<T, E, F>(&self, key: &str, ttl: CacheTtl, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<StoreError>,
        F: FnOnce() -> Result<T, E>,
    {
        let path = self.entry_path(key).map_err(E::from)?;
        let now = Utc::now().timestamp();

        if let Some(entry) = read_entry(&path) {
            if ttl.is_fresh(entry.stored_at, now) {
                match serde_json::from_value::<T>(entry.value) {
                    Ok(value) => {
                        log::debug!("Cache hit for '{}'", key);
                        return Ok(value);
                    }
                    Err(e) => {
                        log::warn!(
                            "Cache entry for '{}' has an unexpected shape, recomputing: {}",
                            key,
                            e
                        );
                    }
                }
            } else {
                log::debug!("Cache entry for '{}' is stale, recomputing", key);
            }
        }

        let computed = compute()?;
        let value = serde_json::to_value(&computed).map_err(|e| E::from(StoreError::from(e)))?;

        let entry = CacheEntry {
            key: key.to_string(),
            value,
            stored_at: now,
        };
        write_entry(&path, &entry).map_err(E::from)?;
        log::debug!("Cached '{}'", key);

        // Hand back the persisted shape so hits and misses are identical
        serde_json::from_value(entry.value).map_err(|e| E::from(StoreError::from(e)))
    }

    /// Remove a single entry; removing a missing entry is not an error
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::from(e)),
        }
    }

    /// Delete every entry, returning how many were removed
    pub fn clear(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Count entries and bytes currently on disk
    pub fn stats(&self) -> Result<CacheStats, StoreError> {
        let mut stats = CacheStats::default();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if dir_entry.path().extension().and_then(|ext| ext.to_str()) == Some("json") {
                stats.entries += 1;
                stats.total_bytes += dir_entry.metadata()?.len();
            }
        }
        Ok(stats)
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(format!("{}.json", sanitize_key(key)?)))
    }
}

/// Map an asset key to a safe file stem
///
/// Characters outside `[A-Za-z0-9._-]` become `-`. Keys that sanitize to
/// nothing but dots and dashes are rejected so an entry can never escape
/// the cache directory.
pub(crate) fn sanitize_key(key: &str) -> Result<String, StoreError> {
    if key.is_empty() {
        return Err(StoreError::invalid_key("key cannot be empty"));
    }
    let sanitized: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if sanitized.chars().all(|c| matches!(c, '.' | '-')) {
        return Err(StoreError::invalid_key(format!(
            "key '{}' has no usable characters",
            key
        )));
    }
    Ok(sanitized)
}

fn read_entry(path: &Path) -> Option<CacheEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Unreadable cache entry {}: {}", path.display(), e);
            }
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("Corrupt cache entry {}: {}", path.display(), e);
            None
        }
    }
}

fn write_entry(path: &Path, entry: &CacheEntry) -> Result<(), StoreError> {
    let content = serde_json::to_string(entry)?;
    fs::write(path, content)?;
    Ok(())
}

//! The small persistent key-value cache the dispatcher uses to save CLI
//! state between invocations (§6). The spec marks the cache out of scope
//! as a *component* to design, but the dispatcher needs a real one to run
//! against, so [`FileCache`] stores one JSON file per key under a
//! directory — the default, like the teacher's `MockStdin`/`MockClipboard`
//! alongside every `standout-input::env` trait, ships a concrete
//! implementation rather than leaving the trait naked.

use std::fs;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};

use crate::env::{Env, COMMAND_CLI_CACHE};
use crate::error::{SourcererError, SourcererResult};

static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// The persistence collaborator (§6): get/put/delete/list opaque blobs
/// keyed by a validated string, plus typed struct helpers on top.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> SourcererResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> SourcererResult<()>;
    fn delete(&self, key: &str) -> SourcererResult<()>;
    fn list(&self) -> SourcererResult<Vec<String>>;

    fn get_struct<T: DeserializeOwned>(&self, key: &str) -> SourcererResult<Option<T>> {
        match self.get(key)? {
            Some(blob) => {
                let value = serde_json::from_str(&blob).map_err(|e| SourcererError::Cache(Box::new(e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn put_struct<T: Serialize>(&self, key: &str, value: &T) -> SourcererResult<()> {
        let blob = serde_json::to_string(value).map_err(|e| SourcererError::Cache(Box::new(e)))?;
        self.put(key, &blob)
    }
}

fn validate_key(key: &str) -> SourcererResult<()> {
    if KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(SourcererError::InvalidCacheKey)
    }
}

/// One JSON file per key, under a directory that defaults to
/// `std::env::temp_dir()` (no `dirs`/`directories` crate is available in
/// this workspace's dependency pool) joined with `switchyard-cache`,
/// overridable via `COMMAND_CLI_CACHE`.
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the cache directory the way the dispatcher does at
    /// startup: `COMMAND_CLI_CACHE` if set, else a fixed subdirectory of
    /// the platform temp directory.
    pub fn from_env(env: &dyn Env) -> Self {
        let dir = env
            .var(COMMAND_CLI_CACHE)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("switchyard-cache"));
        Self::new(dir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("leep-frog-cache-key-{key}.json"))
    }

    fn ensure_dir(&self) -> SourcererResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| SourcererError::Cache(Box::new(e)))
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> SourcererResult<Option<String>> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourcererError::Cache(Box::new(e))),
        }
    }

    fn put(&self, key: &str, value: &str) -> SourcererResult<()> {
        validate_key(key)?;
        self.ensure_dir()?;
        fs::write(self.path_for(key), value).map_err(|e| SourcererError::Cache(Box::new(e)))
    }

    fn delete(&self, key: &str) -> SourcererResult<()> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SourcererError::Cache(Box::new(e))),
        }
    }

    fn list(&self) -> SourcererResult<Vec<String>> {
        let prefix = "leep-frog-cache-key-";
        let suffix = ".json";
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SourcererError::Cache(Box::new(e))),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourcererError::Cache(Box::new(e)))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(key) = name.strip_prefix(prefix).and_then(|s| s.strip_suffix(suffix)) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }
}

/// The per-CLI cache key §4.J names: `leep-frog-cache-key-<name>.json`
/// minus the path/suffix `FileCache` itself adds.
pub fn cache_key_for_cli(name: &str) -> String {
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Scenario from §8: Cache is empty, Get on a missing key reports
    // absence rather than an error.
    #[test]
    fn get_missing_key_reports_absence() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        assert_eq!(cache.get("uh").unwrap(), None);
    }

    // Scenario from §8: Put then Get round-trips; a different key is
    // still absent.
    #[test]
    fn put_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.put("abc", "def").unwrap();
        assert_eq!(cache.get("abc").unwrap(), Some("def".to_string()));
        assert_eq!(cache.get("xyz").unwrap(), None);
    }

    // Scenario from §8: an invalid key reports the fixed message verbatim.
    #[test]
    fn invalid_key_reports_fixed_message() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let err = cache.put(".?.", "x").unwrap_err();
        assert_eq!(err.to_string(), "failed to get file for key: invalid key format");
    }

    #[test]
    fn delete_missing_key_is_not_an_error() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.delete("nope").unwrap();
    }

    #[test]
    fn list_returns_only_known_keys() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.put("abc", "1").unwrap();
        cache.put("xyz", "2").unwrap();
        let mut keys = cache.list().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["abc".to_string(), "xyz".to_string()]);
    }

    #[test]
    fn typed_struct_round_trips_through_json() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct State {
            count: u32,
        }
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        cache.put_struct("state", &State { count: 3 }).unwrap();
        let loaded: Option<State> = cache.get_struct("state").unwrap();
        assert_eq!(loaded, Some(State { count: 3 }));
    }

    #[test]
    fn from_env_honors_override() {
        let dir = tempdir().unwrap();
        let env = crate::env::MockEnv::new()
            .with_var(COMMAND_CLI_CACHE, dir.path().to_string_lossy().to_string());
        let cache = FileCache::from_env(&env);
        assert_eq!(cache.dir, dir.path());
    }
}

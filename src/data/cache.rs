//! JSON file cache for weapon records and curves
//!
//! Fetching is the caller's job; the cache only decides whether a fetch is
//! needed and writes the result back.

use crate::data::curves::{curves_from_json, curves_to_json};
use crate::data::loader::build_dataset;
use crate::data::records::WeaponRecord;
use crate::error::{BuildError, Result};
use crate::model::{CurveTable, Dataset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const WEAPONS_FILE: &str = "weapons.json";
pub const MISC_FILE: &str = "misc.json";

fn default_persist() -> bool {
    true
}

/// When to bypass and when to refresh a cached file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadPolicy {
    /// Skip the cache and always fetch
    #[serde(default)]
    pub force: bool,
    /// Write fetched data back to the cache
    #[serde(default = "default_persist")]
    pub persist: bool,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            force: false,
            persist: default_persist(),
        }
    }
}

/// Read through `load` unless forced or missing, otherwise `fetch` and
/// optionally `save`. Errors other than a missing file are returned as is.
pub fn load_or_fetch<T, L, S, F>(policy: LoadPolicy, load: L, save: S, fetch: F) -> Result<T>
where
    L: FnOnce() -> Result<T>,
    S: FnOnce(&T) -> Result<()>,
    F: FnOnce() -> Result<T>,
{
    if !policy.force {
        match load() {
            Ok(value) => return Ok(value),
            Err(BuildError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("cache miss, fetching");
            }
            Err(e) => return Err(e),
        }
    }

    let value = fetch()?;
    if policy.persist {
        save(&value)?;
    }
    Ok(value)
}

/// Cache directory holding `weapons.json` and `misc.json`
#[derive(Debug, Clone)]
pub struct DataCache {
    root: PathBuf,
}

impl DataCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn weapons_path(&self) -> PathBuf {
        self.root.join(WEAPONS_FILE)
    }

    pub fn misc_path(&self) -> PathBuf {
        self.root.join(MISC_FILE)
    }

    pub fn read_weapons(&self) -> Result<Vec<WeaponRecord>> {
        let json = fs::read_to_string(self.weapons_path())?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn write_weapons(&self, weapons: &[WeaponRecord]) -> Result<()> {
        self.write(&self.weapons_path(), &serde_json::to_string(weapons)?)
    }

    pub fn read_curves(&self) -> Result<CurveTable> {
        curves_from_json(&fs::read_to_string(self.misc_path())?)
    }

    pub fn write_curves(&self, curves: &CurveTable) -> Result<()> {
        self.write(&self.misc_path(), &curves_to_json(curves)?)
    }

    pub fn weapons<F>(&self, policy: LoadPolicy, fetch: F) -> Result<Vec<WeaponRecord>>
    where
        F: FnOnce() -> Result<Vec<WeaponRecord>>,
    {
        load_or_fetch(
            policy,
            || self.read_weapons(),
            |weapons| self.write_weapons(weapons),
            fetch,
        )
    }

    pub fn curves<F>(&self, policy: LoadPolicy, fetch: F) -> Result<CurveTable>
    where
        F: FnOnce() -> Result<CurveTable>,
    {
        load_or_fetch(
            policy,
            || self.read_curves(),
            |curves| self.write_curves(curves),
            fetch,
        )
    }

    /// Build a dataset from cached files only
    pub fn load_dataset(&self) -> Result<Dataset> {
        let records = self.read_weapons()?;
        let curves = self.read_curves()?;
        tracing::debug!(root = %self.root.display(), "loaded cached data");
        build_dataset(&records, curves)
    }

    fn write(&self, path: &Path, json: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), bytes = json.len(), "wrote cache file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::curve_table;
    use std::cell::Cell;

    fn sample_records() -> Vec<WeaponRecord> {
        let json = serde_json::json!([{
            "name": "Dagger",
            "id": "1",
            "weapon_type": "Dagger",
            "weight": 1.5,
            "strength_req": 5,
            "dex_req": 12,
            "intelligence_req": 0,
            "faith_req": 0,
            "base_damage": [95, 0, 0, 0, 0],
            "scaling_coefficients": [20, 60, 0, 0, 0],
            "stat_funcs": [1, 0, 0, 0, 0]
        }]);
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_fetches_and_persists_on_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path().join("cache"));
        let fetched = Cell::new(0);

        let records = cache
            .weapons(LoadPolicy::default(), || {
                fetched.set(fetched.get() + 1);
                Ok(sample_records())
            })
            .unwrap();
        assert_eq!(records, sample_records());
        assert!(cache.weapons_path().exists());

        let again = cache
            .weapons(LoadPolicy::default(), || {
                fetched.set(fetched.get() + 1);
                Ok(Vec::new())
            })
            .unwrap();
        assert_eq!(again, sample_records());
        assert_eq!(fetched.get(), 1);
    }

    #[test]
    fn test_force_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        cache.write_weapons(&sample_records()).unwrap();

        let policy = LoadPolicy {
            force: true,
            persist: false,
        };
        let records = cache.weapons(policy, || Ok(Vec::new())).unwrap();
        assert!(records.is_empty());
        // not persisted
        assert_eq!(cache.read_weapons().unwrap(), sample_records());
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        fs::write(cache.misc_path(), "not json").unwrap();

        let result = cache.curves(LoadPolicy::default(), || Ok(curve_table()));
        assert!(matches!(result, Err(BuildError::DeserializationError(_))));
    }

    #[test]
    fn test_fetch_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        let result = cache.curves(LoadPolicy::default(), || {
            Err(BuildError::DeserializationError("upstream down".to_string()))
        });
        assert!(result.is_err());
        assert!(!cache.misc_path().exists());
    }

    #[test]
    fn test_dataset_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path());
        cache.write_weapons(&sample_records()).unwrap();
        cache.write_curves(&curve_table()).unwrap();

        let dataset = cache.load_dataset().unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.curves().len(), 2);
        let dagger = dataset.find("Dagger").unwrap();
        assert_eq!(dagger.infusions.present(), 1);
    }

    #[test]
    fn test_missing_cache_dataset_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DataCache::new(dir.path().join("absent"));
        assert!(matches!(cache.load_dataset(), Err(BuildError::Io(_))));
    }
}

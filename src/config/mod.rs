//! Optimizer configuration
//!
//! Settings come from JSON (or a Python dict under the `python` feature);
//! every field falls back to the defaults used by the charts.

use crate::data::{DataCache, LoadPolicy};
use crate::error::{BuildError, Result};
use crate::model::{Levels, ATTRIBUTE_COUNT, MAX_LEVEL};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Optimizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Starting levels in STR, DEX, INT, FTH, LCK order
    #[serde(default = "default_base_levels")]
    pub base_levels: Levels,
    /// Largest budget charted; budgets run `0..=max_points`
    #[serde(default = "default_max_points")]
    pub max_points: i32,
    #[serde(default)]
    pub weapons: LoadPolicy,
    #[serde(default)]
    pub curves: LoadPolicy,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".darksouls/cache")
}

fn default_base_levels() -> Levels {
    [10; ATTRIBUTE_COUNT]
}

fn default_max_points() -> i32 {
    19
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            base_levels: default_base_levels(),
            max_points: default_max_points(),
            weapons: LoadPolicy::default(),
            curves: LoadPolicy::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Reject levels outside [0, 99] and negative budgets
    pub fn validate(self) -> Result<Self> {
        if let Some(level) = self
            .base_levels
            .iter()
            .find(|l| !(0..=MAX_LEVEL).contains(*l))
        {
            return Err(BuildError::InvalidConfig(format!(
                "base level {} outside 0..={}",
                level, MAX_LEVEL
            )));
        }
        if self.max_points < 0 {
            return Err(BuildError::InvalidConfig(format!(
                "max_points must be non-negative, got {}",
                self.max_points
            )));
        }
        Ok(self)
    }

    pub fn budgets(&self) -> RangeInclusive<i32> {
        0..=self.max_points
    }

    pub fn cache(&self) -> DataCache {
        DataCache::new(&self.cache_dir)
    }
}

#[cfg(feature = "python")]
mod python {
    use super::OptimizerConfig;
    use crate::data::LoadPolicy;
    use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
    use pyo3::{Bound, PyResult};

    fn get_opt<'py>(dict: &Bound<'py, PyDict>, name: &str) -> PyResult<Option<Bound<'py, pyo3::PyAny>>> {
        Ok(dict.get_item(name)?.filter(|v| !v.is_none()))
    }

    fn extract_policy(dict: &Bound<'_, PyDict>, prefix: &str) -> PyResult<LoadPolicy> {
        let mut policy = LoadPolicy::default();
        if let Some(v) = get_opt(dict, &format!("{}_force", prefix))? {
            policy.force = v.extract()?;
        }
        if let Some(v) = get_opt(dict, &format!("{}_persist", prefix))? {
            policy.persist = v.extract()?;
        }
        Ok(policy)
    }

    impl OptimizerConfig {
        /// Build from a flat Python dict; missing or `None` keys keep defaults
        pub fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
            let mut config = Self::default();
            if let Some(v) = get_opt(dict, "cache_dir")? {
                config.cache_dir = v.extract::<String>()?.into();
            }
            if let Some(v) = get_opt(dict, "base_levels")? {
                config.base_levels = v.extract()?;
            }
            if let Some(v) = get_opt(dict, "max_points")? {
                config.max_points = v.extract()?;
            }
            config.weapons = extract_policy(dict, "weapons")?;
            config.curves = extract_policy(dict, "curves")?;
            Ok(config.validate()?)
        }
    }
}

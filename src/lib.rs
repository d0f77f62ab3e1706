//! Souls Build Core - weapon stat allocation optimizer
//!
//! Given a weapon, a starting set of attribute levels and a number of points
//! to spend, finds the allocations that maximize attack rating for each of
//! the weapon's infusions. Python bindings are available behind the `python`
//! feature.

pub mod config;
pub mod data;
pub mod error;
pub mod formula;
pub mod model;
pub mod report;
pub mod search;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "python")]
mod python {
    use crate::config::OptimizerConfig;
    use crate::data::{
        build_dataset, curves_from_json, curves_from_pages, weapon_page_len, weapons_from_pages,
        WeaponRecord,
    };
    use crate::error::{BuildError, Result};
    use crate::model::{Dataset, InfusionKind};
    use crate::report::{self, to_py, InfusionReport, LevelReport};
    use crate::search;
    use once_cell::sync::OnceCell;
    use parking_lot::RwLock;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;
    use serde_json::Value;
    use std::sync::Arc;

    // ========================================================================
    // Cached Data
    // ========================================================================

    /// Loaded dataset and the settings it was loaded with
    struct CachedData {
        dataset: Dataset,
        config: OptimizerConfig,
    }

    /// Global cached data
    static CACHED_DATA: OnceCell<Arc<RwLock<CachedData>>> = OnceCell::new();

    fn install(cached: CachedData) {
        tracing::debug!(weapons = cached.dataset.len(), "installing dataset");
        // reloading replaces the dataset in place
        if let Some(existing) = CACHED_DATA.get() {
            *existing.write() = cached;
        } else {
            let _ = CACHED_DATA.set(Arc::new(RwLock::new(cached)));
        }
    }

    fn cached() -> PyResult<Arc<RwLock<CachedData>>> {
        CACHED_DATA.get().cloned().ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
                "Data not initialized. Call init_data() or load_cached_data() first.",
            )
        })
    }

    fn config_from(config: Option<&Bound<'_, PyDict>>) -> PyResult<OptimizerConfig> {
        match config {
            Some(dict) => OptimizerConfig::from_py_dict(dict),
            None => Ok(OptimizerConfig::default()),
        }
    }

    fn parse_pages(json: &str) -> Result<Vec<Value>> {
        Ok(serde_json::from_str(json)?)
    }

    // ========================================================================
    // Python Functions
    // ========================================================================

    /// Load weapons and curves from their cached JSON forms
    ///
    /// # Arguments
    /// * `weapons_json` - JSON list of weapon records
    /// * `curves_json` - JSON object of curve id to fractional multipliers
    /// * `config` - Optional settings dict (cache_dir, base_levels, max_points, ...)
    #[pyfunction]
    #[pyo3(signature = (weapons_json, curves_json, config=None))]
    fn init_data(weapons_json: &str, curves_json: &str, config: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
        let config = config_from(config)?;
        let records: Vec<WeaponRecord> = serde_json::from_str(weapons_json).map_err(BuildError::from)?;
        let curves = curves_from_json(curves_json)?;
        let dataset = build_dataset(&records, curves)?;
        install(CachedData { dataset, config });
        Ok(())
    }

    /// Load from raw upstream pages and write them to the cache when the
    /// config asks for it
    ///
    /// # Arguments
    /// * `weapon_pages_json` - JSON list of weapon API pages
    /// * `misc_pages_json` - JSON list of misc API pages holding the curves
    #[pyfunction]
    #[pyo3(signature = (weapon_pages_json, misc_pages_json, config=None))]
    fn init_from_pages(
        weapon_pages_json: &str,
        misc_pages_json: &str,
        config: Option<&Bound<'_, PyDict>>,
    ) -> PyResult<()> {
        let config = config_from(config)?;
        let cache = config.cache();

        let records = weapons_from_pages(&parse_pages(weapon_pages_json)?)?;
        let curves = curves_from_pages(&parse_pages(misc_pages_json)?)?;
        if config.weapons.persist {
            cache.write_weapons(&records)?;
        }
        if config.curves.persist {
            cache.write_curves(&curves)?;
        }

        let dataset = build_dataset(&records, curves)?;
        install(CachedData { dataset, config });
        Ok(())
    }

    /// Entries on one weapon API page; the host stops paging at 0
    #[pyfunction]
    #[pyo3(name = "weapon_page_len")]
    fn py_weapon_page_len(page_json: &str) -> PyResult<usize> {
        let page: Value = serde_json::from_str(page_json).map_err(BuildError::from)?;
        Ok(weapon_page_len(&page))
    }

    /// Load from the cache directory named in `config`
    #[pyfunction]
    #[pyo3(signature = (config=None))]
    fn load_cached_data(config: Option<&Bound<'_, PyDict>>) -> PyResult<usize> {
        let config = config_from(config)?;
        let dataset = config.cache().load_dataset()?;
        let weapons = dataset.len();
        install(CachedData { dataset, config });
        Ok(weapons)
    }

    #[pyfunction]
    fn is_data_initialized() -> bool {
        CACHED_DATA.get().is_some()
    }

    /// Best builds for every infusion of one weapon
    ///
    /// # Arguments
    /// * `weapon` - Weapon name
    /// * `points` - Points to spend
    /// * `levels` - Starting levels (default: configured base levels)
    #[pyfunction]
    #[pyo3(signature = (weapon, points, levels=None))]
    fn max_level(weapon: &str, points: i32, levels: Option<[i32; 5]>) -> PyResult<Vec<InfusionReport>> {
        let data_arc = cached()?;
        let data = data_arc.read();
        let weapon = data.dataset.find(weapon)?;
        let levels = levels.unwrap_or(data.config.base_levels);

        Ok(weapon
            .max_level(levels, points)
            .map(|best| InfusionReport::new(weapon, best))
            .collect())
    }

    /// Best AR per infusion for each configured budget
    #[pyfunction]
    fn find_levels() -> PyResult<LevelReport> {
        let data_arc = cached()?;
        let data = data_arc.read();
        let table = report::find_levels(
            data.dataset.weapons(),
            data.config.base_levels,
            data.config.budgets(),
        );
        Ok(LevelReport::new(table))
    }

    /// `find_levels` on a blocking thread, so the event loop stays free
    ///
    /// # Returns
    /// A Python awaitable that resolves to a LevelReport
    #[pyfunction]
    fn find_levels_async(py: Python<'_>) -> PyResult<Bound<'_, PyAny>> {
        let data_arc = cached()?;

        pyo3_async_runtimes::tokio::future_into_py(py, async move {
            let report = tokio::task::spawn_blocking(move || {
                let data = data_arc.read();
                LevelReport::new(report::find_levels(
                    data.dataset.weapons(),
                    data.config.base_levels,
                    data.config.budgets(),
                ))
            })
            .await
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                    "Level search task panicked: {}",
                    e
                ))
            })?;

            Ok(report)
        })
    }

    /// Every infusion of every weapon, ascending by AR
    #[pyfunction]
    #[pyo3(signature = (points, levels=None))]
    fn rank_builds(py: Python<'_>, points: i32, levels: Option<[i32; 5]>) -> PyResult<Py<PyAny>> {
        let data_arc = cached()?;
        let data = data_arc.read();
        let levels = levels.unwrap_or(data.config.base_levels);
        let ranked = report::rank_builds(data.dataset.weapons(), levels, points);
        to_py(py, &ranked)
    }

    /// Combination search over five additive curves for budgets `0..=levels`
    ///
    /// # Returns
    /// One entry per budget: `None`, or `{"budget", "total", "levels"}`
    #[pyfunction]
    fn fast_max_levels(py: Python<'_>, levels: usize, curves: [Vec<f64>; 5]) -> PyResult<Py<PyAny>> {
        let refs: [&[f64]; 5] = [&curves[0], &curves[1], &curves[2], &curves[3], &curves[4]];
        let results: Vec<_> = search::max_levels(levels, refs).collect();
        to_py(py, &results)
    }

    /// Chart colour for an infusion name
    #[pyfunction]
    fn infusion_colour(name: &str) -> PyResult<&'static str> {
        InfusionKind::ALL
            .iter()
            .find(|kind| kind.as_str() == name)
            .map(|kind| report::infusion_colour(*kind))
            .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(name.to_string()))
    }

    // ========================================================================
    // Python Module Definition
    // ========================================================================

    #[pymodule]
    fn souls_build_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(init_data, m)?)?;
        m.add_function(wrap_pyfunction!(init_from_pages, m)?)?;
        m.add_function(wrap_pyfunction!(load_cached_data, m)?)?;
        m.add_function(wrap_pyfunction!(py_weapon_page_len, m)?)?;
        m.add_function(wrap_pyfunction!(is_data_initialized, m)?)?;
        m.add_function(wrap_pyfunction!(max_level, m)?)?;
        m.add_function(wrap_pyfunction!(find_levels, m)?)?;
        m.add_function(wrap_pyfunction!(find_levels_async, m)?)?;
        m.add_function(wrap_pyfunction!(rank_builds, m)?)?;
        m.add_function(wrap_pyfunction!(fast_max_levels, m)?)?;
        m.add_function(wrap_pyfunction!(infusion_colour, m)?)?;
        m.add("CATEGORY20", report::CATEGORY20.to_vec())?;
        m.add_class::<InfusionReport>()?;
        m.add_class::<LevelReport>()?;
        Ok(())
    }
}

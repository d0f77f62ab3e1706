//! Python-facing result objects
//!
//! Results are computed in Rust and converted to Python lists and dicts only
//! when a getter asks for them.

use crate::model::Weapon;
use crate::report::{group_ranges, infusion_colour, item_series, LevelTable};
use crate::search::{Build, InfusionBest};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyList, PyString};
use serde::Serialize;
use serde_json::Value;

/// Convert any serializable value into plain Python objects
pub fn to_py<T: Serialize>(py: Python<'_>, value: &T) -> PyResult<Py<PyAny>> {
    let value = serde_json::to_value(value).map_err(crate::error::BuildError::from)?;
    value_to_py(py, &value)
}

fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<Py<PyAny>> {
    Ok(match value {
        Value::Null => py.None(),
        Value::Bool(b) => PyBool::new(py, *b).to_owned().into_any().unbind(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into_pyobject(py)?.into_any().unbind(),
            None => PyFloat::new(py, n.as_f64().unwrap_or(f64::NAN)).into_any().unbind(),
        },
        Value::String(s) => PyString::new(py, s).into_any().unbind(),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(value_to_py(py, item)?)?;
            }
            list.into_any().unbind()
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, item) in map {
                dict.set_item(key, value_to_py(py, item)?)?;
            }
            dict.into_any().unbind()
        }
    })
}

// ============================================================================
// InfusionReport
// ============================================================================

/// Best builds of one infusion
#[pyclass]
pub struct InfusionReport {
    weapon: String,
    weapon_type: &'static str,
    infusion: &'static str,
    colour: &'static str,
    attack_rating: i32,
    builds: Vec<Build>,
}

impl InfusionReport {
    pub fn new(weapon: &Weapon, best: InfusionBest<'_>) -> Self {
        Self {
            weapon: weapon.name.clone(),
            weapon_type: weapon.weapon_type.as_str(),
            infusion: best.infusion.kind.as_str(),
            colour: infusion_colour(best.infusion.kind),
            attack_rating: best.attack_rating,
            builds: best.builds,
        }
    }
}

#[pymethods]
impl InfusionReport {
    #[getter]
    fn weapon(&self) -> &str {
        &self.weapon
    }

    #[getter]
    fn weapon_type(&self) -> &'static str {
        self.weapon_type
    }

    #[getter]
    fn infusion(&self) -> &'static str {
        self.infusion
    }

    #[getter]
    fn colour(&self) -> &'static str {
        self.colour
    }

    #[getter]
    fn attack_rating(&self) -> i32 {
        self.attack_rating
    }

    /// Number of tied builds
    #[getter]
    fn ties(&self) -> usize {
        self.builds.len()
    }

    /// Attribute levels of every tied build, in enumeration order
    fn levels(&self) -> Vec<[i32; 5]> {
        self.builds.iter().map(|b| b.levels).collect()
    }

    /// `[{"damage": [...], "levels": [...]}, ...]`
    fn builds(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        to_py(py, &self.builds)
    }

    fn __repr__(&self) -> String {
        format!(
            "InfusionReport({} [{}], ar={}, ties={})",
            self.weapon,
            self.infusion,
            self.attack_rating,
            self.builds.len()
        )
    }
}

// ============================================================================
// LevelReport
// ============================================================================

/// Budget sweep over the loaded weapons
#[pyclass]
pub struct LevelReport {
    table: LevelTable,
}

impl LevelReport {
    pub fn new(table: LevelTable) -> Self {
        Self { table }
    }
}

#[pymethods]
impl LevelReport {
    #[getter]
    fn budgets(&self) -> Vec<i32> {
        self.table.budgets.clone()
    }

    /// Full category → weapon → infusion table
    fn to_dict(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        to_py(py, &self.table)
    }

    /// One series list per weapon, for per-weapon charts
    fn items(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let items: Vec<_> = item_series(&self.table).collect();
        to_py(py, &items)
    }

    /// Per category `(max, min)` spread over infusions, for category charts
    fn groups(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        to_py(py, &group_ranges(&self.table))
    }
}

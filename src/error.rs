//! Error types for the build optimizer core

use thiserror::Error;

/// Main error type for the build optimizer core
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Saturation curve not found: {0}")]
    CurveNotFound(String),

    #[error("Invalid saturation curve {id}: expected at least {expected} entries, got {len}")]
    InvalidCurve {
        id: String,
        expected: usize,
        len: usize,
    },

    #[error("Unknown weapon type: {0}")]
    UnknownWeaponType(String),

    #[error("Weapon not found: {0}")]
    WeaponNotFound(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<BuildError> for pyo3::PyErr {
    fn from(err: BuildError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyOSError, PyValueError};

        match err {
            BuildError::CurveNotFound(id) => {
                PyKeyError::new_err(format!("Saturation curve not found: {}", id))
            }
            BuildError::WeaponNotFound(name) => {
                PyKeyError::new_err(format!("Weapon not found: {}", name))
            }
            BuildError::Io(err) => PyOSError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Result type alias for the build optimizer core
pub type Result<T> = std::result::Result<T, BuildError>;

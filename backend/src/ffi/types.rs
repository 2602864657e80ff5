//! Conversions between engine types and the Python boundary
//!
//! The boundary speaks JSON in both directions; these helpers do the
//! encode/decode and map engine errors onto Python exceptions.

use crate::allocator::{AllocationError, AllocatorConfig};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde::Serialize;

/// Parse an `AllocatorConfig` from its JSON form
///
/// Raises `ValueError` on malformed JSON or an invalid horizon (serde
/// runs `Horizon` validation during deserialization).
pub fn parse_allocator_config(config_json: &str) -> PyResult<AllocatorConfig> {
    serde_json::from_str(config_json)
        .map_err(|e| PyValueError::new_err(format!("invalid allocator config: {}", e)))
}

/// Encode any serializable engine value as JSON for the Python side
pub fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyRuntimeError::new_err(format!("result encoding failed: {}", e)))
}

/// Map an engine error onto the matching Python exception
///
/// Configuration problems become `ValueError`; runtime data-resolution
/// and snapshot problems become `RuntimeError`.
pub fn allocation_error_to_py(error: AllocationError) -> PyErr {
    match error {
        AllocationError::InvalidConfig(_) | AllocationError::InvalidHorizon(_) => {
            PyValueError::new_err(error.to_string())
        }
        _ => PyRuntimeError::new_err(error.to_string()),
    }
}

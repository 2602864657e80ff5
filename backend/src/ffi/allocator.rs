//! PyO3 wrapper for the Allocator
//!
//! This module provides the Python interface to the Rust engine.

use pyo3::prelude::*;

use super::types::{allocation_error_to_py, parse_allocator_config, to_json};
use crate::allocator::snapshot::ledger_fingerprint;
use crate::allocator::Allocator as RustAllocator;

/// Python wrapper for the Rust Allocator
///
/// The entry point for Python code to create and drive allocation runs.
///
/// # Example (from Python)
///
/// ```python
/// import json
/// from fleet_allocator import Allocator
///
/// config = {
///     "routes": [
///         {
///             "category": "AsiaEuropeSuez",
///             "origin_region": "ASIA",
///             "dest_region": "EUR",
///             "period_quota": 3,
///             "avg_duration_days": 45,
///         },
///     ],
///     "vessels": [
///         {
///             "vessel_id": "V001",
///             "period": "2025-01",
///             "initial_region": "ASIA",
///             "class": "Panamax",
///         },
///     ],
///     "horizon": ["2025-01", "2025-02", "2025-03"],
///     "delays": {
///         "suez_closed": True,
///         "panama_closed": False,
///         "congestion_days": {"AsiaEuropeSuez": 5},
///     },
/// }
///
/// allocator = Allocator(json.dumps(config))
/// allocator.run()
/// ledger = json.loads(allocator.ledger())
/// print(f"{len(ledger)} allocations, fingerprint {allocator.fingerprint()}")
/// ```
#[pyclass(name = "Allocator")]
pub struct PyAllocator {
    inner: RustAllocator,
}

#[pymethods]
impl PyAllocator {
    /// Create an allocator from a JSON config
    ///
    /// Raises `ValueError` on malformed config.
    #[new]
    fn new(config_json: &str) -> PyResult<Self> {
        let config = parse_allocator_config(config_json)?;
        let inner = RustAllocator::new(config).map_err(allocation_error_to_py)?;
        Ok(Self { inner })
    }

    /// Process one period; returns the period result as JSON
    fn step(&mut self) -> PyResult<String> {
        let result = self.inner.step().map_err(allocation_error_to_py)?;
        to_json(&result)
    }

    /// Process every remaining period
    fn run(&mut self) -> PyResult<()> {
        self.inner.run().map_err(allocation_error_to_py)
    }

    /// Check whether every horizon period has been processed
    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// The ledger produced so far, as a JSON array of records
    fn ledger(&self) -> PyResult<String> {
        to_json(&self.inner.ledger().records())
    }

    /// SHA-256 fingerprint of the ledger produced so far
    fn fingerprint(&self) -> PyResult<String> {
        ledger_fingerprint(self.inner.ledger()).map_err(allocation_error_to_py)
    }

    /// Number of ledger records produced so far
    fn num_allocations(&self) -> usize {
        self.inner.ledger().len()
    }
}

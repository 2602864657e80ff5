//! Fleet Allocator Core - Rust Engine
//!
//! Deterministic period-by-period allocation of vessels to trade-lane
//! routes under demand quotas, class eligibility, and voyage delays.
//!
//! # Architecture
//!
//! - **core**: Planning horizon (ordered period labels with integer indices)
//! - **models**: Domain types (Route, VesselRecord, VesselState, Allocation)
//! - **eligibility**: Optional vessel-class eligibility rules
//! - **delays**: Voyage duration with closure and congestion adjustments
//! - **allocator**: Greedy per-period matching engine and state snapshots
//!
//! # Critical Invariants
//!
//! 1. Within a period, a vessel takes at most one route and a route takes
//!    at most its quota
//! 2. All iteration orders are explicit (vessel id ascending, ranked
//!    routes): identical inputs yield identical ledgers
//! 3. FFI boundary is minimal and safe

// Module declarations
pub mod allocator;
pub mod core;
pub mod delays;
pub mod eligibility;
pub mod models;

// Re-exports for convenience
pub use allocator::{
    allocate,
    snapshot::{compute_config_hash, ledger_fingerprint, AllocatorSnapshot, VesselStateSnapshot},
    AllocationError, Allocator, AllocatorConfig, PeriodResult,
};
pub use crate::core::horizon::Horizon;
pub use delays::{
    periods_busy, DelayPolicy, DAYS_PER_PERIOD, FALLBACK_VOYAGE_DAYS, PANAMA_CLOSURE_EXTRA_DAYS,
    SUEZ_CLOSURE_EXTRA_DAYS,
};
pub use eligibility::EligibilityMap;
pub use models::{
    allocation::{Allocation, AllocationLedger},
    route::Route,
    state::{FleetState, VesselState},
    vessel::VesselRecord,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn fleet_allocator_core_rs(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<ffi::allocator::PyAllocator>()?;
    Ok(())
}

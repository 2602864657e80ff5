//! Domain models for the fleet allocation simulation
//!
//! - `route`: immutable route catalog rows
//! - `vessel`: vessel availability table rows
//! - `state`: engine-owned mutable vessel tracking
//! - `allocation`: the output ledger

pub mod allocation;
pub mod route;
pub mod state;
pub mod vessel;

pub use allocation::{Allocation, AllocationLedger};
pub use route::Route;
pub use state::{FleetState, VesselState};
pub use vessel::VesselRecord;

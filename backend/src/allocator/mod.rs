//! Allocation engine
//!
//! The `Allocator` owns all mutable simulation state and drives the
//! period loop; `snapshot` provides save/restore and the determinism
//! fingerprint.

pub mod engine;
pub mod snapshot;

pub use engine::{allocate, AllocationError, Allocator, AllocatorConfig, PeriodResult};

//! Engine-owned fleet state
//!
//! Tracks where each vessel currently is and when it becomes assignable
//! again. State exists only for vessels that have been assigned at least
//! once; a vessel without state is implicitly idle at its roster-listed
//! initial region.
//!
//! # Critical Invariants
//!
//! 1. `VesselState.current_region` is the destination of the vessel's
//!    most recent voyage
//! 2. A vessel with `next_available > current period` never enters the
//!    available pool
//! 3. The carry-over set holds only vessels that were offered and
//!    unmatched in the previous period

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Mutable tracking record for one vessel
///
/// Created the first time the vessel is assigned; rewritten on every
/// subsequent assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselState {
    /// Region the vessel is in (destination of its last voyage)
    current_region: String,

    /// First period index at which the vessel is assignable again
    next_available: usize,
}

impl VesselState {
    /// Create a tracking record
    pub fn new(current_region: impl Into<String>, next_available: usize) -> Self {
        Self {
            current_region: current_region.into(),
            next_available,
        }
    }

    /// Region the vessel is currently in
    pub fn current_region(&self) -> &str {
        &self.current_region
    }

    /// First period index at which the vessel is assignable again
    pub fn next_available(&self) -> usize {
        self.next_available
    }
}

/// Complete mutable state owned by one `Allocator`
///
/// No caller observes or mutates this mid-run; the engine passes it
/// through each period step and nothing else touches it.
#[derive(Debug, Clone, Default)]
pub struct FleetState {
    /// Per-vessel tracking records, keyed by vessel id
    states: HashMap<String, VesselState>,

    /// Vessel ids already introduced into the simulation
    seen: HashSet<String>,

    /// Vessels available but unmatched in the previous period
    carry_over: BTreeSet<String>,
}

impl FleetState {
    /// Create empty fleet state
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild fleet state from its parts (snapshot restore)
    pub fn from_parts(
        states: HashMap<String, VesselState>,
        seen: HashSet<String>,
        carry_over: BTreeSet<String>,
    ) -> Self {
        Self {
            states,
            seen,
            carry_over,
        }
    }

    /// Tracking record for a vessel, if it was ever assigned
    pub fn get(&self, vessel_id: &str) -> Option<&VesselState> {
        self.states.get(vessel_id)
    }

    /// Mark a vessel as introduced; returns `true` the first time
    pub fn mark_seen(&mut self, vessel_id: &str) -> bool {
        self.seen.insert(vessel_id.to_string())
    }

    /// Check whether a vessel has been introduced
    pub fn is_seen(&self, vessel_id: &str) -> bool {
        self.seen.contains(vessel_id)
    }

    /// Record an assignment: the vessel moves to `dest_region` and is
    /// busy until `next_available`
    pub fn record_assignment(
        &mut self,
        vessel_id: &str,
        dest_region: impl Into<String>,
        next_available: usize,
    ) {
        self.states.insert(
            vessel_id.to_string(),
            VesselState::new(dest_region, next_available),
        );
    }

    /// Vessels whose voyage has completed by `period`
    ///
    /// Busy→Idle is automatic once the current period index reaches the
    /// recorded next-available index.
    pub fn idle_vessels(&self, period: usize) -> Vec<String> {
        self.states
            .iter()
            .filter(|(_, state)| state.next_available() <= period)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Check whether a vessel is still mid-voyage at `period`
    pub fn is_busy(&self, vessel_id: &str, period: usize) -> bool {
        self.states
            .get(vessel_id)
            .map_or(false, |state| state.next_available() > period)
    }

    /// Vessels carried over unmatched from the previous period
    pub fn carry_over(&self) -> &BTreeSet<String> {
        &self.carry_over
    }

    /// Replace the carry-over set at the end of a period
    pub fn set_carry_over(&mut self, carry_over: BTreeSet<String>) {
        self.carry_over = carry_over;
    }

    /// Number of vessels with tracking records
    pub fn num_tracked(&self) -> usize {
        self.states.len()
    }

    /// Tracking records sorted by vessel id (snapshot order)
    pub fn states_sorted(&self) -> Vec<(&String, &VesselState)> {
        let mut entries: Vec<_> = self.states.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Introduced vessel ids sorted ascending (snapshot order)
    pub fn seen_sorted(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.seen.iter().cloned().collect();
        ids.sort();
        ids
    }
}

//! Allocator Engine
//!
//! Main simulation loop integrating all components:
//! - Pool construction (new, returned, and carried-over vessels)
//! - Route ranking (demand descending with a total tie-break)
//! - Greedy vessel-to-route matching under quotas and eligibility
//! - Voyage duration with closure and congestion delays
//! - Ledger production (complete allocation history)
//!
//! # Architecture
//!
//! The Allocator runs one step per horizon period, in order:
//!
//! ```text
//! For each period p:
//! 1. Reset per-period demand from the static catalog
//! 2. Build the available pool (new + returned + carry-over, minus busy)
//! 3. Resolve each pooled vessel's current region and class
//! 4. Rank routes by remaining demand, tie-broken by catalog key
//! 5. Match each vessel to the first compatible ranked route
//! 6. Record allocations, decrement demand, update vessel state
//! 7. Unmatched vessels become the next period's carry-over
//! ```
//!
//! # Determinism
//!
//! The pool iterates in vessel-id order and the route ranking carries a
//! total tie-break, so identical inputs produce identical ledgers. There
//! is no randomness anywhere in the engine.
//!
//! # Example
//!
//! ```rust
//! use fleet_allocator_core_rs::{
//!     allocate, AllocatorConfig, DelayPolicy, EligibilityMap, Horizon, Route, VesselRecord,
//! };
//!
//! let config = AllocatorConfig {
//!     routes: vec![Route::new("AsiaEuropeSuez", "ASIA", "EUR", 1, Some(40))],
//!     vessels: vec![VesselRecord::new("V001", "2025-01")
//!         .with_initial_region("ASIA")
//!         .with_class("Panamax")],
//!     eligibility: EligibilityMap::permissive(),
//!     horizon: Horizon::new(vec!["2025-01".into(), "2025-02".into()]).unwrap(),
//!     delays: DelayPolicy::default(),
//! };
//!
//! let ledger = allocate(config).unwrap();
//! assert_eq!(ledger.len(), 1);
//! assert_eq!(ledger.records()[0].vessel_id, "V001");
//! ```

use crate::core::horizon::Horizon;
use crate::delays::{periods_busy, DelayPolicy};
use crate::eligibility::EligibilityMap;
use crate::models::allocation::{Allocation, AllocationLedger};
use crate::models::route::Route;
use crate::models::state::FleetState;
use crate::models::vessel::VesselRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete allocator configuration
///
/// Contains every input the engine consumes; nothing else is read during
/// a run. The full picture is rebuilt from a fresh config on every run;
/// no state persists across separate invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Static route catalog
    pub routes: Vec<Route>,

    /// Vessel availability table, one row per vessel appearance
    pub vessels: Vec<VesselRecord>,

    /// Class eligibility rules; permissive when no rules were supplied
    #[serde(default)]
    pub eligibility: EligibilityMap,

    /// Ordered planning periods
    pub horizon: Horizon,

    /// Canal closures and congestion delays
    #[serde(default)]
    pub delays: DelayPolicy,
}

/// Allocation error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Horizon validation error
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    /// A pooled vessel has no resolvable region or class
    ///
    /// Fatal to the run: downstream per-vessel state would be incoherent,
    /// so no partial ledger is returned.
    #[error("No usable availability record for vessel {vessel_id}: {missing} unresolved")]
    MissingVesselRecord {
        vessel_id: String,
        missing: &'static str,
    },

    /// Snapshot encode/decode or hashing failure
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Snapshot does not belong to the supplied config, or is internally
    /// inconsistent
    #[error("Snapshot mismatch: {0}")]
    SnapshotMismatch(String),
}

/// Result of a single period step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodResult {
    /// Index of the processed period
    pub period_index: usize,

    /// Label of the processed period
    pub period: String,

    /// Vessels offered for assignment this period
    pub pool_size: usize,

    /// Vessels matched to a route this period
    pub num_assigned: usize,

    /// Vessels left unmatched, carried into the next period
    pub num_carried_over: usize,
}

/// Region/class lookup entry built from the availability table
///
/// The first row per vessel wins, matching how the upstream sheet is
/// read; later rows only re-introduce the vessel id.
#[derive(Debug, Clone)]
struct RosterEntry {
    initial_region: Option<String>,
    class: Option<String>,
}

// ============================================================================
// Allocator
// ============================================================================

/// Main allocator managing simulation state and the period loop
///
/// The Allocator owns all mutable state: per-vessel tracking records, the
/// carry-over set, the period cursor, and the output ledger. No external
/// caller observes or mutates any of it mid-run.
pub struct Allocator {
    /// Static route catalog
    routes: Vec<Route>,

    /// Class eligibility rules
    eligibility: EligibilityMap,

    /// Ordered planning periods
    horizon: Horizon,

    /// Canal closures and congestion delays
    delays: DelayPolicy,

    /// First-row-wins region/class lookup per vessel
    roster: HashMap<String, RosterEntry>,

    /// Vessel ids introduced at each period index
    entries: HashMap<usize, BTreeSet<String>>,

    /// Mutable fleet state (vessel tracking, seen set, carry-over)
    fleet: FleetState,

    /// Output ledger, append-only
    ledger: AllocationLedger,

    /// Next period index to process
    cursor: usize,

    /// Canonical hash of the originating config (snapshot guard)
    config_hash: String,
}

impl Allocator {
    /// Create a new allocator from configuration
    ///
    /// Validates the catalog, indexes the availability table, and leaves
    /// the cursor at the first period.
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - duplicate `(category, origin, dest)` catalog rows
    /// * `SerializationError` - config could not be hashed
    pub fn new(config: AllocatorConfig) -> Result<Self, AllocationError> {
        Self::validate_config(&config)?;
        let config_hash = super::snapshot::compute_config_hash(&config)?;

        let AllocatorConfig {
            routes,
            vessels,
            eligibility,
            horizon,
            delays,
        } = config;

        // Index the availability table: first row per vessel resolves
        // region and class; every row introduces the vessel in its period.
        // Rows naming periods outside the horizon never take effect.
        let mut roster: HashMap<String, RosterEntry> = HashMap::new();
        let mut entries: HashMap<usize, BTreeSet<String>> = HashMap::new();
        for row in &vessels {
            roster
                .entry(row.vessel_id().to_string())
                .or_insert_with(|| RosterEntry {
                    initial_region: row.initial_region().map(str::to_string),
                    class: row.class().map(str::to_string),
                });
            if let Some(period_index) = horizon.index_of(row.period()) {
                entries
                    .entry(period_index)
                    .or_default()
                    .insert(row.vessel_id().to_string());
            }
        }

        Ok(Self {
            routes,
            eligibility,
            horizon,
            delays,
            roster,
            entries,
            fleet: FleetState::new(),
            ledger: AllocationLedger::new(),
            cursor: 0,
            config_hash,
        })
    }

    /// Validate configuration
    fn validate_config(config: &AllocatorConfig) -> Result<(), AllocationError> {
        let mut keys = HashSet::new();
        for route in &config.routes {
            if !keys.insert(route.key()) {
                let (category, origin, dest) = route.key();
                return Err(AllocationError::InvalidConfig(format!(
                    "Duplicate route row: {} {} -> {}",
                    category, origin, dest
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Index of the next period to process
    pub fn current_period(&self) -> usize {
        self.cursor
    }

    /// Check whether every horizon period has been processed
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.horizon.len()
    }

    /// The planning horizon
    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    /// The ledger produced so far
    pub fn ledger(&self) -> &AllocationLedger {
        &self.ledger
    }

    /// Consume the allocator and take the ledger
    pub fn into_ledger(self) -> AllocationLedger {
        self.ledger
    }

    /// Engine-owned fleet state (read-only)
    pub fn fleet(&self) -> &FleetState {
        &self.fleet
    }

    /// Canonical hash of the originating config
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    // ========================================================================
    // Period Loop Implementation
    // ========================================================================

    /// Execute one period step
    ///
    /// Processes the period at the cursor and advances it. See the module
    /// docs for the step sequence.
    ///
    /// # Errors
    ///
    /// * `MissingVesselRecord` - a pooled vessel's region or class could
    ///   not be resolved; the run is aborted before any assignment in
    ///   this period
    /// * `InvalidConfig` - called after the horizon was exhausted
    pub fn step(&mut self) -> Result<PeriodResult, AllocationError> {
        let current = self.cursor;
        let label = match self.horizon.label(current) {
            Some(label) => label.to_string(),
            None => {
                return Err(AllocationError::InvalidConfig(
                    "all horizon periods already processed".to_string(),
                ))
            }
        };
        let last_index = self.horizon.len() - 1;

        // STEP 1: DEMAND RESET
        // Remaining quotas always come from the static catalog, never
        // from the previous period.
        let mut remaining: Vec<u32> = self.routes.iter().map(Route::period_quota).collect();

        // STEP 2: ROUTE RANKING
        // Demand descending, then catalog key ascending. Ranked once per
        // period; within-period decrements only exhaust routes, they do
        // not re-rank them.
        let mut ranked: Vec<usize> = (0..self.routes.len()).collect();
        ranked.sort_by(|&a, &b| {
            remaining[b]
                .cmp(&remaining[a])
                .then_with(|| self.routes[a].key().cmp(&self.routes[b].key()))
        });

        // STEP 3: POOL CONSTRUCTION
        // New vessels introduced this period, vessels whose voyage has
        // completed, and last period's carry-over. BTreeSet gives the
        // vessel-id iteration order.
        let mut pool: BTreeSet<String> = BTreeSet::new();
        if let Some(introduced) = self.entries.get(&current) {
            for vessel_id in introduced {
                if self.fleet.mark_seen(vessel_id) {
                    pool.insert(vessel_id.clone());
                }
            }
        }
        for vessel_id in self.fleet.idle_vessels(current) {
            pool.insert(vessel_id);
        }
        for vessel_id in self.fleet.carry_over() {
            pool.insert(vessel_id.clone());
        }
        // Vessels still mid-voyage never enter the pool.
        pool.retain(|vessel_id| !self.fleet.is_busy(vessel_id, current));
        let pool_size = pool.len();

        // STEP 4: RESOLUTION
        // Current region and class for every pooled vessel, resolved up
        // front so a data error aborts before any assignment this period.
        let mut candidates: Vec<(String, String, String)> = Vec::with_capacity(pool.len());
        for vessel_id in &pool {
            let (region, class) = self.resolve_vessel(vessel_id)?;
            candidates.push((vessel_id.clone(), region, class));
        }

        // STEP 5: MATCHING
        // Each vessel takes the first ranked route departing its region
        // with demand left and a permitted class.
        let mut carried: BTreeSet<String> = BTreeSet::new();
        let mut num_assigned = 0;
        for (vessel_id, region, class) in candidates {
            let chosen = ranked.iter().copied().find(|&ri| {
                let route = &self.routes[ri];
                remaining[ri] > 0
                    && route.origin_region() == region
                    && self.eligibility.permits(route.category(), &class)
            });

            match chosen {
                Some(ri) => {
                    let route = &self.routes[ri];
                    let duration_days = self.delays.voyage_days(route);
                    let next_available = (current + periods_busy(duration_days)).min(last_index);
                    let dest_region = route.dest_region().to_string();

                    self.ledger.push(Allocation {
                        period_index: current,
                        period: label.clone(),
                        vessel_id: vessel_id.clone(),
                        category: route.category().to_string(),
                        origin_region: region,
                        dest_region: dest_region.clone(),
                        duration_days,
                    });

                    remaining[ri] -= 1;
                    self.fleet
                        .record_assignment(&vessel_id, dest_region, next_available);
                    num_assigned += 1;
                }
                None => {
                    carried.insert(vessel_id);
                }
            }
        }

        // STEP 6: CARRY-OVER
        let num_carried_over = carried.len();
        self.fleet.set_carry_over(carried);
        self.cursor += 1;

        Ok(PeriodResult {
            period_index: current,
            period: label,
            pool_size,
            num_assigned,
            num_carried_over,
        })
    }

    /// Process every remaining horizon period
    ///
    /// An empty horizon (or one already processed) is a no-op.
    pub fn run(&mut self) -> Result<(), AllocationError> {
        while !self.is_finished() {
            self.step()?;
        }
        Ok(())
    }

    /// Overwrite mutable state from a validated snapshot (restore path)
    pub(crate) fn restore_state(
        &mut self,
        cursor: usize,
        fleet: FleetState,
        ledger: AllocationLedger,
    ) {
        self.cursor = cursor;
        self.fleet = fleet;
        self.ledger = ledger;
    }

    /// Resolve a pooled vessel's current region and class
    ///
    /// The stored tracking record wins for region once the vessel has
    /// sailed; otherwise the roster's initial region applies. Both
    /// lookups are fatal when unresolvable.
    fn resolve_vessel(&self, vessel_id: &str) -> Result<(String, String), AllocationError> {
        let entry =
            self.roster
                .get(vessel_id)
                .ok_or_else(|| AllocationError::MissingVesselRecord {
                    vessel_id: vessel_id.to_string(),
                    missing: "availability row",
                })?;

        let region = match self.fleet.get(vessel_id) {
            Some(state) => state.current_region().to_string(),
            None => entry.initial_region.clone().ok_or_else(|| {
                AllocationError::MissingVesselRecord {
                    vessel_id: vessel_id.to_string(),
                    missing: "initial region",
                }
            })?,
        };

        let class = entry
            .class
            .clone()
            .ok_or_else(|| AllocationError::MissingVesselRecord {
                vessel_id: vessel_id.to_string(),
                missing: "class",
            })?;

        Ok((region, class))
    }
}

/// Run the full allocation in one call
///
/// The one-shot entry point: builds an allocator, processes the whole
/// horizon, and returns the ledger. Empty routes or an empty horizon
/// yield an empty ledger; a data-resolution error yields no ledger at
/// all.
pub fn allocate(config: AllocatorConfig) -> Result<AllocationLedger, AllocationError> {
    let mut allocator = Allocator::new(config)?;
    allocator.run()?;
    Ok(allocator.into_ledger())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizon(labels: &[&str]) -> Horizon {
        Horizon::new(labels.iter().map(|l| l.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_duplicate_route_rows_rejected() {
        let config = AllocatorConfig {
            routes: vec![
                Route::new("LOB_A", "ASIA", "EUR", 1, Some(40)),
                Route::new("LOB_A", "ASIA", "EUR", 2, Some(50)),
            ],
            vessels: Vec::new(),
            eligibility: EligibilityMap::permissive(),
            horizon: horizon(&["2025-01"]),
            delays: DelayPolicy::default(),
        };
        assert!(matches!(
            Allocator::new(config),
            Err(AllocationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_same_category_different_lane_accepted() {
        let config = AllocatorConfig {
            routes: vec![
                Route::new("LOB_A", "ASIA", "EUR", 1, Some(40)),
                Route::new("LOB_A", "EUR", "ASIA", 1, Some(40)),
            ],
            vessels: Vec::new(),
            eligibility: EligibilityMap::permissive(),
            horizon: horizon(&["2025-01"]),
            delays: DelayPolicy::default(),
        };
        assert!(Allocator::new(config).is_ok());
    }

    #[test]
    fn test_step_past_horizon_is_an_error() {
        let config = AllocatorConfig {
            routes: Vec::new(),
            vessels: Vec::new(),
            eligibility: EligibilityMap::permissive(),
            horizon: horizon(&["2025-01"]),
            delays: DelayPolicy::default(),
        };
        let mut allocator = Allocator::new(config).unwrap();
        allocator.step().unwrap();
        assert!(allocator.is_finished());
        assert!(allocator.step().is_err());
    }

    #[test]
    fn test_availability_row_outside_horizon_is_inert() {
        let config = AllocatorConfig {
            routes: vec![Route::new("LOB_A", "ASIA", "EUR", 1, Some(40))],
            vessels: vec![VesselRecord::new("V1", "2030-12")
                .with_initial_region("ASIA")
                .with_class("Panamax")],
            eligibility: EligibilityMap::permissive(),
            horizon: horizon(&["2025-01", "2025-02"]),
            delays: DelayPolicy::default(),
        };
        let ledger = allocate(config).unwrap();
        assert!(ledger.is_empty());
    }
}

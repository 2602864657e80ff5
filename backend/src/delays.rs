//! Voyage duration and delay adjustments
//!
//! The final voyage duration starts from the route's catalog average and
//! gains independent additive adjustments: a canal-closure surcharge when
//! the route category names a closed canal, and per-category congestion
//! days. Duration floor-divides by 30 to give the number of whole periods
//! a vessel stays busy.

use crate::models::route::Route;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Voyage length assumed when the catalog has no average for a route
///
/// A missing duration is a recovered condition, not an error.
pub const FALLBACK_VOYAGE_DAYS: u32 = 60;

/// Extra days for routes through a closed Suez canal
pub const SUEZ_CLOSURE_EXTRA_DAYS: u32 = 14;

/// Extra days for routes through a closed Panama canal
pub const PANAMA_CLOSURE_EXTRA_DAYS: u32 = 10;

/// Days in one planning period
pub const DAYS_PER_PERIOD: u32 = 30;

/// Category substring marking a Suez-canal route
const SUEZ_MARKER: &str = "Suez";

/// Category substring marking a Panama-canal route
const PANAMA_MARKER: &str = "Panama";

/// Externally imposed delays: canal closures and port congestion
///
/// # Example
/// ```
/// use fleet_allocator_core_rs::{DelayPolicy, Route};
///
/// let policy = DelayPolicy::new(true, false).with_congestion("AsiaEuropeSuez", 5);
/// let route = Route::new("AsiaEuropeSuez", "ASIA", "EUR", 3, Some(45));
///
/// // 45 base + 14 Suez closure + 5 congestion
/// assert_eq!(policy.voyage_days(&route), 64);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayPolicy {
    /// Suez canal closed for the whole run
    suez_closed: bool,

    /// Panama canal closed for the whole run
    panama_closed: bool,

    /// Extra congestion days per route category
    congestion_days: BTreeMap<String, u32>,
}

impl DelayPolicy {
    /// Create a delay policy with the given closure flags and no congestion
    pub fn new(suez_closed: bool, panama_closed: bool) -> Self {
        Self {
            suez_closed,
            panama_closed,
            congestion_days: BTreeMap::new(),
        }
    }

    /// Add congestion days for a route category
    pub fn with_congestion(mut self, category: impl Into<String>, days: u32) -> Self {
        self.congestion_days.insert(category.into(), days);
        self
    }

    /// Suez closure flag
    pub fn suez_closed(&self) -> bool {
        self.suez_closed
    }

    /// Panama closure flag
    pub fn panama_closed(&self) -> bool {
        self.panama_closed
    }

    /// Congestion days for a category, zero when absent
    pub fn congestion_for(&self, category: &str) -> u32 {
        self.congestion_days.get(category).copied().unwrap_or(0)
    }

    /// Final voyage duration for a route under this policy
    ///
    /// Base duration is the catalog average or the 60-day fallback;
    /// closure surcharges apply when the category contains the canal
    /// marker; congestion days add independently.
    pub fn voyage_days(&self, route: &Route) -> u32 {
        let mut days = route.avg_duration_days().unwrap_or(FALLBACK_VOYAGE_DAYS);
        if self.suez_closed && route.category().contains(SUEZ_MARKER) {
            days += SUEZ_CLOSURE_EXTRA_DAYS;
        }
        if self.panama_closed && route.category().contains(PANAMA_MARKER) {
            days += PANAMA_CLOSURE_EXTRA_DAYS;
        }
        days + self.congestion_for(route.category())
    }
}

/// Whole periods a vessel stays busy for a voyage of `days`
///
/// Floor division: a voyage shorter than one period keeps the vessel
/// busy for zero further periods.
pub fn periods_busy(days: u32) -> usize {
    (days / DAYS_PER_PERIOD) as usize
}

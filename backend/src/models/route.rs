//! Route catalog model
//!
//! A route is one line of business (LOB): a named trade lane from an
//! origin region to a destination region with a per-period demand quota
//! and an average voyage duration. Routes are immutable reference data;
//! the engine re-reads quotas from the catalog at the start of every
//! period instead of mutating them in place.

use serde::{Deserialize, Serialize};

/// One row of the route catalog
///
/// # Example
/// ```
/// use fleet_allocator_core_rs::Route;
///
/// let route = Route::new("AsiaEuropeSuez", "ASIA", "EUR", 3, Some(45));
/// assert_eq!(route.category(), "AsiaEuropeSuez");
/// assert_eq!(route.period_quota(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Line-of-business code; also the key for eligibility and congestion
    category: String,

    /// Region a vessel must currently be in to take this route
    origin_region: String,

    /// Region the vessel is in once the voyage completes
    dest_region: String,

    /// Vessels this route can absorb per period (preferred sailings)
    ///
    /// The quota is per period and resets every period; it is not
    /// cumulative unmet demand.
    period_quota: u32,

    /// Average voyage duration in days
    ///
    /// `None` means the catalog has no figure for this lane; the engine
    /// falls back to a 60-day voyage.
    avg_duration_days: Option<u32>,
}

impl Route {
    /// Create a route catalog row
    pub fn new(
        category: impl Into<String>,
        origin_region: impl Into<String>,
        dest_region: impl Into<String>,
        period_quota: u32,
        avg_duration_days: Option<u32>,
    ) -> Self {
        Self {
            category: category.into(),
            origin_region: origin_region.into(),
            dest_region: dest_region.into(),
            period_quota,
            avg_duration_days,
        }
    }

    /// Line-of-business code
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Region a vessel must start from
    pub fn origin_region(&self) -> &str {
        &self.origin_region
    }

    /// Region the voyage ends in
    pub fn dest_region(&self) -> &str {
        &self.dest_region
    }

    /// Demand quota per period
    pub fn period_quota(&self) -> u32 {
        self.period_quota
    }

    /// Catalog average voyage duration in days, if known
    pub fn avg_duration_days(&self) -> Option<u32> {
        self.avg_duration_days
    }

    /// Catalog key identifying this row
    ///
    /// Demand is tracked per `(category, origin, destination)` triple;
    /// the same LOB code may serve several region pairs.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.category, &self.origin_region, &self.dest_region)
    }
}

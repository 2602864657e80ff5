//! Allocation ledger
//!
//! The engine's only output: an append-only, ordered list of
//! vessel-to-route assignments. Records are produced period-major, in
//! assignment order within each period, and never mutated afterwards.
//! The presentation layer consumes the ledger for tabular export and
//! aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single vessel-to-route assignment
///
/// # Example
/// ```
/// use fleet_allocator_core_rs::Allocation;
///
/// let record = Allocation {
///     period_index: 0,
///     period: "2025-01".to_string(),
///     vessel_id: "V001".to_string(),
///     category: "AsiaEuropeSuez".to_string(),
///     origin_region: "ASIA".to_string(),
///     dest_region: "EUR".to_string(),
///     duration_days: 45,
/// };
/// assert_eq!(record.duration_days, 45);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Index of the period within the horizon
    pub period_index: usize,

    /// Period label as given in the horizon
    pub period: String,

    /// Assigned vessel code
    pub vessel_id: String,

    /// Route category (LOB code)
    pub category: String,

    /// Region the vessel departed from
    pub origin_region: String,

    /// Region the vessel arrives in
    pub dest_region: String,

    /// Final voyage duration in days, delays included
    pub duration_days: u32,
}

/// Ordered ledger of allocation records
///
/// A thin wrapper around `Vec<Allocation>` with query helpers for the
/// consuming layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLedger {
    records: Vec<Allocation>,
}

impl AllocationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Rebuild a ledger from records (snapshot restore)
    pub fn from_records(records: Vec<Allocation>) -> Self {
        Self { records }
    }

    /// Append a record
    pub fn push(&mut self, record: Allocation) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in production order
    pub fn records(&self) -> &[Allocation] {
        &self.records
    }

    /// Records produced in the period with the given index
    pub fn records_at_period(&self, period_index: usize) -> Vec<&Allocation> {
        self.records
            .iter()
            .filter(|r| r.period_index == period_index)
            .collect()
    }

    /// Records for one vessel across the whole horizon
    pub fn records_for_vessel(&self, vessel_id: &str) -> Vec<&Allocation> {
        self.records
            .iter()
            .filter(|r| r.vessel_id == vessel_id)
            .collect()
    }

    /// Records for one route category across the whole horizon
    pub fn records_for_category(&self, category: &str) -> Vec<&Allocation> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Total assignments per route category
    pub fn assignment_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

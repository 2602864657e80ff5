//! Vessel availability model
//!
//! One row of the vessel availability table: a vessel code, the period in
//! which the row introduces the vessel, and the vessel's starting region
//! and class. Region and class are optional because the upstream
//! spreadsheet may leave those cells blank; the engine fails explicitly
//! when a pooled vessel needs a value that is not there, rather than
//! inventing a default.

use serde::{Deserialize, Serialize};

/// One row of the vessel availability table
///
/// # Example
/// ```
/// use fleet_allocator_core_rs::VesselRecord;
///
/// let row = VesselRecord::new("V001", "2025-01")
///     .with_initial_region("ASIA")
///     .with_class("Panamax");
/// assert_eq!(row.vessel_id(), "V001");
/// assert_eq!(row.initial_region(), Some("ASIA"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselRecord {
    /// Vessel code, unique across the fleet
    vessel_id: String,

    /// Period label in which this row makes the vessel available
    period: String,

    /// Region the vessel starts from; `None` for a blank source cell
    initial_region: Option<String>,

    /// Vessel class used for eligibility checks; `None` for a blank cell
    class: Option<String>,
}

impl VesselRecord {
    /// Create an availability row with region and class unset
    pub fn new(vessel_id: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            vessel_id: vessel_id.into(),
            period: period.into(),
            initial_region: None,
            class: None,
        }
    }

    /// Set the starting region
    pub fn with_initial_region(mut self, region: impl Into<String>) -> Self {
        self.initial_region = Some(region.into());
        self
    }

    /// Set the vessel class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Vessel code
    pub fn vessel_id(&self) -> &str {
        &self.vessel_id
    }

    /// Period label in which this row introduces the vessel
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Starting region, if the source row had one
    pub fn initial_region(&self) -> Option<&str> {
        self.initial_region.as_deref()
    }

    /// Vessel class, if the source row had one
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

//! Planning horizon for the simulation
//!
//! The simulation operates on an ordered sequence of period labels
//! (typically calendar months). Every label carries an explicit integer
//! index; the engine does all scheduling arithmetic on indices and only
//! touches labels at the input and output boundaries.

use crate::allocator::AllocationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered, duplicate-free sequence of planning periods
///
/// The declared order is the scheduling order: period `i` is always
/// processed before period `i + 1`, and a vessel's next-available period
/// is an index into this sequence.
///
/// # Example
/// ```
/// use fleet_allocator_core_rs::Horizon;
///
/// let horizon = Horizon::new(vec!["2025-01".into(), "2025-02".into()]).unwrap();
/// assert_eq!(horizon.len(), 2);
/// assert_eq!(horizon.index_of("2025-02"), Some(1));
/// assert_eq!(horizon.label(0), Some("2025-01"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Horizon {
    /// Period labels in scheduling order
    labels: Vec<String>,
    /// Label -> index lookup, built once at construction
    index: HashMap<String, usize>,
}

impl Horizon {
    /// Create a horizon from an ordered label sequence
    ///
    /// An empty sequence is valid (the engine then produces an empty
    /// ledger). Duplicate labels are rejected because the label-to-index
    /// mapping would be ambiguous.
    ///
    /// # Example
    /// ```
    /// use fleet_allocator_core_rs::Horizon;
    ///
    /// let horizon = Horizon::new(vec!["2025-01".into()]).unwrap();
    /// assert!(!horizon.is_empty());
    ///
    /// let dup = Horizon::new(vec!["2025-01".into(), "2025-01".into()]);
    /// assert!(dup.is_err());
    /// ```
    pub fn new(labels: Vec<String>) -> Result<Self, AllocationError> {
        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(AllocationError::InvalidHorizon(format!(
                    "duplicate period label: {}",
                    label
                )));
            }
        }
        Ok(Self { labels, index })
    }

    /// Number of periods in the horizon
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the horizon has no periods
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All period labels in scheduling order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of the period at `index`, if in range
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of the period with the given label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Index of the final period, `None` for an empty horizon
    ///
    /// A vessel's return period saturates here rather than extending past
    /// the simulated horizon.
    pub fn last_index(&self) -> Option<usize> {
        self.labels.len().checked_sub(1)
    }

    /// Iterate periods as `(index, label)` pairs in scheduling order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.labels.iter().enumerate().map(|(i, l)| (i, l.as_str()))
    }
}

impl TryFrom<Vec<String>> for Horizon {
    type Error = AllocationError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Horizon::new(labels)
    }
}

impl From<Horizon> for Vec<String> {
    fn from(horizon: Horizon) -> Self {
        horizon.labels
    }
}

//! Vessel-class eligibility rules
//!
//! Some deployments restrict which vessel classes may serve a route
//! category; others supply no rules at all. The map is a single optional
//! capability rather than two divergent code paths: absent rules permit
//! everything, present rules permit exactly what they list. A category
//! missing from present rules permits nothing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Route category to permitted vessel classes
///
/// # Example
/// ```
/// use fleet_allocator_core_rs::EligibilityMap;
///
/// let map = EligibilityMap::permissive().allow("AsiaEuropeSuez", "Panamax");
/// assert!(map.permits("AsiaEuropeSuez", "Panamax"));
/// assert!(!map.permits("AsiaEuropeSuez", "Feeder"));
/// assert!(!map.permits("TransPacific", "Panamax"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityMap {
    /// `None` means no rules were supplied and every class is eligible
    rules: Option<BTreeMap<String, BTreeSet<String>>>,
}

impl EligibilityMap {
    /// Eligibility map with no rules: every class serves every category
    pub fn permissive() -> Self {
        Self { rules: None }
    }

    /// Eligibility map restricted to the given rules
    pub fn from_rules(rules: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self { rules: Some(rules) }
    }

    /// Add one permitted `(category, class)` pair
    ///
    /// The first call switches a permissive map to restrictive.
    pub fn allow(mut self, category: impl Into<String>, class: impl Into<String>) -> Self {
        self.rules
            .get_or_insert_with(BTreeMap::new)
            .entry(category.into())
            .or_default()
            .insert(class.into());
        self
    }

    /// Check whether rules were supplied at all
    pub fn is_permissive(&self) -> bool {
        self.rules.is_none()
    }

    /// Check whether `class` may serve routes of `category`
    pub fn permits(&self, category: &str, class: &str) -> bool {
        match &self.rules {
            None => true,
            Some(rules) => rules
                .get(category)
                .map_or(false, |classes| classes.contains(class)),
        }
    }
}

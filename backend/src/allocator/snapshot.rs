//! Snapshot - Save/Restore Allocator State
//!
//! Serializes the engine's mutable state so a run can pause after any
//! period and resume later. A canonical SHA-256 hash of the originating
//! config guards restores against mismatched inputs, and the same
//! hashing gives the ledger a fingerprint for determinism checks.
//!
//! # Critical Invariants
//!
//! - **Determinism**: identical config produces identical ledgers, so a
//!   resumed run finishes exactly like an uninterrupted one
//! - **Config matching**: state can only be restored with the config
//!   that produced it
//! - **Canonical form**: snapshot collections are sorted, so equal state
//!   serializes identically

use crate::allocator::engine::{AllocationError, Allocator, AllocatorConfig};
use crate::models::allocation::{Allocation, AllocationLedger};
use crate::models::state::{FleetState, VesselState};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete allocator state snapshot
///
/// Captures everything needed to resume an allocation run after an
/// arbitrary period boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorSnapshot {
    /// Next period index to process
    pub cursor: usize,

    /// Per-vessel tracking records, sorted by vessel id
    pub vessel_states: Vec<VesselStateSnapshot>,

    /// Introduced vessel ids, sorted ascending
    pub seen: Vec<String>,

    /// Carry-over vessel ids, sorted ascending
    pub carry_over: Vec<String>,

    /// Ledger records produced so far, in production order
    pub allocations: Vec<Allocation>,

    /// SHA-256 hash of the originating config (restore guard)
    pub config_hash: String,
}

/// One vessel's tracking record in snapshot form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselStateSnapshot {
    pub vessel_id: String,
    pub current_region: String,
    pub next_available: usize,
}

impl AllocatorSnapshot {
    /// Encode the snapshot as JSON
    pub fn to_json(&self) -> Result<String, AllocationError> {
        serde_json::to_string(self)
            .map_err(|e| AllocationError::SerializationError(format!("snapshot encode: {}", e)))
    }

    /// Decode a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, AllocationError> {
        serde_json::from_str(json)
            .map_err(|e| AllocationError::SerializationError(format!("snapshot decode: {}", e)))
    }
}

// ============================================================================
// Hashing
// ============================================================================

/// Compute a deterministic SHA-256 hash of any serializable value
///
/// Serializes through `serde_json::Value` with recursively sorted object
/// keys, so the hash does not depend on map iteration order.
pub fn compute_config_hash<T: Serialize>(value: &T) -> Result<String, AllocationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(value)
        .map_err(|e| AllocationError::SerializationError(format!("config hash: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| AllocationError::SerializationError(format!("config hash: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// SHA-256 fingerprint of a ledger
///
/// Two runs on identical inputs must produce equal fingerprints; the
/// determinism tests assert exactly that.
pub fn ledger_fingerprint(ledger: &AllocationLedger) -> Result<String, AllocationError> {
    let json = serde_json::to_string(ledger.records())
        .map_err(|e| AllocationError::SerializationError(format!("ledger fingerprint: {}", e)))?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot integrity
///
/// Checks the structural invariants a well-formed snapshot satisfies:
/// - no duplicate vessel ids among tracking records
/// - every tracked and carried-over vessel was introduced
/// - every allocation belongs to an already-processed period
pub fn validate_snapshot(snapshot: &AllocatorSnapshot) -> Result<(), AllocationError> {
    let seen: HashSet<&str> = snapshot.seen.iter().map(String::as_str).collect();

    let mut tracked = HashSet::new();
    for state in &snapshot.vessel_states {
        if !tracked.insert(state.vessel_id.as_str()) {
            return Err(AllocationError::SnapshotMismatch(format!(
                "duplicate tracking record for vessel {}",
                state.vessel_id
            )));
        }
        if !seen.contains(state.vessel_id.as_str()) {
            return Err(AllocationError::SnapshotMismatch(format!(
                "tracked vessel {} was never introduced",
                state.vessel_id
            )));
        }
    }

    for vessel_id in &snapshot.carry_over {
        if !seen.contains(vessel_id.as_str()) {
            return Err(AllocationError::SnapshotMismatch(format!(
                "carried-over vessel {} was never introduced",
                vessel_id
            )));
        }
    }

    for record in &snapshot.allocations {
        if record.period_index >= snapshot.cursor {
            return Err(AllocationError::SnapshotMismatch(format!(
                "allocation in unprocessed period {}",
                record.period_index
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Allocator Save/Restore
// ============================================================================

impl Allocator {
    /// Capture the allocator's mutable state
    pub fn snapshot(&self) -> AllocatorSnapshot {
        AllocatorSnapshot {
            cursor: self.current_period(),
            vessel_states: self
                .fleet()
                .states_sorted()
                .into_iter()
                .map(|(vessel_id, state)| VesselStateSnapshot {
                    vessel_id: vessel_id.clone(),
                    current_region: state.current_region().to_string(),
                    next_available: state.next_available(),
                })
                .collect(),
            seen: self.fleet().seen_sorted(),
            carry_over: self.fleet().carry_over().iter().cloned().collect(),
            allocations: self.ledger().records().to_vec(),
            config_hash: self.config_hash().to_string(),
        }
    }

    /// Rebuild an allocator from a config and a snapshot of a prior run
    ///
    /// # Errors
    ///
    /// * `SnapshotMismatch` - the snapshot was taken under a different
    ///   config, or fails integrity validation
    pub fn restore(
        config: AllocatorConfig,
        snapshot: AllocatorSnapshot,
    ) -> Result<Self, AllocationError> {
        let mut allocator = Allocator::new(config)?;
        if allocator.config_hash() != snapshot.config_hash {
            return Err(AllocationError::SnapshotMismatch(format!(
                "config hash {} does not match snapshot hash {}",
                allocator.config_hash(),
                snapshot.config_hash
            )));
        }
        validate_snapshot(&snapshot)?;

        let states = snapshot
            .vessel_states
            .into_iter()
            .map(|s| {
                (
                    s.vessel_id,
                    VesselState::new(s.current_region, s.next_available),
                )
            })
            .collect();
        let seen = snapshot.seen.into_iter().collect();
        let carry_over = snapshot.carry_over.into_iter().collect();

        allocator.restore_state(
            snapshot.cursor,
            FleetState::from_parts(states, seen, carry_over),
            AllocationLedger::from_records(snapshot.allocations),
        );
        Ok(allocator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_hash_stable_across_key_order() {
        let a = serde_json::json!({"x": 1, "y": [1, 2, 3]});
        let b = serde_json::json!({"y": [1, 2, 3], "x": 1});
        assert_eq!(
            compute_config_hash(&a).unwrap(),
            compute_config_hash(&b).unwrap()
        );
    }

    #[test]
    fn test_config_hash_differs_on_content() {
        let a = serde_json::json!({"x": 1});
        let b = serde_json::json!({"x": 2});
        assert_ne!(
            compute_config_hash(&a).unwrap(),
            compute_config_hash(&b).unwrap()
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_states() {
        let snapshot = AllocatorSnapshot {
            cursor: 1,
            vessel_states: vec![
                VesselStateSnapshot {
                    vessel_id: "V1".into(),
                    current_region: "EUR".into(),
                    next_available: 1,
                },
                VesselStateSnapshot {
                    vessel_id: "V1".into(),
                    current_region: "NA".into(),
                    next_available: 2,
                },
            ],
            seen: vec!["V1".into()],
            carry_over: Vec::new(),
            allocations: Vec::new(),
            config_hash: "h".into(),
        };
        assert!(matches!(
            validate_snapshot(&snapshot),
            Err(AllocationError::SnapshotMismatch(_))
        ));
    }

    #[test]
    fn test_validate_rejects_untracked_carry_over() {
        let snapshot = AllocatorSnapshot {
            cursor: 1,
            vessel_states: Vec::new(),
            seen: Vec::new(),
            carry_over: vec!["V9".into()],
            allocations: Vec::new(),
            config_hash: "h".into(),
        };
        assert!(validate_snapshot(&snapshot).is_err());
    }
}

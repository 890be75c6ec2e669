//! Domain types for gang admission and queue ordering.
//!
//! These mirror the subset of a pending unit's record that the gate and
//! comparator read. All types are serializable to/from JSON so hosts and
//! tooling can hand unit listings across process boundaries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Scheduling unit ────────────────────────────────────────────────

/// A unit of work waiting to be placed.
///
/// Group membership is not a field of its own: it lives in `labels`
/// under the group-name / group-min-size keys and is derived on demand
/// by [`GroupIdentityResolver`](crate::group::GroupIdentityResolver).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingUnit {
    pub namespace: String,
    pub name: String,
    /// Free-form metadata; carries the pod-group labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Higher sorts first.
    #[serde(default)]
    pub priority: i32,
    /// Milliseconds at which the scheduler first observed this unit.
    #[serde(default)]
    pub arrived_at: u64,
    /// Relational placement rules declared by the unit.
    #[serde(default)]
    pub constraints: PlacementConstraints,
}

impl SchedulingUnit {
    /// Create an ungrouped unit with no constraints, priority 0.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            labels: BTreeMap::new(),
            priority: 0,
            arrived_at: 0,
            constraints: PlacementConstraints::default(),
        }
    }

    /// Builder-style label setter.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_arrival(mut self, arrived_at: u64) -> Self {
        self.arrived_at = arrived_at;
        self
    }

    pub fn with_constraints(mut self, constraints: PlacementConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// `namespace/name`, used in logs and CLI output.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

// ── Group key ──────────────────────────────────────────────────────

/// Identity of a gang: `(namespace, group name)`.
///
/// Two units are siblings iff their keys are equal. Rendered as
/// `namespace/groupName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub namespace: String,
    pub group_name: String,
}

impl GroupKey {
    pub fn new(namespace: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            group_name: group_name.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.group_name)
    }
}

// ── Placement constraints ──────────────────────────────────────────

/// Affinity, anti-affinity and topology-spread rules of a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementConstraints {
    pub pod_affinity: UnitAffinity,
    pub pod_anti_affinity: UnitAffinity,
    pub topology_spread: Vec<TopologySpreadConstraint>,
}

impl PlacementConstraints {
    /// True when nothing relational is declared.
    pub fn is_empty(&self) -> bool {
        self.pod_affinity.is_empty()
            && self.pod_anti_affinity.is_empty()
            && self.topology_spread.is_empty()
    }
}

/// Required and preferred terms referencing other units.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitAffinity {
    pub required: Vec<AffinityTerm>,
    pub preferred: Vec<WeightedAffinityTerm>,
}

impl UnitAffinity {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.preferred.is_empty()
    }
}

/// Selects other units (by label) co-located within a topology domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AffinityTerm {
    pub label_selector: BTreeMap<String, String>,
    /// Empty means the unit's own namespace.
    pub namespaces: Vec<String>,
    pub topology_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeightedAffinityTerm {
    pub weight: i32,
    pub term: AffinityTerm,
}

/// Spread units evenly across a topology domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopologySpreadConstraint {
    pub max_skew: u32,
    pub topology_key: String,
    pub when_unsatisfiable: SpreadMode,
    #[serde(default)]
    pub label_selector: BTreeMap<String, String>,
}

/// Enforcement mode of a topology-spread constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpreadMode {
    /// Hard: violation forbids placement.
    DoNotSchedule,
    /// Soft: violation is only penalized in scoring.
    ScheduleAnyway,
}

impl SpreadMode {
    pub fn is_hard(self) -> bool {
        matches!(self, SpreadMode::DoNotSchedule)
    }
}

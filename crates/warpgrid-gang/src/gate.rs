//! Gang admission gate.
//!
//! Holds a grouped unit out of the ready queue until enough of its
//! siblings are known to the scheduler:
//!
//! 1. Ungrouped units are always allowed.
//! 2. A malformed minimum size fails the unit.
//! 3. Relational placement constraints make the unit unresolvable.
//! 4. Otherwise siblings (the unit itself included) are counted in the
//!    snapshot and compared against the minimum.
//!
//! The gate keeps no state between calls. A `Blocked` decision is only
//! as fresh as the snapshot it was computed from; the host re-invokes
//! the gate when the population changes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constraints;
use crate::group::GroupIdentityResolver;
use crate::snapshot::UnitSnapshot;
use crate::types::SchedulingUnit;

/// Outcome of an admission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum AdmissionDecision {
    /// The unit may enter the ready queue.
    Allow,
    /// Not yet admissible; retry once the snapshot changes.
    Blocked(String),
    /// Never admissible as specified; the unit or its group must change.
    Unresolvable(String),
    /// Malformed input on the unit itself.
    Failed(String),
}

/// Discriminant of an [`AdmissionDecision`], for tallies and matching
/// without the reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecisionKind {
    Allow,
    Blocked,
    Unresolvable,
    Failed,
}

impl DecisionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionKind::Allow => "allow",
            DecisionKind::Blocked => "blocked",
            DecisionKind::Unresolvable => "unresolvable",
            DecisionKind::Failed => "failed",
        }
    }
}

impl AdmissionDecision {
    pub fn kind(&self) -> DecisionKind {
        match self {
            AdmissionDecision::Allow => DecisionKind::Allow,
            AdmissionDecision::Blocked(_) => DecisionKind::Blocked,
            AdmissionDecision::Unresolvable(_) => DecisionKind::Unresolvable,
            AdmissionDecision::Failed(_) => DecisionKind::Failed,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmissionDecision::Allow)
    }

    /// Only `Blocked` is worth re-evaluating without changing the unit.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdmissionDecision::Blocked(_))
    }

    /// Human-readable reason; `None` for `Allow`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AdmissionDecision::Allow => None,
            AdmissionDecision::Blocked(r)
            | AdmissionDecision::Unresolvable(r)
            | AdmissionDecision::Failed(r) => Some(r),
        }
    }
}

impl fmt::Display for AdmissionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            None => f.write_str(self.kind().as_str()),
            Some(reason) => write!(f, "{}: {}", self.kind().as_str(), reason),
        }
    }
}

/// Decides whether a unit may proceed into the ready queue.
#[derive(Debug, Clone, Default)]
pub struct GangAdmissionGate {
    resolver: GroupIdentityResolver,
}

impl GangAdmissionGate {
    pub fn new(resolver: GroupIdentityResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &GroupIdentityResolver {
        &self.resolver
    }

    /// Evaluate `unit` against the population in `snapshot`.
    ///
    /// Identical inputs always yield identical decisions.
    pub fn admit<S>(&self, unit: &SchedulingUnit, snapshot: &S) -> AdmissionDecision
    where
        S: UnitSnapshot + ?Sized,
    {
        let Some(key) = self.resolver.resolve_group_key(unit) else {
            return AdmissionDecision::Allow;
        };

        let min_size = match self.resolver.resolve_min_size(unit) {
            Ok(n) => n,
            Err(e) => {
                warn!(
                    unit = %unit.full_name(),
                    group = %key,
                    value = %e.value,
                    "malformed group minimum size"
                );
                return AdmissionDecision::Failed(e.to_string());
            }
        };

        if let Err(e) = constraints::check(unit) {
            warn!(unit = %unit.full_name(), group = %key, reason = %e, "incompatible placement constraint");
            return AdmissionDecision::Unresolvable(e.to_string());
        }

        let observed = match snapshot.count_members(&key, &self.resolver) {
            Ok(n) => n,
            Err(e) => {
                warn!(unit = %unit.full_name(), group = %key, error = %e, "unit listing failed");
                return AdmissionDecision::Unresolvable(e.to_string());
            }
        };

        if observed < min_size as usize {
            debug!(
                unit = %unit.full_name(),
                group = %key,
                observed,
                min_size,
                "gang quorum not met"
            );
            return AdmissionDecision::Blocked(format!(
                "waiting for enough units in group {key} (seen: {observed}, min: {min_size})"
            ));
        }

        debug!(unit = %unit.full_name(), group = %key, observed, min_size, "gang admitted");
        AdmissionDecision::Allow
    }
}

//! Placement-constraint compatibility with gang admission.
//!
//! Admission is a counting test done before any placement is tried.
//! Rules that relate a unit's placement to other units (affinity,
//! anti-affinity, hard topology spread) can make a gang impossible to
//! place as a whole, so grouped units declaring them are refused
//! outright. Soft topology spread only affects scoring and is allowed.

use crate::error::IncompatibleConstraint;
use crate::types::SchedulingUnit;

/// Check whether `unit`'s placement constraints may be combined with
/// gang admission. The first offending rule is reported.
pub fn check(unit: &SchedulingUnit) -> Result<(), IncompatibleConstraint> {
    let constraints = &unit.constraints;

    if !constraints.pod_affinity.is_empty() {
        return Err(IncompatibleConstraint::PodAffinity);
    }
    if !constraints.pod_anti_affinity.is_empty() {
        return Err(IncompatibleConstraint::PodAntiAffinity);
    }
    if constraints
        .topology_spread
        .iter()
        .any(|c| c.when_unsatisfiable.is_hard())
    {
        return Err(IncompatibleConstraint::HardTopologySpread);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn term() -> AffinityTerm {
        AffinityTerm {
            topology_key: "kubernetes.io/hostname".to_string(),
            ..AffinityTerm::default()
        }
    }

    fn spread(mode: SpreadMode) -> TopologySpreadConstraint {
        TopologySpreadConstraint {
            max_skew: 1,
            topology_key: "topology.kubernetes.io/zone".to_string(),
            when_unsatisfiable: mode,
            label_selector: Default::default(),
        }
    }

    fn unit(constraints: PlacementConstraints) -> SchedulingUnit {
        SchedulingUnit::new("ns1", "p").with_constraints(constraints)
    }

    #[test]
    fn no_constraints_is_compatible() {
        assert_eq!(check(&unit(PlacementConstraints::default())), Ok(()));
    }

    #[test]
    fn required_affinity_rejected() {
        let mut c = PlacementConstraints::default();
        c.pod_affinity.required.push(term());
        assert_eq!(check(&unit(c)), Err(IncompatibleConstraint::PodAffinity));
    }

    #[test]
    fn preferred_affinity_rejected() {
        let mut c = PlacementConstraints::default();
        c.pod_affinity.preferred.push(WeightedAffinityTerm { weight: 10, term: term() });
        assert_eq!(check(&unit(c)), Err(IncompatibleConstraint::PodAffinity));
    }

    #[test]
    fn required_and_preferred_anti_affinity_rejected() {
        let mut c = PlacementConstraints::default();
        c.pod_anti_affinity.required.push(term());
        assert_eq!(check(&unit(c)), Err(IncompatibleConstraint::PodAntiAffinity));

        let mut c = PlacementConstraints::default();
        c.pod_anti_affinity.preferred.push(WeightedAffinityTerm { weight: 1, term: term() });
        assert_eq!(check(&unit(c)), Err(IncompatibleConstraint::PodAntiAffinity));
    }

    #[test]
    fn hard_spread_rejected_even_among_soft_ones() {
        let c = PlacementConstraints {
            topology_spread: vec![spread(SpreadMode::ScheduleAnyway), spread(SpreadMode::DoNotSchedule)],
            ..PlacementConstraints::default()
        };
        assert_eq!(check(&unit(c)), Err(IncompatibleConstraint::HardTopologySpread));
    }

    #[test]
    fn soft_spread_only_is_compatible() {
        let c = PlacementConstraints {
            topology_spread: vec![spread(SpreadMode::ScheduleAnyway), spread(SpreadMode::ScheduleAnyway)],
            ..PlacementConstraints::default()
        };
        assert_eq!(check(&unit(c)), Ok(()));
    }

    #[test]
    fn affinity_reported_before_spread() {
        let mut c = PlacementConstraints {
            topology_spread: vec![spread(SpreadMode::DoNotSchedule)],
            ..PlacementConstraints::default()
        };
        c.pod_anti_affinity.required.push(term());
        c.pod_affinity.required.push(term());
        assert_eq!(check(&unit(c)), Err(IncompatibleConstraint::PodAffinity));
    }
}

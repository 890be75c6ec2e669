//! End-to-end admission and ordering scenarios.
//!
//! Drives the gate and the ready queue together the way a host would:
//! units arrive one by one, each admission attempt sees the population
//! observed so far, and admitted units are queued.

use warpgrid_gang::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warpgrid_gang=debug")
        .with_test_writer()
        .try_init();
}

fn member(ns: &str, name: &str, group: &str, min: &str) -> SchedulingUnit {
    SchedulingUnit::new(ns, name)
        .with_label(GROUP_NAME_LABEL, group)
        .with_label(GROUP_MIN_SIZE_LABEL, min)
}

fn grp_foo(n: usize) -> Vec<SchedulingUnit> {
    (0..n)
        .map(|i| member("ns1", &format!("p-{i}"), "grp-foo", "2"))
        .collect()
}

#[test]
fn lone_member_waits_for_quorum() {
    init_tracing();
    let gate = GangAdmissionGate::default();
    let snap = InMemorySnapshot::new(grp_foo(1));

    let decision = gate.admit(&grp_foo(1)[0], &snap);
    assert_eq!(
        decision,
        AdmissionDecision::Blocked(
            "waiting for enough units in group ns1/grp-foo (seen: 1, min: 2)".to_string()
        )
    );
    assert!(decision.is_retryable());
}

#[test]
fn quorum_of_two_or_three_admits() {
    init_tracing();
    let gate = GangAdmissionGate::default();
    for n in [2, 3] {
        let units = grp_foo(n);
        let snap = InMemorySnapshot::new(units.clone());
        for unit in &units {
            assert_eq!(gate.admit(unit, &snap), AdmissionDecision::Allow, "n = {n}");
        }
    }
}

#[test]
fn unrelated_units_do_not_count() {
    let gate = GangAdmissionGate::default();
    let mut population = grp_foo(1);
    population.push(SchedulingUnit::new("ns1", "p"));
    population.push(SchedulingUnit::new("default", "p2"));
    population.push(member("ns2", "other-ns", "grp-foo", "2"));
    population.push(member("ns1", "other-group", "grp-bar", "2"));

    let decision = gate.admit(&grp_foo(1)[0], &InMemorySnapshot::new(population));
    assert_eq!(decision.kind(), DecisionKind::Blocked);
    assert!(decision.reason().unwrap().contains("(seen: 1, min: 2)"));
}

#[test]
fn non_integer_minimum_fails() {
    let gate = GangAdmissionGate::default();
    let unit = member("ns1", "p-0", "grp-foo", "abc");
    let populations = [Vec::new(), grp_foo(4), vec![unit.clone()]];
    for population in populations {
        assert_eq!(
            gate.admit(&unit, &InMemorySnapshot::new(population)),
            AdmissionDecision::Failed("invalid group minimum size".to_string())
        );
    }
}

#[test]
fn required_affinity_is_unresolvable_despite_full_gang() {
    let gate = GangAdmissionGate::default();
    let mut constraints = PlacementConstraints::default();
    constraints.pod_affinity.required.push(AffinityTerm {
        label_selector: [("app".to_string(), "db".to_string())].into(),
        namespaces: Vec::new(),
        topology_key: "kubernetes.io/hostname".to_string(),
    });
    let mut units = grp_foo(2);
    units[0].constraints = constraints;

    let decision = gate.admit(&units[0], &InMemorySnapshot::new(units.clone()));
    assert_eq!(decision.kind(), DecisionKind::Unresolvable);
    assert!(
        decision
            .reason()
            .unwrap()
            .ends_with("podAffinity may not use pod group scheduling")
    );
}

#[test]
fn ungrouped_unit_always_admitted() {
    let gate = GangAdmissionGate::default();
    let unit = SchedulingUnit::new("ns1", "p");
    for population in [Vec::new(), vec![unit.clone()], grp_foo(1)] {
        assert!(gate.admit(&unit, &InMemorySnapshot::new(population)).is_allowed());
    }
}

#[test]
fn gang_admitted_once_last_sibling_arrives() {
    init_tracing();
    let gate = GangAdmissionGate::default();
    let mut queue = ReadyQueue::default();
    let mut observed: Vec<SchedulingUnit> = Vec::new();
    let mut parked: Vec<SchedulingUnit> = Vec::new();

    let arrivals = vec![
        member("ns1", "w-0", "train", "3").with_arrival(1),
        SchedulingUnit::new("ns1", "web").with_arrival(2),
        member("ns1", "w-1", "train", "3").with_arrival(3),
        member("ns1", "w-2", "train", "3").with_arrival(4),
    ];

    for unit in arrivals {
        observed.push(unit.clone());
        let snap = InMemorySnapshot::new(observed.clone());

        // Retry parked units against the fresher snapshot, as a host would.
        let mut still_parked = Vec::new();
        for waiting in parked.drain(..).chain(std::iter::once(unit)) {
            match gate.admit(&waiting, &snap) {
                AdmissionDecision::Allow => queue.push(waiting),
                AdmissionDecision::Blocked(_) => still_parked.push(waiting),
                other => panic!("unexpected decision {other}"),
            }
        }
        parked = still_parked;
    }

    assert!(parked.is_empty());
    let order: Vec<String> = queue.into_sorted_vec().into_iter().map(|u| u.name).collect();
    assert_eq!(order, ["web", "w-0", "w-1", "w-2"]);
}

#[test]
fn configured_labels_drive_gate_and_order() {
    let config = GangConfig::from_toml_str(
        r#"
[labels]
group_name = "example.com/gang"
group_min_size = "example.com/gang-size"
"#,
    )
    .unwrap();
    let gate = config.gate();

    let unit = SchedulingUnit::new("ns1", "a")
        .with_label("example.com/gang", "g")
        .with_label("example.com/gang-size", "2");
    let decision = gate.admit(&unit, &vec![unit.clone()]);
    assert_eq!(
        decision,
        AdmissionDecision::Blocked("waiting for enough units in group ns1/g (seen: 1, min: 2)".to_string())
    );

    // The default labels mean nothing under this configuration.
    let default_labelled = member("ns1", "b", "grp-foo", "5");
    assert!(gate.admit(&default_labelled, &Vec::<SchedulingUnit>::new()).is_allowed());

    let cmp = config.comparator();
    assert!(cmp.less(&default_labelled, &unit));
}

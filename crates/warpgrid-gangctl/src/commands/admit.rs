use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;
use warpgrid_gang::{AdmissionDecision, DecisionKind, GangConfig, InMemorySnapshot, SchedulingUnit};

use super::{load_config, load_units};

/// One evaluated unit.
#[derive(Debug, Serialize)]
pub struct AdmissionRow {
    pub unit: String,
    /// Rendered group key; empty for ungrouped units.
    pub group: String,
    #[serde(flatten)]
    pub decision: AdmissionDecision,
}

pub fn admit(
    units_path: &str,
    unit: Option<&str>,
    config_path: Option<&str>,
    format: &str,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let units = load_units(Path::new(units_path))?;
    let rows = evaluate(&config, units, unit)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            print!("{}", format_rows(&rows));
        }
    }

    Ok(())
}

/// Run the gate over `units` (or only the named one), counting siblings
/// in the same listing.
pub fn evaluate(
    config: &GangConfig,
    units: Vec<SchedulingUnit>,
    only: Option<&str>,
) -> anyhow::Result<Vec<AdmissionRow>> {
    let gate = config.gate();
    let snapshot = InMemorySnapshot::with_resolver(units, config.resolver());

    let targets: Vec<_> = match only {
        Some(name) => {
            let Some(found) = snapshot.find(name) else {
                anyhow::bail!("unit {name} not found in listing");
            };
            vec![found]
        }
        None => snapshot.units().iter().collect(),
    };

    let rows: Vec<AdmissionRow> = targets
        .into_iter()
        .map(|u| AdmissionRow {
            unit: u.full_name(),
            group: gate.resolver().group_key_string(u),
            decision: gate.admit(u, &snapshot),
        })
        .collect();

    let tally = tally(&rows);
    info!(
        evaluated = rows.len(),
        groups = snapshot.group_count(),
        allowed = tally.get(&DecisionKind::Allow).copied().unwrap_or(0),
        blocked = tally.get(&DecisionKind::Blocked).copied().unwrap_or(0),
        "admission evaluated"
    );
    Ok(rows)
}

fn tally(rows: &[AdmissionRow]) -> BTreeMap<DecisionKind, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.decision.kind()).or_insert(0) += 1;
    }
    counts
}

pub fn format_rows(rows: &[AdmissionRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let group = if row.group.is_empty() { "-" } else { row.group.as_str() };
        out.push_str(&format!("{:<32} {:<24} {}\n", row.unit, group, row.decision));
    }
    let summary: Vec<String> = tally(rows)
        .into_iter()
        .map(|(kind, n)| format!("{} {}", n, kind.as_str()))
        .collect();
    out.push_str(&format!("\n{} units: {}\n", rows.len(), summary.join(", ")));
    out
}

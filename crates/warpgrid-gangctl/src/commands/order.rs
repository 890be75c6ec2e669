use std::path::Path;

use serde::Serialize;
use tracing::info;
use warpgrid_gang::{GangConfig, InMemorySnapshot, ReadyQueue, SchedulingUnit};

use super::{load_config, load_units};

/// A unit's position in extraction order.
#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub position: usize,
    pub unit: String,
    pub priority: i32,
    pub group: String,
    pub arrived_at: u64,
}

pub fn order(
    units_path: &str,
    admitted_only: bool,
    config_path: Option<&str>,
    format: &str,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let units = load_units(Path::new(units_path))?;
    let rows = evaluate(&config, units, admitted_only);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            for row in &rows {
                let group = if row.group.is_empty() { "-" } else { row.group.as_str() };
                println!(
                    "{:>4}  {:<32} prio={:<6} {:<24} t={}",
                    row.position, row.unit, row.priority, group, row.arrived_at
                );
            }
        }
    }

    Ok(())
}

/// Queue the listing and drain it in extraction order.
pub fn evaluate(config: &GangConfig, units: Vec<SchedulingUnit>, admitted_only: bool) -> Vec<OrderRow> {
    let total = units.len();
    let mut queue = ReadyQueue::new(config.comparator());

    if admitted_only {
        let gate = config.gate();
        let snapshot = InMemorySnapshot::with_resolver(units, config.resolver());
        queue.extend(
            snapshot
                .units()
                .iter()
                .filter(|u| gate.admit(*u, &snapshot).is_allowed())
                .cloned(),
        );
    } else {
        queue.extend(units);
    }

    info!(total, queued = queue.len(), admitted_only, "ready queue built");

    let resolver = config.resolver();
    queue
        .into_sorted_vec()
        .into_iter()
        .enumerate()
        .map(|(i, u)| OrderRow {
            position: i + 1,
            group: resolver.group_key_string(&u),
            unit: u.full_name(),
            priority: u.priority,
            arrived_at: u.arrived_at,
        })
        .collect()
}

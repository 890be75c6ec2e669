pub mod admit;
pub mod config;
pub mod order;

use std::path::Path;

use anyhow::Context;
use tracing::debug;
use warpgrid_gang::{GangConfig, SchedulingUnit};

/// Read a JSON array of units.
pub fn load_units(path: &Path) -> anyhow::Result<Vec<SchedulingUnit>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading unit listing {}", path.display()))?;
    let units: Vec<SchedulingUnit> = serde_json::from_str(&content)
        .with_context(|| format!("parsing unit listing {}", path.display()))?;
    debug!(path = %path.display(), count = units.len(), "loaded unit listing");
    Ok(units)
}

/// Load gang.toml if given, else the defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<GangConfig> {
    match path {
        Some(p) => GangConfig::from_file(Path::new(p))
            .with_context(|| format!("loading config {p}")),
        None => Ok(GangConfig::default()),
    }
}

//! Group identity resolution from unit labels.

use serde::{Deserialize, Serialize};

use crate::error::MalformedGroupSpec;
use crate::types::{GroupKey, SchedulingUnit};

/// Label carrying the name of the unit's pod group.
pub const GROUP_NAME_LABEL: &str = "scheduler.k8s.io/pod-group-name";

/// Label carrying the group's minimum size as a decimal string.
pub const GROUP_MIN_SIZE_LABEL: &str = "scheduler.k8s.io/pod-group-min-size";

/// Which label keys identify a unit's group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelKeys {
    pub group_name: String,
    pub group_min_size: String,
}

impl Default for LabelKeys {
    fn default() -> Self {
        Self {
            group_name: GROUP_NAME_LABEL.to_string(),
            group_min_size: GROUP_MIN_SIZE_LABEL.to_string(),
        }
    }
}

/// Derives a unit's [`GroupKey`] and minimum group size from its labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIdentityResolver {
    keys: LabelKeys,
}

impl GroupIdentityResolver {
    pub fn new(keys: LabelKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &LabelKeys {
        &self.keys
    }

    /// The unit's group, or `None` if it carries no group-name label.
    pub fn resolve_group_key(&self, unit: &SchedulingUnit) -> Option<GroupKey> {
        unit.labels
            .get(&self.keys.group_name)
            .map(|group| GroupKey::new(unit.namespace.clone(), group.clone()))
    }

    /// Rendered group key, or the empty string for ungrouped units.
    pub fn group_key_string(&self, unit: &SchedulingUnit) -> String {
        self.resolve_group_key(unit)
            .map(|key| key.to_string())
            .unwrap_or_default()
    }

    /// Minimum number of siblings required before admission.
    ///
    /// Absent label means no minimum (0). A present value must be a plain
    /// decimal non-negative integer.
    pub fn resolve_min_size(&self, unit: &SchedulingUnit) -> Result<u32, MalformedGroupSpec> {
        let Some(raw) = unit.labels.get(&self.keys.group_min_size) else {
            return Ok(0);
        };
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedGroupSpec { value: raw.clone() });
        }
        raw.parse::<u32>()
            .map_err(|_| MalformedGroupSpec { value: raw.clone() })
    }
}

//! gang.toml configuration parser.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comparator::GangAwareComparator;
use crate::error::{GangError, GangResult};
use crate::gate::GangAdmissionGate;
use crate::group::{GroupIdentityResolver, LabelKeys};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GangConfig {
    pub labels: LabelKeys,
}

impl GangConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> GangResult<Self> {
        let config: GangConfig =
            toml::from_str(content).map_err(|e| GangError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> GangResult<()> {
        if self.labels.group_name.trim().is_empty() {
            return Err(GangError::Config("labels.group_name must not be empty".to_string()));
        }
        if self.labels.group_min_size.trim().is_empty() {
            return Err(GangError::Config(
                "labels.group_min_size must not be empty".to_string(),
            ));
        }
        if self.labels.group_name == self.labels.group_min_size {
            return Err(GangError::Config(
                "labels.group_name and labels.group_min_size must differ".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolver(&self) -> GroupIdentityResolver {
        GroupIdentityResolver::new(self.labels.clone())
    }

    pub fn gate(&self) -> GangAdmissionGate {
        GangAdmissionGate::new(self.resolver())
    }

    pub fn comparator(&self) -> GangAwareComparator {
        GangAwareComparator::new(self.resolver())
    }
}

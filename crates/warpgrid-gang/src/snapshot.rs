//! Read-only view of the units currently known to the host.
//!
//! The gate never owns live state; it asks a [`UnitSnapshot`] for the
//! current population on every call. Hosts back this with their own
//! cache or informer, tests inject an [`InMemorySnapshot`].

use std::collections::HashMap;

use crate::error::SnapshotError;
use crate::group::GroupIdentityResolver;
use crate::types::{GroupKey, SchedulingUnit};

/// Point-in-time listing of all units known to the host.
pub trait UnitSnapshot: Send + Sync {
    /// Every unit currently known. May be empty.
    fn list_all(&self) -> Result<Vec<SchedulingUnit>, SnapshotError>;

    /// Number of units whose group key equals `key`.
    ///
    /// The default scans [`list_all`](Self::list_all). Providers that keep
    /// a group index should override it; results must match the scan.
    fn count_members(
        &self,
        key: &GroupKey,
        resolver: &GroupIdentityResolver,
    ) -> Result<usize, SnapshotError> {
        let units = self.list_all()?;
        Ok(units
            .iter()
            .filter(|u| resolver.resolve_group_key(u).as_ref() == Some(key))
            .count())
    }
}

impl UnitSnapshot for Vec<SchedulingUnit> {
    fn list_all(&self) -> Result<Vec<SchedulingUnit>, SnapshotError> {
        Ok(self.clone())
    }
}

impl<T: UnitSnapshot + ?Sized> UnitSnapshot for &T {
    fn list_all(&self) -> Result<Vec<SchedulingUnit>, SnapshotError> {
        (**self).list_all()
    }

    fn count_members(
        &self,
        key: &GroupKey,
        resolver: &GroupIdentityResolver,
    ) -> Result<usize, SnapshotError> {
        (**self).count_members(key, resolver)
    }
}

/// Immutable snapshot with a per-group member index.
///
/// The index is built once against the resolver given at construction;
/// counting with a different resolver falls back to a scan.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    units: Vec<SchedulingUnit>,
    resolver: GroupIdentityResolver,
    members: HashMap<GroupKey, usize>,
}

impl InMemorySnapshot {
    /// Index `units` using the default group labels.
    pub fn new(units: Vec<SchedulingUnit>) -> Self {
        Self::with_resolver(units, GroupIdentityResolver::default())
    }

    pub fn with_resolver(units: Vec<SchedulingUnit>, resolver: GroupIdentityResolver) -> Self {
        let mut members: HashMap<GroupKey, usize> = HashMap::new();
        for unit in &units {
            if let Some(key) = resolver.resolve_group_key(unit) {
                *members.entry(key).or_insert(0) += 1;
            }
        }
        Self {
            units,
            resolver,
            members,
        }
    }

    pub fn units(&self) -> &[SchedulingUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of distinct groups in the snapshot.
    pub fn group_count(&self) -> usize {
        self.members.len()
    }

    /// Find a unit by `namespace/name`.
    pub fn find(&self, full_name: &str) -> Option<&SchedulingUnit> {
        self.units.iter().find(|u| u.full_name() == full_name)
    }
}

impl UnitSnapshot for InMemorySnapshot {
    fn list_all(&self) -> Result<Vec<SchedulingUnit>, SnapshotError> {
        Ok(self.units.clone())
    }

    fn count_members(
        &self,
        key: &GroupKey,
        resolver: &GroupIdentityResolver,
    ) -> Result<usize, SnapshotError> {
        if *resolver != self.resolver {
            return Ok(self
                .units
                .iter()
                .filter(|u| resolver.resolve_group_key(u).as_ref() == Some(key))
                .count());
        }
        Ok(self.members.get(key).copied().unwrap_or(0))
    }
}

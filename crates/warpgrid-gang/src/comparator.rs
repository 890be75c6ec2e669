//! Gang-aware extraction order for the ready queue.
//!
//! Units are ordered by:
//! 1. priority, highest first;
//! 2. rendered group key ascending, ungrouped (`""`) first;
//! 3. arrival time, earliest first.
//!
//! Step 2 keeps siblings adjacent in the queue without extra bookkeeping.
//! It is lexicographic on `namespace/group`, so at equal priority a group
//! can wait behind other groups indefinitely and ungrouped units always
//! go ahead of any group. Ordering groups by their oldest member's
//! arrival, or alternating between a gang queue and a bare queue, would
//! lift that; both need state this comparator does not keep.

use std::cmp::{Ordering, Reverse};

use crate::group::GroupIdentityResolver;
use crate::types::SchedulingUnit;

/// Materialized ordering key. Comparing keys is equivalent to
/// [`GangAwareComparator::compare`] on the units they came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub priority: Reverse<i32>,
    pub group: String,
    pub arrived_at: u64,
}

/// Strict weak ordering over pending units.
#[derive(Debug, Clone, Default)]
pub struct GangAwareComparator {
    resolver: GroupIdentityResolver,
}

impl GangAwareComparator {
    pub fn new(resolver: GroupIdentityResolver) -> Self {
        Self { resolver }
    }

    pub fn sort_key(&self, unit: &SchedulingUnit) -> SortKey {
        SortKey {
            priority: Reverse(unit.priority),
            group: self.resolver.group_key_string(unit),
            arrived_at: unit.arrived_at,
        }
    }

    /// `Less` means `a` is extracted before `b`.
    pub fn compare(&self, a: &SchedulingUnit, b: &SchedulingUnit) -> Ordering {
        b.priority
            .cmp(&a.priority)
            .then_with(|| {
                self.resolver
                    .group_key_string(a)
                    .cmp(&self.resolver.group_key_string(b))
            })
            .then_with(|| a.arrived_at.cmp(&b.arrived_at))
    }

    pub fn less(&self, a: &SchedulingUnit, b: &SchedulingUnit) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Stable sort into extraction order.
    pub fn sort(&self, units: &mut [SchedulingUnit]) {
        units.sort_by_cached_key(|u| self.sort_key(u));
    }
}

//! warpgrid-gang — gang admission and gang-aware queue ordering.
//!
//! Keeps units of a multi-unit group out of the ready queue until enough
//! siblings are known, and orders pending units so that priority
//! dominates while siblings of the same group sit next to each other.
//! It does NOT place units or persist group membership; membership is
//! re-derived from unit labels on every call.
//!
//! # Components
//!
//! - **`group`** — Group key and minimum size from unit labels
//! - **`constraints`** — Rejects affinity / anti-affinity / hard spread
//! - **`snapshot`** — Read-only view of all known units (host supplied)
//! - **`gate`** — Admission decision (`Allow | Blocked | Unresolvable | Failed`)
//! - **`comparator`** — Priority, then group key, then arrival
//! - **`queue`** — Ready queue extracting in comparator order
//! - **`config`** — gang.toml parsing

pub mod comparator;
pub mod config;
pub mod constraints;
pub mod error;
pub mod gate;
pub mod group;
pub mod queue;
pub mod snapshot;
pub mod types;

pub use comparator::{GangAwareComparator, SortKey};
pub use config::GangConfig;
pub use error::{GangError, GangResult, IncompatibleConstraint, MalformedGroupSpec, SnapshotError};
pub use gate::{AdmissionDecision, DecisionKind, GangAdmissionGate};
pub use group::{GROUP_MIN_SIZE_LABEL, GROUP_NAME_LABEL, GroupIdentityResolver, LabelKeys};
pub use queue::ReadyQueue;
pub use snapshot::{InMemorySnapshot, UnitSnapshot};
pub use types::*;

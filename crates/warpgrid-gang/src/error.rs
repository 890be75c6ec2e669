//! Gang admission error types.

use thiserror::Error;

/// The group minimum-size label is present but not a non-negative integer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid group minimum size")]
pub struct MalformedGroupSpec {
    /// The raw label value that failed to parse.
    pub value: String,
}

/// A grouped unit declares a placement rule gang admission cannot honor.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IncompatibleConstraint {
    #[error("pods with podAffinity may not use pod group scheduling")]
    PodAffinity,

    #[error("pods with podAntiAffinity may not use pod group scheduling")]
    PodAntiAffinity,

    #[error("pods with hard topologySpreadConstraints may not use pod group scheduling")]
    HardTopologySpread,
}

/// The live unit listing could not be read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to list units: {0}")]
pub struct SnapshotError(pub String);

/// Errors that can occur while evaluating a unit's gang membership.
#[derive(Debug, Error)]
pub enum GangError {
    #[error(transparent)]
    MalformedGroupSpec(#[from] MalformedGroupSpec),

    #[error(transparent)]
    IncompatibleConstraint(#[from] IncompatibleConstraint),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type GangResult<T> = Result<T, GangError>;

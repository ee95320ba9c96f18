//! Error types for the dispatch layer.
//!
//! Unit-layer failures are raised before any kernel work starts; kernel
//! failures pass through unchanged.

use crate::op::OpId;
use dq_kernels::KernelError;
use dq_units::{Unit, UnitsError};
use thiserror::Error;

pub type DispatchResult<T> = Result<T, DispatchError>;

fn join_units(units: &[Unit]) -> String {
    units
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Operands that must share one unit do not; carries every distinct
    /// unit observed, not just the first mismatched pair.
    #[error("Inconsistent units for {op}: found [{}]", join_units(.units))]
    Inconsistency { op: OpId, units: Vec<Unit> },

    /// Conversion and unknown-symbol failures from the unit algebra.
    #[error(transparent)]
    Units(#[from] UnitsError),

    /// An explicit binning range bound without a unit; a bare bound cannot
    /// be interpreted safely.
    #[error("Range bounds for {op} must carry a unit")]
    MissingRangeUnit { op: OpId },

    /// Raw kernel failure, propagated without reinterpretation.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Malformed call: wrong operand count or missing argument.
    #[error("Invalid call to {op}: {what}")]
    InvalidCall { op: OpId, what: String },

    /// Internal guard: a handler produced a result shape its entry point
    /// does not expect.
    #[error("Unexpected result shape from {op}")]
    UnexpectedOutcome { op: OpId },
}

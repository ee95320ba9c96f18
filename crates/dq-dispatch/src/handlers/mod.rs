//! Per-operation derivation handlers.
//!
//! Five families share a handful of helpers: operand arity checks, the
//! homogeneous-units consistency rule, binning-range sanitizing, and
//! output-buffer completion. Every handler validates units before the
//! kernel runs; a caller-supplied output buffer is never touched on a
//! validation failure.

mod binning;
mod compare;
mod homogeneous;
mod linear;
mod passthrough;
mod product;
mod transform;

use crate::call::{CallOptions, OpCall, OpOutcome};
use crate::error::{DispatchError, DispatchResult};
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::{OperandRef, UnitArray};
use dq_kernels::KernelError;
use dq_units::Unit;
use ndarray::ArrayD;

pub(crate) fn register_all(table: &mut HandlerTable) {
    product::register(table);
    homogeneous::register(table);
    binning::register(table);
    passthrough::register(table);
    transform::register(table);
    linear::register(table);
    compare::register(table);
}

// ---------------------------------------------------------------------------
// Arity helpers
// ---------------------------------------------------------------------------

pub(crate) fn unary<'a>(op: OpId, call: &OpCall<'a>) -> DispatchResult<OperandRef<'a>> {
    match call.operands.as_slice() {
        [a] => Ok(*a),
        other => Err(DispatchError::InvalidCall {
            op,
            what: format!("expected 1 operand, got {}", other.len()),
        }),
    }
}

pub(crate) fn binary<'a>(
    op: OpId,
    call: &OpCall<'a>,
) -> DispatchResult<(OperandRef<'a>, OperandRef<'a>)> {
    match call.operands.as_slice() {
        [a, b] => Ok((*a, *b)),
        other => Err(DispatchError::InvalidCall {
            op,
            what: format!("expected 2 operands, got {}", other.len()),
        }),
    }
}

/// The real payload of an operand, rejecting complex input.
pub(crate) fn real_of<'a>(
    op: OpId,
    operand: OperandRef<'a>,
) -> DispatchResult<&'a ArrayD<f64>> {
    operand.real().ok_or_else(|| DispatchError::InvalidCall {
        op,
        what: "expected a real-valued operand, got complex".to_string(),
    })
}

/// A single-element operand read as a plain scalar.
pub(crate) fn scalar_of(op: OpId, operand: OperandRef<'_>) -> DispatchResult<f64> {
    let raw = real_of(op, operand)?;
    if raw.len() == 1 {
        Ok(raw.iter().next().copied().unwrap_or(f64::NAN))
    } else {
        Err(DispatchError::InvalidCall {
            op,
            what: format!("expected a scalar operand, got shape {:?}", raw.shape()),
        })
    }
}

// ---------------------------------------------------------------------------
// Unit collection and the homogeneous-units rule
// ---------------------------------------------------------------------------

/// Units of every operand, bare operands recorded as NULL_UNIT.
pub(crate) fn collect_units(operands: &[OperandRef<'_>]) -> Vec<Unit> {
    operands.iter().map(|op| op.unit_or_null()).collect()
}

/// The homogeneous-family rule: exactly one distinct unit across all
/// operands, or an inconsistency error naming every distinct unit found.
pub(crate) fn validate_consistency(op: OpId, units: &[Unit]) -> DispatchResult<Unit> {
    let mut distinct: Vec<Unit> = Vec::new();
    for unit in units {
        if !distinct.contains(unit) {
            distinct.push(unit.clone());
        }
    }
    match distinct.len() {
        1 => Ok(distinct.remove(0)),
        0 => Err(DispatchError::InvalidCall {
            op,
            what: "no operands supplied".to_string(),
        }),
        _ => Err(DispatchError::Inconsistency { op, units: distinct }),
    }
}

// ---------------------------------------------------------------------------
// Binning-range sanitizing
// ---------------------------------------------------------------------------

/// Convert explicit per-dimension range bounds into the sample units.
///
/// Each bound must be unit-tagged: a bare number cannot be assumed to be
/// in the sample's unit. Conversion failures carry both units and both
/// dimension descriptors.
pub(crate) fn sanitize_range(
    op: OpId,
    opts: &CallOptions,
    sample_units: &[Unit],
) -> DispatchResult<Option<Vec<(f64, f64)>>> {
    let Some(pairs) = opts.range.as_ref() else {
        return Ok(None);
    };
    if pairs.len() != sample_units.len() {
        return Err(DispatchError::InvalidCall {
            op,
            what: format!(
                "got {} range pairs for {} sample dimensions",
                pairs.len(),
                sample_units.len()
            ),
        });
    }
    let mut sanitized = Vec::with_capacity(pairs.len());
    for ((lo, hi), unit) in pairs.iter().zip(sample_units) {
        let lo_unit = lo.unit.as_ref().ok_or(DispatchError::MissingRangeUnit { op })?;
        let hi_unit = hi.unit.as_ref().ok_or(DispatchError::MissingRangeUnit { op })?;
        sanitized.push((
            lo.value * lo_unit.conversion_factor(unit)?,
            hi.value * hi_unit.conversion_factor(unit)?,
        ));
    }
    Ok(Some(sanitized))
}

// ---------------------------------------------------------------------------
// Result completion
// ---------------------------------------------------------------------------

/// Tag a kernel result, writing numerics and the derived unit into the
/// caller's output buffer when one was supplied. The returned wrapper and
/// the buffer carry the same unit and values.
pub(crate) fn finish_array(
    res: ArrayD<f64>,
    unit: Unit,
    out: Option<&mut UnitArray>,
) -> DispatchResult<OpOutcome> {
    if let Some(out) = out {
        if out.shape() != res.shape() {
            return Err(DispatchError::Kernel(KernelError::ShapeMismatch {
                what: format!(
                    "output buffer shape {:?} does not match result shape {:?}",
                    out.shape(),
                    res.shape()
                ),
            }));
        }
        out.data_mut().assign(&res);
        out.set_unit(unit.clone());
    }
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_units::{meter, second};
    use ndarray::IxDyn;

    #[test]
    fn consistency_lists_every_distinct_unit() {
        let units = vec![meter(), second(), meter(), Unit::dimensionless()];
        let err = validate_consistency(OpId::Concatenate, &units).unwrap_err();
        match err {
            DispatchError::Inconsistency { op, units } => {
                assert_eq!(op, OpId::Concatenate);
                assert_eq!(units.len(), 3);
                assert!(units.contains(&meter()));
                assert!(units.contains(&second()));
                assert!(units.contains(&Unit::dimensionless()));
            }
            other => panic!("expected inconsistency, got {other}"),
        }
    }

    #[test]
    fn consistency_accepts_one_unit() {
        let unit = validate_consistency(OpId::Vstack, &[meter(), meter()]).unwrap();
        assert_eq!(unit, meter());
    }

    #[test]
    fn finish_array_mutates_out_buffer() {
        let res = ArrayD::from_elem(IxDyn(&[2]), 7.0);
        let mut out = UnitArray::bare(ArrayD::from_elem(IxDyn(&[2]), 0.0));
        let outcome = finish_array(res, meter(), Some(&mut out)).unwrap();
        assert_eq!(out.unit(), &meter());
        assert_eq!(out.data().as_slice().unwrap(), &[7.0, 7.0]);
        match outcome {
            OpOutcome::Array(a) => assert_eq!(a.unit(), out.unit()),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn finish_array_rejects_mismatched_buffer() {
        let res = ArrayD::from_elem(IxDyn(&[2]), 7.0);
        let mut out = UnitArray::bare(ArrayD::from_elem(IxDyn(&[3]), 0.0));
        assert!(finish_array(res, meter(), Some(&mut out)).is_err());
        // Failed validation leaves the buffer untouched.
        assert!(out.unit().is_null());
    }
}

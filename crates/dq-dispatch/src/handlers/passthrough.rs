//! Pass-through family: the input unit survives unchanged, with the two
//! exceptions that earn their own rules (variance squares the unit, and
//! `copyto` overwrites the destination's unit from a tagged source).

use super::{finish_array, real_of, unary};
use crate::call::{OpCall, OpOutcome};
use crate::error::{DispatchError, DispatchResult};
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::UnitArray;
use dq_kernels::{linalg, reduce, KernelError};

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::Around, around);
    table.register(OpId::SortComplex, sort_complex);
    table.register(OpId::Norm, norm);
    table.register(OpId::Trace, trace);
    table.register(OpId::Percentile, percentile);
    table.register(OpId::Quantile, quantile);
    table.register(OpId::NanPercentile, nanpercentile);
    table.register(OpId::NanQuantile, nanquantile);
    table.register(OpId::Var, var);
    table.register(OpId::CopyTo, copyto);
}

fn around(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Around, &call)?;
    let unit = a.unit_or_null();
    let res = reduce::around(real_of(OpId::Around, a)?, call.opts.decimals);
    finish_array(res, unit, call.out)
}

/// Accepts both real and complex input; real values widen before the sort.
fn sort_complex(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::SortComplex, &call)?;
    let unit = a.unit_or_null();
    let res = reduce::sort_complex(&a.as_complex());
    Ok(OpOutcome::Complex(UnitArray::new(res, unit)))
}

fn norm(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Norm, &call)?;
    let unit = a.unit_or_null();
    let res = linalg::norm(real_of(OpId::Norm, a)?)?;
    finish_array(res, unit, None)
}

fn trace(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Trace, &call)?;
    let unit = a.unit_or_null();
    let res = linalg::trace(real_of(OpId::Trace, a)?)?;
    finish_array(res, unit, None)
}

fn percentile(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Percentile, &call)?;
    let unit = a.unit_or_null();
    let res = reduce::percentile(real_of(OpId::Percentile, a)?, call.opts.q)?;
    finish_array(res, unit, None)
}

fn quantile(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Quantile, &call)?;
    let unit = a.unit_or_null();
    let res = reduce::quantile(real_of(OpId::Quantile, a)?, call.opts.q)?;
    finish_array(res, unit, None)
}

fn nanpercentile(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::NanPercentile, &call)?;
    let unit = a.unit_or_null();
    let res = reduce::nanpercentile(real_of(OpId::NanPercentile, a)?, call.opts.q)?;
    finish_array(res, unit, None)
}

fn nanquantile(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::NanQuantile, &call)?;
    let unit = a.unit_or_null();
    let res = reduce::nanquantile(real_of(OpId::NanQuantile, a)?, call.opts.q)?;
    finish_array(res, unit, None)
}

/// Variance is a second moment: the unit comes back squared.
fn var(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Var, &call)?;
    let unit = a.unit_or_null().powi(2);
    let res = reduce::var(real_of(OpId::Var, a)?, call.opts.ddof)?;
    finish_array(res, unit, None)
}

/// Write the source into the destination buffer. A tagged source imposes
/// its unit on the destination; a bare source leaves the destination's
/// unit alone.
fn copyto(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let src = unary(OpId::CopyTo, &call)?;
    let src_unit = if src.is_tagged() {
        Some(src.unit_or_null())
    } else {
        None
    };
    let src_raw = real_of(OpId::CopyTo, src)?;
    let dst = call.out.ok_or(DispatchError::InvalidCall {
        op: OpId::CopyTo,
        what: "requires a destination buffer".to_string(),
    })?;
    if dst.shape() != src_raw.shape() {
        return Err(DispatchError::Kernel(KernelError::ShapeMismatch {
            what: format!(
                "destination shape {:?} does not match source shape {:?}",
                dst.shape(),
                src_raw.shape()
            ),
        }));
    }
    dst.data_mut().assign(src_raw);
    if let Some(unit) = src_unit {
        dst.set_unit(unit);
    }
    Ok(OpOutcome::Written)
}

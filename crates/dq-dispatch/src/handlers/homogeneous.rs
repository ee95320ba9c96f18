//! Homogeneous-units family: every operand must carry exactly the same
//! unit, and the result keeps it. A bare operand mixed with tagged ones
//! reads as NULL_UNIT and trips the inconsistency error, which names every
//! distinct unit encountered.

use super::{binary, collect_units, finish_array, real_of, scalar_of, validate_consistency};
use crate::call::{OpCall, OpOutcome};
use crate::error::DispatchResult;
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::OperandRef;
use dq_kernels::shape;
use dq_units::Unit;
use ndarray::ArrayD;

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::Concatenate, concatenate);
    table.register(OpId::Stack, stack);
    table.register(OpId::Vstack, vstack);
    table.register(OpId::Hstack, hstack);
    table.register(OpId::Dstack, dstack);
    table.register(OpId::ColumnStack, column_stack);
    table.register(OpId::Block, block);
    table.register(OpId::Intersect1d, intersect1d);
    table.register(OpId::Union1d, union1d);
    table.register(OpId::Linspace, linspace);
    table.register(OpId::Logspace, logspace);
    table.register(OpId::Geomspace, geomspace);
}

fn common_unit(op: OpId, operands: &[OperandRef<'_>]) -> DispatchResult<Unit> {
    validate_consistency(op, &collect_units(operands))
}

fn raws<'a>(op: OpId, operands: &[OperandRef<'a>]) -> DispatchResult<Vec<&'a ArrayD<f64>>> {
    operands.iter().map(|operand| real_of(op, *operand)).collect()
}

fn concatenate(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let unit = common_unit(OpId::Concatenate, &call.operands)?;
    let res = shape::concatenate(&raws(OpId::Concatenate, &call.operands)?, call.opts.axis)?;
    finish_array(res, unit, call.out)
}

fn stack(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let unit = common_unit(OpId::Stack, &call.operands)?;
    let res = shape::stack(&raws(OpId::Stack, &call.operands)?, call.opts.axis)?;
    finish_array(res, unit, call.out)
}

fn vstack(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let unit = common_unit(OpId::Vstack, &call.operands)?;
    let res = shape::vstack(&raws(OpId::Vstack, &call.operands)?)?;
    finish_array(res, unit, None)
}

fn hstack(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let unit = common_unit(OpId::Hstack, &call.operands)?;
    let res = shape::hstack(&raws(OpId::Hstack, &call.operands)?)?;
    finish_array(res, unit, None)
}

fn dstack(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let unit = common_unit(OpId::Dstack, &call.operands)?;
    let res = shape::dstack(&raws(OpId::Dstack, &call.operands)?)?;
    finish_array(res, unit, None)
}

fn column_stack(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let unit = common_unit(OpId::ColumnStack, &call.operands)?;
    let res = shape::column_stack(&raws(OpId::ColumnStack, &call.operands)?)?;
    finish_array(res, unit, None)
}

/// Block assembly reads the nested grid; consistency spans every leaf.
fn block(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let flat: Vec<OperandRef<'_>> = call.grid.iter().flatten().copied().collect();
    let unit = common_unit(OpId::Block, &flat)?;
    let grid: Vec<Vec<&ArrayD<f64>>> = call
        .grid
        .iter()
        .map(|row| raws(OpId::Block, row))
        .collect::<DispatchResult<_>>()?;
    let res = shape::block(&grid)?;
    finish_array(res, unit, None)
}

fn intersect1d(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Intersect1d, &call)?;
    let unit = common_unit(OpId::Intersect1d, &call.operands)?;
    let res = shape::intersect1d(
        real_of(OpId::Intersect1d, a)?,
        real_of(OpId::Intersect1d, b)?,
    );
    finish_array(res, unit, None)
}

fn union1d(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Union1d, &call)?;
    let unit = common_unit(OpId::Union1d, &call.operands)?;
    let res = shape::union1d(real_of(OpId::Union1d, a)?, real_of(OpId::Union1d, b)?);
    finish_array(res, unit, None)
}

fn linspace(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (start, stop) = binary(OpId::Linspace, &call)?;
    let unit = common_unit(OpId::Linspace, &call.operands)?;
    let res = shape::linspace(
        scalar_of(OpId::Linspace, start)?,
        scalar_of(OpId::Linspace, stop)?,
        call.opts.num,
    )?;
    finish_array(res, unit, None)
}

fn logspace(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (start, stop) = binary(OpId::Logspace, &call)?;
    let unit = common_unit(OpId::Logspace, &call.operands)?;
    let res = shape::logspace(
        scalar_of(OpId::Logspace, start)?,
        scalar_of(OpId::Logspace, stop)?,
        call.opts.num,
    )?;
    finish_array(res, unit, None)
}

fn geomspace(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (start, stop) = binary(OpId::Geomspace, &call)?;
    let unit = common_unit(OpId::Geomspace, &call.operands)?;
    let res = shape::geomspace(
        scalar_of(OpId::Geomspace, start)?,
        scalar_of(OpId::Geomspace, stop)?,
        call.opts.num,
    )?;
    finish_array(res, unit, None)
}

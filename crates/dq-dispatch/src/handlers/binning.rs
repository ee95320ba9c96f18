//! Range-bounded binning family. Counts come back bare; edge arrays carry
//! the unit of the sample dimension they bound. Explicit range bounds are
//! sanitized into sample units before any counting happens.

use super::{binary, real_of, sanitize_range, unary};
use crate::call::{HistogramOutcome, OpCall, OpOutcome};
use crate::error::{DispatchError, DispatchResult};
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::UnitArray;
use dq_kernels::histogram;
use dq_units::Unit;

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::Histogram, histogram1d);
    table.register(OpId::Histogram2d, histogram2d);
    table.register(OpId::HistogramDd, histogramdd);
}

fn histogram1d(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Histogram, &call)?;
    let sample_units = [a.unit_or_null()];
    let range = sanitize_range(OpId::Histogram, &call.opts, &sample_units)?;
    let (counts, edges) = histogram::histogram(
        real_of(OpId::Histogram, a)?,
        call.opts.bins,
        range.map(|r| r[0]),
    )?;
    let [unit] = sample_units;
    Ok(OpOutcome::Histogram(HistogramOutcome {
        counts,
        edges: vec![UnitArray::new(edges, unit)],
    }))
}

fn histogram2d(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (x, y) = binary(OpId::Histogram2d, &call)?;
    let sample_units = [x.unit_or_null(), y.unit_or_null()];
    let range = sanitize_range(OpId::Histogram2d, &call.opts, &sample_units)?;
    let (counts, xedges, yedges) = histogram::histogram2d(
        real_of(OpId::Histogram2d, x)?,
        real_of(OpId::Histogram2d, y)?,
        call.opts.bins,
        range.as_deref(),
    )?;
    let [xu, yu] = sample_units;
    Ok(OpOutcome::Histogram(HistogramOutcome {
        counts,
        edges: vec![UnitArray::new(xedges, xu), UnitArray::new(yedges, yu)],
    }))
}

fn histogramdd(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    if call.operands.is_empty() {
        return Err(DispatchError::InvalidCall {
            op: OpId::HistogramDd,
            what: "expected at least 1 sample dimension".to_string(),
        });
    }
    let sample_units: Vec<Unit> = call.operands.iter().map(|op| op.unit_or_null()).collect();
    let range = sanitize_range(OpId::HistogramDd, &call.opts, &sample_units)?;
    let samples: Vec<_> = call
        .operands
        .iter()
        .map(|op| real_of(OpId::HistogramDd, *op))
        .collect::<DispatchResult<_>>()?;
    let (counts, edge_arrays) =
        histogram::histogramdd(&samples, call.opts.bins, range.as_deref())?;
    let edges = edge_arrays
        .into_iter()
        .zip(sample_units)
        .map(|(edges, unit)| UnitArray::new(edges, unit))
        .collect();
    Ok(OpOutcome::Histogram(HistogramOutcome { counts, edges }))
}

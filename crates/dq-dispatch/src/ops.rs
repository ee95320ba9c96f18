//! Typed entry points, one per registered operation.
//!
//! Each function routes through the process-wide standard dispatcher and
//! destructures the outcome into the shape the operation documents. Use
//! [`crate::Dispatcher`] directly to route through a custom handler table.

use crate::call::{CallOptions, HistogramOutcome, LstsqOutcome, OpCall, OpOutcome};
use crate::dispatcher::global;
use crate::error::{DispatchError, DispatchResult};
use crate::op::OpId;
use dq_array::{ComplexUnitArray, OperandRef, ScalarBound, UnitArray};
use ndarray::ArrayD;

// ---------------------------------------------------------------------------
// Outcome destructuring
// ---------------------------------------------------------------------------

fn expect_array(op: OpId, outcome: OpOutcome) -> DispatchResult<UnitArray> {
    match outcome {
        OpOutcome::Array(a) => Ok(a),
        _ => Err(DispatchError::UnexpectedOutcome { op }),
    }
}

fn expect_complex(op: OpId, outcome: OpOutcome) -> DispatchResult<ComplexUnitArray> {
    match outcome {
        OpOutcome::Complex(a) => Ok(a),
        _ => Err(DispatchError::UnexpectedOutcome { op }),
    }
}

fn expect_histogram(op: OpId, outcome: OpOutcome) -> DispatchResult<HistogramOutcome> {
    match outcome {
        OpOutcome::Histogram(h) => Ok(h),
        _ => Err(DispatchError::UnexpectedOutcome { op }),
    }
}

// ---------------------------------------------------------------------------
// Shared call shapes
// ---------------------------------------------------------------------------

fn unary_array(op: OpId, a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    expect_array(op, global().call(op, OpCall::new(vec![a]))?)
}

fn unary_complex(op: OpId, a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    expect_complex(op, global().call(op, OpCall::new(vec![a]))?)
}

fn binary_array<'a>(
    op: OpId,
    a: OperandRef<'a>,
    b: OperandRef<'a>,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    expect_array(op, global().call(op, OpCall::new(vec![a, b]).with_out(out))?)
}

fn nary_array<'a>(
    op: OpId,
    operands: Vec<OperandRef<'a>>,
    opts: CallOptions,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    expect_array(
        op,
        global().call(op, OpCall::new(operands).with_opts(opts).with_out(out))?,
    )
}

fn quantile_like(op: OpId, a: OperandRef<'_>, q: f64) -> DispatchResult<UnitArray> {
    let opts = CallOptions { q, ..Default::default() };
    expect_array(op, global().call(op, OpCall::new(vec![a]).with_opts(opts))?)
}

fn spaced<'a>(
    op: OpId,
    start: OperandRef<'a>,
    stop: OperandRef<'a>,
    num: usize,
) -> DispatchResult<UnitArray> {
    let opts = CallOptions { num, ..Default::default() };
    expect_array(op, global().call(op, OpCall::new(vec![start, stop]).with_opts(opts))?)
}

// ---------------------------------------------------------------------------
// Product/quotient family
// ---------------------------------------------------------------------------

pub fn dot<'a>(
    a: OperandRef<'a>,
    b: OperandRef<'a>,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    binary_array(OpId::Dot, a, b, out)
}

pub fn vdot<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Vdot, a, b, None)
}

pub fn inner<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Inner, a, b, None)
}

pub fn outer<'a>(
    a: OperandRef<'a>,
    b: OperandRef<'a>,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    binary_array(OpId::Outer, a, b, out)
}

pub fn kron<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Kron, a, b, None)
}

pub fn cross<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Cross, a, b, None)
}

/// Trapezoidal integration of `y`, against explicit sample points `x` or a
/// uniform (optionally unit-tagged) spacing `dx`.
pub fn trapz<'a>(
    y: OperandRef<'a>,
    x: Option<OperandRef<'a>>,
    dx: ScalarBound,
) -> DispatchResult<UnitArray> {
    let mut operands = vec![y];
    operands.extend(x);
    let opts = CallOptions { dx, ..Default::default() };
    expect_array(
        OpId::Trapz,
        global().call(OpId::Trapz, OpCall::new(operands).with_opts(opts))?,
    )
}

pub fn prod(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Prod, a)
}

pub fn inv(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Inv, a)
}

pub fn pinv(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Pinv, a)
}

pub fn tensorinv(a: OperandRef<'_>, ind: usize) -> DispatchResult<UnitArray> {
    let opts = CallOptions { ind, ..Default::default() };
    expect_array(
        OpId::TensorInv,
        global().call(OpId::TensorInv, OpCall::new(vec![a]).with_opts(opts))?,
    )
}

// ---------------------------------------------------------------------------
// Homogeneous-units family
// ---------------------------------------------------------------------------

pub fn concatenate<'a>(
    arrays: Vec<OperandRef<'a>>,
    axis: usize,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    let opts = CallOptions { axis, ..Default::default() };
    nary_array(OpId::Concatenate, arrays, opts, out)
}

pub fn stack<'a>(
    arrays: Vec<OperandRef<'a>>,
    axis: usize,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    let opts = CallOptions { axis, ..Default::default() };
    nary_array(OpId::Stack, arrays, opts, out)
}

pub fn vstack(arrays: Vec<OperandRef<'_>>) -> DispatchResult<UnitArray> {
    nary_array(OpId::Vstack, arrays, CallOptions::default(), None)
}

pub fn hstack(arrays: Vec<OperandRef<'_>>) -> DispatchResult<UnitArray> {
    nary_array(OpId::Hstack, arrays, CallOptions::default(), None)
}

pub fn dstack(arrays: Vec<OperandRef<'_>>) -> DispatchResult<UnitArray> {
    nary_array(OpId::Dstack, arrays, CallOptions::default(), None)
}

pub fn column_stack(arrays: Vec<OperandRef<'_>>) -> DispatchResult<UnitArray> {
    nary_array(OpId::ColumnStack, arrays, CallOptions::default(), None)
}

/// Assemble a matrix from a nested grid of blocks; every leaf must carry
/// the same unit.
pub fn block(grid: Vec<Vec<OperandRef<'_>>>) -> DispatchResult<UnitArray> {
    expect_array(
        OpId::Block,
        global().call(OpId::Block, OpCall::new(Vec::new()).with_grid(grid))?,
    )
}

pub fn intersect1d<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Intersect1d, a, b, None)
}

pub fn union1d<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Union1d, a, b, None)
}

pub fn linspace<'a>(
    start: OperandRef<'a>,
    stop: OperandRef<'a>,
    num: usize,
) -> DispatchResult<UnitArray> {
    spaced(OpId::Linspace, start, stop, num)
}

pub fn logspace<'a>(
    start: OperandRef<'a>,
    stop: OperandRef<'a>,
    num: usize,
) -> DispatchResult<UnitArray> {
    spaced(OpId::Logspace, start, stop, num)
}

pub fn geomspace<'a>(
    start: OperandRef<'a>,
    stop: OperandRef<'a>,
    num: usize,
) -> DispatchResult<UnitArray> {
    spaced(OpId::Geomspace, start, stop, num)
}

// ---------------------------------------------------------------------------
// Range-bounded binning family
// ---------------------------------------------------------------------------

fn binning_opts(bins: usize, ranges: Option<Vec<(ScalarBound, ScalarBound)>>) -> CallOptions {
    CallOptions {
        bins,
        range: ranges,
        ..Default::default()
    }
}

/// 1-D histogram: bare counts plus one tagged edge array.
pub fn histogram(
    a: OperandRef<'_>,
    bins: usize,
    range: Option<(ScalarBound, ScalarBound)>,
) -> DispatchResult<(ArrayD<f64>, UnitArray)> {
    let opts = binning_opts(bins, range.map(|r| vec![r]));
    let mut h = expect_histogram(
        OpId::Histogram,
        global().call(OpId::Histogram, OpCall::new(vec![a]).with_opts(opts))?,
    )?;
    let edges = h
        .edges
        .pop()
        .ok_or(DispatchError::UnexpectedOutcome { op: OpId::Histogram })?;
    Ok((h.counts, edges))
}

/// 2-D histogram: bare counts plus tagged x and y edge arrays.
pub fn histogram2d<'a>(
    x: OperandRef<'a>,
    y: OperandRef<'a>,
    bins: usize,
    ranges: Option<Vec<(ScalarBound, ScalarBound)>>,
) -> DispatchResult<(ArrayD<f64>, UnitArray, UnitArray)> {
    let opts = binning_opts(bins, ranges);
    let mut h = expect_histogram(
        OpId::Histogram2d,
        global().call(OpId::Histogram2d, OpCall::new(vec![x, y]).with_opts(opts))?,
    )?;
    let yedges = h
        .edges
        .pop()
        .ok_or(DispatchError::UnexpectedOutcome { op: OpId::Histogram2d })?;
    let xedges = h
        .edges
        .pop()
        .ok_or(DispatchError::UnexpectedOutcome { op: OpId::Histogram2d })?;
    Ok((h.counts, xedges, yedges))
}

/// N-D histogram over per-dimension sample arrays.
pub fn histogramdd(
    samples: Vec<OperandRef<'_>>,
    bins: usize,
    ranges: Option<Vec<(ScalarBound, ScalarBound)>>,
) -> DispatchResult<HistogramOutcome> {
    let opts = binning_opts(bins, ranges);
    expect_histogram(
        OpId::HistogramDd,
        global().call(OpId::HistogramDd, OpCall::new(samples).with_opts(opts))?,
    )
}

// ---------------------------------------------------------------------------
// Pass-through family
// ---------------------------------------------------------------------------

pub fn around<'a>(
    a: OperandRef<'a>,
    decimals: i32,
    out: Option<&'a mut UnitArray>,
) -> DispatchResult<UnitArray> {
    let opts = CallOptions { decimals, ..Default::default() };
    nary_array(OpId::Around, vec![a], opts, out)
}

pub fn sort_complex(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::SortComplex, a)
}

pub fn norm(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Norm, a)
}

pub fn trace(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Trace, a)
}

pub fn percentile(a: OperandRef<'_>, q: f64) -> DispatchResult<UnitArray> {
    quantile_like(OpId::Percentile, a, q)
}

pub fn quantile(a: OperandRef<'_>, q: f64) -> DispatchResult<UnitArray> {
    quantile_like(OpId::Quantile, a, q)
}

pub fn nanpercentile(a: OperandRef<'_>, q: f64) -> DispatchResult<UnitArray> {
    quantile_like(OpId::NanPercentile, a, q)
}

pub fn nanquantile(a: OperandRef<'_>, q: f64) -> DispatchResult<UnitArray> {
    quantile_like(OpId::NanQuantile, a, q)
}

pub fn var(a: OperandRef<'_>, ddof: usize) -> DispatchResult<UnitArray> {
    let opts = CallOptions { ddof, ..Default::default() };
    expect_array(
        OpId::Var,
        global().call(OpId::Var, OpCall::new(vec![a]).with_opts(opts))?,
    )
}

/// Copy `src` into `dst`. A tagged source also overwrites the
/// destination's unit.
pub fn copyto<'a>(dst: &'a mut UnitArray, src: OperandRef<'a>) -> DispatchResult<()> {
    match global().call(OpId::CopyTo, OpCall::new(vec![src]).with_out(Some(dst)))? {
        OpOutcome::Written => Ok(()),
        _ => Err(DispatchError::UnexpectedOutcome { op: OpId::CopyTo }),
    }
}

// ---------------------------------------------------------------------------
// Fourier-transform family
// ---------------------------------------------------------------------------

pub fn fft(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Fft, a)
}

pub fn fft2(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Fft2, a)
}

pub fn fftn(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Fftn, a)
}

pub fn ifft(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Ifft, a)
}

pub fn ifft2(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Ifft2, a)
}

pub fn ifftn(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Ifftn, a)
}

pub fn rfft(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Rfft, a)
}

pub fn rfft2(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Rfft2, a)
}

pub fn rfftn(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Rfftn, a)
}

pub fn ihfft(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Ihfft, a)
}

pub fn irfft(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Irfft, a)
}

pub fn irfft2(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Irfft2, a)
}

pub fn irfftn(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Irfftn, a)
}

pub fn hfft(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Hfft, a)
}

pub fn fftshift(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::FftShift, a)
}

pub fn ifftshift(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::IfftShift, a)
}

// ---------------------------------------------------------------------------
// Linear-system family
// ---------------------------------------------------------------------------

pub fn det(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Det, a)
}

pub fn solve<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::Solve, a, b, None)
}

pub fn tensorsolve<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<UnitArray> {
    binary_array(OpId::TensorSolve, a, b, None)
}

pub fn lstsq<'a>(a: OperandRef<'a>, b: OperandRef<'a>) -> DispatchResult<LstsqOutcome> {
    match global().call(OpId::Lstsq, OpCall::new(vec![a, b]))? {
        OpOutcome::Lstsq(out) => Ok(out),
        _ => Err(DispatchError::UnexpectedOutcome { op: OpId::Lstsq }),
    }
}

/// Eigenvalues (tagged with the matrix unit) and eigenvectors
/// (dimensionless), both complex.
pub fn eig(a: OperandRef<'_>) -> DispatchResult<(ComplexUnitArray, ComplexUnitArray)> {
    match global().call(OpId::Eig, OpCall::new(vec![a]))? {
        OpOutcome::Eig { values, vectors } => Ok((values, vectors)),
        _ => Err(DispatchError::UnexpectedOutcome { op: OpId::Eig }),
    }
}

/// Symmetric-matrix eigendecomposition, real-valued.
pub fn eigh(a: OperandRef<'_>) -> DispatchResult<(UnitArray, UnitArray)> {
    match global().call(OpId::Eigh, OpCall::new(vec![a]))? {
        OpOutcome::Eigh { values, vectors } => Ok((values, vectors)),
        _ => Err(DispatchError::UnexpectedOutcome { op: OpId::Eigh }),
    }
}

pub fn eigvals(a: OperandRef<'_>) -> DispatchResult<ComplexUnitArray> {
    unary_complex(OpId::Eigvals, a)
}

pub fn eigvalsh(a: OperandRef<'_>) -> DispatchResult<UnitArray> {
    unary_array(OpId::Eigvalsh, a)
}

// ---------------------------------------------------------------------------
// Elementwise comparison
// ---------------------------------------------------------------------------

pub fn isclose<'a>(
    a: OperandRef<'a>,
    b: OperandRef<'a>,
    rtol: f64,
    atol: f64,
) -> DispatchResult<ArrayD<bool>> {
    let opts = CallOptions { rtol, atol, ..Default::default() };
    match global().call(OpId::IsClose, OpCall::new(vec![a, b]).with_opts(opts))? {
        OpOutcome::Mask(mask) => Ok(mask),
        _ => Err(DispatchError::UnexpectedOutcome { op: OpId::IsClose }),
    }
}

pub fn allclose<'a>(
    a: OperandRef<'a>,
    b: OperandRef<'a>,
    rtol: f64,
    atol: f64,
) -> DispatchResult<bool> {
    let opts = CallOptions { rtol, atol, ..Default::default() };
    match global().call(OpId::AllClose, OpCall::new(vec![a, b]).with_opts(opts))? {
        OpOutcome::Bool(ok) => Ok(ok),
        _ => Err(DispatchError::UnexpectedOutcome { op: OpId::AllClose }),
    }
}

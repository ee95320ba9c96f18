//! Fourier-transform family: every transform, forward or inverse, real or
//! complex, derives the reciprocal of the input unit. The shift helpers
//! only permute samples and pass the unit through.
//!
//! The general transforms and the inverse-real variants take complex
//! input; a real operand is widened on the way in, so a forward spectrum
//! can round-trip through its inverse.

use super::{real_of, unary};
use crate::call::{OpCall, OpOutcome};
use crate::error::DispatchResult;
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::UnitArray;
use dq_kernels::fft;
use dq_kernels::KernelResult;
use ndarray::ArrayD;
use num_complex::Complex64;

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::Fft, |c| full_transform(OpId::Fft, c, fft::fft));
    table.register(OpId::Fft2, |c| full_transform(OpId::Fft2, c, fft::fft2));
    table.register(OpId::Fftn, |c| full_transform(OpId::Fftn, c, fft::fftn));
    table.register(OpId::Ifft, |c| full_transform(OpId::Ifft, c, fft::ifft));
    table.register(OpId::Ifft2, |c| full_transform(OpId::Ifft2, c, fft::ifft2));
    table.register(OpId::Ifftn, |c| full_transform(OpId::Ifftn, c, fft::ifftn));
    table.register(OpId::Rfft, |c| real_input_transform(OpId::Rfft, c, fft::rfft));
    table.register(OpId::Rfft2, |c| real_input_transform(OpId::Rfft2, c, fft::rfft2));
    table.register(OpId::Rfftn, |c| real_input_transform(OpId::Rfftn, c, fft::rfftn));
    table.register(OpId::Ihfft, |c| real_input_transform(OpId::Ihfft, c, fft::ihfft));
    table.register(OpId::Irfft, |c| real_output_transform(OpId::Irfft, c, fft::irfft));
    table.register(OpId::Irfft2, |c| real_output_transform(OpId::Irfft2, c, fft::irfft2));
    table.register(OpId::Irfftn, |c| real_output_transform(OpId::Irfftn, c, fft::irfftn));
    table.register(OpId::Hfft, |c| real_output_transform(OpId::Hfft, c, fft::hfft));
    table.register(OpId::FftShift, fftshift);
    table.register(OpId::IfftShift, ifftshift);
}

/// Complex in, complex out: fft/ifft and the 2-D/n-D variants.
fn full_transform(
    op: OpId,
    call: OpCall<'_>,
    kernel: fn(&ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>>,
) -> DispatchResult<OpOutcome> {
    let a = unary(op, &call)?;
    let unit = a.unit_or_null().recip();
    let res = kernel(&a.as_complex())?;
    Ok(OpOutcome::Complex(UnitArray::new(res, unit)))
}

/// Real in, complex out: rfft variants and ihfft.
fn real_input_transform(
    op: OpId,
    call: OpCall<'_>,
    kernel: fn(&ArrayD<f64>) -> KernelResult<ArrayD<Complex64>>,
) -> DispatchResult<OpOutcome> {
    let a = unary(op, &call)?;
    let unit = a.unit_or_null().recip();
    let res = kernel(real_of(op, a)?)?;
    Ok(OpOutcome::Complex(UnitArray::new(res, unit)))
}

/// Complex in, real out: irfft variants and hfft.
fn real_output_transform(
    op: OpId,
    call: OpCall<'_>,
    kernel: fn(&ArrayD<Complex64>) -> KernelResult<ArrayD<f64>>,
) -> DispatchResult<OpOutcome> {
    let a = unary(op, &call)?;
    let unit = a.unit_or_null().recip();
    let res = kernel(&a.as_complex())?;
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

fn fftshift(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::FftShift, &call)?;
    let unit = a.unit_or_null();
    let res = fft::fftshift(real_of(OpId::FftShift, a)?);
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

fn ifftshift(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::IfftShift, &call)?;
    let unit = a.unit_or_null();
    let res = fft::ifftshift(real_of(OpId::IfftShift, a)?);
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

//! Product/quotient family: result units follow multiplicative algebra.
//!
//! Bare operands are treated as dimensionless factors, so mixing tagged
//! and bare inputs here is lenient by design of the family, unlike the
//! homogeneous family.

use super::{binary, finish_array, real_of, unary};
use crate::call::{OpCall, OpOutcome};
use crate::error::DispatchResult;
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::UnitArray;
use dq_kernels::{linalg, reduce};

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::Dot, dot);
    table.register(OpId::Vdot, vdot);
    table.register(OpId::Inner, inner);
    table.register(OpId::Outer, outer);
    table.register(OpId::Kron, kron);
    table.register(OpId::Cross, cross);
    table.register(OpId::Trapz, trapz);
    table.register(OpId::Prod, prod);
    table.register(OpId::Inv, inv);
    table.register(OpId::Pinv, pinv);
    table.register(OpId::TensorInv, tensorinv);
}

fn dot(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Dot, &call)?;
    let unit = a.unit_or_null().mul(&b.unit_or_null());
    let res = linalg::dot(real_of(OpId::Dot, a)?, real_of(OpId::Dot, b)?)?;
    finish_array(res, unit, call.out)
}

fn vdot(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Vdot, &call)?;
    let unit = a.unit_or_null().mul(&b.unit_or_null());
    let res = linalg::vdot(real_of(OpId::Vdot, a)?, real_of(OpId::Vdot, b)?)?;
    finish_array(res, unit, None)
}

fn inner(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Inner, &call)?;
    let unit = a.unit_or_null().mul(&b.unit_or_null());
    let res = linalg::inner(real_of(OpId::Inner, a)?, real_of(OpId::Inner, b)?)?;
    finish_array(res, unit, None)
}

fn outer(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Outer, &call)?;
    let unit = a.unit_or_null().mul(&b.unit_or_null());
    let res = linalg::outer(real_of(OpId::Outer, a)?, real_of(OpId::Outer, b)?)?;
    finish_array(res, unit, call.out)
}

fn kron(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Kron, &call)?;
    let unit = a.unit_or_null().mul(&b.unit_or_null());
    let res = linalg::kron(real_of(OpId::Kron, a)?, real_of(OpId::Kron, b)?)?;
    finish_array(res, unit, None)
}

fn cross(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Cross, &call)?;
    let unit = a.unit_or_null().mul(&b.unit_or_null());
    let res = linalg::cross(real_of(OpId::Cross, a)?, real_of(OpId::Cross, b)?)?;
    finish_array(res, unit, None)
}

/// Integration multiplies the integrand unit by the abscissa unit, taken
/// from the optional sample-point operand or from the `dx` spacing.
fn trapz(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (y, x) = match call.operands.as_slice() {
        [y] => (*y, None),
        [y, x] => (*y, Some(*x)),
        other => {
            return Err(crate::error::DispatchError::InvalidCall {
                op: OpId::Trapz,
                what: format!("expected 1 or 2 operands, got {}", other.len()),
            })
        }
    };
    let abscissa_unit = match x {
        Some(x) => x.unit_or_null(),
        None => call.opts.dx.unit_or_null(),
    };
    let unit = y.unit_or_null().mul(&abscissa_unit);
    let x_raw = x.map(|x| real_of(OpId::Trapz, x)).transpose()?;
    let res = reduce::trapz(real_of(OpId::Trapz, y)?, x_raw, call.opts.dx.value)?;
    finish_array(res, unit, None)
}

/// The product over all elements raises the unit to the element count.
fn prod(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Prod, &call)?;
    let raw = real_of(OpId::Prod, a)?;
    let unit = a.unit_or_null().powi(raw.len() as i32);
    let res = reduce::prod(raw);
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

fn inv(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Inv, &call)?;
    let unit = a.unit_or_null().recip();
    let res = linalg::inv(real_of(OpId::Inv, a)?)?;
    finish_array(res, unit, None)
}

fn pinv(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Pinv, &call)?;
    let unit = a.unit_or_null().recip();
    let res = linalg::pinv(real_of(OpId::Pinv, a)?)?;
    finish_array(res, unit, None)
}

fn tensorinv(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::TensorInv, &call)?;
    let unit = a.unit_or_null().recip();
    let res = linalg::tensorinv(real_of(OpId::TensorInv, a)?, call.opts.ind)?;
    finish_array(res, unit, None)
}

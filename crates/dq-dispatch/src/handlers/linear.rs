//! Linear-system family: determinant powers, solve quotients, and
//! eigendecompositions whose values keep the matrix unit while the
//! eigenvectors come back dimensionless.

use super::binary;
use super::real_of;
use super::unary;
use crate::call::{LstsqOutcome, OpCall, OpOutcome};
use crate::error::DispatchResult;
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::UnitArray;
use dq_kernels::linalg;
use dq_units::Unit;

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::Det, det);
    table.register(OpId::Solve, solve);
    table.register(OpId::TensorSolve, tensorsolve);
    table.register(OpId::Lstsq, lstsq);
    table.register(OpId::Eig, eig);
    table.register(OpId::Eigh, eigh);
    table.register(OpId::Eigvals, eigvals);
    table.register(OpId::Eigvalsh, eigvalsh);
}

/// The determinant of an n-by-n matrix multiplies n rows together, so the
/// unit is raised to the matrix dimension.
fn det(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Det, &call)?;
    let raw = real_of(OpId::Det, a)?;
    let n = raw.shape().first().copied().unwrap_or(0);
    let unit = a.unit_or_null().powi(n as i32);
    let res = linalg::det(raw)?;
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

fn solve(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Solve, &call)?;
    let unit = b.unit_or_null().div(&a.unit_or_null());
    let res = linalg::solve(real_of(OpId::Solve, a)?, real_of(OpId::Solve, b)?)?;
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

fn tensorsolve(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::TensorSolve, &call)?;
    let unit = b.unit_or_null().div(&a.unit_or_null());
    let res = linalg::tensorsolve(
        real_of(OpId::TensorSolve, a)?,
        real_of(OpId::TensorSolve, b)?,
    )?;
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

/// Solution and residuals share the quotient unit; singular values carry
/// the coefficient-matrix unit and the rank is a plain count.
fn lstsq(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::Lstsq, &call)?;
    let au = a.unit_or_null();
    let quotient = b.unit_or_null().div(&au);
    let raw = linalg::lstsq(real_of(OpId::Lstsq, a)?, real_of(OpId::Lstsq, b)?)?;
    Ok(OpOutcome::Lstsq(LstsqOutcome {
        solution: UnitArray::new(raw.solution, quotient.clone()),
        residuals: UnitArray::new(raw.residuals, quotient),
        rank: raw.rank,
        singular_values: UnitArray::new(raw.singular_values, au),
    }))
}

fn eig(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Eig, &call)?;
    let unit = a.unit_or_null();
    let (values, vectors) = linalg::eig(real_of(OpId::Eig, a)?)?;
    Ok(OpOutcome::Eig {
        values: UnitArray::new(values, unit),
        vectors: UnitArray::new(vectors, Unit::dimensionless()),
    })
}

fn eigh(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Eigh, &call)?;
    let unit = a.unit_or_null();
    let (values, vectors) = linalg::eigh(real_of(OpId::Eigh, a)?)?;
    Ok(OpOutcome::Eigh {
        values: UnitArray::new(values, unit),
        vectors: UnitArray::new(vectors, Unit::dimensionless()),
    })
}

fn eigvals(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Eigvals, &call)?;
    let unit = a.unit_or_null();
    let res = linalg::eigvals(real_of(OpId::Eigvals, a)?)?;
    Ok(OpOutcome::Complex(UnitArray::new(res, unit)))
}

fn eigvalsh(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let a = unary(OpId::Eigvalsh, &call)?;
    let unit = a.unit_or_null();
    let res = linalg::eigvalsh(real_of(OpId::Eigvalsh, a)?)?;
    Ok(OpOutcome::Array(UnitArray::new(res, unit)))
}

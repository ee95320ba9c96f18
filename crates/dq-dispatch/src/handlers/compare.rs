//! Elementwise closeness comparisons. Unequal but compatible units rescale
//! the second operand into the first operand's unit before comparing;
//! incompatible units surface the conversion error with both units and
//! both dimension descriptors. A bare operand is promoted to the tagged
//! side's unit, so its raw values compare as-is.

use super::{binary, real_of};
use crate::call::{OpCall, OpOutcome};
use crate::error::DispatchResult;
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_array::OperandRef;
use dq_kernels::compare;
use ndarray::ArrayD;

pub(super) fn register(table: &mut HandlerTable) {
    table.register(OpId::IsClose, isclose);
    table.register(OpId::AllClose, allclose);
}

/// Bring both operands into the first operand's unit frame.
fn comparable_pair(
    op: OpId,
    a: OperandRef<'_>,
    b: OperandRef<'_>,
) -> DispatchResult<(ArrayD<f64>, ArrayD<f64>)> {
    let au = a.unit_or_null();
    let bu = b.unit_or_null();
    let ar = real_of(op, a)?.clone();
    let braw = real_of(op, b)?;
    let br = if au != bu && !au.is_null() && !bu.is_null() {
        let factor = bu.conversion_factor(&au)?;
        braw.mapv(|v| v * factor)
    } else {
        braw.clone()
    };
    Ok((ar, br))
}

fn isclose(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::IsClose, &call)?;
    let (ar, br) = comparable_pair(OpId::IsClose, a, b)?;
    let mask = compare::isclose(&ar, &br, call.opts.rtol, call.opts.atol)?;
    Ok(OpOutcome::Mask(mask))
}

fn allclose(call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let (a, b) = binary(OpId::AllClose, &call)?;
    let (ar, br) = comparable_pair(OpId::AllClose, a, b)?;
    let all = compare::allclose(&ar, &br, call.opts.rtol, call.opts.atol)?;
    Ok(OpOutcome::Bool(all))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use dq_array::UnitArray;
    use dq_units::{kilometer, meter, second};

    #[test]
    fn compatible_units_rescale_before_comparing() {
        let a = UnitArray::from_vec(vec![1000.0], meter());
        let b = UnitArray::from_vec(vec![1.0], kilometer());
        let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)]);
        match allclose(call).unwrap() {
            OpOutcome::Bool(ok) => assert!(ok),
            other => panic!("expected bool, got {other:?}"),
        }
    }

    #[test]
    fn incompatible_units_error_with_dimensions() {
        let a = UnitArray::from_vec(vec![1.0], meter());
        let b = UnitArray::from_vec(vec![1.0], second());
        let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)]);
        let err = isclose(call).unwrap_err();
        assert!(matches!(err, DispatchError::Units(_)));
        let msg = format!("{err}");
        assert!(msg.contains("(length)"));
        assert!(msg.contains("(time)"));
    }

    #[test]
    fn bare_operand_promotes_to_tagged_unit() {
        let a = UnitArray::from_vec(vec![2.0], meter());
        let raw = ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&[1]), vec![2.0]).unwrap();
        let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&raw)]);
        match allclose(call).unwrap() {
            OpOutcome::Bool(ok) => assert!(ok),
            other => panic!("expected bool, got {other:?}"),
        }
    }
}

//! Handler-table injection: overriding, omitting, and the silent fallback.

use std::sync::Arc;

use dq_array::{OperandRef, UnitArray};
use dq_dispatch::{Dispatcher, HandlerTable, OpCall, OpId, OpOutcome};
use dq_units::{meter, second};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn an_injected_override_replaces_the_standard_rule() {
    init_tracing();
    // A table that tags every dot result with seconds, whatever the inputs.
    fn seconds_dot(call: OpCall<'_>) -> dq_dispatch::DispatchResult<OpOutcome> {
        let res = dq_kernels::linalg::dot(
            call.operands[0].real().unwrap(),
            call.operands[1].real().unwrap(),
        )?;
        Ok(OpOutcome::Array(UnitArray::new(res, second())))
    }
    let mut table = HandlerTable::standard();
    table.register(OpId::Dot, seconds_dot);
    let d = Dispatcher::new(Arc::new(table));

    let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
    let b = UnitArray::from_vec(vec![3.0, 4.0], meter());
    let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)]);
    match d.call(OpId::Dot, call).unwrap() {
        OpOutcome::Array(res) => assert_eq!(res.unit(), &second()),
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn a_partial_table_falls_back_without_error() {
    init_tracing();
    let empty = Dispatcher::new(Arc::new(HandlerTable::new()));
    let a = UnitArray::from_vec(vec![1.0, 4.0], meter());
    let call = OpCall::new(vec![OperandRef::from(&a)]);
    match empty.call(OpId::Var, call).unwrap() {
        OpOutcome::Array(res) => {
            // Units are silently dropped, the numerics still run.
            assert!(res.unit().is_null());
            assert_eq!(res.scalar_value(), Some(2.25));
        }
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn fallback_never_raises_unit_errors() {
    // Mixed units would be inconsistent under the standard rule; the
    // unitless path cannot see them.
    let empty = Dispatcher::new(Arc::new(HandlerTable::new()));
    let a = UnitArray::from_vec(vec![1.0], meter());
    let b = UnitArray::from_vec(vec![2.0], second());
    let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)]);
    match empty.call(OpId::Concatenate, call).unwrap() {
        OpOutcome::Array(res) => {
            assert!(res.unit().is_null());
            assert_eq!(res.data().as_slice().unwrap(), &[1.0, 2.0]);
        }
        other => panic!("expected array, got {other:?}"),
    }
}

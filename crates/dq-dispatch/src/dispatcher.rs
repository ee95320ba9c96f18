//! The derivation dispatcher: registry lookup plus the silent unitless
//! fallback.

use std::sync::{Arc, OnceLock};

use crate::call::{OpCall, OpOutcome};
use crate::error::{DispatchError, DispatchResult};
use crate::op::OpId;
use crate::registry::HandlerTable;
use dq_kernels::KernelError;

/// Routes each call to its registered handler, or to the default unitless
/// kernel behavior when no handler exists for the operation.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<HandlerTable>,
}

impl Dispatcher {
    /// Dispatcher over an injected table; tests use partial tables to
    /// exercise the fallback path.
    pub fn new(table: Arc<HandlerTable>) -> Self {
        Self { table }
    }

    /// Dispatcher over the full standard table.
    pub fn standard() -> Self {
        Self::new(standard_table())
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    /// Execute one operation call.
    ///
    /// A registered handler runs the unit-aware path. An unregistered
    /// operation falls back, silently, to the plain numeric behavior:
    /// units are stripped from every operand and discarded from the
    /// result, matching what the kernels do for raw arrays.
    pub fn call(&self, op: OpId, call: OpCall<'_>) -> DispatchResult<OpOutcome> {
        match self.table.lookup(op) {
            Some(handler) => {
                tracing::trace!(%op, "dispatching unit-aware handler");
                handler(call)
            }
            None => {
                tracing::debug!(%op, "no handler registered, using unitless fallback");
                fallback(op, call)
            }
        }
    }
}

/// Default unitless behavior: run the standard handler over a fully
/// stripped call. With every operand bare, derivation degenerates to
/// dimensionless tags and no consistency rule can fire.
///
/// A caller-supplied output buffer is detached before the stripped
/// handler runs and receives only the numerics afterwards, so the
/// fallback never rewrites the buffer's unit. `copyto` keeps its buffer
/// attached: the destination is its whole contract, and a bare source
/// already leaves the destination's unit alone.
fn fallback(op: OpId, call: OpCall<'_>) -> DispatchResult<OpOutcome> {
    let mut stripped = call.strip_units();
    let out = if op == OpId::CopyTo {
        None
    } else {
        stripped.out.take()
    };
    let handler = standard_table()
        .lookup(op)
        .ok_or(DispatchError::UnexpectedOutcome { op })?;
    let outcome = handler(stripped)?;
    if let (Some(out), OpOutcome::Array(res)) = (out, &outcome) {
        if out.shape() != res.shape() {
            return Err(DispatchError::Kernel(KernelError::ShapeMismatch {
                what: format!(
                    "output buffer shape {:?} does not match result shape {:?}",
                    out.shape(),
                    res.shape()
                ),
            }));
        }
        out.data_mut().assign(res.data());
    }
    Ok(outcome)
}

fn standard_table() -> Arc<HandlerTable> {
    static TABLE: OnceLock<Arc<HandlerTable>> = OnceLock::new();
    TABLE.get_or_init(|| Arc::new(HandlerTable::standard())).clone()
}

/// The process-wide dispatcher backing the typed entry points.
pub(crate) fn global() -> &'static Dispatcher {
    static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();
    GLOBAL.get_or_init(Dispatcher::standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_array::{OperandRef, UnitArray};
    use dq_units::{meter, second};

    #[test]
    fn unregistered_operation_discards_units_silently() {
        let empty = Dispatcher::new(Arc::new(HandlerTable::new()));
        let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
        let b = UnitArray::from_vec(vec![3.0, 4.0], meter());
        let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)]);
        let outcome = empty.call(OpId::Dot, call).unwrap();
        match outcome {
            OpOutcome::Array(res) => {
                assert!(res.unit().is_null(), "fallback must discard units");
                assert_eq!(res.data().iter().next().copied(), Some(11.0));
            }
            other => panic!("expected array outcome, got {other:?}"),
        }
    }

    #[test]
    fn fallback_writes_numerics_but_keeps_out_buffer_unit() {
        let empty = Dispatcher::new(Arc::new(HandlerTable::new()));
        let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
        let b = UnitArray::from_vec(vec![3.0, 4.0], meter());
        let mut out = UnitArray::new(ndarray::ArrayD::from_elem(ndarray::IxDyn(&[]), 0.0), second());
        let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)])
            .with_out(Some(&mut out));
        empty.call(OpId::Dot, call).unwrap();
        assert_eq!(out.data().iter().next().copied(), Some(11.0));
        assert_eq!(out.unit(), &second());
    }

    #[test]
    fn registered_operation_derives_units() {
        let d = Dispatcher::standard();
        let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
        let b = UnitArray::from_vec(vec![3.0, 4.0], meter());
        let call = OpCall::new(vec![OperandRef::from(&a), OperandRef::from(&b)]);
        match d.call(OpId::Dot, call).unwrap() {
            OpOutcome::Array(res) => assert_eq!(res.unit(), &meter().powi(2)),
            other => panic!("expected array outcome, got {other:?}"),
        }
    }
}

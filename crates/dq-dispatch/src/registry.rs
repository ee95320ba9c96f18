//! The operation registry: a build-once, read-only handler table.
//!
//! Populated during startup (or test setup), never mutated afterwards, so
//! unlimited concurrent lookups need no locking. A missing entry is not an
//! error: it tells the dispatcher to take the plain unitless path.

use std::collections::HashMap;

use crate::call::{OpCall, OpOutcome};
use crate::error::DispatchResult;
use crate::handlers;
use crate::op::OpId;

/// A per-operation derivation handler: pure, stateless, one invocation per
/// call.
pub type Handler = fn(OpCall<'_>) -> DispatchResult<OpOutcome>;

#[derive(Default)]
pub struct HandlerTable {
    map: HashMap<OpId, Handler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one handler per operation; a later registration for the same
    /// identifier wins, so call sites may register in any order.
    pub fn register(&mut self, op: OpId, handler: Handler) {
        self.map.insert(op, handler);
    }

    pub fn lookup(&self, op: OpId) -> Option<Handler> {
        self.map.get(&op).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The full standard table covering every [`OpId`].
    pub fn standard() -> Self {
        let mut table = Self::new();
        handlers::register_all(&mut table);
        tracing::debug!(handlers = table.len(), "built standard handler table");
        table
    }
}

//! dq-dispatch: unit derivation and validation around numeric kernels.
//!
//! The core of dimq. For every supported operation a registered handler
//! extracts operand units, validates them, derives the result unit, invokes
//! the raw kernel, and tags the result. Operations without a handler fall
//! back silently to the plain unitless kernel path.
//!
//! Contains:
//! - op (stable operation identifiers)
//! - registry (build-once handler table)
//! - dispatcher (lookup + fallback)
//! - handlers (the five derivation families)
//! - ops (one typed entry point per operation)

pub mod call;
pub mod dispatcher;
pub mod error;
mod handlers;
pub mod op;
pub mod ops;
pub mod registry;

pub use call::{CallOptions, HistogramOutcome, LstsqOutcome, OpCall, OpOutcome};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use op::OpId;
pub use registry::{Handler, HandlerTable};

//! dq-kernels: raw numeric kernels for dimq.
//!
//! Every function here is unit-agnostic: raw arrays in, raw arrays out,
//! with a documented shape contract. The dispatch layer owns all unit
//! derivation and never reinterprets kernel failures.

pub mod compare;
pub mod error;
pub mod fft;
pub mod histogram;
pub mod linalg;
pub mod reduce;
pub mod shape;

pub use error::{KernelError, KernelResult};

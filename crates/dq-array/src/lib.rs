//! dq-array: unit-tagged n-dimensional arrays.
//!
//! Contains:
//! - array (`UnitArray<A>`: raw ndarray data + exactly one `Unit`)
//! - operand (bare-vs-tagged operand sum type and scalar bounds)

pub mod array;
pub mod operand;

pub use array::{ComplexUnitArray, UnitArray};
pub use operand::{OperandRef, ScalarBound};

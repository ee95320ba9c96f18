//! dq-units: runtime unit algebra for dimq.
//!
//! Contains:
//! - dimension (SI base dimensions + exponent vectors)
//! - unit (the `Unit` value type and its algebra)
//! - catalog (named units, aliases, physical constants)
//! - error (shared error types)

pub mod catalog;
pub mod dimension;
pub mod error;
pub mod unit;

// Re-exports: nice ergonomics for downstream crates
pub use catalog::{constants, kilogram, kilometer, meter, second};
pub use dimension::{BaseDim, Dimensions};
pub use error::{UnitsError, UnitsResult};
pub use unit::Unit;

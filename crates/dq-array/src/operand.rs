//! Operand sum type: every handler input is explicitly bare or tagged.
//!
//! The bare/tagged distinction drives the two unit-derivation policies in
//! the dispatch layer: product-family operations treat a bare operand as
//! dimensionless, while homogeneous-family operations record it as
//! `NULL_UNIT` and flag the mixture as an inconsistency. Real and complex
//! payloads are separate variants so spectra produced by the transform
//! operations can re-enter the dispatch layer.

use std::borrow::Cow;

use crate::array::{ComplexUnitArray, UnitArray};
use dq_units::Unit;
use ndarray::ArrayD;
use num_complex::Complex64;

/// A borrowed handler operand: raw or unit-tagged, real or complex.
#[derive(Debug, Clone, Copy)]
pub enum OperandRef<'a> {
    Bare(&'a ArrayD<f64>),
    Tagged(&'a UnitArray),
    BareComplex(&'a ArrayD<Complex64>),
    TaggedComplex(&'a ComplexUnitArray),
}

impl<'a> OperandRef<'a> {
    /// The operand's unit, with bare operands reading as dimensionless.
    pub fn unit_or_null(&self) -> Unit {
        match self {
            OperandRef::Bare(_) | OperandRef::BareComplex(_) => Unit::dimensionless(),
            OperandRef::Tagged(a) => a.unit().clone(),
            OperandRef::TaggedComplex(a) => a.unit().clone(),
        }
    }

    /// The unit-stripped numeric data of a real-valued operand.
    pub fn real(&self) -> Option<&'a ArrayD<f64>> {
        match self {
            OperandRef::Bare(data) => Some(data),
            OperandRef::Tagged(a) => Some(a.data()),
            OperandRef::BareComplex(_) | OperandRef::TaggedComplex(_) => None,
        }
    }

    /// The unit-stripped numeric data of a complex-valued operand.
    pub fn complex(&self) -> Option<&'a ArrayD<Complex64>> {
        match self {
            OperandRef::BareComplex(data) => Some(data),
            OperandRef::TaggedComplex(a) => Some(a.data()),
            OperandRef::Bare(_) | OperandRef::Tagged(_) => None,
        }
    }

    /// The numeric data widened to complex: real operands are copied with
    /// zero imaginary parts, complex operands are borrowed.
    pub fn as_complex(&self) -> Cow<'a, ArrayD<Complex64>> {
        match self {
            OperandRef::Bare(data) => Cow::Owned(data.mapv(|v| Complex64::new(v, 0.0))),
            OperandRef::Tagged(a) => Cow::Owned(a.data().mapv(|v| Complex64::new(v, 0.0))),
            OperandRef::BareComplex(data) => Cow::Borrowed(data),
            OperandRef::TaggedComplex(a) => Cow::Borrowed(a.data()),
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, OperandRef::Tagged(_) | OperandRef::TaggedComplex(_))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, OperandRef::BareComplex(_) | OperandRef::TaggedComplex(_))
    }

    /// The same payload with the unit forgotten.
    pub fn stripped(&self) -> OperandRef<'a> {
        match self {
            OperandRef::Bare(data) => OperandRef::Bare(data),
            OperandRef::Tagged(a) => OperandRef::Bare(a.data()),
            OperandRef::BareComplex(data) => OperandRef::BareComplex(data),
            OperandRef::TaggedComplex(a) => OperandRef::BareComplex(a.data()),
        }
    }
}

impl<'a> From<&'a UnitArray> for OperandRef<'a> {
    fn from(a: &'a UnitArray) -> Self {
        OperandRef::Tagged(a)
    }
}

impl<'a> From<&'a ArrayD<f64>> for OperandRef<'a> {
    fn from(data: &'a ArrayD<f64>) -> Self {
        OperandRef::Bare(data)
    }
}

impl<'a> From<&'a ComplexUnitArray> for OperandRef<'a> {
    fn from(a: &'a ComplexUnitArray) -> Self {
        OperandRef::TaggedComplex(a)
    }
}

impl<'a> From<&'a ArrayD<Complex64>> for OperandRef<'a> {
    fn from(data: &'a ArrayD<Complex64>) -> Self {
        OperandRef::BareComplex(data)
    }
}

/// A scalar bound or spacing value whose unit may be absent.
///
/// Histogram range bounds require the unit to be present; trapezoid spacing
/// defaults an absent unit to dimensionless. The `Option` keeps "no unit
/// given" observable instead of silently coercing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarBound {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl ScalarBound {
    pub fn tagged(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }

    pub fn bare(value: f64) -> Self {
        Self { value, unit: None }
    }

    pub fn unit_or_null(&self) -> Unit {
        self.unit.clone().unwrap_or_else(Unit::dimensionless)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_units::meter;
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn bare_operand_is_dimensionless() {
        let data: ArrayD<f64> = ArrayD::zeros(IxDyn(&[2]));
        let op = OperandRef::from(&data);
        assert!(op.unit_or_null().is_null());
        assert!(!op.is_tagged());
        assert!(!op.is_complex());
    }

    #[test]
    fn tagged_operand_exposes_unit_and_data() {
        let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
        let op = OperandRef::from(&a);
        assert_eq!(op.unit_or_null(), meter());
        assert_eq!(op.real().unwrap().len(), 2);
        assert!(op.complex().is_none());
        assert!(op.is_tagged());
    }

    #[test]
    fn complex_operand_exposes_unit_and_data() {
        let data = ArrayD::from_elem(IxDyn(&[3]), Complex64::new(1.0, -1.0));
        let a = ComplexUnitArray::new(data, meter());
        let op = OperandRef::from(&a);
        assert_eq!(op.unit_or_null(), meter());
        assert!(op.real().is_none());
        assert_eq!(op.complex().unwrap().len(), 3);
        assert!(op.is_complex());
    }

    #[test]
    fn as_complex_widens_real_data() {
        let a = UnitArray::from_vec(vec![1.0, 2.0], meter());
        let widened = OperandRef::from(&a).as_complex();
        assert_eq!(widened[[0]], Complex64::new(1.0, 0.0));
        assert_eq!(widened[[1]], Complex64::new(2.0, 0.0));
    }

    #[test]
    fn stripped_keeps_the_payload_kind() {
        let a = UnitArray::from_vec(vec![1.0], meter());
        assert!(!OperandRef::from(&a).stripped().is_tagged());
        let data = ArrayD::from_elem(IxDyn(&[1]), Complex64::new(0.0, 1.0));
        let c = ComplexUnitArray::new(data, meter());
        let s = OperandRef::from(&c).stripped();
        assert!(!s.is_tagged());
        assert!(s.is_complex());
    }

    #[test]
    fn scalar_bound_unit_presence() {
        assert!(ScalarBound::bare(1.0).unit.is_none());
        assert_eq!(ScalarBound::tagged(1.0, meter()).unit_or_null(), meter());
    }
}

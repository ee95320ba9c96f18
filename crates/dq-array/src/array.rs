//! The tagged array: raw numeric data paired with exactly one unit.

use dq_units::{Unit, UnitsResult};
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex64;

/// An n-dimensional array tagged with exactly one [`Unit`].
///
/// The unit never changes except through [`UnitArray::set_unit`], which
/// exists for caller-supplied output buffers and `copyto`-style in-place
/// writes. A bare array is represented by tagging with
/// `Unit::dimensionless()`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitArray<A = f64> {
    data: ArrayD<A>,
    unit: Unit,
}

/// Complex-valued tagged array, produced by the FFT and eigendecomposition
/// kernels.
pub type ComplexUnitArray = UnitArray<Complex64>;

impl<A> UnitArray<A> {
    pub fn new(data: ArrayD<A>, unit: Unit) -> Self {
        Self { data, unit }
    }

    /// Tag raw data as dimensionless.
    pub fn bare(data: ArrayD<A>) -> Self {
        Self::new(data, Unit::dimensionless())
    }

    pub fn data(&self) -> &ArrayD<A> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArrayD<A> {
        &mut self.data
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Explicit unit mutation: only output-buffer handling and `copyto` use
    /// this.
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_parts(self) -> (ArrayD<A>, Unit) {
        (self.data, self.unit)
    }
}

impl UnitArray<f64> {
    /// 1-D array from a plain vector.
    pub fn from_vec(values: Vec<f64>, unit: Unit) -> Self {
        let len = values.len();
        Self::new(
            ArrayD::from_shape_vec(IxDyn(&[len]), values).unwrap_or_else(|_| {
                // A flat vector always reshapes into [len].
                ArrayD::zeros(IxDyn(&[len]))
            }),
            unit,
        )
    }

    /// 0-dimensional (scalar) tagged array.
    pub fn scalar(value: f64, unit: Unit) -> Self {
        Self::new(ArrayD::from_elem(IxDyn(&[]), value), unit)
    }

    /// Scalar payload of a 0-d or single-element array, if any.
    pub fn scalar_value(&self) -> Option<f64> {
        if self.data.len() == 1 {
            self.data.iter().next().copied()
        } else {
            None
        }
    }
}

impl<A> UnitArray<A>
where
    A: Clone + std::ops::Mul<f64, Output = A>,
{
    /// Conversion by scaling into a compatible unit.
    ///
    /// Errors when the target unit has different dimensions; the numeric
    /// data is rescaled by the conversion factor otherwise.
    pub fn in_units(&self, target: &Unit) -> UnitsResult<UnitArray<A>> {
        let factor = self.unit.conversion_factor(target)?;
        let data = self.data.mapv(|v| v * factor);
        Ok(UnitArray::new(data, target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_units::{kilometer, meter, second};

    #[test]
    fn construction_and_accessors() {
        let a = UnitArray::from_vec(vec![1.0, 2.0, 3.0], meter());
        assert_eq!(a.shape(), &[3]);
        assert_eq!(a.unit(), &meter());
        assert_eq!(a.scalar_value(), None);

        let s = UnitArray::scalar(2.5, second());
        assert_eq!(s.shape(), &[] as &[usize]);
        assert_eq!(s.scalar_value(), Some(2.5));
    }

    #[test]
    fn in_units_rescales() {
        let a = UnitArray::from_vec(vec![1.0, 2.0], kilometer());
        let b = a.in_units(&meter()).unwrap();
        assert_eq!(b.unit(), &meter());
        assert_eq!(b.data().as_slice().unwrap(), &[1000.0, 2000.0]);
    }

    #[test]
    fn in_units_rejects_incompatible() {
        let a = UnitArray::from_vec(vec![1.0], meter());
        assert!(a.in_units(&second()).is_err());
    }

    #[test]
    fn set_unit_is_explicit() {
        let mut a = UnitArray::from_vec(vec![1.0], meter());
        a.set_unit(second());
        assert_eq!(a.unit(), &second());
    }
}

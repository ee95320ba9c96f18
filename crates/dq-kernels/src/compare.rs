//! Elementwise closeness comparisons.

use crate::error::{KernelError, KernelResult};
use ndarray::ArrayD;

/// Elementwise `|a - b| <= atol + rtol * |b|`, the numpy `isclose` rule.
///
/// Shapes must match, or one side must be a single element, which is then
/// compared against every element of the other side.
pub fn isclose(
    a: &ArrayD<f64>,
    b: &ArrayD<f64>,
    rtol: f64,
    atol: f64,
) -> KernelResult<ArrayD<bool>> {
    let close = |x: f64, y: f64| (x - y).abs() <= atol + rtol * y.abs();
    if a.shape() == b.shape() {
        let flat: Vec<bool> = a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| close(x, y))
            .collect();
        return ArrayD::from_shape_vec(a.raw_dim(), flat).map_err(|e| {
            KernelError::ShapeMismatch {
                what: e.to_string(),
            }
        });
    }
    if b.len() == 1 {
        let y = b.iter().next().copied().unwrap_or(f64::NAN);
        return Ok(a.mapv(|x| close(x, y)));
    }
    if a.len() == 1 {
        let x = a.iter().next().copied().unwrap_or(f64::NAN);
        return Ok(b.mapv(|y| close(x, y)));
    }
    Err(KernelError::ShapeMismatch {
        what: format!(
            "isclose of shapes {:?} and {:?}",
            a.shape(),
            b.shape()
        ),
    })
}

/// True when every element pair is close.
pub fn allclose(a: &ArrayD<f64>, b: &ArrayD<f64>, rtol: f64, atol: f64) -> KernelResult<bool> {
    Ok(isclose(a, b, rtol, atol)?.iter().all(|&v| v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn arr1(v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.to_vec()).unwrap()
    }

    #[test]
    fn equal_shapes() {
        let mask = isclose(&arr1(&[1.0, 2.0]), &arr1(&[1.0, 2.1]), 1e-5, 1e-8).unwrap();
        assert_eq!(mask.as_slice().unwrap(), &[true, false]);
    }

    #[test]
    fn scalar_broadcast() {
        let scalar = ArrayD::from_elem(IxDyn(&[]), 2.0);
        let mask = isclose(&arr1(&[2.0, 3.0]), &scalar, 1e-5, 1e-8).unwrap();
        assert_eq!(mask.as_slice().unwrap(), &[true, false]);
    }

    #[test]
    fn allclose_all_or_nothing() {
        assert!(allclose(&arr1(&[1.0, 2.0]), &arr1(&[1.0, 2.0]), 1e-5, 1e-8).unwrap());
        assert!(!allclose(&arr1(&[1.0, 2.0]), &arr1(&[1.0, 3.0]), 1e-5, 1e-8).unwrap());
    }

    #[test]
    fn incompatible_shapes_rejected() {
        assert!(isclose(&arr1(&[1.0, 2.0]), &arr1(&[1.0, 2.0, 3.0]), 1e-5, 1e-8).is_err());
    }
}

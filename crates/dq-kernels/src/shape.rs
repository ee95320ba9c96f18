//! Concatenation, stacking, set, and spacing kernels.

use crate::error::{KernelError, KernelResult};
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

fn shape_err(e: impl std::fmt::Display) -> KernelError {
    KernelError::ShapeMismatch {
        what: e.to_string(),
    }
}

/// Join arrays along an existing axis.
pub fn concatenate(arrs: &[&ArrayD<f64>], axis: usize) -> KernelResult<ArrayD<f64>> {
    if arrs.is_empty() {
        return Err(KernelError::InvalidArg {
            what: "concatenate of an empty operand list".to_string(),
        });
    }
    let views: Vec<ArrayViewD<f64>> = arrs.iter().map(|a| a.view()).collect();
    ndarray::concatenate(Axis(axis), &views).map_err(shape_err)
}

/// Join arrays along a new leading axis at `axis`.
pub fn stack(arrs: &[&ArrayD<f64>], axis: usize) -> KernelResult<ArrayD<f64>> {
    if arrs.is_empty() {
        return Err(KernelError::InvalidArg {
            what: "stack of an empty operand list".to_string(),
        });
    }
    let views: Vec<ArrayViewD<f64>> = arrs.iter().map(|a| a.view()).collect();
    ndarray::stack(Axis(axis), &views).map_err(shape_err)
}

fn promote_to_row(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    match a.ndim() {
        0 => Ok(a
            .view()
            .into_shape_with_order(IxDyn(&[1, 1]))
            .map_err(shape_err)?
            .to_owned()),
        1 => Ok(a
            .view()
            .into_shape_with_order(IxDyn(&[1, a.len()]))
            .map_err(shape_err)?
            .to_owned()),
        _ => Ok(a.clone()),
    }
}

/// Stack vertically: 1-D inputs become rows.
pub fn vstack(arrs: &[&ArrayD<f64>]) -> KernelResult<ArrayD<f64>> {
    let promoted: Vec<ArrayD<f64>> = arrs
        .iter()
        .map(|a| promote_to_row(a))
        .collect::<KernelResult<_>>()?;
    let refs: Vec<&ArrayD<f64>> = promoted.iter().collect();
    concatenate(&refs, 0)
}

/// Stack horizontally: 1-D inputs join end to end, higher ranks join on
/// axis 1.
pub fn hstack(arrs: &[&ArrayD<f64>]) -> KernelResult<ArrayD<f64>> {
    if arrs.is_empty() {
        return Err(KernelError::InvalidArg {
            what: "hstack of an empty operand list".to_string(),
        });
    }
    if arrs.iter().all(|a| a.ndim() <= 1) {
        concatenate(arrs, 0)
    } else {
        concatenate(arrs, 1)
    }
}

fn promote_to_slab(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let shape: Vec<usize> = match a.ndim() {
        0 => vec![1, 1, 1],
        1 => vec![1, a.len(), 1],
        2 => vec![a.shape()[0], a.shape()[1], 1],
        _ => return Ok(a.clone()),
    };
    a.view()
        .into_shape_with_order(IxDyn(&shape))
        .map_err(shape_err)
        .map(|v| v.to_owned())
}

/// Stack depth-wise along the third axis.
pub fn dstack(arrs: &[&ArrayD<f64>]) -> KernelResult<ArrayD<f64>> {
    let promoted: Vec<ArrayD<f64>> = arrs
        .iter()
        .map(|a| promote_to_slab(a))
        .collect::<KernelResult<_>>()?;
    let refs: Vec<&ArrayD<f64>> = promoted.iter().collect();
    concatenate(&refs, 2)
}

/// Stack 1-D arrays as columns of a 2-D array.
pub fn column_stack(arrs: &[&ArrayD<f64>]) -> KernelResult<ArrayD<f64>> {
    let promoted: Vec<ArrayD<f64>> = arrs
        .iter()
        .map(|a| match a.ndim() {
            1 => a
                .view()
                .into_shape_with_order(IxDyn(&[a.len(), 1]))
                .map_err(shape_err)
                .map(|v| v.to_owned()),
            _ => Ok((*a).clone()),
        })
        .collect::<KernelResult<_>>()?;
    let refs: Vec<&ArrayD<f64>> = promoted.iter().collect();
    concatenate(&refs, 1)
}

/// Assemble a block matrix from a two-level grid: each row is stacked
/// horizontally, then the rows vertically.
pub fn block(grid: &[Vec<&ArrayD<f64>>]) -> KernelResult<ArrayD<f64>> {
    if grid.is_empty() {
        return Err(KernelError::InvalidArg {
            what: "block of an empty grid".to_string(),
        });
    }
    let rows: Vec<ArrayD<f64>> = grid
        .iter()
        .map(|row| {
            let promoted: Vec<ArrayD<f64>> = row
                .iter()
                .map(|a| promote_to_row(a))
                .collect::<KernelResult<_>>()?;
            let refs: Vec<&ArrayD<f64>> = promoted.iter().collect();
            concatenate(&refs, 1)
        })
        .collect::<KernelResult<_>>()?;
    let refs: Vec<&ArrayD<f64>> = rows.iter().collect();
    concatenate(&refs, 0)
}

fn sorted_unique(a: &ArrayD<f64>) -> Vec<f64> {
    let mut v: Vec<f64> = a.iter().copied().collect();
    v.sort_by(f64::total_cmp);
    v.dedup_by(|x, y| x.total_cmp(y).is_eq());
    v
}

fn vec_to_array(v: Vec<f64>) -> ArrayD<f64> {
    let len = v.len();
    ArrayD::from_shape_vec(IxDyn(&[len]), v).unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[len])))
}

/// Sorted unique values present in both inputs.
pub fn intersect1d(a: &ArrayD<f64>, b: &ArrayD<f64>) -> ArrayD<f64> {
    let (sa, sb) = (sorted_unique(a), sorted_unique(b));
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < sa.len() && j < sb.len() {
        match sa[i].total_cmp(&sb[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(sa[i]);
                i += 1;
                j += 1;
            }
        }
    }
    vec_to_array(out)
}

/// Sorted unique values present in either input.
pub fn union1d(a: &ArrayD<f64>, b: &ArrayD<f64>) -> ArrayD<f64> {
    let mut v: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    v.sort_by(f64::total_cmp);
    v.dedup_by(|x, y| x.total_cmp(y).is_eq());
    vec_to_array(v)
}

/// `num` evenly spaced samples over [start, stop], endpoints included.
pub fn linspace(start: f64, stop: f64, num: usize) -> KernelResult<ArrayD<f64>> {
    if num == 0 {
        return Ok(vec_to_array(Vec::new()));
    }
    if num == 1 {
        return Ok(vec_to_array(vec![start]));
    }
    let step = (stop - start) / (num - 1) as f64;
    Ok(vec_to_array(
        (0..num).map(|i| start + step * i as f64).collect(),
    ))
}

/// `num` samples evenly spaced on a log scale between 10**start and
/// 10**stop.
pub fn logspace(start: f64, stop: f64, num: usize) -> KernelResult<ArrayD<f64>> {
    let lin = linspace(start, stop, num)?;
    Ok(lin.mapv(|v| 10.0_f64.powf(v)))
}

/// `num` samples spaced geometrically between start and stop (both nonzero,
/// same sign).
pub fn geomspace(start: f64, stop: f64, num: usize) -> KernelResult<ArrayD<f64>> {
    if start == 0.0 || stop == 0.0 || (start < 0.0) != (stop < 0.0) {
        return Err(KernelError::InvalidArg {
            what: "geomspace endpoints must be nonzero and share a sign".to_string(),
        });
    }
    let sign = if start < 0.0 { -1.0 } else { 1.0 };
    let lin = linspace(start.abs().ln(), stop.abs().ln(), num)?;
    Ok(lin.mapv(|v| sign * v.exp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr1(v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.to_vec()).unwrap()
    }

    fn arr2(rows: usize, cols: usize, v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[rows, cols]), v.to_vec()).unwrap()
    }

    #[test]
    fn concatenate_1d() {
        let r = concatenate(&[&arr1(&[1.0, 2.0]), &arr1(&[3.0])], 0).unwrap();
        assert_eq!(r.as_slice().unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn concatenate_rejects_mismatched_shapes() {
        let a = arr2(2, 2, &[1.0; 4]);
        let b = arr2(2, 3, &[1.0; 6]);
        assert!(concatenate(&[&a, &b], 0).is_err());
    }

    #[test]
    fn stack_adds_axis() {
        let r = stack(&[&arr1(&[1.0, 2.0]), &arr1(&[3.0, 4.0])], 0).unwrap();
        assert_eq!(r.shape(), &[2, 2]);
    }

    #[test]
    fn vstack_promotes_rows() {
        let r = vstack(&[&arr1(&[1.0, 2.0]), &arr1(&[3.0, 4.0])]).unwrap();
        assert_eq!(r.shape(), &[2, 2]);
        assert_eq!(r[[1, 0]], 3.0);
    }

    #[test]
    fn hstack_1d_joins_end_to_end() {
        let r = hstack(&[&arr1(&[1.0]), &arr1(&[2.0, 3.0])]).unwrap();
        assert_eq!(r.shape(), &[3]);
    }

    #[test]
    fn hstack_2d_joins_columns() {
        let a = arr2(2, 1, &[1.0, 2.0]);
        let b = arr2(2, 2, &[3.0, 4.0, 5.0, 6.0]);
        let r = hstack(&[&a, &b]).unwrap();
        assert_eq!(r.shape(), &[2, 3]);
    }

    #[test]
    fn dstack_shape() {
        let r = dstack(&[&arr1(&[1.0, 2.0]), &arr1(&[3.0, 4.0])]).unwrap();
        assert_eq!(r.shape(), &[1, 2, 2]);
    }

    #[test]
    fn column_stack_makes_columns() {
        let r = column_stack(&[&arr1(&[1.0, 2.0]), &arr1(&[3.0, 4.0])]).unwrap();
        assert_eq!(r.shape(), &[2, 2]);
        assert_eq!(r[[0, 1]], 3.0);
    }

    #[test]
    fn block_2x2() {
        let a = arr2(1, 1, &[1.0]);
        let b = arr2(1, 1, &[2.0]);
        let c = arr2(1, 1, &[3.0]);
        let d = arr2(1, 1, &[4.0]);
        let r = block(&[vec![&a, &b], vec![&c, &d]]).unwrap();
        assert_eq!(r.shape(), &[2, 2]);
        assert_eq!(r[[1, 1]], 4.0);
    }

    #[test]
    fn set_operations() {
        let a = arr1(&[3.0, 1.0, 2.0, 2.0]);
        let b = arr1(&[2.0, 3.0, 5.0]);
        assert_eq!(intersect1d(&a, &b).as_slice().unwrap(), &[2.0, 3.0]);
        assert_eq!(
            union1d(&a, &b).as_slice().unwrap(),
            &[1.0, 2.0, 3.0, 5.0]
        );
    }

    #[test]
    fn spacing_kernels() {
        let lin = linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(lin.as_slice().unwrap(), &[0.0, 0.25, 0.5, 0.75, 1.0]);

        let log = logspace(0.0, 2.0, 3).unwrap();
        assert_eq!(log.as_slice().unwrap(), &[1.0, 10.0, 100.0]);

        let geo = geomspace(1.0, 8.0, 4).unwrap();
        for (got, want) in geo.iter().zip([1.0, 2.0, 4.0, 8.0]) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!(geomspace(0.0, 1.0, 3).is_err());
    }
}

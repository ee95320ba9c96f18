//! Uniform-width histogram binning: 1-D, 2-D, and N-D.
//!
//! Binning follows the numpy contract: `bins` equal-width intervals over an
//! explicit range or the data's min/max, the last bin closed on the right,
//! samples outside the range dropped.

use crate::error::{KernelError, KernelResult};
use ndarray::{ArrayD, IxDyn};

fn resolve_range(
    values: &ArrayD<f64>,
    range: Option<(f64, f64)>,
) -> KernelResult<(f64, f64)> {
    let (mut lo, mut hi) = match range {
        Some((lo, hi)) => (lo, hi),
        None => {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &v in values.iter() {
                lo = lo.min(v);
                hi = hi.max(v);
            }
            if !lo.is_finite() || !hi.is_finite() {
                return Err(KernelError::InvalidArg {
                    what: "histogram of empty or non-finite data without an explicit range"
                        .to_string(),
                });
            }
            (lo, hi)
        }
    };
    if lo > hi {
        return Err(KernelError::InvalidArg {
            what: format!("histogram range is inverted ({lo} > {hi})"),
        });
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    Ok((lo, hi))
}

fn edges(lo: f64, hi: f64, bins: usize) -> ArrayD<f64> {
    let step = (hi - lo) / bins as f64;
    let mut v: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
    v[bins] = hi;
    ArrayD::from_shape_vec(IxDyn(&[bins + 1]), v)
        .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[bins + 1])))
}

fn bin_index(v: f64, lo: f64, hi: f64, bins: usize) -> Option<usize> {
    if v < lo || v > hi {
        return None;
    }
    if v == hi {
        return Some(bins - 1);
    }
    let idx = ((v - lo) / (hi - lo) * bins as f64) as usize;
    Some(idx.min(bins - 1))
}

/// 1-D histogram: (counts[bins], edges[bins + 1]).
pub fn histogram(
    a: &ArrayD<f64>,
    bins: usize,
    range: Option<(f64, f64)>,
) -> KernelResult<(ArrayD<f64>, ArrayD<f64>)> {
    if bins == 0 {
        return Err(KernelError::InvalidArg {
            what: "histogram with zero bins".to_string(),
        });
    }
    let (lo, hi) = resolve_range(a, range)?;
    let mut counts = vec![0.0; bins];
    for &v in a.iter() {
        if let Some(idx) = bin_index(v, lo, hi, bins) {
            counts[idx] += 1.0;
        }
    }
    Ok((
        ArrayD::from_shape_vec(IxDyn(&[bins]), counts)
            .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[bins]))),
        edges(lo, hi, bins),
    ))
}

/// N-D histogram over per-dimension sample arrays of equal length:
/// (counts[bins; d], one edge array per dimension).
pub fn histogramdd(
    samples: &[&ArrayD<f64>],
    bins: usize,
    ranges: Option<&[(f64, f64)]>,
) -> KernelResult<(ArrayD<f64>, Vec<ArrayD<f64>>)> {
    let d = samples.len();
    if d == 0 {
        return Err(KernelError::InvalidArg {
            what: "histogramdd with no sample dimensions".to_string(),
        });
    }
    if bins == 0 {
        return Err(KernelError::InvalidArg {
            what: "histogramdd with zero bins".to_string(),
        });
    }
    let n = samples[0].len();
    if samples.iter().any(|s| s.len() != n) {
        return Err(KernelError::ShapeMismatch {
            what: "histogramdd sample arrays differ in length".to_string(),
        });
    }
    if let Some(r) = ranges {
        if r.len() != d {
            return Err(KernelError::ShapeMismatch {
                what: format!("histogramdd got {} ranges for {d} dimensions", r.len()),
            });
        }
    }

    let mut limits = Vec::with_capacity(d);
    let mut edge_arrays = Vec::with_capacity(d);
    for (dim, sample) in samples.iter().enumerate() {
        let range = ranges.map(|r| r[dim]);
        let (lo, hi) = resolve_range(sample, range)?;
        limits.push((lo, hi));
        edge_arrays.push(edges(lo, hi, bins));
    }

    let flat: Vec<Vec<f64>> = samples
        .iter()
        .map(|s| s.iter().copied().collect())
        .collect();
    let mut counts = ArrayD::zeros(IxDyn(&vec![bins; d]));
    'points: for p in 0..n {
        let mut idx = Vec::with_capacity(d);
        for dim in 0..d {
            let (lo, hi) = limits[dim];
            match bin_index(flat[dim][p], lo, hi, bins) {
                Some(i) => idx.push(i),
                None => continue 'points,
            }
        }
        counts[IxDyn(&idx)] += 1.0;
    }
    Ok((counts, edge_arrays))
}

/// 2-D histogram: (counts[bins, bins], x edges, y edges).
pub fn histogram2d(
    x: &ArrayD<f64>,
    y: &ArrayD<f64>,
    bins: usize,
    ranges: Option<&[(f64, f64)]>,
) -> KernelResult<(ArrayD<f64>, ArrayD<f64>, ArrayD<f64>)> {
    let (counts, mut edge_arrays) = histogramdd(&[x, y], bins, ranges)?;
    let yedges = edge_arrays.pop().unwrap_or_else(|| ArrayD::zeros(IxDyn(&[0])));
    let xedges = edge_arrays.pop().unwrap_or_else(|| ArrayD::zeros(IxDyn(&[0])));
    Ok((counts, xedges, yedges))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr1(v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.to_vec()).unwrap()
    }

    #[test]
    fn counts_and_edges() {
        let (counts, edges) = histogram(&arr1(&[0.5, 1.5, 1.6, 3.9]), 4, Some((0.0, 4.0))).unwrap();
        assert_eq!(counts.as_slice().unwrap(), &[1.0, 2.0, 0.0, 1.0]);
        assert_eq!(edges.as_slice().unwrap(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn right_edge_lands_in_last_bin() {
        let (counts, _) = histogram(&arr1(&[4.0]), 4, Some((0.0, 4.0))).unwrap();
        assert_eq!(counts.as_slice().unwrap(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn out_of_range_dropped() {
        let (counts, _) = histogram(&arr1(&[-1.0, 0.5, 9.0]), 2, Some((0.0, 1.0))).unwrap();
        assert_eq!(counts.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn histogram2d_counts() {
        let x = arr1(&[0.5, 0.5, 1.5]);
        let y = arr1(&[0.5, 0.5, 1.5]);
        let (counts, xe, ye) =
            histogram2d(&x, &y, 2, Some(&[(0.0, 2.0), (0.0, 2.0)])).unwrap();
        assert_eq!(counts.shape(), &[2, 2]);
        assert_eq!(counts[[0, 0]], 2.0);
        assert_eq!(counts[[1, 1]], 1.0);
        assert_eq!(xe.len(), 3);
        assert_eq!(ye.len(), 3);
    }

    #[test]
    fn histogramdd_mismatched_lengths() {
        let x = arr1(&[1.0, 2.0]);
        let y = arr1(&[1.0]);
        assert!(histogramdd(&[&x, &y], 2, None).is_err());
    }
}

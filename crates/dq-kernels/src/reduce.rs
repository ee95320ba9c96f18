//! Reduction and elementwise kernels: products, variance, quantiles,
//! trapezoid integration, rounding, complex sort.

use crate::error::{KernelError, KernelResult};
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex64;

fn scalar_array(v: f64) -> ArrayD<f64> {
    ArrayD::from_elem(IxDyn(&[]), v)
}

/// Product of all elements -> 0-d scalar.
pub fn prod(a: &ArrayD<f64>) -> ArrayD<f64> {
    scalar_array(a.iter().product())
}

/// Variance over all elements with `ddof` delta degrees of freedom.
pub fn var(a: &ArrayD<f64>, ddof: usize) -> KernelResult<ArrayD<f64>> {
    let n = a.len();
    if n <= ddof {
        return Err(KernelError::InvalidArg {
            what: format!("variance of {n} elements with ddof={ddof}"),
        });
    }
    let mean = a.iter().sum::<f64>() / n as f64;
    let ss: f64 = a.iter().map(|&v| (v - mean) * (v - mean)).sum();
    Ok(scalar_array(ss / (n - ddof) as f64))
}

fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// q-th percentile (0..=100) over all elements, linear interpolation.
pub fn percentile(a: &ArrayD<f64>, q: f64) -> KernelResult<ArrayD<f64>> {
    if !(0.0..=100.0).contains(&q) {
        return Err(KernelError::InvalidArg {
            what: format!("percentile q={q} outside [0, 100]"),
        });
    }
    if a.is_empty() {
        return Err(KernelError::InvalidArg {
            what: "percentile of an empty array".to_string(),
        });
    }
    let mut v: Vec<f64> = a.iter().copied().collect();
    v.sort_by(f64::total_cmp);
    Ok(scalar_array(percentile_of_sorted(&v, q)))
}

/// q-th quantile (0..=1) over all elements.
pub fn quantile(a: &ArrayD<f64>, q: f64) -> KernelResult<ArrayD<f64>> {
    if !(0.0..=1.0).contains(&q) {
        return Err(KernelError::InvalidArg {
            what: format!("quantile q={q} outside [0, 1]"),
        });
    }
    percentile(a, q * 100.0)
}

/// Percentile ignoring NaN entries.
pub fn nanpercentile(a: &ArrayD<f64>, q: f64) -> KernelResult<ArrayD<f64>> {
    if !(0.0..=100.0).contains(&q) {
        return Err(KernelError::InvalidArg {
            what: format!("percentile q={q} outside [0, 100]"),
        });
    }
    let mut v: Vec<f64> = a.iter().copied().filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return Err(KernelError::InvalidArg {
            what: "nanpercentile of an all-NaN array".to_string(),
        });
    }
    v.sort_by(f64::total_cmp);
    Ok(scalar_array(percentile_of_sorted(&v, q)))
}

/// Quantile ignoring NaN entries.
pub fn nanquantile(a: &ArrayD<f64>, q: f64) -> KernelResult<ArrayD<f64>> {
    if !(0.0..=1.0).contains(&q) {
        return Err(KernelError::InvalidArg {
            what: format!("quantile q={q} outside [0, 1]"),
        });
    }
    nanpercentile(a, q * 100.0)
}

/// Trapezoid-rule integral of 1-D `y` against sample points `x` or a
/// uniform spacing `dx`.
pub fn trapz(y: &ArrayD<f64>, x: Option<&ArrayD<f64>>, dx: f64) -> KernelResult<ArrayD<f64>> {
    if y.ndim() != 1 {
        return Err(KernelError::UnsupportedRank {
            what: format!("trapz of a {}-D array", y.ndim()),
        });
    }
    let yv: Vec<f64> = y.iter().copied().collect();
    if yv.len() < 2 {
        return Ok(scalar_array(0.0));
    }
    let total = match x {
        Some(x) => {
            if x.len() != yv.len() {
                return Err(KernelError::ShapeMismatch {
                    what: format!(
                        "trapz sample points length {} does not match data length {}",
                        x.len(),
                        yv.len()
                    ),
                });
            }
            let xv: Vec<f64> = x.iter().copied().collect();
            yv.windows(2)
                .zip(xv.windows(2))
                .map(|(yw, xw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
                .sum()
        }
        None => {
            yv.windows(2)
                .map(|yw| 0.5 * (yw[0] + yw[1]) * dx)
                .sum::<f64>()
        }
    };
    Ok(scalar_array(total))
}

/// Round to `decimals` decimal places (negative rounds left of the point).
pub fn around(a: &ArrayD<f64>, decimals: i32) -> ArrayD<f64> {
    let factor = 10.0_f64.powi(decimals);
    a.mapv(|v| (v * factor).round() / factor)
}

/// Flatten and sort complex values by real part, then imaginary part.
pub fn sort_complex(a: &ArrayD<Complex64>) -> ArrayD<Complex64> {
    let mut v: Vec<Complex64> = a.iter().copied().collect();
    v.sort_by(|x, y| x.re.total_cmp(&y.re).then(x.im.total_cmp(&y.im)));
    let len = v.len();
    ArrayD::from_shape_vec(IxDyn(&[len]), v).unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[len])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr1(v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.to_vec()).unwrap()
    }

    #[test]
    fn prod_multiplies_everything() {
        assert_eq!(prod(&arr1(&[2.0, 3.0, 4.0]))[[]], 24.0);
    }

    #[test]
    fn var_population_and_sample() {
        let a = arr1(&[1.0, 2.0, 3.0, 4.0]);
        assert!((var(&a, 0).unwrap()[[]] - 1.25).abs() < 1e-12);
        assert!((var(&a, 1).unwrap()[[]] - 5.0 / 3.0).abs() < 1e-12);
        assert!(var(&arr1(&[1.0]), 1).is_err());
    }

    #[test]
    fn percentile_interpolates() {
        let a = arr1(&[0.0, 10.0]);
        assert_eq!(percentile(&a, 50.0).unwrap()[[]], 5.0);
        assert_eq!(quantile(&a, 1.0).unwrap()[[]], 10.0);
        assert!(percentile(&a, 101.0).is_err());
    }

    #[test]
    fn nanpercentile_skips_nan() {
        let a = arr1(&[1.0, f64::NAN, 3.0]);
        assert_eq!(nanpercentile(&a, 50.0).unwrap()[[]], 2.0);
        assert!(nanpercentile(&arr1(&[f64::NAN]), 50.0).is_err());
    }

    #[test]
    fn trapz_uniform_and_sampled() {
        let y = arr1(&[0.0, 1.0, 2.0]);
        assert_eq!(trapz(&y, None, 1.0).unwrap()[[]], 2.0);

        let x = arr1(&[0.0, 2.0, 4.0]);
        assert_eq!(trapz(&y, Some(&x), 1.0).unwrap()[[]], 4.0);
    }

    #[test]
    fn around_decimals() {
        let a = arr1(&[1.25, 1.349]);
        let r = around(&a, 1);
        assert!((r[[0]] - 1.3).abs() < 1e-12);
        assert!((r[[1]] - 1.3).abs() < 1e-12);
    }

    #[test]
    fn sort_complex_orders_by_real_then_imaginary() {
        let input = ArrayD::from_shape_vec(
            IxDyn(&[4]),
            vec![
                Complex64::new(3.0, 0.0),
                Complex64::new(1.0, 2.0),
                Complex64::new(1.0, -1.0),
                Complex64::new(2.0, 0.0),
            ],
        )
        .unwrap();
        let sorted = sort_complex(&input);
        let res: Vec<(f64, f64)> = sorted.iter().map(|c| (c.re, c.im)).collect();
        assert_eq!(
            res,
            vec![(1.0, -1.0), (1.0, 2.0), (2.0, 0.0), (3.0, 0.0)]
        );
    }
}

//! Fourier-transform kernels.
//!
//! Cooley-Tukey radix-2 decimation-in-time core; non-power-of-two axis
//! lengths are zero-padded to the next power of two, so transformed axes
//! may grow. The general transforms take complex input so a forward
//! spectrum can be fed back through the inverse; the real-input variants
//! (`rfft*`, `ihfft`) take real arrays, and the hermitian-to-real variants
//! (`hfft`, `irfft*`) produce real output.

use crate::error::{KernelError, KernelResult};
use ndarray::{ArrayD, Axis, IxDyn};
use num_complex::Complex64;

/// In-place bit-reversal permutation.
fn bit_reverse_permutation(buf: &mut [Complex64]) {
    let n = buf.len();
    debug_assert!(n.is_power_of_two());
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buf.swap(i, j);
        }
    }
}

/// In-place radix-2 DIT FFT; power-of-two length required.
///
/// The inverse transform applies the 1/N scaling.
fn fft_inplace(buf: &mut [Complex64], inverse: bool) {
    let n = buf.len();
    debug_assert!(n.is_power_of_two());
    if n <= 1 {
        return;
    }

    bit_reverse_permutation(buf);

    let sign = if inverse { 1.0 } else { -1.0 };
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle_step = sign * std::f64::consts::PI / half as f64;
        let mut start = 0;
        while start < n {
            for k in 0..half {
                let angle = angle_step * k as f64;
                let w = Complex64::new(angle.cos(), angle.sin());
                let even = start + k;
                let odd = start + k + half;
                let t = w * buf[odd];
                buf[odd] = buf[even] - t;
                buf[even] += t;
            }
            start += len;
        }
        len *= 2;
    }

    if inverse {
        let inv_n = 1.0 / n as f64;
        for v in buf.iter_mut() {
            *v *= inv_n;
        }
    }
}

/// Widen a real array to complex with zero imaginary parts.
pub fn to_complex(a: &ArrayD<f64>) -> ArrayD<Complex64> {
    a.mapv(|v| Complex64::new(v, 0.0))
}

/// Transform one axis, zero-padding it to the next power of two.
fn transform_axis(a: &ArrayD<Complex64>, axis: usize, inverse: bool) -> ArrayD<Complex64> {
    let n = a.shape()[axis].max(1);
    let padded = n.next_power_of_two();
    let mut shape = a.shape().to_vec();
    shape[axis] = padded;
    let mut out = ArrayD::from_elem(IxDyn(&shape), Complex64::new(0.0, 0.0));
    for (src, mut dst) in a
        .lanes(Axis(axis))
        .into_iter()
        .zip(out.lanes_mut(Axis(axis)).into_iter())
    {
        let mut buf = vec![Complex64::new(0.0, 0.0); padded];
        for (slot, v) in buf.iter_mut().zip(src.iter()) {
            *slot = *v;
        }
        fft_inplace(&mut buf, inverse);
        for (slot, v) in dst.iter_mut().zip(buf.iter()) {
            *slot = *v;
        }
    }
    out
}

fn transform_axes(
    a: &ArrayD<Complex64>,
    axes: &[usize],
    inverse: bool,
) -> ArrayD<Complex64> {
    let mut out = a.clone();
    for &axis in axes {
        out = transform_axis(&out, axis, inverse);
    }
    out
}

fn last_axes<A>(a: &ArrayD<A>, count: usize) -> KernelResult<Vec<usize>> {
    if a.ndim() < count {
        return Err(KernelError::UnsupportedRank {
            what: format!("{count}-axis transform of a {}-D array", a.ndim()),
        });
    }
    Ok(((a.ndim() - count)..a.ndim()).collect())
}

/// Forward FFT along the last axis.
pub fn fft(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, 1)?;
    Ok(transform_axes(a, &axes, false))
}

/// Inverse FFT along the last axis.
pub fn ifft(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, 1)?;
    Ok(transform_axes(a, &axes, true))
}

/// Forward FFT over the last two axes.
pub fn fft2(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, 2)?;
    Ok(transform_axes(a, &axes, false))
}

/// Inverse FFT over the last two axes.
pub fn ifft2(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, 2)?;
    Ok(transform_axes(a, &axes, true))
}

/// Forward FFT over every axis.
pub fn fftn(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, a.ndim())?;
    Ok(transform_axes(a, &axes, false))
}

/// Inverse FFT over every axis.
pub fn ifftn(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, a.ndim())?;
    Ok(transform_axes(a, &axes, true))
}

/// Keep the non-negative-frequency half of the last axis: n/2 + 1 bins.
fn half_spectrum(full: ArrayD<Complex64>) -> ArrayD<Complex64> {
    let last = full.ndim() - 1;
    let n = full.shape()[last];
    let keep = n / 2 + 1;
    full.slice_axis(Axis(last), ndarray::Slice::from(0..keep))
        .to_owned()
}

/// Real-input FFT along the last axis: n/2 + 1 complex bins.
pub fn rfft(a: &ArrayD<f64>) -> KernelResult<ArrayD<Complex64>> {
    Ok(half_spectrum(fft(&to_complex(a))?))
}

/// Real-input FFT: full transform on the leading axes, half-spectrum on the
/// last.
pub fn rfft2(a: &ArrayD<f64>) -> KernelResult<ArrayD<Complex64>> {
    let axes = last_axes(a, 2)?;
    let full = transform_axis(&to_complex(a), axes[1], false);
    Ok(half_spectrum(transform_axis(&full, axes[0], false)))
}

/// Real-input FFT over every axis, half-spectrum on the last.
pub fn rfftn(a: &ArrayD<f64>) -> KernelResult<ArrayD<Complex64>> {
    let last = a.ndim().checked_sub(1).ok_or(KernelError::UnsupportedRank {
        what: "rfftn of a 0-D array".to_string(),
    })?;
    let mut out = transform_axis(&to_complex(a), last, false);
    for axis in 0..last {
        out = transform_axis(&out, axis, false);
    }
    Ok(half_spectrum(out))
}

/// Rebuild a full hermitian spectrum from the half-spectrum in the last axis
/// and inverse-transform it; the real part is the result.
fn irfft_last_axis(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<f64>> {
    let last = a.ndim().checked_sub(1).ok_or(KernelError::UnsupportedRank {
        what: "inverse real transform of a 0-D array".to_string(),
    })?;
    let m = a.shape()[last];
    if m < 2 {
        return Err(KernelError::ShapeMismatch {
            what: "inverse real transform needs at least 2 spectral bins".to_string(),
        });
    }
    let n = 2 * (m - 1);
    let mut shape = a.shape().to_vec();
    shape[last] = n;
    let mut full = ArrayD::from_elem(IxDyn(&shape), Complex64::new(0.0, 0.0));
    for (src, mut dst) in a
        .lanes(Axis(last))
        .into_iter()
        .zip(full.lanes_mut(Axis(last)).into_iter())
    {
        for k in 0..m {
            dst[k] = src[k];
        }
        for k in 1..(m - 1) {
            dst[n - k] = src[k].conj();
        }
    }
    let inv = transform_axis(&full, last, true);
    Ok(inv.mapv(|c| c.re))
}

/// Inverse real-output FFT along the last axis: m spectral bins produce
/// 2*(m-1) real samples.
pub fn irfft(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<f64>> {
    irfft_last_axis(a)
}

/// Inverse real-output FFT over the last two axes.
pub fn irfft2(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<f64>> {
    let axes = last_axes(a, 2)?;
    let partial = transform_axis(a, axes[0], true);
    irfft_last_axis(&partial)
}

/// Inverse real-output FFT over every axis.
pub fn irfftn(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<f64>> {
    let last = a.ndim().checked_sub(1).ok_or(KernelError::UnsupportedRank {
        what: "irfftn of a 0-D array".to_string(),
    })?;
    let mut partial = a.clone();
    for axis in 0..last {
        partial = transform_axis(&partial, axis, true);
    }
    irfft_last_axis(&partial)
}

/// FFT of a signal with hermitian symmetry: real output of length 2*(m-1),
/// computed as the conjugate inverse real transform scaled by the output
/// length.
pub fn hfft(a: &ArrayD<Complex64>) -> KernelResult<ArrayD<f64>> {
    let out = irfft_last_axis(&a.mapv(|c| c.conj()))?;
    let last = out.ndim() - 1;
    let n = out.shape()[last] as f64;
    Ok(out.mapv(|v| v * n))
}

/// Inverse FFT of a real spectrum, returning the hermitian half-spectrum.
pub fn ihfft(a: &ArrayD<f64>) -> KernelResult<ArrayD<Complex64>> {
    let last = a.ndim().checked_sub(1).ok_or(KernelError::UnsupportedRank {
        what: "ihfft of a 0-D array".to_string(),
    })?;
    let n = a.shape()[last].max(1).next_power_of_two() as f64;
    let spectrum = rfft(a)?;
    Ok(spectrum.mapv(|c| c.conj() / n))
}

fn roll_axis(a: &ArrayD<f64>, axis: usize, shift: usize) -> ArrayD<f64> {
    let n = a.shape()[axis];
    if n == 0 {
        return a.clone();
    }
    let mut out = a.clone();
    for (src, mut dst) in a
        .lanes(Axis(axis))
        .into_iter()
        .zip(out.lanes_mut(Axis(axis)).into_iter())
    {
        for i in 0..n {
            dst[(i + shift) % n] = src[i];
        }
    }
    out
}

/// Swap half-spaces along every axis (zero-frequency bin to the center).
pub fn fftshift(a: &ArrayD<f64>) -> ArrayD<f64> {
    let mut out = a.clone();
    for axis in 0..a.ndim() {
        let n = out.shape()[axis];
        out = roll_axis(&out, axis, n / 2);
    }
    out
}

/// Undo [`fftshift`].
pub fn ifftshift(a: &ArrayD<f64>) -> ArrayD<f64> {
    let mut out = a.clone();
    for axis in 0..a.ndim() {
        let n = out.shape()[axis];
        out = roll_axis(&out, axis, n - n / 2);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn arr1(v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.to_vec()).unwrap()
    }

    fn carr1(v: &[f64]) -> ArrayD<Complex64> {
        to_complex(&arr1(v))
    }

    #[test]
    fn fft_of_impulse_is_flat() {
        let spectrum = fft(&carr1(&[1.0, 0.0, 0.0, 0.0])).unwrap();
        assert_eq!(spectrum.len(), 4);
        for c in spectrum.iter() {
            assert!((c.re - 1.0).abs() < 1e-12);
            assert!(c.im.abs() < 1e-12);
        }
    }

    #[test]
    fn fft_ifft_round_trip() {
        let signal = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let spectrum = fft(&to_complex(&signal)).unwrap();
        let back = ifft(&spectrum).unwrap();
        for (orig, b) in signal.iter().zip(back.iter()) {
            assert!((orig - b.re).abs() < 1e-12);
            assert!(b.im.abs() < 1e-12);
        }
    }

    #[test]
    fn rfft_keeps_half_spectrum() {
        let spectrum = rfft(&arr1(&[1.0, 0.0, -1.0, 0.0])).unwrap();
        assert_eq!(spectrum.len(), 3);
        // Signal is cos(pi*t): all energy in the middle bin.
        assert!((spectrum[[1]].re - 2.0).abs() < 1e-12);
    }

    #[test]
    fn irfft_inverts_rfft() {
        let signal = arr1(&[1.0, 2.0, 3.0, 4.0, 2.0, 0.0, -1.0, 1.0]);
        let spectrum = rfft(&signal).unwrap();
        let back = irfft(&spectrum).unwrap();
        assert_eq!(back.len(), 8);
        for (orig, b) in signal.iter().zip(back.iter()) {
            assert!((orig - b).abs() < 1e-10);
        }
    }

    #[test]
    fn hfft_of_a_conjugate_spectrum_is_real() {
        let signal = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let half = ihfft(&signal).unwrap();
        let back = hfft(&half).unwrap();
        for (orig, b) in signal.iter().zip(back.iter()) {
            assert!((orig - b).abs() < 1e-10);
        }
    }

    #[test]
    fn non_power_of_two_pads() {
        let spectrum = fft(&carr1(&[1.0, 1.0, 1.0])).unwrap();
        assert_eq!(spectrum.len(), 4);
    }

    #[test]
    fn fftshift_even_length() {
        let shifted = fftshift(&arr1(&[0.0, 1.0, 2.0, 3.0]));
        assert_eq!(shifted.as_slice().unwrap(), &[2.0, 3.0, 0.0, 1.0]);
        let back = ifftshift(&shifted);
        assert_eq!(back.as_slice().unwrap(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn fft2_shape() {
        let a = ArrayD::from_elem(IxDyn(&[2, 4]), Complex64::new(1.0, 0.0));
        let s = fft2(&a).unwrap();
        assert_eq!(s.shape(), &[2, 4]);
        assert!(fft2(&carr1(&[1.0])).is_err());
    }
}

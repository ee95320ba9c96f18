//! Linear-algebra kernels over `ArrayD<f64>`, backed by nalgebra.
//!
//! 2-D inputs are bridged into `DMatrix` for decompositions (LU solve, SVD,
//! eigendecomposition) and converted back to row-major `ArrayD` results.

use crate::error::{KernelError, KernelResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{ArrayD, Ix1, Ix2, IxDyn};
use num_complex::Complex64;

// ---------------------------------------------------------------------------
// nalgebra bridge
// ---------------------------------------------------------------------------

pub(crate) fn to_matrix(a: &ArrayD<f64>) -> KernelResult<DMatrix<f64>> {
    let view = a
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| KernelError::UnsupportedRank {
            what: format!("expected a 2-D array, got {}-D", a.ndim()),
        })?;
    let (rows, cols) = view.dim();
    Ok(DMatrix::from_fn(rows, cols, |i, j| view[[i, j]]))
}

pub(crate) fn to_square_matrix(a: &ArrayD<f64>) -> KernelResult<DMatrix<f64>> {
    let m = to_matrix(a)?;
    if m.nrows() != m.ncols() {
        return Err(KernelError::ShapeMismatch {
            what: format!("expected a square matrix, got {}x{}", m.nrows(), m.ncols()),
        });
    }
    Ok(m)
}

pub(crate) fn to_vector(a: &ArrayD<f64>) -> KernelResult<DVector<f64>> {
    let view = a
        .view()
        .into_dimensionality::<Ix1>()
        .map_err(|_| KernelError::UnsupportedRank {
            what: format!("expected a 1-D array, got {}-D", a.ndim()),
        })?;
    Ok(DVector::from_iterator(view.len(), view.iter().copied()))
}

pub(crate) fn matrix_to_array(m: &DMatrix<f64>) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(&[m.nrows(), m.ncols()]), |ix| m[(ix[0], ix[1])])
}

pub(crate) fn vector_to_array(v: &DVector<f64>) -> ArrayD<f64> {
    ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.iter().copied().collect())
        .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[v.len()])))
}

fn scalar_array(v: f64) -> ArrayD<f64> {
    ArrayD::from_elem(IxDyn(&[]), v)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Vector dot product, matrix product, or matrix-vector product.
///
/// Contract: 1-D x 1-D (equal length) -> 0-d scalar; 2-D x 2-D -> 2-D;
/// 2-D x 1-D -> 1-D; 1-D x 2-D -> 1-D.
pub fn dot(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    match (a.ndim(), b.ndim()) {
        (1, 1) => {
            let (av, bv) = (to_vector(a)?, to_vector(b)?);
            if av.len() != bv.len() {
                return Err(KernelError::ShapeMismatch {
                    what: format!("dot of vectors with lengths {} and {}", av.len(), bv.len()),
                });
            }
            Ok(scalar_array(av.dot(&bv)))
        }
        (2, 2) => {
            let (am, bm) = (to_matrix(a)?, to_matrix(b)?);
            if am.ncols() != bm.nrows() {
                return Err(KernelError::ShapeMismatch {
                    what: format!(
                        "matrix product of {}x{} and {}x{}",
                        am.nrows(),
                        am.ncols(),
                        bm.nrows(),
                        bm.ncols()
                    ),
                });
            }
            Ok(matrix_to_array(&(am * bm)))
        }
        (2, 1) => {
            let (am, bv) = (to_matrix(a)?, to_vector(b)?);
            if am.ncols() != bv.len() {
                return Err(KernelError::ShapeMismatch {
                    what: format!(
                        "matrix-vector product of {}x{} and {}",
                        am.nrows(),
                        am.ncols(),
                        bv.len()
                    ),
                });
            }
            Ok(vector_to_array(&(am * bv)))
        }
        (1, 2) => {
            let (av, bm) = (to_vector(a)?, to_matrix(b)?);
            if av.len() != bm.nrows() {
                return Err(KernelError::ShapeMismatch {
                    what: format!(
                        "vector-matrix product of {} and {}x{}",
                        av.len(),
                        bm.nrows(),
                        bm.ncols()
                    ),
                });
            }
            Ok(vector_to_array(&(bm.transpose() * av)))
        }
        (na, nb) => Err(KernelError::UnsupportedRank {
            what: format!("dot of {na}-D and {nb}-D arrays"),
        }),
    }
}

/// Flattened dot product of equal-length arrays -> 0-d scalar.
pub fn vdot(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    if a.len() != b.len() {
        return Err(KernelError::ShapeMismatch {
            what: format!("vdot of arrays with {} and {} elements", a.len(), b.len()),
        });
    }
    let sum: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    Ok(scalar_array(sum))
}

/// Inner product over last axes: 1-D pairs produce a scalar, 2-D pairs with
/// equal trailing length produce `a * b^T`.
pub fn inner(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    match (a.ndim(), b.ndim()) {
        (1, 1) => dot(a, b),
        (2, 2) => {
            let (am, bm) = (to_matrix(a)?, to_matrix(b)?);
            if am.ncols() != bm.ncols() {
                return Err(KernelError::ShapeMismatch {
                    what: format!(
                        "inner of arrays with trailing lengths {} and {}",
                        am.ncols(),
                        bm.ncols()
                    ),
                });
            }
            Ok(matrix_to_array(&(am * bm.transpose())))
        }
        (na, nb) => Err(KernelError::UnsupportedRank {
            what: format!("inner of {na}-D and {nb}-D arrays"),
        }),
    }
}

/// Outer product of flattened inputs -> (a.len, b.len).
pub fn outer(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let (m, n) = (a.len(), b.len());
    let av: Vec<f64> = a.iter().copied().collect();
    let bv: Vec<f64> = b.iter().copied().collect();
    Ok(ArrayD::from_shape_fn(IxDyn(&[m, n]), |ix| {
        av[ix[0]] * bv[ix[1]]
    }))
}

/// Kronecker product for inputs of rank <= 2. Two 1-D inputs give 1-D; any
/// 2-D input promotes the other to a single-row matrix.
pub fn kron(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    if a.ndim() > 2 || b.ndim() > 2 {
        return Err(KernelError::UnsupportedRank {
            what: format!("kron of {}-D and {}-D arrays", a.ndim(), b.ndim()),
        });
    }
    let both_1d = a.ndim() <= 1 && b.ndim() <= 1;
    let as_2d = |x: &ArrayD<f64>| -> (usize, usize, Vec<f64>) {
        if x.ndim() == 2 {
            (x.shape()[0], x.shape()[1], x.iter().copied().collect())
        } else {
            (1, x.len(), x.iter().copied().collect())
        }
    };
    let (ar, ac, av) = as_2d(a);
    let (br, bc, bv) = as_2d(b);
    let out = ArrayD::from_shape_fn(IxDyn(&[ar * br, ac * bc]), |ix| {
        let (i, j) = (ix[0], ix[1]);
        av[(i / br) * ac + j / bc] * bv[(i % br) * bc + j % bc]
    });
    if both_1d {
        let len = out.len();
        return Ok(out
            .into_shape_with_order(IxDyn(&[len]))
            .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[len]))));
    }
    Ok(out)
}

/// Cross product along a trailing axis of length 3, equal input shapes.
pub fn cross(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    if a.shape() != b.shape() {
        return Err(KernelError::ShapeMismatch {
            what: format!("cross of shapes {:?} and {:?}", a.shape(), b.shape()),
        });
    }
    if a.ndim() == 0 || a.shape()[a.ndim() - 1] != 3 {
        return Err(KernelError::ShapeMismatch {
            what: "cross requires a trailing axis of length 3".to_string(),
        });
    }
    let av: Vec<f64> = a.iter().copied().collect();
    let bv: Vec<f64> = b.iter().copied().collect();
    let mut out = Vec::with_capacity(av.len());
    for (ax, bx) in av.chunks_exact(3).zip(bv.chunks_exact(3)) {
        out.push(ax[1] * bx[2] - ax[2] * bx[1]);
        out.push(ax[2] * bx[0] - ax[0] * bx[2]);
        out.push(ax[0] * bx[1] - ax[1] * bx[0]);
    }
    ArrayD::from_shape_vec(IxDyn(a.shape()), out).map_err(|e| KernelError::ShapeMismatch {
        what: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Inverses, determinant, norms
// ---------------------------------------------------------------------------

/// Inverse of a square matrix.
pub fn inv(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let m = to_square_matrix(a)?;
    let n = m.nrows();
    m.try_inverse()
        .map(|inv| matrix_to_array(&inv))
        .ok_or_else(|| KernelError::Singular {
            what: format!("{n}x{n} matrix is not invertible"),
        })
}

/// Moore-Penrose pseudo-inverse via SVD.
pub fn pinv(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let m = to_matrix(a)?;
    let svd = m.svd(true, true);
    svd.pseudo_inverse(f64::EPSILON * 1e3)
        .map(|p| matrix_to_array(&p))
        .map_err(|what| KernelError::Singular {
            what: what.to_string(),
        })
}

/// Inverse of an N-d tensor with respect to `tensordot(a, b, ind)`.
///
/// The first `ind` axes are flattened into rows, the rest into columns; the
/// flattened matrix must be square.
pub fn tensorinv(a: &ArrayD<f64>, ind: usize) -> KernelResult<ArrayD<f64>> {
    if ind == 0 || ind >= a.ndim() {
        return Err(KernelError::InvalidArg {
            what: format!("tensorinv index {ind} out of range for a {}-D array", a.ndim()),
        });
    }
    let rows: usize = a.shape()[..ind].iter().product();
    let cols: usize = a.shape()[ind..].iter().product();
    if rows != cols {
        return Err(KernelError::ShapeMismatch {
            what: format!("tensorinv of a non-square flattening ({rows}x{cols})"),
        });
    }
    let flat = a
        .view()
        .into_shape_with_order(IxDyn(&[rows, cols]))
        .map_err(|e| KernelError::ShapeMismatch {
            what: e.to_string(),
        })?
        .to_owned();
    let inverted = inv(&flat)?;
    let mut out_shape: Vec<usize> = a.shape()[ind..].to_vec();
    out_shape.extend_from_slice(&a.shape()[..ind]);
    inverted
        .into_shape_with_order(IxDyn(&out_shape))
        .map_err(|e| KernelError::ShapeMismatch {
            what: e.to_string(),
        })
}

/// Determinant of a square matrix -> 0-d scalar.
pub fn det(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let m = to_square_matrix(a)?;
    Ok(scalar_array(m.determinant()))
}

/// Sum of the main diagonal of a 2-D array -> 0-d scalar.
pub fn trace(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let m = to_matrix(a)?;
    Ok(scalar_array(m.diagonal().sum()))
}

/// L2 (Frobenius) norm over all elements -> 0-d scalar.
pub fn norm(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let sum_sq: f64 = a.iter().map(|&v| v * v).sum();
    Ok(scalar_array(sum_sq.sqrt()))
}

// ---------------------------------------------------------------------------
// Linear systems
// ---------------------------------------------------------------------------

/// Solve `a x = b` for a square `a`, with `b` 1-D or 2-D.
pub fn solve(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let am = to_square_matrix(a)?;
    let n = am.nrows();
    match b.ndim() {
        1 => {
            let bv = to_vector(b)?;
            if bv.len() != n {
                return Err(KernelError::ShapeMismatch {
                    what: format!("solve with {n}x{n} matrix and length-{} rhs", bv.len()),
                });
            }
            let x = am.lu().solve(&bv).ok_or_else(|| KernelError::Singular {
                what: format!("{n}x{n} system matrix is singular"),
            })?;
            Ok(vector_to_array(&x))
        }
        2 => {
            let bm = to_matrix(b)?;
            if bm.nrows() != n {
                return Err(KernelError::ShapeMismatch {
                    what: format!("solve with {n}x{n} matrix and {}-row rhs", bm.nrows()),
                });
            }
            let x = am.lu().solve(&bm).ok_or_else(|| KernelError::Singular {
                what: format!("{n}x{n} system matrix is singular"),
            })?;
            Ok(matrix_to_array(&x))
        }
        nb => Err(KernelError::UnsupportedRank {
            what: format!("solve with a {nb}-D rhs"),
        }),
    }
}

/// Solve `tensordot(a, x, x.ndim) = b` for `x`.
///
/// `a` is flattened into a square matrix with `prod(b.shape)` rows; the
/// solution is reshaped to the trailing axes of `a`.
pub fn tensorsolve(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let rows: usize = b.shape().iter().product();
    let total: usize = a.shape().iter().product();
    if rows == 0 || total % rows != 0 {
        return Err(KernelError::ShapeMismatch {
            what: format!(
                "tensorsolve with operand shapes {:?} and {:?}",
                a.shape(),
                b.shape()
            ),
        });
    }
    let cols = total / rows;
    if b.ndim() > a.ndim() || a.shape()[b.ndim()..].iter().product::<usize>() != cols {
        return Err(KernelError::ShapeMismatch {
            what: format!(
                "tensorsolve with operand shapes {:?} and {:?}",
                a.shape(),
                b.shape()
            ),
        });
    }
    let flat_a = a
        .view()
        .into_shape_with_order(IxDyn(&[rows, cols]))
        .map_err(|e| KernelError::ShapeMismatch {
            what: e.to_string(),
        })?
        .to_owned();
    let flat_b = ArrayD::from_shape_vec(IxDyn(&[rows]), b.iter().copied().collect()).map_err(
        |e| KernelError::ShapeMismatch {
            what: e.to_string(),
        },
    )?;
    let x = solve(&flat_a, &flat_b)?;
    let out_shape: Vec<usize> = a.shape()[b.ndim()..].to_vec();
    x.into_shape_with_order(IxDyn(&out_shape))
        .map_err(|e| KernelError::ShapeMismatch {
            what: e.to_string(),
        })
}

/// Least-squares output: solution, residuals, rank, singular values.
pub struct LstsqRaw {
    pub solution: ArrayD<f64>,
    pub residuals: ArrayD<f64>,
    pub rank: usize,
    pub singular_values: ArrayD<f64>,
}

/// Least-squares solution of `a x = b` via SVD, `b` 1-D.
///
/// Residuals follow the numpy contract: a single squared-norm entry when the
/// system is overdetermined and full-rank, empty otherwise.
pub fn lstsq(a: &ArrayD<f64>, b: &ArrayD<f64>) -> KernelResult<LstsqRaw> {
    let am = to_matrix(a)?;
    let bv = to_vector(b)?;
    let (m, n) = (am.nrows(), am.ncols());
    if bv.len() != m {
        return Err(KernelError::ShapeMismatch {
            what: format!("lstsq with {m}x{n} matrix and length-{} rhs", bv.len()),
        });
    }
    let eps = f64::EPSILON * m.max(n) as f64;
    let svd = am.clone().svd(true, true);
    let rank = svd.rank(eps * svd.singular_values.max());
    let singular_values = DVector::from_iterator(
        svd.singular_values.len(),
        svd.singular_values.iter().copied(),
    );
    let x = svd
        .solve(&bv, eps)
        .map_err(|what| KernelError::Singular {
            what: what.to_string(),
        })?;
    let residuals = if rank == n && m > n {
        let r = &bv - &am * &x;
        vec![r.norm_squared()]
    } else {
        Vec::new()
    };
    let res_len = residuals.len();
    Ok(LstsqRaw {
        solution: vector_to_array(&x),
        residuals: ArrayD::from_shape_vec(IxDyn(&[res_len]), residuals)
            .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[0]))),
        rank,
        singular_values: vector_to_array(&singular_values),
    })
}

// ---------------------------------------------------------------------------
// Eigendecomposition
// ---------------------------------------------------------------------------

/// Complex eigenvalues of a square real matrix -> 1-D complex array.
pub fn eigvals(a: &ArrayD<f64>) -> KernelResult<ArrayD<Complex64>> {
    let m = to_square_matrix(a)?;
    let vals = m.complex_eigenvalues();
    Ok(ArrayD::from_shape_vec(
        IxDyn(&[vals.len()]),
        vals.iter().copied().collect(),
    )
    .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[0]))))
}

/// Eigenvalues and eigenvectors of a square real matrix.
///
/// Eigenvectors come from shifted inverse iteration on the complex
/// eigenvalues; the contract assumes distinct eigenvalues (repeated
/// eigenvalues may yield linearly dependent columns).
pub fn eig(a: &ArrayD<f64>) -> KernelResult<(ArrayD<Complex64>, ArrayD<Complex64>)> {
    let m = to_square_matrix(a)?;
    let n = m.nrows();
    let vals = m.complex_eigenvalues();
    let ac = m.map(|x| Complex64::new(x, 0.0));

    let mut vectors = nalgebra::DMatrix::<Complex64>::zeros(n, n);
    for (k, &lambda) in vals.iter().enumerate() {
        // Shift slightly off the eigenvalue so the system stays solvable.
        let shift = lambda * Complex64::new(1.0 + 1e-10, 0.0) + Complex64::new(1e-12, 1e-12);
        let shifted = &ac - nalgebra::DMatrix::<Complex64>::identity(n, n) * shift;
        let mut v = nalgebra::DVector::<Complex64>::from_element(n, Complex64::new(1.0, 0.0));
        for _ in 0..2 {
            let solved = shifted.clone().lu().solve(&v).ok_or_else(|| {
                KernelError::Singular {
                    what: format!("inverse iteration failed for eigenvalue {lambda}"),
                }
            })?;
            let norm = solved.norm();
            if norm == 0.0 {
                return Err(KernelError::Singular {
                    what: format!("inverse iteration collapsed for eigenvalue {lambda}"),
                });
            }
            v = solved / Complex64::new(norm, 0.0);
        }
        vectors.set_column(k, &v);
    }

    let vals_arr = ArrayD::from_shape_vec(IxDyn(&[n]), vals.iter().copied().collect())
        .unwrap_or_else(|_| ArrayD::zeros(IxDyn(&[0])));
    let vecs_arr = ArrayD::from_shape_fn(IxDyn(&[n, n]), |ix| vectors[(ix[0], ix[1])]);
    Ok((vals_arr, vecs_arr))
}

fn require_symmetric(m: &DMatrix<f64>) -> KernelResult<()> {
    let n = m.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            if (m[(i, j)] - m[(j, i)]).abs() > 1e-9 * (1.0 + m[(i, j)].abs()) {
                return Err(KernelError::InvalidArg {
                    what: "eigh requires a symmetric matrix".to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Eigenvalues and eigenvectors of a symmetric real matrix.
pub fn eigh(a: &ArrayD<f64>) -> KernelResult<(ArrayD<f64>, ArrayD<f64>)> {
    let m = to_square_matrix(a)?;
    require_symmetric(&m)?;
    let decomp = m.symmetric_eigen();
    Ok((
        vector_to_array(&decomp.eigenvalues),
        matrix_to_array(&decomp.eigenvectors),
    ))
}

/// Eigenvalues of a symmetric real matrix -> 1-D array.
pub fn eigvalsh(a: &ArrayD<f64>) -> KernelResult<ArrayD<f64>> {
    let m = to_square_matrix(a)?;
    require_symmetric(&m)?;
    Ok(vector_to_array(&m.symmetric_eigenvalues()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn arr1(v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.to_vec()).unwrap()
    }

    fn arr2(rows: usize, cols: usize, v: &[f64]) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(&[rows, cols]), v.to_vec()).unwrap()
    }

    #[test]
    fn dot_shapes() {
        let s = dot(&arr1(&[1.0, 2.0]), &arr1(&[3.0, 4.0])).unwrap();
        assert_eq!(s[[]], 11.0);

        let m = dot(
            &arr2(2, 2, &[1.0, 0.0, 0.0, 1.0]),
            &arr2(2, 2, &[1.0, 2.0, 3.0, 4.0]),
        )
        .unwrap();
        assert_eq!(m[[1, 0]], 3.0);

        assert!(dot(&arr1(&[1.0]), &arr1(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn cross_basis_vectors() {
        let x = arr1(&[1.0, 0.0, 0.0]);
        let y = arr1(&[0.0, 1.0, 0.0]);
        let z = cross(&x, &y).unwrap();
        assert_eq!(z.as_slice().unwrap(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn kron_1d() {
        let r = kron(&arr1(&[1.0, 2.0]), &arr1(&[10.0, 20.0])).unwrap();
        assert_eq!(r.as_slice().unwrap(), &[10.0, 20.0, 20.0, 40.0]);
    }

    #[test]
    fn inv_and_det() {
        let a = arr2(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let ai = inv(&a).unwrap();
        assert!((ai[[0, 0]] - 0.5).abs() < 1e-12);
        assert!((ai[[1, 1]] - 0.25).abs() < 1e-12);
        assert!((det(&a).unwrap()[[]] - 8.0).abs() < 1e-12);

        let singular = arr2(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            inv(&singular),
            Err(KernelError::Singular { .. })
        ));
    }

    #[test]
    fn solve_diagonal_system() {
        let a = arr2(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let b = arr1(&[2.0, 8.0]);
        let x = solve(&a, &b).unwrap();
        assert_eq!(x.as_slice().unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn tensorsolve_reduces_to_solve() {
        let a = arr2(2, 2, &[1.0, 0.0, 0.0, 2.0]);
        let b = arr1(&[3.0, 8.0]);
        let x = tensorsolve(&a, &b).unwrap();
        assert_eq!(x.as_slice().unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn lstsq_overdetermined() {
        // y = 2x fit through three exact points
        let a = arr2(3, 1, &[1.0, 2.0, 3.0]);
        let b = arr1(&[2.0, 4.0, 6.0]);
        let out = lstsq(&a, &b).unwrap();
        assert_eq!(out.rank, 1);
        assert!((out.solution[[0]] - 2.0).abs() < 1e-10);
        assert_eq!(out.residuals.len(), 1);
        assert!(out.residuals[[0]] < 1e-18);
        assert_eq!(out.singular_values.len(), 1);
    }

    #[test]
    fn eigh_diagonal() {
        let a = arr2(2, 2, &[3.0, 0.0, 0.0, 1.0]);
        let (vals, vecs) = eigh(&a).unwrap();
        let mut sorted: Vec<f64> = vals.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        assert!((sorted[0] - 1.0).abs() < 1e-10);
        assert!((sorted[1] - 3.0).abs() < 1e-10);
        assert_eq!(vecs.shape(), &[2, 2]);
    }

    #[test]
    fn eig_diagonal() {
        let a = arr2(2, 2, &[2.0, 0.0, 0.0, 5.0]);
        let (vals, vecs) = eig(&a).unwrap();
        let mut res: Vec<f64> = vals.iter().map(|c| c.re).collect();
        res.sort_by(f64::total_cmp);
        assert!((res[0] - 2.0).abs() < 1e-8);
        assert!((res[1] - 5.0).abs() < 1e-8);
        assert_eq!(vecs.shape(), &[2, 2]);
    }

    #[test]
    fn trace_and_norm() {
        let a = arr2(2, 2, &[1.0, 9.0, 9.0, 2.0]);
        assert_eq!(trace(&a).unwrap()[[]], 3.0);
        let v = arr1(&[3.0, 4.0]);
        assert_eq!(norm(&v).unwrap()[[]], 5.0);
    }

    #[test]
    fn tensorinv_round_trip() {
        // (2,3,2,3) flattened to 6x6 identity
        let mut a = ArrayD::zeros(IxDyn(&[2, 3, 2, 3]));
        for i in 0..2 {
            for j in 0..3 {
                a[[i, j, i, j]] = 1.0;
            }
        }
        let ai = tensorinv(&a, 2).unwrap();
        assert_eq!(ai.shape(), &[2, 3, 2, 3]);
        assert_eq!(ai[[0, 1, 0, 1]], 1.0);
    }
}

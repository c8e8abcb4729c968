use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::Zero;

use crate::traits::{FloatScalar, LinalgScalar};
use crate::Matrix;

/// Right eigenvectors of a complex upper-triangular matrix by
/// back-substitution.
///
/// For each eigenvalue `λ = t[k, k]` the system
/// `(T[0..k, 0..k] - λI) v = -T[0..k, k]` is solved with diagonal
/// entries too close to `λ` perturbed up to a safe threshold, so the
/// computation cannot fail; a scaling factor keeps intermediates from
/// overflowing. When `z` is supplied (the Schur vectors), each vector
/// is rotated back into the original basis, so column k of the result
/// is an eigenvector of the matrix `Z T Z^H`; otherwise it is an
/// eigenvector of T itself. Columns are normalized to unit ∞-norm in
/// the `|Re| + |Im|` sense.
///
/// The diagonal of `t` is mutated during the solve and restored before
/// returning.
///
/// ```
/// use eigenum::{eigvecs, Complex, Matrix};
///
/// let mut t = Matrix::from_rows(
///     2,
///     2,
///     &[
///         Complex::new(1.0_f64, 0.0),
///         Complex::new(2.0, 0.0),
///         Complex::new(0.0, 0.0),
///         Complex::new(3.0, 0.0),
///     ],
/// );
/// let v = eigvecs(&mut t, None);
/// // second column solves T v = 3 v
/// let r0 = t[(0, 0)] * v[(0, 1)] + t[(0, 1)] * v[(1, 1)] - v[(0, 1)] * 3.0;
/// assert!(r0.norm() < 1e-14);
/// ```
pub fn eigvecs<R: FloatScalar>(
    t: &mut Matrix<Complex<R>>,
    z: Option<&Matrix<Complex<R>>>,
) -> Matrix<Complex<R>> {
    let n = t.nrows();
    assert!(t.is_square(), "eigvecs requires a square triangular factor");
    if let Some(zm) = z {
        assert_eq!(zm.nrows(), n, "Schur vector dimensions must match T");
        assert_eq!(zm.ncols(), n, "Schur vector dimensions must match T");
    }

    let eps = R::epsilon();
    let n_r = R::from(n).unwrap_or_else(R::max_value);
    let smallnum = R::min_positive_value() * (n_r / eps);
    let bignum = R::one() / smallnum;

    // ∞-norm bound of each strict upper column, used by the growth guard
    let tnorms: Vec<R> = (0..n)
        .map(|j| {
            let mut s = R::zero();
            for i in 0..j {
                s = s + t[(i, j)].norm1();
            }
            s
        })
        .collect();

    let mut vecs = Matrix::zeros(n, n, Complex::zero());
    let mut v = vec![Complex::<R>::zero(); n];
    let mut dsave = vec![Complex::<R>::zero(); n];

    for k in (0..n).rev() {
        let lambda = t[(k, k)];
        let smin = (eps * lambda.norm1()).max(smallnum);

        for j in 0..k {
            v[j] = -t[(j, k)];
        }

        // Shift the leading diagonal by λ; pivots under smin are
        // perturbed up so the triangular solve cannot break down.
        for j in 0..k {
            dsave[j] = t[(j, j)];
            let mut dj = t[(j, j)] - lambda;
            if dj.norm1() < smin {
                dj = Complex::new(smin, R::zero());
            }
            t[(j, j)] = dj;
        }

        // Overflow-safe back-substitution. vscale tracks the rescaling
        // applied to the whole right-hand side.
        let mut vscale = R::one();
        for j in (0..k).rev() {
            let tjj = t[(j, j)].norm1();
            let vj = v[j].norm1();
            if tjj < R::one() && vj > tjj * bignum {
                let rec = R::one() / vj;
                for x in v[..k].iter_mut() {
                    *x = *x * Complex::new(rec, R::zero());
                }
                vscale = vscale * rec;
            }
            v[j] = v[j] / t[(j, j)];

            let xj = v[j].norm1();
            if xj > R::one() && tnorms[j] > bignum / xj {
                let rec = R::one() / xj;
                for x in v[..k].iter_mut() {
                    *x = *x * Complex::new(rec, R::zero());
                }
                vscale = vscale * rec;
            }

            let vj = v[j];
            for i in 0..j {
                v[i] = v[i] - vj * t[(i, j)];
            }
        }

        // Assemble column k, rotating into the original basis if the
        // Schur vectors were supplied.
        match z {
            Some(zm) => {
                for i in 0..n {
                    let mut sum = zm[(i, k)] * Complex::new(vscale, R::zero());
                    for j in 0..k {
                        sum = sum + zm[(i, j)] * v[j];
                    }
                    vecs[(i, k)] = sum;
                }
            }
            None => {
                for (j, &vj) in v.iter().enumerate().take(k) {
                    vecs[(j, k)] = vj;
                }
                vecs[(k, k)] = Complex::new(vscale, R::zero());
            }
        }

        let mut mx = R::zero();
        for i in 0..n {
            let a = vecs[(i, k)].norm1();
            if a > mx {
                mx = a;
            }
        }
        if mx > R::zero() {
            for i in 0..n {
                vecs[(i, k)] = vecs[(i, k)] / Complex::new(mx, R::zero());
            }
        }

        for j in 0..k {
            t[(j, j)] = dsave[j];
        }
    }

    vecs
}

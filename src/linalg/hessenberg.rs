use num_traits::Zero;

use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Reduce a square matrix to upper Hessenberg form via Householder
/// similarity transforms: `Q^H A Q = H`.
///
/// On return the upper Hessenberg part of `a` holds H, while the
/// entries below the first subdiagonal hold the packed (normalized)
/// Householder vectors and `tau` holds their scalar factors, one per
/// eliminated column. [`accumulate_q`] turns the packed form into the
/// explicit transform Q; [`clear_reflectors`] discards it.
///
/// Keeping the reflectors packed lets the eigenvalues-only path skip
/// the O(n^3) accumulation entirely.
pub(crate) fn hessenberg_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>, tau: &mut [T]) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");
    assert_eq!(tau.len(), n.saturating_sub(2));

    for k in 0..n.saturating_sub(2) {
        // Form the Householder vector from a[k+1:n, k]
        let sub_col = a.col_as_slice(k, k + 1);
        let mut norm_sq = <T::Real as Zero>::zero();
        for &v in sub_col {
            norm_sq = norm_sq + (v * v.conj()).re();
        }

        if norm_sq <= T::lsafe_min() {
            // Column already negligible below the diagonal
            tau[k] = T::zero();
            continue;
        }

        let norm = norm_sq.lsqrt();
        let ak1k = *a.get(k + 1, k);
        let alpha = ak1k.modulus();

        let sigma = if alpha < T::lepsilon() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (ak1k / T::from_real(alpha))
        };

        let v0 = ak1k + sigma;

        // Store the normalized vector in a[k+2:n, k] (v[0] = 1 implicit)
        {
            let tail = a.col_as_mut_slice(k, k + 2);
            for x in tail.iter_mut() {
                *x = *x / v0;
            }
        }

        // This sigma choice makes tau real, so H = I - tau v v^H is
        // Hermitian and serves both sides of the similarity unchanged.
        let t = v0 / sigma;
        tau[k] = t;

        // Left: A[k+1:n, k+1:n] = (I - tau v v^H) A[k+1:n, k+1:n]
        for j in (k + 1)..n {
            let mut dot = *a.get(k + 1, j);
            for i in (k + 2)..n {
                dot = dot + (*a.get(i, k)).conj() * *a.get(i, j);
            }
            dot = dot * t;

            *a.get_mut(k + 1, j) = *a.get(k + 1, j) - dot;
            for i in (k + 2)..n {
                let vi = *a.get(i, k);
                *a.get_mut(i, j) = *a.get(i, j) - dot * vi;
            }
        }

        // Right: A[0:n, k+1:n] = A[0:n, k+1:n] (I - tau v v^H)
        for i in 0..n {
            let mut dot = *a.get(i, k + 1);
            for jj in (k + 2)..n {
                dot = dot + *a.get(i, jj) * *a.get(jj, k);
            }
            dot = dot * t;

            *a.get_mut(i, k + 1) = *a.get(i, k + 1) - dot;
            for jj in (k + 2)..n {
                let vj_conj = (*a.get(jj, k)).conj();
                *a.get_mut(i, jj) = *a.get(i, jj) - dot * vj_conj;
            }
        }

        *a.get_mut(k + 1, k) = T::zero() - sigma;
    }
}

/// Accumulate the packed reflectors of [`hessenberg_in_place`] into the
/// explicit unitary Q, applying them right-to-left to the identity.
pub(crate) fn accumulate_q<T: LinalgScalar>(a: &impl MatrixRef<T>, tau: &[T]) -> Matrix<T> {
    let n = a.nrows();
    let mut q = Matrix::eye(n, T::zero());

    for k in (0..n.saturating_sub(2)).rev() {
        let t = tau[k];
        if t == T::zero() {
            continue;
        }

        // Q[k+1:n, k+1:n] = (I - tau v v^H) Q[k+1:n, k+1:n]
        for j in (k + 1)..n {
            let mut dot = q[(k + 1, j)];
            for i in (k + 2)..n {
                dot = dot + (*a.get(i, k)).conj() * q[(i, j)];
            }
            dot = dot * t;

            q[(k + 1, j)] = q[(k + 1, j)] - dot;
            for i in (k + 2)..n {
                let vi = *a.get(i, k);
                q[(i, j)] = q[(i, j)] - dot * vi;
            }
        }
    }

    q
}

/// Zero the packed reflector storage, leaving a clean Hessenberg matrix.
pub(crate) fn clear_reflectors<T: LinalgScalar>(a: &mut impl MatrixMut<T>) {
    let n = a.nrows();
    for k in 0..n.saturating_sub(2) {
        for i in (k + 2)..n {
            *a.get_mut(i, k) = T::zero();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const TOL: f64 = 1e-10;

    fn reduce(orig: &Matrix<f64>) -> (Matrix<f64>, Matrix<f64>) {
        let n = orig.nrows();
        let mut h = orig.clone();
        let mut tau = vec![0.0; n.saturating_sub(2)];
        hessenberg_in_place(&mut h, &mut tau);
        let q = accumulate_q(&h, &tau);
        clear_reflectors(&mut h);
        (h, q)
    }

    fn check(orig: &Matrix<f64>, h: &Matrix<f64>, q: &Matrix<f64>) {
        let n = orig.nrows();

        // H is upper Hessenberg
        for i in 0..n {
            for j in 0..i.saturating_sub(1) {
                assert!(
                    h[(i, j)].abs() < TOL,
                    "H[({},{})] = {} should be zero",
                    i,
                    j,
                    h[(i, j)]
                );
            }
        }

        // Q^T A Q = H
        let qtaq = &(&q.transpose() * orig) * q;
        for i in 0..n {
            for j in 0..n {
                assert!(
                    (qtaq[(i, j)] - h[(i, j)]).abs() < TOL,
                    "Q^TAQ[({},{})] = {}, H = {}",
                    i,
                    j,
                    qtaq[(i, j)],
                    h[(i, j)]
                );
            }
        }

        // Q orthogonal
        let qtq = &q.transpose() * q;
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (qtq[(i, j)] - expected).abs() < TOL,
                    "QtQ[({},{})] = {}",
                    i,
                    j,
                    qtq[(i, j)]
                );
            }
        }
    }

    #[test]
    fn hessenberg_3x3() {
        let orig = Matrix::from_rows(3, 3, &[4.0_f64, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0]);
        let (h, q) = reduce(&orig);
        check(&orig, &h, &q);
    }

    #[test]
    fn hessenberg_4x4() {
        let orig = Matrix::from_rows(
            4,
            4,
            &[
                1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0,
                15.0, 16.0,
            ],
        );
        let (h, q) = reduce(&orig);
        check(&orig, &h, &q);
    }

    #[test]
    fn already_hessenberg() {
        let orig = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0]);
        let (h, q) = reduce(&orig);
        check(&orig, &h, &q);
    }

    #[test]
    fn complex_hermitian_transform() {
        use num_complex::Complex;
        type C = Complex<f64>;
        let c = |re, im| C::new(re, im);

        let orig = Matrix::from_rows(
            3,
            3,
            &[
                c(1.0, 0.0),
                c(2.0, 1.0),
                c(0.0, -1.0),
                c(1.0, -2.0),
                c(3.0, 0.0),
                c(1.0, 1.0),
                c(0.5, 0.5),
                c(-1.0, 0.0),
                c(2.0, 2.0),
            ],
        );
        let mut h = orig.clone();
        let mut tau = vec![C::new(0.0, 0.0); 1];
        hessenberg_in_place(&mut h, &mut tau);
        let q = accumulate_q(&h, &tau);
        clear_reflectors(&mut h);

        // Q^H A Q = H and Q^H Q = I
        let qhaq = &(&q.adjoint() * &orig) * &q;
        let qhq = &q.adjoint() * &q;
        for i in 0..3 {
            for j in 0..3 {
                assert!((qhaq[(i, j)] - h[(i, j)]).norm() < TOL, "QHAQ[({},{})]", i, j);
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((qhq[(i, j)] - c(expected, 0.0)).norm() < TOL, "QHQ[({},{})]", i, j);
            }
        }
        assert!(h[(2, 0)].norm() < TOL, "not Hessenberg");
    }
}

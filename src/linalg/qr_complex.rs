use alloc::vec::Vec;
use core::cmp::min;

use num_complex::Complex;
use num_traits::Zero;

use crate::linalg::rotation::{apply_left, apply_right, zeroing};
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

/// Single-shift implicit QR iteration on a complex upper Hessenberg
/// matrix, in place.
///
/// Drives `h` to upper triangular form; every rotation applied to `h`
/// is mirrored onto `z` when present, so `Z H Z^H` is invariant.
/// Returns the eigenvalues (the final diagonal).
///
/// `maxinner` bounds the sweeps spent on a single trailing eigenvalue,
/// `maxiter` the total sweep count.
///
/// Deflation and exceptional-shift events are logged at trace level;
/// `debug` promotes them to debug level.
pub(crate) fn single_shift_qr<R: FloatScalar, M: MatrixMut<Complex<R>>>(
    h: &mut M,
    mut z: Option<&mut M>,
    maxiter: usize,
    maxinner: usize,
    debug: bool,
) -> Result<Vec<Complex<R>>, LinalgError> {
    let n = h.nrows();
    let eps = R::epsilon();
    let half = R::one() / (R::one() + R::one());
    let dat = (R::one() + R::one() + R::one()) / (R::one() + R::one() + R::one() + R::one());
    let n_r = R::from(n).unwrap_or_else(R::max_value);
    let smlnum = R::min_positive_value() * (n_r / eps);
    let event_level = if debug {
        log::Level::Debug
    } else {
        log::Level::Trace
    };

    let mut ihi = n;
    let mut total = 0usize;

    // Window [ilo, ihi): trailing eigenvalues converge one at a time
    // and ihi walks toward zero.
    while ihi > 0 {
        let mut ilo = 0usize;
        let mut deflated = false;

        for its in 1..=maxinner {
            total += 1;
            if total > maxiter {
                return Err(LinalgError::IterationLimit);
            }

            // Deflation scan from the bottom of the window.
            for m in (ilo..ihi - 1).rev() {
                if h.get(m + 1, m).norm1() <= smlnum {
                    ilo = m + 1;
                    break;
                }

                let mut tst = h.get(m, m).norm1() + h.get(m + 1, m + 1).norm1();
                if tst == R::zero() {
                    if m >= 1 {
                        tst = tst + h.get(m, m - 1).re.abs();
                    }
                    if m + 2 < n {
                        tst = tst + h.get(m + 2, m + 1).re.abs();
                    }
                }

                if h.get(m + 1, m).re.abs() <= eps * tst {
                    // Refined deflation test of Ahues & Tisseur: compare
                    // |H[m+1,m]|·|H[m,m+1]| against the local diagonal
                    // scale, with ratios ordered to avoid overflow.
                    let sub = h.get(m + 1, m).norm1();
                    let sup = h.get(m, m + 1).norm1();
                    let ab = sub.max(sup);
                    let ba = sub.min(sup);
                    let dd = h.get(m + 1, m + 1).norm1();
                    let df = (*h.get(m, m) - *h.get(m + 1, m + 1)).norm1();
                    let aa = dd.max(df);
                    let bb = dd.min(df);
                    let s = aa + ab;
                    if ba * (ab / s) <= smlnum.max(eps * (bb * (aa / s))) {
                        ilo = m + 1;
                        break;
                    }
                }
            }

            if ilo > 0 {
                *h.get_mut(ilo, ilo - 1) = Complex::zero();
            }

            // Window shrunk to one element: an eigenvalue has converged.
            if ilo >= ihi - 1 {
                log::log!(
                    event_level,
                    "eigenvalue {} converged after {} sweeps",
                    ihi - 1,
                    its - 1
                );
                ihi -= 1;
                deflated = true;
                break;
            }

            // Shift selection.
            let t = if its % 30 == 10 {
                // exceptional shift from the top of the window
                log::log!(event_level, "exceptional shift at sweep {}", its);
                *h.get(ilo, ilo)
                    + Complex::new(dat * h.get(ilo + 1, ilo).re.abs(), R::zero())
            } else if its % 30 == 20 {
                // exceptional shift from the bottom
                log::log!(event_level, "exceptional shift at sweep {}", its);
                *h.get(ihi - 1, ihi - 1)
                    + Complex::new(dat * h.get(ihi - 1, ihi - 2).re.abs(), R::zero())
            } else {
                // Wilkinson: the root of the trailing 2x2 characteristic
                // polynomial nearer to H[ihi-1, ihi-1], branch chosen to
                // avoid cancellation.
                let mut t = *h.get(ihi - 1, ihi - 1);
                let u = h.get(ihi - 2, ihi - 1).sqrt() * h.get(ihi - 1, ihi - 2).sqrt();
                if u != Complex::zero() {
                    let x = (*h.get(ihi - 2, ihi - 2) - t) * Complex::new(half, R::zero());
                    let mut y = (x * x + u * u).sqrt();
                    if x.re * y.re + x.im * y.im < R::zero() {
                        y = -y;
                    }
                    t = t - u * (u / (x + y));
                }
                t
            };

            // Look for a row below the top of the window where the
            // implicit shift can start without significant fill.
            let mut mstart = ilo;
            for m in (ilo + 1..ihi - 1).rev() {
                let mut h11s = *h.get(m, m) - t;
                let h21 = h.get(m + 1, m).modulus();
                let s = h11s.norm1() + h21;
                h11s = h11s / Complex::new(s, R::zero());
                let h21s = h21 / s;
                let tst = h11s.norm1() * (h.get(m, m).norm1() + h.get(m + 1, m + 1).norm1());
                if h.get(m, m - 1).re.abs() * h21s <= eps * tst {
                    mstart = m;
                    break;
                }
            }

            // Bulge creation and chase.
            for i in mstart..ihi - 1 {
                let rot = if i == mstart {
                    let (rot, _) = zeroing(*h.get(i, i) - t, *h.get(i + 1, i));
                    if i > ilo {
                        // the fill this rotation would spill into column
                        // i-1 is negligible by the start-row test; only
                        // the surviving cosine factor is kept
                        let scaled = *h.get(i, i - 1) * Complex::new(rot.c, R::zero());
                        *h.get_mut(i, i - 1) = scaled;
                    }
                    rot
                } else {
                    let (rot, r) = zeroing(*h.get(i, i - 1), *h.get(i + 1, i - 1));
                    *h.get_mut(i, i - 1) = r;
                    *h.get_mut(i + 1, i - 1) = Complex::zero();
                    rot
                };

                apply_left(&rot, h, i, i + 1, i..n);
                apply_right(&rot, h, i, i + 1, 0..min(i + 3, ihi));
                if let Some(zm) = z.as_deref_mut() {
                    let zn = zm.nrows();
                    apply_right(&rot, zm, i, i + 1, 0..zn);
                }
            }
        }

        if !deflated {
            return Err(LinalgError::IterationLimit);
        }
    }

    // The subdiagonal is now negligible; T is the upper triangle.
    for j in 0..n {
        for i in (j + 1)..n {
            *h.get_mut(i, j) = Complex::zero();
        }
    }

    Ok((0..n).map(|i| *h.get(i, i)).collect())
}

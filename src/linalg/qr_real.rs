use alloc::vec::Vec;
use core::cmp::min;

use num_complex::Complex;

use crate::linalg::rotation::{apply_left, apply_right, zeroing};
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Shift strategy for the real QR driver.
///
/// `Francis` (the default) runs implicit double shifts taken from the
/// trailing 2x2 block, with a Wilkinson-like exceptional single shift
/// every tenth iteration to break symmetry-induced stalls. `Rayleigh`
/// always shifts by the trailing diagonal entry; it converges fast on
/// matrices with well-separated real spectra but cannot resolve
/// complex pairs as quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftMethod {
    #[default]
    Francis,
    Rayleigh,
}

impl ShiftMethod {
    /// Parse an externally supplied policy name.
    pub fn from_name(name: &str) -> Result<Self, LinalgError> {
        match name {
            "francis" | "Francis" => Ok(ShiftMethod::Francis),
            "rayleigh" | "Rayleigh" => Ok(ShiftMethod::Rayleigh),
            _ => Err(LinalgError::InvalidOption),
        }
    }
}

/// Implicit QR iteration on a real upper Hessenberg matrix, in place.
///
/// Drives `h` to real Schur (quasi-upper-triangular) form: 1x1 diagonal
/// blocks carry real eigenvalues, 2x2 blocks complex-conjugate pairs.
/// Rotations are mirrored onto `z` when present.
///
/// Deflation and exceptional-shift events are logged at trace level;
/// `debug` promotes them to debug level.
pub(crate) fn francis_qr<T: FloatScalar, M: MatrixMut<T>>(
    h: &mut M,
    mut z: Option<&mut M>,
    tol: T,
    shift: ShiftMethod,
    maxiter: usize,
    debug: bool,
) -> Result<(), LinalgError> {
    let n = h.nrows();
    let eps = T::epsilon();
    let half = T::one() / (T::one() + T::one());
    let four = T::one() + T::one() + T::one() + T::one();
    let event_level = if debug {
        log::Level::Debug
    } else {
        log::Level::Trace
    };

    let mut ihi = n;
    let mut iter = 0usize;

    while ihi > 2 {
        iter += 1;
        if iter > maxiter {
            return Err(LinalgError::IterationLimit);
        }

        // Deflation scan: find the last negligible subdiagonal entry.
        // The second branch accepts a boundary one row higher, which
        // lets a trailing 2x2 block converge as a unit.
        let mut ilo = 0usize;
        for m in (0..ihi - 1).rev() {
            if h.get(m + 1, m).abs() < tol * (h.get(m, m).abs() + h.get(m + 1, m + 1).abs()) {
                *h.get_mut(m + 1, m) = T::zero();
                ilo = m + 1;
                break;
            }
            if m >= 1
                && h.get(m, m - 1).abs() < tol * (h.get(m - 1, m - 1).abs() + h.get(m, m).abs())
            {
                *h.get_mut(m, m - 1) = T::zero();
                ilo = m;
                break;
            }
        }

        if ilo >= ihi - 1 {
            log::log!(event_level, "1x1 block deflated at {}", ihi - 1);
            ihi -= 1;
            continue;
        }
        if ilo + 2 == ihi {
            // 2x2 block stays in place; its eigenvalues are extracted
            // by the synthesis pass.
            log::log!(event_level, "2x2 block deflated at {}", ihi - 2);
            ihi -= 2;
            continue;
        }

        // Trace and determinant of the trailing 2x2 parameterize the
        // implicit shifts.
        let hmm = *h.get(ihi - 1, ihi - 1);
        let hm1m1 = *h.get(ihi - 2, ihi - 2);
        let mut tr = hmm + hm1m1;
        let det = hmm * hm1m1 - *h.get(ihi - 1, ihi - 2) * *h.get(ihi - 2, ihi - 1);
        if tr == T::zero() {
            tr = eps;
        }

        match shift {
            ShiftMethod::Rayleigh => single_shift(h, z.as_deref_mut(), hmm, ilo, ihi),
            ShiftMethod::Francis => {
                if iter % 10 == 0 {
                    // Exceptional single shift: the real Wilkinson root
                    // when the trailing pair is real, else half the trace.
                    let disc = tr * tr - four * det;
                    let mut sigma = if disc > T::zero() {
                        let sq = disc.sqrt();
                        let r1 = (tr + sq) * half;
                        let r2 = (tr - sq) * half;
                        if (r1 - hmm).abs() <= (r2 - hmm).abs() {
                            r1
                        } else {
                            r2
                        }
                    } else {
                        tr * half
                    };
                    // A degenerate trailing block (permutation cycles)
                    // yields a near-zero root that cannot break the
                    // stall; shift off the subdiagonal magnitude then,
                    // as the complex driver does.
                    let dat = (T::one() + T::one() + T::one()) / four;
                    let s = h.get(ihi - 1, ihi - 2).abs() + h.get(ihi - 2, ihi - 3).abs();
                    if sigma.abs() <= eps * s {
                        sigma = hmm + dat * s;
                    }
                    log::log!(event_level, "exceptional shift at iteration {}", iter);
                    single_shift(h, z.as_deref_mut(), sigma, ilo, ihi);
                } else {
                    double_shift(h, z.as_deref_mut(), tr, det, ilo, ihi);
                }
            }
        }
    }

    Ok(())
}

/// One single-shift bulge chase over the window `[ilo, ihi)`.
fn single_shift<T: FloatScalar, M: MatrixMut<T>>(
    h: &mut M,
    mut z: Option<&mut M>,
    sigma: T,
    ilo: usize,
    ihi: usize,
) {
    let n = h.nrows();

    for i in ilo..ihi - 1 {
        let rot = if i == ilo {
            let (rot, _) = zeroing(*h.get(i, i) - sigma, *h.get(i + 1, i));
            rot
        } else {
            // annihilate the bulge entry carried below the subdiagonal
            let (rot, r) = zeroing(*h.get(i, i - 1), *h.get(i + 1, i - 1));
            *h.get_mut(i, i - 1) = r;
            *h.get_mut(i + 1, i - 1) = T::zero();
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

/// One Francis double-shift bulge chase over the window `[ilo, ihi)`.
///
/// The shift pair enters only through the trace `tr` and determinant
/// `det` of the trailing 2x2 block, so the whole sweep stays in real
/// arithmetic even for complex-conjugate shifts.
fn double_shift<T: FloatScalar, M: MatrixMut<T>>(
    h: &mut M,
    mut z: Option<&mut M>,
    tr: T,
    det: T,
    ilo: usize,
    ihi: usize,
) {
    let n = h.nrows();

    // First column of (H - s1 I)(H - s2 I), three nonzero entries.
    let h00 = *h.get(ilo, ilo);
    let h10 = *h.get(ilo + 1, ilo);
    let h01 = *h.get(ilo, ilo + 1);
    let h11 = *h.get(ilo + 1, ilo + 1);
    let v0 = h00 * h00 + h01 * h10 - tr * h00 + det;
    let v1 = h10 * (h00 + h11 - tr);
    let v2 = h10 * *h.get(ilo + 2, ilo + 1);

    // Two rotations map (v0, v1, v2) onto e1, creating a three-row
    // bulge at the top of the window.
    let (g1, v1r) = zeroing(v1, v2);
    let (g2, _) = zeroing(v0, v1r);

    apply_left(&g1, h, ilo + 1, ilo + 2, ilo..n);
    apply_left(&g2, h, ilo, ilo + 1, ilo..n);
    apply_right(&g1, h, ilo + 1, ilo + 2, 0..min(ilo + 4, ihi));
    apply_right(&g2, h, ilo, ilo + 1, 0..min(ilo + 4, ihi));
    if let Some(zm) = z.as_deref_mut() {
        let zn = zm.nrows();
        apply_right(&g1, zm, ilo + 1, ilo + 2, 0..zn);
        apply_right(&g2, zm, ilo, ilo + 1, 0..zn);
    }

    // Chase: per column, annihilate the two bulge entries below the
    // subdiagonal against the pivot row i+1.
    for i in ilo..ihi - 2 {
        let (r1, r) = zeroing(*h.get(i + 1, i), *h.get(i + 2, i));
        *h.get_mut(i + 1, i) = r;
        *h.get_mut(i + 2, i) = T::zero();
        apply_left(&r1, h, i + 1, i + 2, i + 1..n);
        apply_right(&r1, h, i + 1, i + 2, 0..min(i + 4, ihi));
        if let Some(zm) = z.as_deref_mut() {
            let zn = zm.nrows();
            apply_right(&r1, zm, i + 1, i + 2, 0..zn);
        }

        if i + 3 < ihi {
            let (r2, r) = zeroing(*h.get(i + 1, i), *h.get(i + 3, i));
            *h.get_mut(i + 1, i) = r;
            *h.get_mut(i + 3, i) = T::zero();
            apply_left(&r2, h, i + 1, i + 3, i + 1..n);
            apply_right(&r2, h, i + 1, i + 3, 0..min(i + 5, ihi));
            if let Some(zm) = z.as_deref_mut() {
                let zn = zm.nrows();
                apply_right(&r2, zm, i + 1, i + 3, 0..zn);
            }
        }
    }
}

/// Extract the (complex) eigenvalues from a real quasi-triangular
/// matrix.
///
/// A 1x1 diagonal block contributes one real eigenvalue; a 2x2 block
/// with half-trace x and determinant d contributes `x ± sqrt(x^2 - d)`,
/// complex when `x^2 < d`.
pub(crate) fn quasi_triangular_eigenvalues<T: FloatScalar>(
    h: &impl MatrixRef<T>,
) -> Vec<Complex<T>> {
    let n = h.nrows();
    let eps = T::epsilon();
    let half = T::one() / (T::one() + T::one());
    let mut w = Vec::with_capacity(n);

    let mut i = 0;
    while i < n {
        let coupled = i + 1 < n
            && h.get(i + 1, i).abs() >= eps * (h.get(i, i).abs() + h.get(i + 1, i + 1).abs());
        if coupled {
            let a = *h.get(i, i);
            let b = *h.get(i, i + 1);
            let c = *h.get(i + 1, i);
            let d = *h.get(i + 1, i + 1);

            let x = (a + d) * half;
            let dd = a * d - b * c;
            let disc = x * x - dd;

            if disc >= T::zero() {
                let sq = disc.sqrt();
                w.push(Complex::new(x + sq, T::zero()));
                w.push(Complex::new(x - sq, T::zero()));
            } else {
                let sq = (T::zero() - disc).sqrt();
                w.push(Complex::new(x, sq));
                w.push(Complex::new(x, T::zero() - sq));
            }
            i += 2;
        } else {
            w.push(Complex::new(*h.get(i, i), T::zero()));
            i += 1;
        }
    }

    w
}

use num_traits::{Float, One, Zero};

use crate::traits::{FloatScalar, LinalgScalar, MatrixMut};

/// Magnitude band the input is scaled into before iterating:
/// `[sqrt(safe_min)/eps, eps/sqrt(safe_min)]`.
///
/// Returns `(small, big)`.
pub(crate) fn scaling_band<R: FloatScalar>() -> (R, R) {
    let small = R::lsafe_min().lsqrt() / R::lepsilon();
    (small, R::one() / small)
}

/// Multiply every entry of `m` by `cto/cfrom` without ever forming an
/// over- or underflowing intermediate factor.
///
/// The factor is applied in steps clamped to the representable range,
/// the way LAPACK's `lascl` does. `cfrom` must be nonzero.
pub(crate) fn rescale<T: LinalgScalar>(m: &mut impl MatrixMut<T>, cfrom: T::Real, cto: T::Real) {
    debug_assert!(cfrom != <T::Real as Zero>::zero());

    let smlnum = T::lsafe_min();
    let bignum = <T::Real as One>::one() / smlnum;

    let mut cfromc = cfrom;
    let mut ctoc = cto;

    loop {
        let cfrom1 = cfromc * smlnum;
        let (mul, done) = if cfrom1 == cfromc {
            // cfromc is an exact infinity or zero-like value; the
            // quotient is well defined without stepping
            (ctoc / cfromc, true)
        } else {
            let cto1 = ctoc / bignum;
            if cto1 == ctoc {
                (ctoc / cfromc, true)
            } else if cfrom1.abs() > ctoc.abs() && ctoc != <T::Real as Zero>::zero() {
                cfromc = cfrom1;
                (smlnum, false)
            } else if cto1.abs() > cfromc.abs() {
                ctoc = cto1;
                (bignum, false)
            } else {
                (ctoc / cfromc, true)
            }
        };

        let f = T::from_real(mul);
        let (nr, nc) = (m.nrows(), m.ncols());
        for j in 0..nc {
            for i in 0..nr {
                *m.get_mut(i, j) = *m.get(i, j) * f;
            }
        }

        if done {
            break;
        }
    }
}

/// Scale a slice by `cto/cfrom` with the same stepping as [`rescale`].
pub(crate) fn rescale_slice<T: LinalgScalar>(v: &mut [T], cfrom: T::Real, cto: T::Real) {
    debug_assert!(cfrom != <T::Real as Zero>::zero());

    let smlnum = T::lsafe_min();
    let bignum = <T::Real as One>::one() / smlnum;

    let mut cfromc = cfrom;
    let mut ctoc = cto;

    loop {
        let cfrom1 = cfromc * smlnum;
        let (mul, done) = if cfrom1 == cfromc {
            (ctoc / cfromc, true)
        } else {
            let cto1 = ctoc / bignum;
            if cto1 == ctoc {
                (ctoc / cfromc, true)
            } else if cfrom1.abs() > ctoc.abs() && ctoc != <T::Real as Zero>::zero() {
                cfromc = cfrom1;
                (smlnum, false)
            } else if cto1.abs() > cfromc.abs() {
                ctoc = cto1;
                (bignum, false)
            } else {
                (ctoc / cfromc, true)
            }
        };

        let f = T::from_real(mul);
        for x in v.iter_mut() {
            *x = *x * f;
        }

        if done {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;

    #[test]
    fn plain_ratio() {
        let mut m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        rescale(&mut m, 2.0, 6.0);
        assert_eq!(m[(0, 0)], 3.0);
        assert_eq!(m[(1, 1)], 12.0);
    }

    #[test]
    fn round_trip() {
        let mut m = Matrix::from_rows(2, 2, &[1.5_f64, -2.0, 0.25, 8.0]);
        let orig = m.clone();
        rescale(&mut m, 3.0, 7.0);
        rescale(&mut m, 7.0, 3.0);
        for i in 0..2 {
            for j in 0..2 {
                assert!((m[(i, j)] - orig[(i, j)]).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn extreme_ratio_no_overflow() {
        // cto/cfrom overflows f64 if formed directly; stepping must not
        let mut m = Matrix::from_rows(1, 1, &[1e-200_f64]);
        rescale(&mut m, 1e-250, 1e100);
        let expected = 1e150;
        assert!((m[(0, 0)] / expected - 1.0).abs() < 1e-10);
    }

    #[test]
    fn band_is_sane() {
        let (small, big) = scaling_band::<f64>();
        assert!(small > 0.0 && small < 1.0);
        assert!(big > 1.0 && big.is_finite());
        assert!((small * big - 1.0).abs() < 1e-12);
    }

    #[test]
    fn slice_variant() {
        let mut v = [2.0_f64, -4.0];
        rescale_slice(&mut v, 2.0, 1.0);
        assert_eq!(v, [1.0, -2.0]);
    }
}

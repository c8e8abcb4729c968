use core::ops::Range;

use num_traits::{Float, One, Zero};

use crate::traits::{LinalgScalar, MatrixMut};

/// Plane rotation eliminating one entry of a two-vector.
///
/// Represents the 2x2 unitary `[[c, s], [-conj(s), c]]` with `c` real
/// and `c^2 + |s|^2 = 1`. Built by [`zeroing`]; applied to matrix
/// slices by [`apply_left`] / [`apply_right`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rotation<T: LinalgScalar> {
    pub c: T::Real,
    pub s: T,
}

/// Construct the rotation that maps `(f, g)` to `(r, 0)`, returning it
/// together with `r`.
///
/// The modulus computations are scaled by the larger of the two inputs,
/// so the construction neither overflows nor underflows for any
/// representable `f`, `g`.
pub(crate) fn zeroing<T: LinalgScalar>(f: T, g: T) -> (Rotation<T>, T) {
    if g == T::zero() {
        return (
            Rotation {
                c: <T::Real as One>::one(),
                s: T::zero(),
            },
            f,
        );
    }
    if f == T::zero() {
        let a = g.modulus();
        return (
            Rotation {
                c: <T::Real as Zero>::zero(),
                s: g.conj() / T::from_real(a),
            },
            T::from_real(a),
        );
    }

    let f1 = f.modulus();
    let g1 = g.modulus();
    let one = <T::Real as One>::one();
    let d = if f1 >= g1 {
        let t = g1 / f1;
        f1 * (one + t * t).sqrt()
    } else {
        let t = f1 / g1;
        g1 * (one + t * t).sqrt()
    };

    let fs = f / T::from_real(f1);
    (
        Rotation {
            c: f1 / d,
            s: fs * g.conj() / T::from_real(d),
        },
        fs * T::from_real(d),
    )
}

/// Apply `G` from the left to rows `(row1, row2)` of `m`, over the
/// given column range. Only the two rows are touched.
pub(crate) fn apply_left<T: LinalgScalar>(
    g: &Rotation<T>,
    m: &mut impl MatrixMut<T>,
    row1: usize,
    row2: usize,
    cols: Range<usize>,
) {
    let c = T::from_real(g.c);
    for j in cols {
        let a = *m.get(row1, j);
        let b = *m.get(row2, j);
        *m.get_mut(row1, j) = c * a + g.s * b;
        *m.get_mut(row2, j) = c * b - g.s.conj() * a;
    }
}

/// Apply `G^H` from the right to columns `(col1, col2)` of `m`, over
/// the given row range. Only the two columns are touched.
pub(crate) fn apply_right<T: LinalgScalar>(
    g: &Rotation<T>,
    m: &mut impl MatrixMut<T>,
    col1: usize,
    col2: usize,
    rows: Range<usize>,
) {
    let c = T::from_real(g.c);
    for i in rows {
        let a = *m.get(i, col1);
        let b = *m.get(i, col2);
        *m.get_mut(i, col1) = c * a + g.s.conj() * b;
        *m.get_mut(i, col2) = c * b - g.s * a;
    }
}

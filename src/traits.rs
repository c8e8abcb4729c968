use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, complex floats, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point matrix elements.
///
/// Required by operations that need `sqrt`, `abs`, comparisons, etc.
/// A real float is its own underlying real field, so the
/// [`LinalgScalar`] capability set is part of the bound.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Field capability set for the decomposition kernels: real floats and
/// complex numbers over them.
///
/// All algorithms are written against this trait so that one body of
/// code serves `f32`, `f64`, `Complex<f32>`, and `Complex<f64>`. The
/// `l`-prefixed items avoid clashing with the inherent `Float` methods
/// of the real types.
pub trait LinalgScalar: Scalar {
    /// The underlying real field (`Self` for real scalars).
    type Real: FloatScalar;

    /// Complex conjugate (identity for real scalars).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Imaginary part (zero for real scalars).
    fn im(self) -> Self::Real;

    /// Modulus `|z|` (absolute value for real scalars).
    fn modulus(self) -> Self::Real;

    /// Cheap magnitude `|Re z| + |Im z|`, equal to `|z|` for reals.
    ///
    /// The deflation and perturbation tests all use this norm: it has
    /// none of the overflow hazards of `modulus` and agrees with it to
    /// within a factor of √2.
    fn norm1(self) -> Self::Real;

    /// Embed a real value into the field.
    fn from_real(r: Self::Real) -> Self;

    /// Square root, extended to the complex plane for complex scalars.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real field.
    fn lepsilon() -> Self::Real;

    /// Smallest positive normalized value of the underlying real field.
    fn lsafe_min() -> Self::Real;
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline]
                fn conj(self) -> Self {
                    self
                }

                #[inline]
                fn re(self) -> Self::Real {
                    self
                }

                #[inline]
                fn im(self) -> Self::Real {
                    0.0
                }

                #[inline]
                fn modulus(self) -> Self::Real {
                    self.abs()
                }

                #[inline]
                fn norm1(self) -> Self::Real {
                    self.abs()
                }

                #[inline]
                fn from_real(r: Self::Real) -> Self {
                    r
                }

                #[inline]
                fn lsqrt(self) -> Self {
                    self.sqrt()
                }

                #[inline]
                fn lepsilon() -> Self::Real {
                    <$t>::EPSILON
                }

                #[inline]
                fn lsafe_min() -> Self::Real {
                    <$t>::MIN_POSITIVE
                }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

impl<R: FloatScalar> LinalgScalar for Complex<R> {
    type Real = R;

    #[inline]
    fn conj(self) -> Self {
        Complex::new(self.re, R::zero() - self.im)
    }

    #[inline]
    fn re(self) -> Self::Real {
        self.re
    }

    #[inline]
    fn im(self) -> Self::Real {
        self.im
    }

    #[inline]
    fn modulus(self) -> Self::Real {
        self.norm()
    }

    #[inline]
    fn norm1(self) -> Self::Real {
        self.re.abs() + self.im.abs()
    }

    #[inline]
    fn from_real(r: Self::Real) -> Self {
        Complex::new(r, R::zero())
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> Self::Real {
        R::epsilon()
    }

    #[inline]
    fn lsafe_min() -> Self::Real {
        R::min_positive_value()
    }
}

/// Read-only access to a matrix-like type.
///
/// Algorithms take `&impl MatrixRef<T>` so they stay decoupled from the
/// concrete container.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Contiguous slice of column `col` starting at `row_start`.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (Hessenberg reduction, QR sweeps) to work
/// generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Contiguous mutable slice of column `col` starting at `row_start`.
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}

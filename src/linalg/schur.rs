use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;

use crate::linalg::hessenberg::{accumulate_q, clear_reflectors, hessenberg_in_place};
use crate::linalg::qr_complex::single_shift_qr;
use crate::linalg::qr_real::{francis_qr, quasi_triangular_eigenvalues};
use crate::linalg::scale::{rescale, rescale_slice, scaling_band};
use crate::linalg::LinalgError;
use crate::traits::LinalgScalar;
use crate::Matrix;

pub use crate::linalg::qr_real::ShiftMethod;

/// Options for [`schur`] and [`eigvals`].
///
/// `Default` gives the standard configuration: Schur vectors computed,
/// input magnitudes banded, Francis double shifts on the real path,
/// iteration caps of `100 n` total and `30 n` per eigenvalue.
#[derive(Debug, Clone)]
pub struct SchurOptions<R> {
    /// Accumulate the unitary factor Z (default `true`). Without it
    /// only the triangular factor and the eigenvalues are produced.
    pub want_z: bool,
    /// Rescale the input into a safe magnitude band first
    /// (default `true`).
    pub scale: bool,
    /// Total QR sweep cap. Defaults to `100 n`.
    pub maxiter: Option<usize>,
    /// Per-eigenvalue sweep cap, complex path only. Defaults to `30 n`.
    pub maxinner: Option<usize>,
    /// Relative deflation tolerance, real path only. Defaults to
    /// machine epsilon.
    pub tol: Option<R>,
    /// Shift policy, real path only.
    pub shift_method: ShiftMethod,
    /// Promote the iteration events — deflations, exceptional shifts,
    /// per-call progress — from trace to debug level (default `false`).
    pub debug: bool,
}

impl<R> Default for SchurOptions<R> {
    fn default() -> Self {
        Self {
            want_z: true,
            scale: true,
            maxiter: None,
            maxinner: None,
            tol: None,
            shift_method: ShiftMethod::Francis,
            debug: false,
        }
    }
}

/// Scalar types the Schur engine accepts.
///
/// Selects the QR variant by scalar kind: real scalars get the Francis
/// double-shift driver and a quasi-triangular factor, complex scalars
/// the single-shift driver and a fully triangular factor. One
/// orchestrator serves both through this seam.
pub trait SchurScalar: LinalgScalar {
    /// Run the QR iteration on an upper Hessenberg matrix in place,
    /// mirroring rotations onto `z`, and return the eigenvalues.
    fn qr_iterate(
        h: &mut Matrix<Self>,
        z: Option<&mut Matrix<Self>>,
        opts: &SchurOptions<Self::Real>,
    ) -> Result<Vec<Complex<Self::Real>>, LinalgError>;
}

macro_rules! impl_schur_scalar_real {
    ($($t:ty),*) => {
        $(
            impl SchurScalar for $t {
                fn qr_iterate(
                    h: &mut Matrix<Self>,
                    z: Option<&mut Matrix<Self>>,
                    opts: &SchurOptions<$t>,
                ) -> Result<Vec<Complex<$t>>, LinalgError> {
                    let n = h.nrows();
                    let tol = opts.tol.unwrap_or(<$t>::EPSILON);
                    let maxiter = opts.maxiter.unwrap_or(100 * n.max(1));
                    francis_qr(h, z, tol, opts.shift_method, maxiter, opts.debug)?;
                    Ok(quasi_triangular_eigenvalues(h))
                }
            }
        )*
    };
}

impl_schur_scalar_real!(f32, f64);

macro_rules! impl_schur_scalar_complex {
    ($($r:ty),*) => {
        $(
            impl SchurScalar for Complex<$r> {
                fn qr_iterate(
                    h: &mut Matrix<Self>,
                    z: Option<&mut Matrix<Self>>,
                    opts: &SchurOptions<$r>,
                ) -> Result<Vec<Complex<$r>>, LinalgError> {
                    let n = h.nrows();
                    let maxiter = opts.maxiter.unwrap_or(100 * n.max(1));
                    let maxinner = opts.maxinner.unwrap_or(30 * n.max(1));
                    single_shift_qr(h, z, maxiter, maxinner, opts.debug)
                }
            }
        )*
    };
}

impl_schur_scalar_complex!(f32, f64);

/// Schur decomposition `A = Z T Z^H`.
///
/// T is upper triangular for complex scalars and quasi-upper-triangular
/// (isolated 2x2 diagonal blocks for conjugate pairs) for real scalars.
/// The columns of Z are the Schur vectors; they span nested invariant
/// subspaces of A.
#[derive(Debug, Clone)]
pub struct Schur<T: SchurScalar> {
    t: Matrix<T>,
    z: Option<Matrix<T>>,
    w: Vec<Complex<T::Real>>,
}

impl<T: SchurScalar> Schur<T> {
    /// The (quasi-)triangular factor T.
    #[inline]
    pub fn schur_form(&self) -> &Matrix<T> {
        &self.t
    }

    /// The unitary factor Z, if it was requested.
    #[inline]
    pub fn schur_vectors(&self) -> Option<&Matrix<T>> {
        self.z.as_ref()
    }

    /// The eigenvalues, in Schur-form order.
    #[inline]
    pub fn eigenvalues(&self) -> &[Complex<T::Real>] {
        &self.w
    }

    /// Consume the decomposition, yielding `(T, Z, w)`.
    pub fn into_parts(self) -> (Matrix<T>, Option<Matrix<T>>, Vec<Complex<T::Real>>) {
        (self.t, self.z, self.w)
    }
}

/// Compute the Schur decomposition of a square matrix.
///
/// The pipeline is: optional magnitude banding, Householder reduction
/// to upper Hessenberg form, accumulation of the reflectors into the
/// initial Z (when requested), then the QR iteration for the scalar
/// kind. On success the factors are rescaled back to the input's
/// magnitude.
///
/// # Errors
///
/// [`LinalgError::NotSquare`] if `a` is not square (checked before any
/// work); [`LinalgError::IterationLimit`] if the iteration caps are
/// exhausted, in which case no partial result is surfaced.
///
/// ```
/// use eigenum::{schur, Matrix, SchurOptions};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 4.0, 2.0, 3.0]);
/// let dec = schur(&a, &SchurOptions::default()).unwrap();
/// let w = dec.eigenvalues();
/// // eigenvalues are 5 and -1
/// assert!((w.iter().map(|z| z.re).sum::<f64>() - 4.0).abs() < 1e-12);
/// ```
pub fn schur<T: SchurScalar>(
    a: &Matrix<T>,
    opts: &SchurOptions<T::Real>,
) -> Result<Schur<T>, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::NotSquare);
    }
    let n = a.nrows();
    let mut h = a.clone();

    if n <= 1 {
        let z = if opts.want_z {
            Some(Matrix::eye(n, T::zero()))
        } else {
            None
        };
        let w = (0..n)
            .map(|i| Complex::new(h[(i, i)].re(), h[(i, i)].im()))
            .collect();
        return Ok(Schur { t: h, z, w });
    }

    // Band the input magnitude so the drivers' absolute underflow
    // thresholds stay meaningful.
    let mut scaled = None;
    if opts.scale {
        let anrm = h.max_abs1();
        let (small, big) = scaling_band::<T::Real>();
        if anrm > <T::Real as num_traits::Zero>::zero() && anrm < small {
            rescale(&mut h, anrm, small);
            scaled = Some((anrm, small));
        } else if anrm > big {
            rescale(&mut h, anrm, big);
            scaled = Some((anrm, big));
        }
    }

    let event_level = if opts.debug {
        log::Level::Debug
    } else {
        log::Level::Trace
    };
    log::log!(event_level, "schur: order {}, rescaled: {}", n, scaled.is_some());

    let mut tau = vec![T::zero(); n - 2];
    hessenberg_in_place(&mut h, &mut tau);
    let mut z = if opts.want_z {
        Some(accumulate_q(&h, &tau))
    } else {
        None
    };
    clear_reflectors(&mut h);

    let mut w = T::qr_iterate(&mut h, z.as_mut(), opts)?;

    if let Some((anrm, cscale)) = scaled {
        rescale(&mut h, cscale, anrm);
        rescale_slice(&mut w, cscale, anrm);
    }

    log::log!(event_level, "schur: converged, {} eigenvalues", w.len());

    Ok(Schur { t: h, z, w })
}

/// Eigenvalues of a square matrix, skipping the Schur vectors.
///
/// Equivalent to [`schur`] with `want_z = false`; the rotation mirror
/// work on Z is skipped entirely.
pub fn eigvals<T: SchurScalar>(
    a: &Matrix<T>,
    opts: &SchurOptions<T::Real>,
) -> Result<Vec<Complex<T::Real>>, LinalgError> {
    let mut opts = opts.clone();
    opts.want_z = false;
    Ok(schur(a, &opts)?.w)
}

/// Convenience methods for the decomposition entry points.
impl<T: SchurScalar> Matrix<T> {
    /// Schur decomposition with default options.
    ///
    /// ```
    /// use eigenum::Matrix;
    ///
    /// let a = Matrix::from_rows(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
    /// let dec = a.schur().unwrap();
    /// let t = dec.schur_form();
    /// // the rotation is irreducible over the reals: T keeps the 2x2 block
    /// assert!(t[(1, 0)].abs() > 0.5);
    /// ```
    pub fn schur(&self) -> Result<Schur<T>, LinalgError> {
        schur(self, &SchurOptions::default())
    }

    /// Eigenvalues with default options.
    ///
    /// ```
    /// use eigenum::Matrix;
    ///
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, -1.0, 1.0, 0.0]);
    /// let w = a.eigenvalues().unwrap();
    /// assert!((w[0].re - 1.0).abs() < 1e-10);
    /// assert!((w[1].re - 1.0).abs() < 1e-10);
    /// ```
    pub fn eigenvalues(&self) -> Result<Vec<Complex<T::Real>>, LinalgError> {
        eigvals(self, &SchurOptions::default())
    }
}

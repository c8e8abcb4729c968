mod eigvecs;
pub(crate) mod hessenberg;
pub(crate) mod qr_complex;
pub(crate) mod qr_real;
pub(crate) mod rotation;
pub(crate) mod scale;
mod schur;

pub use eigvecs::eigvecs;
pub use schur::{eigvals, schur, Schur, SchurOptions, SchurScalar, ShiftMethod};

/// Errors from the eigensolver entry points.
///
/// ```
/// use eigenum::{Matrix, SchurOptions};
/// use eigenum::linalg::LinalgError;
///
/// let rect = Matrix::zeros(2, 3, 0.0_f64);
/// let err = eigenum::schur(&rect, &SchurOptions::default()).unwrap_err();
/// assert_eq!(err, LinalgError::NotSquare);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Input matrix is not square.
    NotSquare,
    /// QR iteration exhausted its sweep caps before the active window
    /// closed. The matrix state is undefined on this failure.
    IterationLimit,
    /// An option value was not recognized.
    InvalidOption,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::NotSquare => write!(f, "matrix is not square"),
            LinalgError::IterationLimit => {
                write!(f, "QR iteration did not converge within the iteration limit")
            }
            LinalgError::InvalidOption => write!(f, "unrecognized option value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

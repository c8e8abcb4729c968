//! # eigenum
//!
//! Dense nonsymmetric eigensolver for real and complex matrices,
//! no-std compatible. Computes the Schur decomposition `A = Z T Z^H`
//! (Z unitary, T triangular for complex scalars, quasi-triangular for
//! real scalars), the eigenvalues, and the right eigenvectors.
//!
//! ## Quick start
//!
//! ```
//! use eigenum::{Matrix, SchurOptions};
//!
//! // 90-degree rotation: eigenvalues are the conjugate pair ±i
//! let a = Matrix::from_rows(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
//! let dec = a.schur().unwrap();
//! let w = dec.eigenvalues();
//! assert!(w[0].re.abs() < 1e-12);
//! assert!((w[0].im.abs() - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated [`Matrix<T>`] with runtime dimensions
//!   and column-major `Vec<T>` storage (`col * nrows + row`, matching
//!   LAPACK conventions). `from_rows()` accepts row-major data and
//!   transposes internally. Arithmetic, indexing, norms.
//!
//! - [`linalg`] — The eigensolver: Householder reduction to upper
//!   Hessenberg form, single-shift implicit QR for complex matrices,
//!   Francis double-shift QR (with Rayleigh-quotient alternative) for
//!   real matrices, and back-substitution for right eigenvectors of the
//!   complex triangular factor. Entry points: [`schur`], [`eigvals`],
//!   [`eigvecs`], plus convenience methods on [`Matrix`].
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements
//!   - [`FloatScalar`] — real floats (`f32`, `f64`)
//!   - [`LinalgScalar`] — real floats and complex numbers; the field
//!     capability set the kernels are written against
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access
//!
//! ## Real vs complex input
//!
//! For `Complex<f32>` / `Complex<f64>` input the factor T is upper
//! triangular and the eigenvalues are its diagonal. For `f32` / `f64`
//! input everything stays in real arithmetic: T is quasi-upper
//! triangular with 1x1 blocks for real eigenvalues and 2x2 blocks for
//! complex-conjugate pairs, and the (complex) eigenvalues are
//! synthesized from the diagonal blocks.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm, `std::error::Error` impl |
//! | `libm`  | no       | Pure-Rust software float fallback for no-std targets |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::{eigvals, eigvecs, schur, LinalgError, Schur, SchurOptions, SchurScalar, ShiftMethod};
pub use matrix::Matrix;
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;

use core::ops::{Add, Mul, Neg, Sub};

use crate::traits::Scalar;

use super::Matrix;

fn add_impl<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    assert_eq!(
        (a.nrows, a.ncols),
        (b.nrows, b.ncols),
        "dimension mismatch: {}x{} + {}x{}",
        a.nrows,
        a.ncols,
        b.nrows,
        b.ncols,
    );
    let data = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(&x, &y)| x + y)
        .collect();
    Matrix {
        data,
        nrows: a.nrows,
        ncols: a.ncols,
    }
}

fn sub_impl<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    assert_eq!(
        (a.nrows, a.ncols),
        (b.nrows, b.ncols),
        "dimension mismatch: {}x{} - {}x{}",
        a.nrows,
        a.ncols,
        b.nrows,
        b.ncols,
    );
    let data = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(&x, &y)| x - y)
        .collect();
    Matrix {
        data,
        nrows: a.nrows,
        ncols: a.ncols,
    }
}

fn mul_impl<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    assert_eq!(
        a.ncols, b.nrows,
        "dimension mismatch: {}x{} * {}x{}",
        a.nrows, a.ncols, b.nrows, b.ncols,
    );
    let mut out = Matrix::zeros(a.nrows, b.ncols, T::zero());
    for j in 0..b.ncols {
        for k in 0..a.ncols {
            let bkj = b[(k, j)];
            if bkj == T::zero() {
                continue;
            }
            for i in 0..a.nrows {
                out[(i, j)] = out[(i, j)] + a[(i, k)] * bkj;
            }
        }
    }
    out
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $f:ident) => {
        impl<T: Scalar> $trait for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                $f(&self, &rhs)
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                $f(&self, rhs)
            }
        }

        impl<T: Scalar> $trait<Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                $f(self, &rhs)
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                $f(self, rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_impl);
forward_binop!(Sub, sub, sub_impl);
forward_binop!(Mul, mul, mul_impl);

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        let data = self.data.iter().map(|&x| x * rhs).collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        &self * rhs
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        let data = self.data.iter().map(|&x| -x).collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let b = Matrix::eye(2, 0.0_f64);
        let c = &a + &b;
        assert_eq!(c[(0, 0)], 2.0);
        assert_eq!(c[(1, 0)], 3.0);
        let d = c - b;
        assert_eq!(d, a);
    }

    #[test]
    fn matmul() {
        let a = Matrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = &a * &b;
        assert_eq!(c.nrows(), 2);
        assert_eq!(c.ncols(), 2);
        assert_eq!(c[(0, 0)], 58.0);
        assert_eq!(c[(0, 1)], 64.0);
        assert_eq!(c[(1, 0)], 139.0);
        assert_eq!(c[(1, 1)], 154.0);
    }

    #[test]
    fn scalar_mul() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let b = &a * 2.0;
        assert_eq!(b[(1, 1)], 8.0);
    }
}

use num_traits::Zero;

use crate::traits::LinalgScalar;

use super::Matrix;

impl<T: LinalgScalar> Matrix<T> {
    /// Frobenius norm (square root of the sum of squared moduli).
    ///
    /// ```
    /// use eigenum::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        let mut sum = <T::Real as Zero>::zero();
        for &x in &self.data {
            let m = x.modulus();
            sum = sum + m * m;
        }
        sum.lsqrt()
    }

    /// Infinity norm (maximum row sum of moduli).
    pub fn norm_inf(&self) -> T::Real {
        let mut max = <T::Real as Zero>::zero();
        for i in 0..self.nrows {
            let mut row_sum = <T::Real as Zero>::zero();
            for j in 0..self.ncols {
                row_sum = row_sum + self[(i, j)].modulus();
            }
            if row_sum > max {
                max = row_sum;
            }
        }
        max
    }

    /// Largest entry magnitude in the `|Re| + |Im|` sense.
    ///
    /// This is the magnitude the input-scaling logic bands on.
    pub fn max_abs1(&self) -> T::Real {
        let mut max = <T::Real as Zero>::zero();
        for &x in &self.data {
            let a = x.norm1();
            if a > max {
                max = a;
            }
        }
        max
    }
}

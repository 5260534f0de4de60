use crate::matrix::{Matrix, MatrixError, RowOps};
use crate::vector::Vector;

/// Pivots smaller than this in absolute value are treated as zero, making
/// the system singular for solving purposes.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

impl Matrix {
    /// Solves the linear system `self * x = b` by Gaussian elimination with
    /// partial pivoting, returning the solution as a fresh vector.
    ///
    /// `self` must be square with as many rows as `b` has entries; neither
    /// input is modified, elimination runs on internal copies. At each
    /// column the largest remaining entry in absolute value is chosen as the
    /// pivot, and a pivot below [`PIVOT_TOLERANCE`] fails the solve with
    /// [`MatrixError::Singular`] naming the column.
    ///
    /// ```
    /// use densegauss::{Matrix, Vector};
    ///
    /// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]);
    /// let b = Vector::from_slice(&[5.0, 10.0]);
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 3.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector) -> Result<Vector, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let n = self.rows();
        if b.len() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: (n, 1),
                found: (b.len(), 1),
            });
        }

        let mut a = self.clone();
        let mut rhs = b.clone();
        a.eliminate(&mut rhs)?;

        // back substitution on the triangular system
        let mut x = Vector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += a.entry(i, j) * x.entry(j);
            }
            x.set_entry(i, (rhs.entry(i) - sum) / a.entry(i, i));
        }
        Ok(x)
    }

    /// Forward elimination with partial pivoting, mirroring every row swap
    /// and elimination step onto `companion`.
    ///
    /// On success `self` is upper triangular in the columns back
    /// substitution reads; entries below the diagonal are left as
    /// elimination residue. Aborts with `Singular` as soon as a column has
    /// no pivot above [`PIVOT_TOLERANCE`], leaving both operands partially
    /// reduced.
    fn eliminate(&mut self, companion: &mut impl RowOps) -> Result<(), MatrixError> {
        let n = self.rows();
        for k in 0..n {
            let mut max_val = self.entry(k, k).abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let v = self.entry(i, k).abs();
                if v > max_val {
                    max_val = v;
                    max_row = i;
                }
            }
            if max_val < PIVOT_TOLERANCE {
                return Err(MatrixError::Singular { pivot_col: k });
            }
            if max_row != k {
                self.swap_rows(k, max_row);
                companion.swap_rows(k, max_row);
            }

            let pivot = self.entry(k, k);
            for i in (k + 1)..n {
                let factor = self.entry(i, k) / pivot;
                for j in k..n {
                    let v = self.entry(i, j) - factor * self.entry(k, j);
                    self.set_entry(i, j, v);
                }
                companion.add_scaled_row(k, i, -factor);
            }
        }
        Ok(())
    }
}

use crate::matrix::{Matrix, MatrixError};

/// Hard ceiling on the number of series terms [`Matrix::exp`] will sum
/// before giving up. Any exponential representable in `f64` converges in far
/// fewer terms; the cap exists so that a tolerance the series can never
/// reach (such as `0.0`) fails cleanly instead of looping forever.
pub const MAX_EXP_TERMS: usize = 1000;

impl Matrix {
    /// The matrix exponential `e^self`, computed by summing the Taylor
    /// series `I + M + M^2/2! + M^3/3! + ...` until the next term's
    /// infinity-norm falls below `eps`.
    ///
    /// Each term is the previous one multiplied by `self` and divided by the
    /// next factorial step, so the cost per term is a single matrix product.
    /// The first term whose norm is below `eps` is discarded, not added.
    /// Stopping on the size of one term is a convergence heuristic, not a
    /// rigorous bound on the error of the truncated sum. Fails with
    /// `NotSquare` for rectangular input and with `NoConvergence` when the
    /// series is still above `eps` after [`MAX_EXP_TERMS`] terms.
    ///
    /// ```
    /// use densegauss::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 0.0], [0.0, 0.0]]);
    /// let e = m.exp(1e-13).unwrap();
    /// assert!((e.entry(0, 0) - std::f64::consts::E).abs() < 1e-10);
    /// assert_eq!(e.entry(1, 1), 1.0);
    /// ```
    pub fn exp(&self, eps: f64) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let n = self.rows();
        let mut result = Matrix::identity(n);
        let mut term = self.clone();
        let mut next = Matrix::zeros(n, n);
        let mut k = 1usize;
        while term.norm() >= eps {
            if k > MAX_EXP_TERMS {
                return Err(MatrixError::NoConvergence {
                    terms: MAX_EXP_TERMS,
                });
            }
            result += &term;
            term.mul_into(self, &mut next)?;
            k += 1;
            next /= k as f64;
            std::mem::swap(&mut term, &mut next);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::f64::consts::E;

    #[test]
    fn exp_of_zero_is_identity() {
        let m = Matrix::zeros(4, 4);
        assert_eq!(m.exp(1e-12).unwrap(), Matrix::identity(4));
    }

    #[test]
    fn exp_of_diagonal() {
        let m = Matrix::from_rows(&[
            [1.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, -1.0],
        ]);
        let e = m.exp(1e-13).unwrap();

        assert!((e.entry(0, 0) - E).abs() < 1e-10);
        assert!((e.entry(1, 1) - E * E).abs() < 1e-10);
        assert!((e.entry(2, 2) - 1.0 / E).abs() < 1e-10);
        for i in 0..3 {
            for j in 0..3 {
                if i != j {
                    assert_eq!(e.entry(i, j), 0.0);
                }
            }
        }
    }

    #[test]
    fn exp_of_nilpotent_is_exact() {
        // m * m = 0, so the series terminates after the linear term
        let m = Matrix::from_rows(&[[0.0, 1.0], [0.0, 0.0]]);
        let e = m.exp(1e-12).unwrap();
        assert_eq!(e, Matrix::from_rows(&[[1.0, 1.0], [0.0, 1.0]]));
    }

    #[test]
    fn exp_matches_scalar_exp() {
        let m = Matrix::from_rows(&[[0.5]]);
        let e = m.exp(1e-15).unwrap();
        assert!((e.entry(0, 0) - 0.5f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn exp_of_doubled_argument_is_square() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut a = Matrix::random(&mut rng, 4, 4);
        a *= 0.1;
        let mut doubled = a.clone();
        doubled *= 2.0;

        let ea = a.exp(1e-14).unwrap();
        let e2a = doubled.exp(1e-14).unwrap();
        assert!((&ea * &ea).approx_eq(&e2a, 1e-10));
    }

    #[test]
    fn exp_requires_square() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(
            m.exp(1e-12),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn unreachable_tolerance_reports_no_convergence() {
        // the zero matrix keeps producing terms of norm exactly 0.0, which
        // is never strictly below an eps of 0.0
        let m = Matrix::zeros(2, 2);
        assert_eq!(
            m.exp(0.0),
            Err(MatrixError::NoConvergence {
                terms: MAX_EXP_TERMS,
            })
        );
    }

    #[test]
    fn loose_tolerance_drops_small_terms() {
        // with eps above the matrix norm the series stops at the identity
        let m = Matrix::from_rows(&[[0.5, 0.0], [0.0, 0.5]]);
        assert_eq!(m.exp(10.0).unwrap(), Matrix::identity(2));
    }
}

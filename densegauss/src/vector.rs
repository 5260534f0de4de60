use crate::matrix::{Matrix, MatrixError, RowOps};
use rand::Rng;
use std::{
    fmt,
    ops::{Add, AddAssign, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign},
};

/// A column vector, represented as a single-column [`Matrix`].
///
/// The wrapper guarantees width 1, so anywhere a `Vector` is accepted the
/// column-shape requirement holds by construction. It derefs to nothing;
/// matrix behaviour is exposed through explicit delegation to keep
/// shape-changing operations (like transposition) off the vector API.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector(Matrix);

impl Vector {
    /// A zero-filled vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Vector(Matrix::zeros(len, 1))
    }

    /// A zero-filled vector, reporting allocation failure instead of
    /// aborting the process.
    pub fn try_zeros(len: usize) -> Result<Self, MatrixError> {
        Ok(Vector(Matrix::try_zeros(len, 1)?))
    }

    /// Copies a slice into a fresh vector.
    pub fn from_slice(entries: &[f64]) -> Self {
        Vector(Matrix::from_fn(entries.len(), 1, |i, _| entries[i]))
    }

    /// Builds a vector from a function of the entry index.
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> f64) -> Self {
        Vector(Matrix::from_fn(len, 1, |i, _| f(i)))
    }

    /// A vector with entries drawn uniformly from [-1, 1).
    pub fn random(rng: &mut impl Rng, len: usize) -> Self {
        Vector(Matrix::random(rng, len, 1))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.rows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.rows() == 0
    }

    /// The entry at `i`. Fast path, like [`Matrix::entry`].
    #[inline]
    pub fn entry(&self, i: usize) -> f64 {
        self.0.entry(i, 0)
    }

    /// Sets the entry at `i`. Fast path, like [`Matrix::set_entry`].
    #[inline]
    pub fn set_entry(&mut self, i: usize, value: f64) {
        self.0.set_entry(i, 0, value);
    }

    /// The entry at `i`, or `None` when the index is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i, 0)
    }

    /// The maximum absolute value of any entry, i.e. the matrix
    /// infinity-norm of the column.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.entry(i))
    }

    /// The entries collected into a `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// The dot product with another vector.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different lengths.
    pub fn dot(&self, other: &Vector) -> f64 {
        assert_eq!(self.len(), other.len());
        self.iter().zip(other.iter()).map(|(x, y)| x * y).sum()
    }

    /// Borrows the underlying single-column matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    /// Wraps a matrix the caller has already shaped as a column.
    #[inline]
    pub(crate) fn from_column(m: Matrix) -> Vector {
        debug_assert_eq!(m.cols(), 1);
        Vector(m)
    }

    /// Adds `rhs` elementwise into `self`; `DimensionMismatch` when the
    /// lengths differ.
    pub fn try_add_assign(&mut self, rhs: &Vector) -> Result<(), MatrixError> {
        self.0.try_add_assign(&rhs.0)
    }

    /// Subtracts `rhs` elementwise from `self`; `DimensionMismatch` when the
    /// lengths differ.
    pub fn try_sub_assign(&mut self, rhs: &Vector) -> Result<(), MatrixError> {
        self.0.try_sub_assign(&rhs.0)
    }
}

impl Matrix {
    /// Returns `self * rhs` as a fresh vector, or `DimensionMismatch` when
    /// `self.cols() != rhs.len()`.
    pub fn try_mul_vector(&self, rhs: &Vector) -> Result<Vector, MatrixError> {
        Ok(Vector(self.try_mul(rhs.as_matrix())?))
    }
}

impl RowOps for Vector {
    #[inline]
    fn swap_rows(&mut self, i: usize, j: usize) {
        self.0.swap_rows(i, j);
    }

    #[inline]
    fn scale_row(&mut self, i: usize, factor: f64) {
        self.0.scale_row(i, factor);
    }

    #[inline]
    fn add_scaled_row(&mut self, from: usize, to: usize, factor: f64) {
        self.0.add_scaled_row(from, to, factor);
    }
}

impl From<Vector> for Matrix {
    fn from(v: Vector) -> Matrix {
        v.0
    }
}

/// Only single-column matrices convert; anything wider is a
/// `DimensionMismatch`.
impl TryFrom<Matrix> for Vector {
    type Error = MatrixError;

    fn try_from(m: Matrix) -> Result<Vector, MatrixError> {
        if m.cols() != 1 {
            return Err(MatrixError::DimensionMismatch {
                expected: (m.rows(), 1),
                found: m.shape(),
            });
        }
        Ok(Vector(m))
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[(i, 0)]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[(i, 0)]
    }
}

/// Prints one entry per line, in the same fixed-point format as a
/// single-column [`Matrix`].
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        self.0 += &rhs.0;
    }
}

impl SubAssign<&Vector> for Vector {
    fn sub_assign(&mut self, rhs: &Vector) {
        self.0 -= &rhs.0;
    }
}

impl MulAssign<f64> for Vector {
    #[inline]
    fn mul_assign(&mut self, factor: f64) {
        self.0 *= factor;
    }
}

/// Same contract as the matrix form: dividing by exactly `0.0` is a no-op.
impl DivAssign<f64> for Vector {
    #[inline]
    fn div_assign(&mut self, divisor: f64) {
        self.0 /= divisor;
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Vector {
        Vector(&self.0 + &rhs.0)
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        Vector(&self.0 - &rhs.0)
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        Vector(self * rhs.as_matrix())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn to_and_from_matrix() {
        let v = Vector::from_slice(&[1.0, -2.0, 3.0]);
        let m: Matrix = v.clone().into();
        assert_eq!(m.shape(), (3, 1));

        let back = Vector::try_from(m).unwrap();
        assert_eq!(back, v);

        assert!(Vector::try_from(Matrix::zeros(3, 2)).is_err());
        assert!(Vector::try_from(Matrix::zeros(0, 1)).is_ok());
    }

    #[test]
    fn indexing() {
        let mut v = Vector::zeros(4);
        v[2] = 5.5;
        v.set_entry(0, -1.0);
        assert_eq!(v[2], 5.5);
        assert_eq!(v.entry(0), -1.0);
        assert_eq!(v.get(3), Some(0.0));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn norm_is_max_abs_entry() {
        let v = Vector::from_slice(&[1.0, -7.0, 3.0]);
        assert_eq!(v.norm(), 7.0);
        assert_eq!(Vector::zeros(0).norm(), 0.0);
    }

    #[test]
    fn mat_vec_mul() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let v = Vector::from_slice(&[10.0, 100.0]);
        let got = &m * &v;
        assert_eq!(got, Vector::from_slice(&[210.0, 430.0, 650.0]));

        let wrong = Vector::zeros(3);
        assert!(m.try_mul_vector(&wrong).is_err());
    }

    #[test]
    fn dot_product() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[4.0, -5.0, 6.0]);
        assert_eq!(a.dot(&b), 12.0);
    }

    #[test]
    #[should_panic]
    fn dot_rejects_length_mismatch() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[10.0, 10.0]);
        a.dot(&b);
    }

    #[test]
    fn row_ops_delegate() {
        let mut v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        v.swap_rows(0, 2);
        v.scale_row(1, 10.0);
        v.add_scaled_row(0, 1, 1.0);
        assert_eq!(v, Vector::from_slice(&[3.0, 23.0, 1.0]));

        // out-of-range indices fall through to the matrix no-op contract
        let before = v.clone();
        v.swap_rows(0, 9);
        assert_eq!(v, before);
    }

    #[test]
    fn arithmetic() {
        let mut rng = SmallRng::seed_from_u64(1);
        let a = Vector::random(&mut rng, 6);
        let b = Vector::random(&mut rng, 6);

        let mut c = a.clone();
        c += &b;
        c -= &b;
        for i in 0..6 {
            assert!((c[i] - a[i]).abs() < 1e-15);
        }

        let diff = &a - &b;
        let sum = &a + &b;
        assert_eq!(diff.len(), 6);
        assert_eq!(sum.len(), 6);

        let mut d = Vector::from_slice(&[2.0, -4.0]);
        d *= 0.5;
        assert_eq!(d, Vector::from_slice(&[1.0, -2.0]));
        d /= 0.0;
        assert_eq!(d, Vector::from_slice(&[1.0, -2.0]));
    }

    #[test]
    fn display_one_entry_per_line() {
        let v = Vector::from_slice(&[2.0, -1.0]);
        assert_eq!(format!("{}", v), "  2.0000 \n -1.0000 \n");
    }
}

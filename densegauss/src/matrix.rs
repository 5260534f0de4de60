use crate::data::{FloatData, FloatSlice};
use rand::Rng;
use std::{
    error, fmt,
    ops::{Add, AddAssign, DivAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign},
};

/// Errors reported by matrix construction and arithmetic.
///
/// Operations detect and report failures locally instead of panicking, so the
/// caller decides how to recover. The panicking operator impls (`+`, `-`, `*`)
/// are sugar over the `try_*` / `*_into` methods and inherit their checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The entry buffer could not be allocated, either because `rows * cols`
    /// overflows `usize` or because the allocator refused the request.
    Allocation { rows: usize, cols: usize },
    /// The shapes of the operands are incompatible for the requested
    /// operation. Holds the shape the operation needed and the one it got.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A square matrix was required (solver, exponential).
    NotSquare { rows: usize, cols: usize },
    /// Elimination found no pivot of usable magnitude in this column; the
    /// system has no unique solution.
    Singular { pivot_col: usize },
    /// Out-of-place scalar division by exactly zero.
    ZeroDivisor,
    /// The exponential series was still above the requested tolerance after
    /// the maximum number of terms.
    NoConvergence { terms: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Allocation { rows, cols } => {
                write!(f, "failed to allocate a {}x{} matrix", rows, cols)
            }
            MatrixError::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            MatrixError::NotSquare { rows, cols } => {
                write!(f, "matrix must be square, got {}x{}", rows, cols)
            }
            MatrixError::Singular { pivot_col } => {
                write!(f, "matrix is singular: no usable pivot in column {}", pivot_col)
            }
            MatrixError::ZeroDivisor => write!(f, "scalar division by zero"),
            MatrixError::NoConvergence { terms } => {
                write!(f, "series did not converge within {} terms", terms)
            }
        }
    }
}

impl error::Error for MatrixError {}

/// A dense matrix of `f64` entries.
///
/// Entries are stored in row-major order in a single contiguous buffer, so
/// element `(i, j)` lives at offset `i * cols + j`. The buffer length always
/// equals `rows * cols`; dimensions are fixed at construction and change only
/// through [`transpose_inplace`](Matrix::transpose_inplace) on a non-square
/// matrix, which swaps them.
///
/// Every matrix exclusively owns its buffer. `Clone` produces an independent
/// copy and `Drop` releases the storage, so there is no explicit free call and
/// no way to release a matrix twice.
///
/// # Examples
///
/// ```
/// use densegauss::Matrix;
///
/// let mut m = Matrix::zeros(2, 3);
/// m[(0, 2)] = 4.5;
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.norm(), 4.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    /// the number of rows in the matrix
    rows: usize,

    /// the number of columns in the matrix
    cols: usize,

    /// a [`FloatData`] containing the entries in row-major order
    data: FloatData,
}

/// Elementary row operations, shared by everything elimination touches.
///
/// The solver threads one implementor alongside the coefficient matrix so that
/// pivot swaps and eliminations are mirrored onto the right-hand side; `()`
/// implements the trait as a no-op for callers with nothing to mirror.
///
/// Row indices out of range make each operation a silent no-op rather than an
/// error; callers that need strictness validate indices themselves.
pub trait RowOps {
    /// Swaps rows `i` and `j` in full.
    fn swap_rows(&mut self, i: usize, j: usize);
    /// Multiplies every entry of row `i` by `factor`.
    fn scale_row(&mut self, i: usize, factor: f64);
    /// Adds `factor` times row `from` into row `to`.
    fn add_scaled_row(&mut self, from: usize, to: usize, factor: f64);
}

impl Matrix {
    /// A zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = rows
            .checked_mul(cols)
            .expect("matrix dimensions overflow usize");
        Matrix {
            rows,
            cols,
            data: FloatData::zeros(len),
        }
    }

    /// A zero-filled `rows x cols` matrix, reporting allocation failure
    /// instead of aborting the process.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(MatrixError::Allocation { rows, cols })?;
        let data =
            FloatData::try_zeros(len).map_err(|_| MatrixError::Allocation { rows, cols })?;
        Ok(Matrix { rows, cols, data })
    }

    /// The `size x size` identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut m = Matrix::zeros(size, size);
        for i in 0..size {
            m.data[i * size + i] = 1.0;
        }
        m
    }

    /// Builds a `rows x cols` matrix from a function of the entry position.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let data = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Matrix { rows, cols, data }
    }

    /// Builds a matrix from row arrays, mostly useful for literals:
    ///
    /// ```
    /// use densegauss::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[2.0, 1.0], [-3.0, -1.0]]);
    /// assert_eq!(m.entry(1, 0), -3.0);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix {
            rows: rows.len(),
            cols: N,
            data,
        }
    }

    /// A `rows x cols` matrix with entries drawn uniformly from [-1, 1).
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: FloatData::random(rng, rows * cols),
        }
    }

    /// A random `size x size` matrix that is guaranteed invertible and well
    /// conditioned, suitable for exercising the solver.
    ///
    /// Off-diagonal entries are drawn from [-1, 1) and the diagonal is
    /// boosted above the maximum possible off-diagonal row sum, making the
    /// matrix strictly diagonally dominant.
    pub fn random_invertible(rng: &mut impl Rng, size: usize) -> Self {
        let mut m = Matrix::random(rng, size, size);
        for i in 0..size {
            m.data[i * size + i] = size as f64 + 1.0 + rng.random::<f64>();
        }
        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The shape as a `(rows, cols)` pair.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns true if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The entry at `(i, j)`.
    ///
    /// This is the fast path: positions are only sanity-checked in debug
    /// builds, and a position whose flat offset lands inside the buffer is
    /// taken at face value. Use [`get`](Matrix::get) for checked access.
    #[inline]
    pub fn entry(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[i * self.cols + j]
    }

    /// Sets the entry at `(i, j)`. The fast-path twin of
    /// [`entry`](Matrix::entry), with the same caveats.
    #[inline]
    pub fn set_entry(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.rows && j < self.cols);
        self.data[i * self.cols + j] = value;
    }

    /// The entry at `(i, j)`, or `None` when the position is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Borrows row `i` as a [`FloatSlice`].
    #[inline]
    pub fn row(&self, i: usize) -> &FloatSlice {
        self.data.slice(i * self.cols, (i + 1) * self.cols)
    }

    /// Mutably borrows row `i` as a [`FloatSlice`].
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut FloatSlice {
        self.data.slice_mut(i * self.cols, (i + 1) * self.cols)
    }

    /// Sets every entry to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Turns the matrix into an identity in place: zero everywhere, 1.0 on
    /// the main diagonal. A non-square matrix gets ones only on the
    /// `min(rows, cols)` positions that exist.
    pub fn set_identity(&mut self) {
        self.set_zero();
        for i in 0..usize::min(self.rows, self.cols) {
            self.data[i * self.cols + i] = 1.0;
        }
    }

    /// Copies the contents of `src` into `self` without reallocating.
    ///
    /// Fails with `DimensionMismatch` when the shapes differ; the receiver is
    /// left untouched in that case.
    pub fn assign_from(&mut self, src: &Matrix) -> Result<(), MatrixError> {
        self.same_shape(src)?;
        self.data.copy_from(&src.data);
        Ok(())
    }

    /// Adds row `from` into row `to`, the `factor = 1.0` case of
    /// [`add_scaled_row`](RowOps::add_scaled_row). Out-of-range indices are a
    /// silent no-op.
    #[inline]
    pub fn add_row(&mut self, from: usize, to: usize) {
        self.add_scaled_row(from, to, 1.0);
    }

    /// Swaps columns `j1` and `j2`. Out-of-range indices are a silent no-op.
    pub fn swap_cols(&mut self, j1: usize, j2: usize) {
        if j1 >= self.cols || j2 >= self.cols {
            return;
        }
        for i in 0..self.rows {
            self.data.swap(i * self.cols + j1, i * self.cols + j2);
        }
    }

    /// The induced infinity-norm: the maximum over all rows of the sum of
    /// absolute values of the row's entries. Zero-dimension matrices have
    /// norm 0.0; the norm is never negative.
    pub fn norm(&self) -> f64 {
        (0..self.rows)
            .map(|i| self.row(i).abs_sum())
            .fold(0.0, f64::max)
    }

    /// Transposes the matrix in place.
    ///
    /// A square matrix is mirrored across the diagonal with no extra buffer.
    /// A non-square matrix needs its entries rearranged, so a fresh buffer is
    /// built first and only then swapped in together with the dimensions;
    /// the matrix is never left partially transposed.
    pub fn transpose_inplace(&mut self) {
        if self.rows == self.cols {
            for i in 0..self.rows {
                for j in (i + 1)..self.cols {
                    self.data.swap(i * self.cols + j, j * self.cols + i);
                }
            }
        } else {
            let mut data = Vec::with_capacity(self.rows * self.cols);
            for j in 0..self.cols {
                for i in 0..self.rows {
                    data.push(self.data[i * self.cols + j]);
                }
            }
            self.data = data.into();
            std::mem::swap(&mut self.rows, &mut self.cols);
        }
    }

    /// Returns a transposed copy of the matrix.
    #[inline]
    pub fn transposed(&self) -> Self {
        Matrix::from_fn(self.cols, self.rows, |i, j| self.entry(j, i))
    }

    /// Adds `rhs` elementwise into `self`.
    ///
    /// Fails with `DimensionMismatch` unless the shapes are exactly equal.
    pub fn try_add_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.same_shape(rhs)?;
        self.data.add(&rhs.data);
        Ok(())
    }

    /// Subtracts `rhs` elementwise from `self`.
    ///
    /// Fails with `DimensionMismatch` unless the shapes are exactly equal.
    pub fn try_sub_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        self.same_shape(rhs)?;
        self.data.sub(&rhs.data);
        Ok(())
    }

    /// Writes `self + rhs` into the pre-allocated `out`.
    ///
    /// Fails with `DimensionMismatch` when the operand shapes differ or when
    /// `out` does not already have the result shape; `out` is never resized.
    pub fn add_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<(), MatrixError> {
        self.same_shape(rhs)?;
        out.expect_shape(self.rows, self.cols)?;
        out.data.copy_from(&self.data);
        out.data.add(&rhs.data);
        Ok(())
    }

    /// Writes `self - rhs` into the pre-allocated `out`. Same shape contract
    /// as [`add_into`](Matrix::add_into).
    pub fn sub_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<(), MatrixError> {
        self.same_shape(rhs)?;
        out.expect_shape(self.rows, self.cols)?;
        out.data.copy_from(&self.data);
        out.data.sub(&rhs.data);
        Ok(())
    }

    /// Writes `self * factor` into the pre-allocated `out`.
    pub fn scaled_into(&self, factor: f64, out: &mut Matrix) -> Result<(), MatrixError> {
        out.expect_shape(self.rows, self.cols)?;
        out.data.copy_from(&self.data);
        out.data.scale(factor);
        Ok(())
    }

    /// Writes `self / divisor` into the pre-allocated `out`.
    ///
    /// Unlike the in-place `/=`, dividing by exactly zero here is an error
    /// (`ZeroDivisor`), not a no-op; `out` is left untouched.
    pub fn div_into(&self, divisor: f64, out: &mut Matrix) -> Result<(), MatrixError> {
        if divisor == 0.0 {
            return Err(MatrixError::ZeroDivisor);
        }
        self.scaled_into(1.0 / divisor, out)
    }

    /// Writes `self * rhs` into the pre-allocated `out`.
    ///
    /// Requires `self.cols == rhs.rows` and `out` of shape
    /// `self.rows x rhs.cols`; fails with `DimensionMismatch` otherwise.
    /// Borrowing rules already forbid `out` from aliasing either operand; to
    /// overwrite an operand with the product, use `*=`.
    pub fn mul_into(&self, rhs: &Matrix, out: &mut Matrix) -> Result<(), MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.cols, rhs.cols),
                found: rhs.shape(),
            });
        }
        out.expect_shape(self.rows, rhs.cols)?;
        out.set_zero();
        for i in 0..self.rows {
            for k in 0..self.cols {
                let coeff = self.entry(i, k);
                out.row_mut(i).add_scaled(coeff, rhs.row(k));
            }
        }
        Ok(())
    }

    /// Returns `self * rhs` as a fresh matrix, or `DimensionMismatch` when
    /// the inner dimensions disagree.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        self.mul_into(rhs, &mut out)?;
        Ok(out)
    }

    /// Replaces `self` with `self * rhs`.
    ///
    /// The product is computed into a temporary and copied back into the
    /// receiver's buffer, so `self` doubling as an operand is safe and its
    /// shape never changes. A non-square `rhs` makes the product a different
    /// shape, which fails with `DimensionMismatch` and leaves `self`
    /// untouched.
    pub fn try_mul_assign(&mut self, rhs: &Matrix) -> Result<(), MatrixError> {
        let out = self.try_mul(rhs)?;
        self.assign_from(&out)
    }

    /// Compares entries for equality within an absolute tolerance. Shapes
    /// must match exactly.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(x, y)| (x - y).abs() <= tol)
    }

    #[inline]
    fn same_shape(&self, other: &Matrix) -> Result<(), MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.shape(),
                found: other.shape(),
            });
        }
        Ok(())
    }

    #[inline]
    fn expect_shape(&self, rows: usize, cols: usize) -> Result<(), MatrixError> {
        if self.shape() != (rows, cols) {
            return Err(MatrixError::DimensionMismatch {
                expected: (rows, cols),
                found: self.shape(),
            });
        }
        Ok(())
    }
}

impl RowOps for Matrix {
    fn swap_rows(&mut self, i: usize, j: usize) {
        if i >= self.rows || j >= self.rows {
            return;
        }
        self.data.swap_range(i * self.cols, j * self.cols, self.cols);
    }

    fn scale_row(&mut self, i: usize, factor: f64) {
        if i >= self.rows {
            return;
        }
        self.data.scale_range(i * self.cols, self.cols, factor);
    }

    fn add_scaled_row(&mut self, from: usize, to: usize, factor: f64) {
        if from >= self.rows || to >= self.rows {
            return;
        }
        self.data
            .add_scaled_range(from * self.cols, to * self.cols, self.cols, factor);
    }
}

impl RowOps for () {
    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}

    #[inline]
    fn scale_row(&mut self, _: usize, _: f64) {}

    #[inline]
    fn add_scaled_row(&mut self, _: usize, _: usize, _: f64) {}
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.data[i * self.cols + j]
    }
}

/// Prints each row as space-separated fixed-point values in 8-character
/// fields with 4 decimal places, one row per line.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, "{:8.4} ", self.entry(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if let Err(e) = self.try_add_assign(rhs) {
            panic!("attempting to add matrices of incompatible dimensions: {}", e);
        }
    }
}

impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &Matrix) {
        if let Err(e) = self.try_sub_assign(rhs) {
            panic!(
                "attempting to subtract matrices of incompatible dimensions: {}",
                e
            );
        }
    }
}

impl MulAssign<f64> for Matrix {
    #[inline]
    fn mul_assign(&mut self, factor: f64) {
        self.data.scale(factor);
    }
}

/// Scalar division, via multiplication by the reciprocal.
///
/// Dividing by exactly `0.0` leaves the matrix unchanged; the out-of-place
/// [`div_into`](Matrix::div_into) reports `ZeroDivisor` instead.
impl DivAssign<f64> for Matrix {
    #[inline]
    fn div_assign(&mut self, divisor: f64) {
        if divisor == 0.0 {
            return;
        }
        self.data.scale(1.0 / divisor);
    }
}

impl MulAssign<&Matrix> for Matrix {
    fn mul_assign(&mut self, rhs: &Matrix) {
        if let Err(e) = self.try_mul_assign(rhs) {
            panic!(
                "attempting to multiply matrices of incompatible dimensions: {}",
                e
            );
        }
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.try_mul(rhs) {
            Ok(out) => out,
            Err(_) => panic!(
                "attempting to multiply matrices of incompatible dimensions: {} != {}",
                self.cols, rhs.rows
            ),
        }
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Self::Output {
        let mut out = self.clone();
        out *= factor;
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn identity() {
        let m = Matrix::identity(20);
        for i in 0..20 {
            for j in 0..20 {
                assert_eq!(m.entry(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn set_identity_non_square() {
        let mut m = Matrix::random(&mut SmallRng::seed_from_u64(1), 3, 5);
        m.set_identity();
        for i in 0..3 {
            for j in 0..5 {
                assert_eq!(m.entry(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn transpose() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = Matrix::random(&mut rng, 10, 4);
        let n = m.transposed();
        assert_eq!(n.shape(), (4, 10));
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m.entry(i, j), n.entry(j, i));
            }
        }
    }

    #[test]
    fn transpose_inplace() {
        let mut rng = SmallRng::seed_from_u64(1);

        // square: no reallocation path
        let m = Matrix::random(&mut rng, 6, 6);
        let mut n = m.clone();
        n.transpose_inplace();
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(m.entry(i, j), n.entry(j, i));
            }
        }
        n.transpose_inplace();
        assert_eq!(m, n);

        // non-square: buffer is rebuilt and dimensions swap
        let m = Matrix::random(&mut rng, 30, 20);
        let mut n = m.clone();
        n.transpose_inplace();
        assert_eq!(n.shape(), (20, 30));
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m.entry(i, j), n.entry(j, i));
            }
        }
        n.transpose_inplace();
        assert_eq!(m, n);
    }

    #[test]
    fn matrix_mult() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m1 = Matrix::random(&mut rng, 8, 10);
        let m2 = Matrix::random(&mut rng, 10, 7);
        let m3 = &m1 * &m2;

        assert_eq!(m3.shape(), (8, 7));
        for i in 0..m3.rows() {
            for j in 0..m3.cols() {
                let mut sum = 0.0;
                for k in 0..m1.cols() {
                    sum += m1.entry(i, k) * m2.entry(k, j);
                }
                assert!((m3.entry(i, j) - sum).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn identity_is_mul_neutral() {
        let mut rng = SmallRng::seed_from_u64(2);
        let m = Matrix::random(&mut rng, 9, 9);
        let id = Matrix::identity(9);
        assert!((&id * &m).approx_eq(&m, 1e-15));
        assert!((&m * &id).approx_eq(&m, 1e-15));
    }

    #[test]
    fn mul_assign_matches_mul_into() {
        let mut rng = SmallRng::seed_from_u64(3);
        let a = Matrix::random(&mut rng, 7, 5);
        let b = Matrix::random(&mut rng, 5, 5);

        let mut out = Matrix::zeros(7, 5);
        a.mul_into(&b, &mut out).unwrap();

        let mut aliased = a.clone();
        aliased *= &b;
        assert_eq!(aliased, out);
    }

    #[test]
    fn mul_assign_rejects_non_square_rhs() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut a = Matrix::random(&mut rng, 2, 3);
        let b = Matrix::random(&mut rng, 3, 5);
        let before = a.clone();
        assert_eq!(
            a.try_mul_assign(&b),
            Err(MatrixError::DimensionMismatch {
                expected: (2, 3),
                found: (2, 5),
            })
        );
        assert_eq!(a, before);
    }

    #[test]
    fn add_commutes_and_associates() {
        let mut rng = SmallRng::seed_from_u64(4);
        let a = Matrix::random(&mut rng, 5, 8);
        let b = Matrix::random(&mut rng, 5, 8);
        let c = Matrix::random(&mut rng, 5, 8);

        assert!((&a + &b).approx_eq(&(&b + &a), 1e-15));
        let left = &(&a + &b) + &c;
        let right = &a + &(&b + &c);
        assert!(left.approx_eq(&right, 1e-12));
    }

    #[test]
    fn add_rejects_shape_mismatch() {
        let mut a = Matrix::zeros(3, 4);
        let b = Matrix::zeros(4, 3);
        assert_eq!(
            a.try_add_assign(&b),
            Err(MatrixError::DimensionMismatch {
                expected: (3, 4),
                found: (4, 3),
            })
        );
    }

    #[test]
    fn out_of_place_checks_out_shape() {
        let a = Matrix::zeros(3, 4);
        let b = Matrix::zeros(3, 4);
        let mut wrong = Matrix::zeros(4, 4);
        assert!(a.add_into(&b, &mut wrong).is_err());
        assert!(a.sub_into(&b, &mut wrong).is_err());
        assert!(a.scaled_into(2.0, &mut wrong).is_err());

        let mut out = Matrix::zeros(3, 4);
        assert!(a.add_into(&b, &mut out).is_ok());
    }

    #[test]
    fn sub_then_add_restores() {
        let mut rng = SmallRng::seed_from_u64(5);
        let a = Matrix::random(&mut rng, 4, 4);
        let b = Matrix::random(&mut rng, 4, 4);
        let mut c = a.clone();
        c -= &b;
        c += &b;
        assert!(c.approx_eq(&a, 1e-15));
    }

    #[test]
    fn scalar_ops() {
        let mut m = Matrix::from_rows(&[[1.0, -2.0], [3.0, 4.0]]);
        m *= 2.0;
        assert_eq!(m, Matrix::from_rows(&[[2.0, -4.0], [6.0, 8.0]]));
        m /= 2.0;
        assert_eq!(m, Matrix::from_rows(&[[1.0, -2.0], [3.0, 4.0]]));
    }

    #[test]
    fn div_assign_by_zero_is_noop() {
        let orig = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let mut m = orig.clone();
        m /= 0.0;
        assert_eq!(m, orig);
    }

    #[test]
    fn div_into_by_zero_is_error() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let mut out = Matrix::zeros(2, 2);
        assert_eq!(m.div_into(0.0, &mut out), Err(MatrixError::ZeroDivisor));
        assert_eq!(out, Matrix::zeros(2, 2));

        assert!(m.div_into(4.0, &mut out).is_ok());
        assert!(out.approx_eq(&Matrix::from_rows(&[[0.25, 0.5], [0.75, 1.0]]), 1e-15));
    }

    #[test]
    fn norm_properties() {
        assert_eq!(Matrix::zeros(4, 4).norm(), 0.0);
        assert_eq!(Matrix::zeros(0, 7).norm(), 0.0);
        assert_eq!(Matrix::zeros(7, 0).norm(), 0.0);

        let m = Matrix::from_rows(&[[1.0, -2.0, 3.0], [4.0, 5.0, -6.0]]);
        assert_eq!(m.norm(), 15.0);

        let mut rng = SmallRng::seed_from_u64(6);
        let r = Matrix::random(&mut rng, 10, 10);
        assert!(r.norm() >= 0.0);
    }

    #[test]
    fn row_ops() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);

        m.swap_rows(0, 2);
        assert_eq!(m, Matrix::from_rows(&[[5.0, 6.0], [3.0, 4.0], [1.0, 2.0]]));

        m.scale_row(1, 2.0);
        assert_eq!(m, Matrix::from_rows(&[[5.0, 6.0], [6.0, 8.0], [1.0, 2.0]]));

        m.add_scaled_row(2, 0, -5.0);
        assert_eq!(m, Matrix::from_rows(&[[0.0, -4.0], [6.0, 8.0], [1.0, 2.0]]));

        m.add_row(2, 1);
        assert_eq!(m, Matrix::from_rows(&[[0.0, -4.0], [7.0, 10.0], [1.0, 2.0]]));

        // adding a row to itself doubles it
        m.add_row(1, 1);
        assert_eq!(m, Matrix::from_rows(&[[0.0, -4.0], [14.0, 20.0], [1.0, 2.0]]));
    }

    #[test]
    fn row_ops_out_of_range_are_noops() {
        let orig = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let mut m = orig.clone();
        m.swap_rows(0, 2);
        m.swap_rows(9, 9);
        m.scale_row(2, 100.0);
        m.add_scaled_row(0, 5, 1.0);
        m.add_scaled_row(5, 0, 1.0);
        m.add_row(3, 3);
        m.swap_cols(0, 2);
        assert_eq!(m, orig);
    }

    #[test]
    fn swap_cols() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        m.swap_cols(0, 2);
        assert_eq!(m, Matrix::from_rows(&[[3.0, 2.0, 1.0], [6.0, 5.0, 4.0]]));
    }

    #[test]
    fn assign_from_checks_shape() {
        let src = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let mut dst = Matrix::zeros(2, 2);
        dst.assign_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut wrong = Matrix::zeros(2, 3);
        assert!(wrong.assign_from(&src).is_err());
        assert_eq!(wrong, Matrix::zeros(2, 3));
    }

    #[test]
    fn checked_access() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(m.get(1, 1), Some(4.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn try_zeros_reports_allocation_failure() {
        assert_eq!(
            Matrix::try_zeros(usize::MAX, usize::MAX),
            Err(MatrixError::Allocation {
                rows: usize::MAX,
                cols: usize::MAX,
            })
        );
        assert!(Matrix::try_zeros(3, 3).is_ok());
    }

    #[test]
    fn display_fixed_point() {
        let m = Matrix::from_rows(&[[1.0, -2.5]]);
        assert_eq!(format!("{}", m), "  1.0000  -2.5000 \n");
    }

    #[test]
    fn random_invertible_is_diagonally_dominant() {
        let mut rng = SmallRng::seed_from_u64(7);
        let m = Matrix::random_invertible(&mut rng, 12);
        for i in 0..12 {
            let off_diag: f64 = (0..12)
                .filter(|&j| j != i)
                .map(|j| m.entry(i, j).abs())
                .sum();
            assert!(m.entry(i, i).abs() > off_diag);
        }
    }
}

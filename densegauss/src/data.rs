use rand::Rng;
use ref_cast::RefCast;
use std::collections::TryReserveError;
use std::fmt;
pub use std::ops::{Deref, DerefMut, Index, IndexMut, Range};

/// An owned, contiguous buffer of `f64` entries.
///
/// `FloatData` is the backing store for [`Matrix`](crate::Matrix). It keeps the
/// allocation concerns (zero-filled construction, fallible reservation) in one
/// place and dereferences to [`FloatSlice`] for everything elementwise.
///
/// # Examples
///
/// ```
/// use densegauss::data::FloatData;
///
/// let mut buf = FloatData::zeros(4);
/// buf[2] = 1.5;
/// assert_eq!(buf.abs_sum(), 1.5);
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct FloatData(Vec<f64>);

/// A borrowed run of `f64` entries, the view type for matrix rows.
///
/// Carries the elementwise kernels (`add`, `sub`, `scale`, `add_scaled`, `dot`,
/// `abs_sum`) that the matrix operations are built from, so the in-place and
/// out-of-place call shapes of each operation share a single loop definition.
#[derive(RefCast, PartialEq, PartialOrd, Debug)]
#[repr(transparent)]
pub struct FloatSlice([f64]);

impl FloatSlice {
    /// Returns a copy of the slice as an owned [`FloatData`].
    #[inline]
    pub fn to_data(&self) -> FloatData {
        self.0.to_vec().into()
    }

    /// Returns an iterator over the entries of the slice.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Returns a mutable iterator over the entries of the slice.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.0.iter_mut()
    }

    /// Sum of absolute values of all entries.
    ///
    /// This is the row kernel of the induced infinity-norm.
    #[inline]
    pub fn abs_sum(&self) -> f64 {
        self.0.iter().map(|x| x.abs()).sum()
    }

    /// Sets every entry to `value`.
    #[inline]
    pub fn fill(&mut self, value: f64) {
        self.0.fill(value);
    }

    /// Copies all entries from `src`.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[inline]
    pub fn copy_from(&mut self, src: &FloatSlice) {
        self.0.copy_from_slice(&src.0);
    }

    /// Adds `rhs` elementwise into `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[inline]
    pub fn add(&mut self, rhs: &FloatSlice) {
        assert_eq!(self.0.len(), rhs.0.len());
        for (x, y) in self.0.iter_mut().zip(rhs.0.iter()) {
            *x += y;
        }
    }

    /// Subtracts `rhs` elementwise from `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[inline]
    pub fn sub(&mut self, rhs: &FloatSlice) {
        assert_eq!(self.0.len(), rhs.0.len());
        for (x, y) in self.0.iter_mut().zip(rhs.0.iter()) {
            *x -= y;
        }
    }

    /// Multiplies every entry by `factor`.
    #[inline]
    pub fn scale(&mut self, factor: f64) {
        for x in self.0.iter_mut() {
            *x *= factor;
        }
    }

    /// Adds `factor * rhs` elementwise into `self`.
    ///
    /// This is the row update of Gaussian elimination and of row-addition.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[inline]
    pub fn add_scaled(&mut self, factor: f64, rhs: &FloatSlice) {
        assert_eq!(self.0.len(), rhs.0.len());
        for (x, y) in self.0.iter_mut().zip(rhs.0.iter()) {
            *x += factor * y;
        }
    }

    /// Dot product of two slices.
    ///
    /// # Panics
    ///
    /// Panics if the two slices have different lengths.
    #[inline]
    pub fn dot(&self, rhs: &FloatSlice) -> f64 {
        assert_eq!(self.0.len(), rhs.0.len());
        self.0
            .iter()
            .zip(rhs.0.iter())
            .map(|(x, y)| x * y)
            .sum()
    }

    /// Adds `factor` times the run starting at `source` into the run starting
    /// at `target`, both of length `len` and within this slice.
    ///
    /// The runs must either coincide exactly (the row-doubling case) or be
    /// disjoint; partial overlap gives unspecified results.
    pub fn add_scaled_range(&mut self, source: usize, target: usize, len: usize, factor: f64) {
        for i in 0..len {
            self.0[target + i] += factor * self.0[source + i];
        }
    }

    /// Multiplies the run of length `len` starting at `target` by `factor`.
    pub fn scale_range(&mut self, target: usize, len: usize, factor: f64) {
        for x in self.0[target..target + len].iter_mut() {
            *x *= factor;
        }
    }

    /// Swaps the entries at positions `source` and `target`.
    #[inline]
    pub fn swap(&mut self, source: usize, target: usize) {
        self.0.swap(source, target);
    }

    /// Swaps the two runs of length `len` starting at `source` and `target`.
    #[inline]
    pub fn swap_range(&mut self, source: usize, target: usize, len: usize) {
        for i in 0..len {
            self.0.swap(source + i, target + i);
        }
    }

    /// Number of entries in the slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the slice has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the entries as a plain `&[f64]`.
    #[inline]
    pub fn as_f64s(&self) -> &[f64] {
        &self.0
    }
}

impl Index<Range<usize>> for FloatSlice {
    type Output = FloatSlice;
    fn index(&self, index: Range<usize>) -> &Self::Output {
        FloatSlice::ref_cast(&self.0[index])
    }
}

impl Index<usize> for FloatSlice {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl IndexMut<usize> for FloatSlice {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.0.index_mut(index)
    }
}

impl IndexMut<Range<usize>> for FloatSlice {
    fn index_mut(&mut self, index: Range<usize>) -> &mut Self::Output {
        FloatSlice::ref_cast_mut(self.0.index_mut(index))
    }
}

impl FloatData {
    /// Borrows the run of entries `from..to` as a [`FloatSlice`].
    #[inline]
    pub fn slice(&self, from: usize, to: usize) -> &FloatSlice {
        FloatSlice::ref_cast(&self.0[from..to])
    }

    /// Mutably borrows the run of entries `from..to` as a [`FloatSlice`].
    #[inline]
    pub fn slice_mut(&mut self, from: usize, to: usize) -> &mut FloatSlice {
        FloatSlice::ref_cast_mut(&mut self.0[from..to])
    }

    /// A buffer of `len` zeros.
    #[inline]
    pub fn zeros(len: usize) -> Self {
        FloatData(vec![0.0; len])
    }

    /// A buffer of `len` zeros, reporting failure instead of aborting when the
    /// allocator cannot satisfy the request.
    ///
    /// This is the allocation boundary of the crate: every fallible factory
    /// routes through here.
    pub fn try_zeros(len: usize) -> Result<Self, TryReserveError> {
        let mut v = Vec::new();
        v.try_reserve_exact(len)?;
        v.resize(len, 0.0);
        Ok(FloatData(v))
    }

    /// A buffer of `len` entries drawn uniformly from [-1, 1).
    #[inline]
    pub fn random(rng: &mut impl Rng, len: usize) -> Self {
        (0..len).map(|_| 2.0 * rng.random::<f64>() - 1.0).collect()
    }
}

impl fmt::Display for FloatData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<f64>> for FloatData {
    fn from(value: Vec<f64>) -> Self {
        FloatData(value)
    }
}

impl From<FloatData> for Vec<f64> {
    fn from(value: FloatData) -> Self {
        value.0
    }
}

impl FromIterator<f64> for FloatData {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Vec::from_iter(iter).into()
    }
}

impl Deref for FloatData {
    type Target = FloatSlice;
    fn deref(&self) -> &Self::Target {
        FloatSlice::ref_cast(&self.0)
    }
}

impl DerefMut for FloatData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        FloatSlice::ref_cast_mut(&mut self.0)
    }
}

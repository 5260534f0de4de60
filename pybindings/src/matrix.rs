use pyo3::exceptions::{PyValueError, PyZeroDivisionError};
use pyo3::{prelude::*, IntoPyObjectExt};

use densegauss::{Matrix, MatrixError, RowOps};
use rand::{rngs::SmallRng, SeedableRng};

use crate::vector::PyVector;

#[pyclass(name = "Matrix")]
#[derive(Clone)]
pub struct PyMatrix {
    pub(crate) inner: Matrix,
}

#[pymethods]
impl PyMatrix {
    /// Creates a new Matrix of the given shape initialized to zero
    #[new]
    pub fn new(rows: usize, cols: usize) -> Self {
        PyMatrix {
            inner: Matrix::zeros(rows, cols),
        }
    }

    /// Gets the entry at position (i, j)
    pub fn entry(&self, i: usize, j: usize) -> PyResult<f64> {
        self.inner
            .get(i, j)
            .ok_or_else(|| PyValueError::new_err("Index out of bounds"))
    }

    /// Sets the entry at position (i, j) to value
    pub fn set_entry(&mut self, i: usize, j: usize, value: f64) -> PyResult<()> {
        if i >= self.inner.rows() || j >= self.inner.cols() {
            return Err(PyValueError::new_err("Index out of bounds"));
        }
        self.inner.set_entry(i, j, value);
        Ok(())
    }

    /// Builds a Matrix from a Python function of the entry position
    #[staticmethod]
    pub fn build(rows: usize, cols: usize, func: PyObject) -> PyResult<Self> {
        Python::with_gil(|py| {
            let matrix = Matrix::from_fn(rows, cols, |i, j| {
                let result = func.call1(py, (i, j));
                match result {
                    Ok(val) => val.extract::<f64>(py).unwrap_or(0.0),
                    Err(_) => 0.0,
                }
            });
            Ok(PyMatrix { inner: matrix })
        })
    }

    /// Creates a new Matrix of the given shape initialized to zero
    #[staticmethod]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        PyMatrix {
            inner: Matrix::zeros(rows, cols),
        }
    }

    /// Creates the identity matrix of the given size
    #[staticmethod]
    pub fn identity(size: usize) -> Self {
        PyMatrix {
            inner: Matrix::identity(size),
        }
    }

    /// Creates a new random Matrix with entries in [-1, 1)
    #[staticmethod]
    #[pyo3(signature = (rows, cols, seed=None))]
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        PyMatrix {
            inner: Matrix::random(&mut rng, rows, cols),
        }
    }

    /// Creates a new random square Matrix that is guaranteed invertible
    #[staticmethod]
    #[pyo3(signature = (size, seed=None))]
    pub fn random_invertible(size: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        PyMatrix {
            inner: Matrix::random_invertible(&mut rng, size),
        }
    }

    /// Parses a Matrix from whitespace-separated entries in row-major order
    #[staticmethod]
    pub fn parse(rows: usize, cols: usize, text: &str) -> PyResult<Self> {
        match Matrix::parse(rows, cols, text) {
            Ok(matrix) => Ok(PyMatrix { inner: matrix }),
            Err(e) => Err(PyValueError::new_err(format!("Cannot parse Matrix: {}", e))),
        }
    }

    /// Returns the number of rows
    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// Returns the number of columns
    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Returns the shape as a (rows, cols) pair
    #[getter]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    /// Returns true if the matrix is square
    pub fn is_square(&self) -> bool {
        self.inner.is_square()
    }

    /// Returns true if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the infinity-norm (maximum absolute row sum)
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    /// Transposes the matrix in place
    pub fn transpose(&mut self) {
        self.inner.transpose_inplace();
    }

    /// Returns a transposed copy of the matrix
    pub fn transposed(&self) -> Self {
        PyMatrix {
            inner: self.inner.transposed(),
        }
    }

    /// Swaps rows i and j
    pub fn swap_rows(&mut self, i: usize, j: usize) -> PyResult<()> {
        if i >= self.inner.rows() || j >= self.inner.rows() {
            return Err(PyValueError::new_err("Row index out of bounds"));
        }
        self.inner.swap_rows(i, j);
        Ok(())
    }

    /// Multiplies every entry of row i by factor
    pub fn scale_row(&mut self, i: usize, factor: f64) -> PyResult<()> {
        if i >= self.inner.rows() {
            return Err(PyValueError::new_err("Row index out of bounds"));
        }
        self.inner.scale_row(i, factor);
        Ok(())
    }

    /// Adds factor times row `from` into row `to`
    pub fn add_scaled_row(&mut self, from: usize, to: usize, factor: f64) -> PyResult<()> {
        if from >= self.inner.rows() || to >= self.inner.rows() {
            return Err(PyValueError::new_err("Row index out of bounds"));
        }
        self.inner.add_scaled_row(from, to, factor);
        Ok(())
    }

    /// Adds row `from` into row `to`
    pub fn add_row(&mut self, from: usize, to: usize) -> PyResult<()> {
        self.add_scaled_row(from, to, 1.0)
    }

    /// Swaps columns j1 and j2
    pub fn swap_cols(&mut self, j1: usize, j2: usize) -> PyResult<()> {
        if j1 >= self.inner.cols() || j2 >= self.inner.cols() {
            return Err(PyValueError::new_err("Column index out of bounds"));
        }
        self.inner.swap_cols(j1, j2);
        Ok(())
    }

    /// Solves the linear system self * x = b for x
    pub fn solve(&self, b: &PyVector) -> PyResult<PyVector> {
        match self.inner.solve(&b.inner) {
            Ok(x) => Ok(PyVector { inner: x }),
            Err(e) => Err(PyValueError::new_err(format!("Cannot solve system: {}", e))),
        }
    }

    /// Returns the matrix exponential, summing the Taylor series until the
    /// next term's norm falls below eps
    #[pyo3(signature = (eps=1e-12))]
    pub fn exp(&self, eps: f64) -> PyResult<Self> {
        match self.inner.exp(eps) {
            Ok(e) => Ok(PyMatrix { inner: e }),
            Err(e) => Err(PyValueError::new_err(format!(
                "Cannot take matrix exponential: {}",
                e
            ))),
        }
    }

    /// Returns a copy of the matrix
    pub fn copy(&self) -> Self {
        PyMatrix {
            inner: self.inner.clone(),
        }
    }

    /// String representation of the matrix
    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    /// Python representation of the matrix
    pub fn __repr__(&self) -> String {
        format!(
            "Matrix(rows={}, cols={})",
            self.inner.rows(),
            self.inner.cols()
        )
    }

    /// Support for indexing with [i, j]
    pub fn __getitem__(&self, key: PyObject) -> PyResult<f64> {
        Python::with_gil(|py| {
            if let Ok((i, j)) = key.extract::<(usize, usize)>(py) {
                self.entry(i, j)
            } else {
                Err(PyValueError::new_err("Invalid index type"))
            }
        })
    }

    /// Support for item assignment with [i, j] = value
    pub fn __setitem__(&mut self, key: PyObject, value: f64) -> PyResult<()> {
        Python::with_gil(|py| {
            if let Ok((i, j)) = key.extract::<(usize, usize)>(py) {
                self.set_entry(i, j, value)
            } else {
                Err(PyValueError::new_err("Invalid index type for assignment"))
            }
        })
    }

    /// Elementwise addition using the + operator
    pub fn __add__(&self, other: &PyMatrix) -> PyResult<Self> {
        let mut result = self.inner.clone();
        result
            .try_add_assign(&other.inner)
            .map_err(to_value_err)?;
        Ok(PyMatrix { inner: result })
    }

    /// In-place elementwise addition using +=
    pub fn __iadd__(&mut self, other: &PyMatrix) -> PyResult<()> {
        self.inner.try_add_assign(&other.inner).map_err(to_value_err)
    }

    /// Elementwise subtraction using the - operator
    pub fn __sub__(&self, other: &PyMatrix) -> PyResult<Self> {
        let mut result = self.inner.clone();
        result
            .try_sub_assign(&other.inner)
            .map_err(to_value_err)?;
        Ok(PyMatrix { inner: result })
    }

    /// In-place elementwise subtraction using -=
    pub fn __isub__(&mut self, other: &PyMatrix) -> PyResult<()> {
        self.inner.try_sub_assign(&other.inner).map_err(to_value_err)
    }

    /// Multiplication using the * operator: by a Matrix, a Vector, or a
    /// scalar
    pub fn __mul__(&self, other: PyObject) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            if let Ok(m) = other.extract::<PyMatrix>(py) {
                let result = self.inner.try_mul(&m.inner).map_err(to_value_err)?;
                PyMatrix { inner: result }.into_py_any(py)
            } else if let Ok(v) = other.extract::<PyVector>(py) {
                let result = self
                    .inner
                    .try_mul_vector(&v.inner)
                    .map_err(to_value_err)?;
                PyVector { inner: result }.into_py_any(py)
            } else if let Ok(factor) = other.extract::<f64>(py) {
                let mut result = self.inner.clone();
                result *= factor;
                PyMatrix { inner: result }.into_py_any(py)
            } else {
                Err(PyValueError::new_err("Invalid operand for multiplication"))
            }
        })
    }

    /// Right-hand scalar multiplication
    pub fn __rmul__(&self, factor: f64) -> Self {
        let mut result = self.inner.clone();
        result *= factor;
        PyMatrix { inner: result }
    }

    /// Scalar division using the / operator
    pub fn __truediv__(&self, divisor: f64) -> PyResult<Self> {
        if divisor == 0.0 {
            return Err(PyZeroDivisionError::new_err("matrix division by zero"));
        }
        let mut result = self.inner.clone();
        result /= divisor;
        Ok(PyMatrix { inner: result })
    }

    /// Matrix equality comparison
    pub fn __eq__(&self, other: &PyMatrix) -> bool {
        self.inner == other.inner
    }

    /// Matrix inequality comparison
    pub fn __ne__(&self, other: &PyMatrix) -> bool {
        !self.__eq__(other)
    }

    /// Convert the matrix to a list of rows, each a list of floats
    pub fn to_list(&self) -> Vec<Vec<f64>> {
        (0..self.inner.rows())
            .map(|i| (0..self.inner.cols()).map(|j| self.inner.entry(i, j)).collect())
            .collect()
    }

    /// Create a matrix from a list of rows, each a list of floats
    #[staticmethod]
    pub fn from_list(data: Vec<Vec<f64>>) -> PyResult<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if data.iter().any(|row| row.len() != cols) {
            return Err(PyValueError::new_err(
                "Rows must all have the same length",
            ));
        }
        Ok(PyMatrix {
            inner: Matrix::from_fn(rows, cols, |i, j| data[i][j]),
        })
    }
}

// Helper implementations

impl From<Matrix> for PyMatrix {
    fn from(inner: Matrix) -> Self {
        PyMatrix { inner }
    }
}

impl From<PyMatrix> for Matrix {
    fn from(py_matrix: PyMatrix) -> Self {
        py_matrix.inner
    }
}

pub(crate) fn to_value_err(e: MatrixError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

use pyo3::exceptions::{PyValueError, PyZeroDivisionError};
use pyo3::prelude::*;

use densegauss::{Matrix, Vector};
use rand::{rngs::SmallRng, SeedableRng};

use crate::matrix::{to_value_err, PyMatrix};

#[pyclass(name = "Vector")]
#[derive(Clone)]
pub struct PyVector {
    pub(crate) inner: Vector,
}

#[pymethods]
impl PyVector {
    /// Creates a new Vector of specified length initialized to zero
    #[new]
    pub fn new(length: usize) -> Self {
        PyVector {
            inner: Vector::zeros(length),
        }
    }

    /// Gets the entry at position i
    pub fn entry(&self, i: usize) -> PyResult<f64> {
        self.inner
            .get(i)
            .ok_or_else(|| PyValueError::new_err("Index out of bounds"))
    }

    /// Sets the entry at position i to value
    pub fn set_entry(&mut self, i: usize, value: f64) -> PyResult<()> {
        if i >= self.inner.len() {
            return Err(PyValueError::new_err("Index out of bounds"));
        }
        self.inner.set_entry(i, value);
        Ok(())
    }

    /// Builds a Vector from a Python function of the entry index
    #[staticmethod]
    pub fn build(length: usize, func: PyObject) -> PyResult<Self> {
        Python::with_gil(|py| {
            let vector = Vector::from_fn(length, |i| {
                let result = func.call1(py, (i,));
                match result {
                    Ok(val) => val.extract::<f64>(py).unwrap_or(0.0),
                    Err(_) => 0.0,
                }
            });
            Ok(PyVector { inner: vector })
        })
    }

    /// Creates a new Vector of specified length initialized to zero
    #[staticmethod]
    pub fn zeros(length: usize) -> Self {
        PyVector {
            inner: Vector::zeros(length),
        }
    }

    /// Creates a new random Vector with entries in [-1, 1)
    #[staticmethod]
    #[pyo3(signature = (length, seed=None))]
    pub fn random(length: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        PyVector {
            inner: Vector::random(&mut rng, length),
        }
    }

    /// Returns the length of the vector
    #[getter]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the vector has length 0
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the maximum absolute value of any entry
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    /// Returns the dot product with another vector
    pub fn dot(&self, other: &PyVector) -> PyResult<f64> {
        if self.inner.len() != other.inner.len() {
            return Err(PyValueError::new_err(
                "Vectors must have the same length for dot product",
            ));
        }
        Ok(self.inner.dot(&other.inner))
    }

    /// Returns a copy of the vector
    pub fn copy(&self) -> Self {
        PyVector {
            inner: self.inner.clone(),
        }
    }

    /// String representation of the vector
    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    /// Python representation of the vector
    pub fn __repr__(&self) -> String {
        format!("Vector(length={})", self.inner.len())
    }

    /// Support for indexing with [i]
    pub fn __getitem__(&self, key: PyObject) -> PyResult<f64> {
        Python::with_gil(|py| {
            if let Ok(i) = key.extract::<usize>(py) {
                self.entry(i)
            } else {
                Err(PyValueError::new_err("Invalid index type"))
            }
        })
    }

    /// Support for item assignment with [i] = value
    pub fn __setitem__(&mut self, key: PyObject, value: f64) -> PyResult<()> {
        Python::with_gil(|py| {
            if let Ok(i) = key.extract::<usize>(py) {
                self.set_entry(i, value)
            } else {
                Err(PyValueError::new_err("Invalid index type for assignment"))
            }
        })
    }

    /// Elementwise addition using the + operator
    pub fn __add__(&self, other: &PyVector) -> PyResult<Self> {
        let mut result = self.inner.clone();
        result
            .try_add_assign(&other.inner)
            .map_err(to_value_err)?;
        Ok(PyVector { inner: result })
    }

    /// In-place elementwise addition using +=
    pub fn __iadd__(&mut self, other: &PyVector) -> PyResult<()> {
        self.inner.try_add_assign(&other.inner).map_err(to_value_err)
    }

    /// Elementwise subtraction using the - operator
    pub fn __sub__(&self, other: &PyVector) -> PyResult<Self> {
        let mut result = self.inner.clone();
        result
            .try_sub_assign(&other.inner)
            .map_err(to_value_err)?;
        Ok(PyVector { inner: result })
    }

    /// In-place elementwise subtraction using -=
    pub fn __isub__(&mut self, other: &PyVector) -> PyResult<()> {
        self.inner.try_sub_assign(&other.inner).map_err(to_value_err)
    }

    /// Scalar multiplication using the * operator
    pub fn __mul__(&self, factor: f64) -> Self {
        let mut result = self.inner.clone();
        result *= factor;
        PyVector { inner: result }
    }

    /// Right-hand scalar multiplication
    pub fn __rmul__(&self, factor: f64) -> Self {
        self.__mul__(factor)
    }

    /// Scalar division using the / operator
    pub fn __truediv__(&self, divisor: f64) -> PyResult<Self> {
        if divisor == 0.0 {
            return Err(PyZeroDivisionError::new_err("vector division by zero"));
        }
        let mut result = self.inner.clone();
        result /= divisor;
        Ok(PyVector { inner: result })
    }

    /// Vector equality comparison
    pub fn __eq__(&self, other: &PyVector) -> bool {
        self.inner == other.inner
    }

    /// Vector inequality comparison
    pub fn __ne__(&self, other: &PyVector) -> bool {
        !self.__eq__(other)
    }

    /// Returns the length of the vector (for len() function)
    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Convert vector to a list of floats
    pub fn to_list(&self) -> Vec<f64> {
        self.inner.to_vec()
    }

    /// Create vector from a list of floats
    #[staticmethod]
    pub fn from_list(data: Vec<f64>) -> Self {
        PyVector {
            inner: Vector::from_slice(&data),
        }
    }

    /// Convert to a single-column Matrix
    pub fn to_matrix(&self) -> PyMatrix {
        PyMatrix::from(Matrix::from(self.inner.clone()))
    }

    /// Create Vector from a single-column Matrix
    #[staticmethod]
    pub fn from_matrix(matrix: &PyMatrix) -> PyResult<Self> {
        match Vector::try_from(matrix.inner.clone()) {
            Ok(vector) => Ok(PyVector { inner: vector }),
            Err(e) => Err(PyValueError::new_err(format!(
                "Cannot convert Matrix to Vector: {}",
                e
            ))),
        }
    }
}

// Helper implementations

impl From<Vector> for PyVector {
    fn from(inner: Vector) -> Self {
        PyVector { inner }
    }
}

impl From<PyVector> for Vector {
    fn from(py_vector: PyVector) -> Self {
        py_vector.inner
    }
}

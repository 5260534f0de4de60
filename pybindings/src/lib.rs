// pyo3's generated glue for methods returning a `PyResult<T>` trips this
// lint, so it is disabled crate-wide.
#![allow(clippy::useless_conversion)]

pub mod matrix;
pub mod vector;

use crate::matrix::PyMatrix;
use crate::vector::PyVector;
use pyo3::prelude::*;

#[pymodule]
fn densegauss(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMatrix>()?;
    m.add_class::<PyVector>()?;
    Ok(())
}

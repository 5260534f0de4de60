//! `densegauss` is a Rust library for dense linear algebra over `f64`. Some features include:
//! - getting and setting individual matrix entries
//! - elementwise arithmetic, scalar scaling, and matrix multiplication
//! - elementary row operations and the induced infinity-norm
//! - fast in-place and out-of-place matrix transpose
//! - solving square linear systems by Gaussian elimination with partial pivoting
//! - the matrix exponential, computed as a truncated Taylor series
//!
//! The main data structures provided by this crate are:
//! - [`FloatData`]: a contiguous buffer of `f64` entries, along with convenience
//!   methods for slicing and elementwise kernels
//! - [`Matrix`]: a two-dimensional row-major matrix based on `FloatData`, which
//!   implements basic linear algebraic operations
//! - [`Vector`]: a single-column [`Matrix`], used for right-hand sides and
//!   solutions of linear systems

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod data;
pub mod expm;
pub mod matrix;
pub mod read;
pub mod solve;
pub mod vector;

pub use data::{FloatData, FloatSlice};
pub use expm::MAX_EXP_TERMS;
pub use matrix::{Matrix, MatrixError, RowOps};
pub use read::ReadMatrixError;
pub use solve::PIVOT_TOLERANCE;
pub use vector::Vector;

use crate::matrix::Matrix;
use crate::vector::Vector;
use std::{error, fmt, io};

/// Errors from reading a matrix out of text.
#[derive(Debug)]
pub enum ReadMatrixError {
    /// The underlying reader failed, or its contents were not UTF-8.
    Io(io::Error),
    /// A whitespace-separated token did not parse as an `f64`. `position`
    /// counts tokens from the start of the input, row-major.
    Malformed { token: String, position: usize },
    /// The input ran out of tokens before the requested shape was filled.
    Truncated { expected: usize, found: usize },
}

impl fmt::Display for ReadMatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadMatrixError::Io(e) => write!(f, "read failed: {}", e),
            ReadMatrixError::Malformed { token, position } => {
                write!(f, "malformed entry at position {}: {:?}", position, token)
            }
            ReadMatrixError::Truncated { expected, found } => {
                write!(
                    f,
                    "input ended early: expected {} entries, found {}",
                    expected, found
                )
            }
        }
    }
}

impl error::Error for ReadMatrixError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ReadMatrixError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadMatrixError {
    fn from(e: io::Error) -> Self {
        ReadMatrixError::Io(e)
    }
}

impl Matrix {
    /// Parses a `rows x cols` matrix from whitespace-separated entries in
    /// row-major order, the inverse of the `Display` format.
    ///
    /// Any token `f64::from_str` accepts is a valid entry, so scientific
    /// notation and signed values work. Tokens beyond the requested shape
    /// are ignored.
    pub fn parse(rows: usize, cols: usize, text: &str) -> Result<Matrix, ReadMatrixError> {
        let mut m = Matrix::zeros(rows, cols);
        let expected = rows * cols;
        let mut found = 0;
        for (position, token) in text.split_whitespace().enumerate() {
            if found == expected {
                break;
            }
            match token.parse::<f64>() {
                Ok(value) => m.set_entry(position / cols, position % cols, value),
                Err(_) => {
                    return Err(ReadMatrixError::Malformed {
                        token: token.to_string(),
                        position,
                    })
                }
            }
            found += 1;
        }
        if found < expected {
            return Err(ReadMatrixError::Truncated { expected, found });
        }
        Ok(m)
    }

    /// Reads a `rows x cols` matrix from a buffered reader.
    ///
    /// The whole stream is consumed before parsing, so this suits files and
    /// piped input rather than interactive prompts.
    pub fn read_from(
        mut reader: impl io::BufRead,
        rows: usize,
        cols: usize,
    ) -> Result<Matrix, ReadMatrixError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Matrix::parse(rows, cols, &text)
    }
}

impl Vector {
    /// Parses a vector of the given length from whitespace-separated
    /// entries.
    pub fn parse(len: usize, text: &str) -> Result<Vector, ReadMatrixError> {
        Ok(Vector::from_column(Matrix::parse(len, 1, text)?))
    }

    /// Reads a vector of the given length from a buffered reader.
    pub fn read_from(mut reader: impl io::BufRead, len: usize) -> Result<Vector, ReadMatrixError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Vector::parse(len, &text)
    }
}

//! Square matrix of pairwise travel distances in kilometres.

use thiserror::Error;

/// Pairwise travel distances in kilometres.
///
/// `get(i, j)` is the distance from the i-th to the j-th coordinate of the
/// sequence the matrix was requested for. The matrix is always square and
/// every entry is finite and non-negative. The diagonal is not assumed to be
/// zero.
///
/// # Examples
/// ```
/// use routewise_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0],
///     vec![5.0, 0.0],
/// ])?;
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.get(0, 1), Some(5.0));
/// assert_eq!(matrix.get(2, 0), None);
/// # Ok::<(), routewise_core::DistanceMatrixError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

/// Errors returned by [`DistanceMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceMatrixError {
    /// A row length differed from the number of rows.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },
    /// An entry was negative, NaN or infinite.
    #[error("distance from {from} to {to} is invalid: {value}")]
    InvalidDistance {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
        /// Rejected value.
        value: f64,
    },
}

impl DistanceMatrix {
    /// Validate and wrap a row-major grid of distances.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceMatrixError::NotSquare`] for ragged input and
    /// [`DistanceMatrixError::InvalidDistance`] for negative or non-finite
    /// entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DistanceMatrixError> {
        let expected = rows.len();
        for (from, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(DistanceMatrixError::NotSquare {
                    row: from,
                    len: row.len(),
                    expected,
                });
            }
            if let Some((to, &value)) = row
                .iter()
                .enumerate()
                .find(|&(_, &value)| !(value.is_finite() && value >= 0.0))
            {
                return Err(DistanceMatrixError::InvalidDistance { from, to, value });
            }
        }
        Ok(Self { rows })
    }

    /// An `size × size` matrix of zeros.
    ///
    /// Used in place of a provider call when only the fixed start and end
    /// are present.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            rows: vec![vec![0.0; size]; size],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance from `from` to `to`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Borrow the underlying rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

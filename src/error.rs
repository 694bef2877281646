use thiserror::Error;

/// Broad classification of [`EdsError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied data or tolerances that violate a precondition.
    InvalidInput,
    /// The data passed validation but the decomposition could not produce a
    /// full-rank, invertible basis.
    Numerical,
}

/// Errors returned while constructing an epsilon-distinguishable set.
#[derive(Debug, Error)]
pub enum EdsError {
    /// Dataset has no rows or no columns.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Tolerance vector does not have one entry per dataset row.
    #[error("tolerance length mismatch: expected {expected}, found {found}")]
    ToleranceLength {
        /// Number of dataset rows.
        expected: usize,
        /// Length of the supplied tolerance vector.
        found: usize,
    },

    /// A tolerance is non-finite or outside the accepted range.
    #[error("invalid tolerance {value} at row {row}")]
    InvalidTolerance {
        /// Row the tolerance belongs to.
        row: usize,
        /// Offending value.
        value: f64,
    },

    /// Dataset contains NaN or infinity.
    #[error("non-finite value at row {row}, column {column}")]
    NonFinite {
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        column: usize,
    },

    /// A column is constant, so it cannot be standardized.
    #[error("column {column} has zero variance")]
    ZeroVariance {
        /// Index of the degenerate column.
        column: usize,
    },

    /// Fewer than `dim` singular values are above the rank threshold.
    #[error("rank deficient data: {rank} of {dim} singular values above {threshold:e}")]
    RankDeficient {
        /// Numerical rank found.
        rank: usize,
        /// Required rank (number of dimensions).
        dim: usize,
        /// Absolute singular value threshold that was applied.
        threshold: f64,
    },

    /// The SVD backend failed or returned unusable output.
    #[error("decomposition failed: {0}")]
    Decomposition(String),
}

impl EdsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdsError::EmptyInput(_)
            | EdsError::ToleranceLength { .. }
            | EdsError::InvalidTolerance { .. }
            | EdsError::NonFinite { .. }
            | EdsError::ZeroVariance { .. } => ErrorKind::InvalidInput,
            EdsError::RankDeficient { .. } | EdsError::Decomposition(_) => ErrorKind::Numerical,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    pub fn is_numerical(&self) -> bool {
        self.kind() == ErrorKind::Numerical
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, EdsError>;

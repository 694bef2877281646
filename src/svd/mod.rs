//! # SVD backends
//!
//! The decorrelation step only needs the singular values and the right singular
//! vectors of the standardized data, so every backend returns [`SvdParts`] and
//! never materializes U.
//!
//! - [`NalgebraSVD`]: pure Rust, always available (default)
//! - `FaerSVD`: faer's dense SVD (feature `faer`)
//! - `LapackSVD`: LAPACK through `nalgebra-lapack` (feature `lapack`)

use ndarray::{Array1, Array2, ArrayView2};

#[cfg(feature = "faer")]
pub mod faer;
#[cfg(feature = "lapack")]
pub mod lapack;
pub mod native;

#[cfg(feature = "faer")]
pub use self::faer::FaerSVD;
#[cfg(feature = "lapack")]
pub use self::lapack::LapackSVD;
pub use self::native::NalgebraSVD;

/// Singular values and right singular vectors (as rows of `vt`) of a matrix.
#[derive(Debug, Clone)]
pub struct SvdParts {
    pub s: Array1<f64>,
    pub vt: Array2<f64>,
}

// Trait for SVD implementations
pub trait SVDImplementation: Send + Sync {
    fn compute(&self, matrix: ArrayView2<f64>) -> anyhow::Result<SvdParts>;
}

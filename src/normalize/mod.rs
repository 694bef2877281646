//! # Standardization
//!
//! Column-wise z-scoring with the sample (n - 1) standard deviation. The same
//! mean and deviation are used for the forward and the inverse map.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;

use crate::error::{EdsError, Result};

/// Per-column mean and sample standard deviation of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    mean: Array1<f64>,
    std_dev: Array1<f64>,
}

impl Standardizer {
    /// Computes column statistics, rejecting constant columns.
    ///
    /// Requires at least two rows; a single row has no sample deviation and is
    /// reported as zero variance in every column.
    pub fn fit(x: ArrayView2<f64>) -> Result<Self> {
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(EdsError::EmptyInput("cannot standardize an empty dataset"));
        }
        if n_samples < 2 {
            return Err(EdsError::ZeroVariance { column: 0 });
        }

        for (column, col) in x.columns().into_iter().enumerate() {
            let first = col[0];
            if col.iter().all(|&v| v == first) {
                return Err(EdsError::ZeroVariance { column });
            }
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or(EdsError::EmptyInput("cannot standardize an empty dataset"))?;
        let std_dev = x.std_axis(Axis(0), 1.0);

        if let Some(column) = std_dev.iter().position(|&s| !s.is_finite() || s <= 0.0) {
            return Err(EdsError::ZeroVariance { column });
        }

        Ok(Standardizer { mean, std_dev })
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn std_dev(&self) -> &Array1<f64> {
        &self.std_dev
    }

    pub fn transform(&self, x: ArrayView2<f64>) -> Array2<f64> {
        let mut out = x.to_owned();
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row -= &self.mean;
                row /= &self.std_dev;
            });
        out
    }

    pub fn inverse_transform(&self, z: ArrayView2<f64>) -> Array2<f64> {
        let mut out = z.to_owned();
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row *= &self.std_dev;
                row += &self.mean;
            });
        out
    }
}

//! # Decorrelation
//!
//! Rotates standardized data onto its principal directions and rescales every
//! component to unit sample variance, so that Euclidean distance in the result
//! treats all directions of the cloud alike.
//!
//! The basis is fixed deterministically: components are ordered by
//! non-increasing singular value and each direction is signed so that its
//! largest-magnitude loading is positive. Directions belonging to repeated
//! singular values are only determined up to a rotation within their subspace;
//! the forward and inverse maps stay consistent with whatever the backend
//! returned, so selections expressed in original coordinates are unaffected.

use log::debug;
use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{EdsError, Result};
use crate::svd::SVDImplementation;

/// Default relative singular-value cut-off, `sqrt(f64::EPSILON)`. Exactly
/// collinear columns leave a singular value at rounding-noise level, several
/// orders of magnitude below this.
pub const DEFAULT_RANK_TOLERANCE: f64 = 1.490_116_119_384_765_6e-8;

/// Orthonormal principal basis together with the scales needed to invert it.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    input_std: Array1<f64>,
    components: Array2<f64>,
    singular_values: Array1<f64>,
    component_std: Array1<f64>,
}

impl Basis {
    /// d×d matrix whose columns are the principal directions.
    pub fn components(&self) -> &Array2<f64> {
        &self.components
    }

    /// Singular values of the scaled input, ordered to match `components`.
    pub fn singular_values(&self) -> &Array1<f64> {
        &self.singular_values
    }

    /// Sample deviation of every input column at fit time.
    pub fn input_std(&self) -> &Array1<f64> {
        &self.input_std
    }

    /// Sample deviation of every principal component before rescaling.
    pub fn component_std(&self) -> &Array1<f64> {
        &self.component_std
    }

    /// Maps standardized rows to unit-variance principal coordinates.
    pub fn transform(&self, z: ArrayView2<f64>) -> Array2<f64> {
        let scaled = &z / &self.input_std;
        let mut projected = scaled.dot(&self.components);
        projected /= &self.component_std;
        projected
    }

    /// Maps principal coordinates back to standardized rows.
    pub fn inverse_transform(&self, y: ArrayView2<f64>) -> Array2<f64> {
        let unscaled = &y * &self.component_std;
        let mut z = unscaled.dot(&self.components.t());
        z *= &self.input_std;
        z
    }
}

pub struct Decorrelator<S: SVDImplementation> {
    svd_implementation: S,
    rank_tolerance: Option<f64>,
}

impl<S: SVDImplementation> Decorrelator<S> {
    pub fn new(svd_implementation: S) -> Self {
        Decorrelator {
            svd_implementation,
            rank_tolerance: None,
        }
    }

    /// Relative cut-off: a singular value `s` counts toward the rank only when
    /// `s > rank_tolerance * s_max`. Defaults to [`DEFAULT_RANK_TOLERANCE`].
    pub fn rank_tolerance(mut self, rank_tolerance: f64) -> Self {
        self.rank_tolerance = Some(rank_tolerance);
        self
    }

    /// Computes the basis of a standardized dataset.
    ///
    /// Fails with [`EdsError::RankDeficient`] unless all `d` singular values
    /// clear the rank threshold; there is no pseudo-inverse fallback. Centered
    /// data has rank at most `n - 1`, so any input with `n <= d` fails.
    pub fn fit(&self, z: ArrayView2<f64>) -> Result<Basis> {
        let (n_samples, n_features) = z.dim();
        if n_samples < 2 || n_features == 0 {
            return Err(EdsError::EmptyInput(
                "decorrelation needs at least two rows and one column",
            ));
        }

        if n_samples <= n_features {
            return Err(EdsError::RankDeficient {
                rank: n_samples - 1,
                dim: n_features,
                threshold: 0.0,
            });
        }

        let input_std = z.std_axis(Axis(0), 1.0);
        if let Some(column) = input_std.iter().position(|&s| !s.is_finite() || s <= 0.0) {
            return Err(EdsError::ZeroVariance { column });
        }
        let scaled = &z / &input_std;

        let parts = self
            .svd_implementation
            .compute(scaled.view())
            .map_err(|e| EdsError::Decomposition(e.to_string()))?;
        if parts.vt.ncols() != n_features || parts.vt.nrows() != parts.s.len() {
            return Err(EdsError::Decomposition(format!(
                "backend returned vt of shape {:?} for {} singular values and {} columns",
                parts.vt.dim(),
                parts.s.len(),
                n_features
            )));
        }
        if parts.s.iter().any(|s| !s.is_finite()) {
            return Err(EdsError::Decomposition(
                "backend returned non-finite singular values".to_string(),
            ));
        }

        let mut order: Vec<usize> = (0..parts.s.len()).collect();
        order.sort_by(|&a, &b| parts.s[b].total_cmp(&parts.s[a]));

        let s_max = order.first().map(|&i| parts.s[i]).unwrap_or(0.0);
        let relative = self.rank_tolerance.unwrap_or(DEFAULT_RANK_TOLERANCE);
        let threshold = relative * s_max;
        let rank = parts.s.iter().filter(|&&s| s > threshold).count();

        debug!(
            "decorrelating {}x{} data: rank {} (threshold {:e})",
            n_samples, n_features, rank, threshold
        );

        if rank < n_features {
            return Err(EdsError::RankDeficient {
                rank,
                dim: n_features,
                threshold,
            });
        }

        let mut components = Array2::<f64>::zeros((n_features, n_features));
        let mut singular_values = Array1::<f64>::zeros(n_features);
        for (j, &src) in order.iter().take(n_features).enumerate() {
            let direction = parts.vt.row(src);
            let pivot = direction
                .iter()
                .copied()
                .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
            let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
            components
                .column_mut(j)
                .assign(&direction.mapv(|v| v * sign));
            singular_values[j] = parts.s[src];
        }

        let projected = scaled.dot(&components);
        let component_std = projected.std_axis(Axis(0), 1.0);
        let usable = component_std
            .iter()
            .filter(|&&s| s.is_finite() && s > 0.0)
            .count();
        if usable < n_features {
            return Err(EdsError::RankDeficient {
                rank: usable,
                dim: n_features,
                threshold,
            });
        }

        Ok(Basis {
            input_std,
            components,
            singular_values,
            component_std,
        })
    }

    pub fn fit_transform(&self, z: ArrayView2<f64>) -> Result<(Basis, Array2<f64>)> {
        let basis = self.fit(z)?;
        let y = basis.transform(z);
        Ok((basis, y))
    }
}

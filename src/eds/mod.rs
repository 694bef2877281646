//! # Epsilon-distinguishable sets
//!
//! Entry point of the crate. [`Eds::construct`] standardizes the dataset,
//! decorrelates it, runs the greedy selector on the squared per-point
//! tolerances and maps the chosen representatives back to the original
//! coordinates.
//!
//! ```ignore
//! let result = EdsBuilder::default().build().construct(data.view(), tolerance.view())?;
//! let (eds, eds_transformed) = result.into_parts();
//! ```

use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::decorrelate::{Basis, Decorrelator};
use crate::error::Result;
use crate::greedy::GreedySelector;
use crate::inverse::InverseTransformer;
use crate::normalize::Standardizer;
use crate::svd::{NalgebraSVD, SVDImplementation};
use crate::utils::{all_rows_identical, check_dataset, check_tolerance};

pub struct EdsBuilder<S: SVDImplementation> {
    svd_implementation: S,
    rank_tolerance: Option<f64>,
    parallel_threshold: Option<usize>,
}

impl<S: SVDImplementation> EdsBuilder<S> {
    pub fn new(svd_implementation: S) -> Self {
        EdsBuilder {
            svd_implementation,
            rank_tolerance: None,
            parallel_threshold: None,
        }
    }

    /// Relative singular-value cut-off for the rank check of the decorrelation.
    pub fn rank_tolerance(mut self, rank_tolerance: f64) -> Self {
        self.rank_tolerance = Some(rank_tolerance);
        self
    }

    /// Working-set size from which distances are computed in parallel.
    pub fn parallel_threshold(mut self, threshold: Option<usize>) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn build(self) -> Eds<S> {
        let mut decorrelator = Decorrelator::new(self.svd_implementation);
        if let Some(rank_tolerance) = self.rank_tolerance {
            decorrelator = decorrelator.rank_tolerance(rank_tolerance);
        }
        Eds {
            decorrelator,
            selector: GreedySelector::new().parallel_threshold(self.parallel_threshold),
        }
    }
}

impl Default for EdsBuilder<NalgebraSVD> {
    fn default() -> Self {
        Self::new(NalgebraSVD::new())
    }
}

pub struct Eds<S: SVDImplementation> {
    decorrelator: Decorrelator<S>,
    selector: GreedySelector,
}

impl<S: SVDImplementation> Eds<S> {
    /// Builds the epsilon-distinguishable set of `data` (one point per row)
    /// for the given per-point tolerances.
    ///
    /// # Errors
    /// - Invalid input: empty data, NaN/infinite values, tolerance length
    ///   mismatch, non-positive or non-finite tolerances, constant columns.
    /// - Numerical: rank-deficient data or a failing SVD backend.
    pub fn construct(
        &self,
        data: ArrayView2<f64>,
        tolerance: ArrayView1<f64>,
    ) -> Result<EdsResult> {
        check_dataset(data)?;
        check_tolerance(tolerance, data.nrows())?;
        let (n_samples, n_features) = data.dim();

        if all_rows_identical(data) {
            warn!(
                "all {} rows are identical, returning a single representative",
                n_samples
            );
            return Ok(EdsResult::coincident(data, tolerance));
        }

        let standardizer = Standardizer::fit(data)?;
        let z = standardizer.transform(data);
        let (basis, y) = self.decorrelator.fit_transform(z.view())?;

        // Squares of tolerances above ~1.34e154 overflow; cap them instead.
        let sq_tol = tolerance.mapv(|t| (t * t).min(f64::MAX));
        let selection = self.selector.select(y.view(), sq_tol.view())?;

        let eds_transformed = y.select(Axis(0), selection.selected());
        let eds = InverseTransformer::new(&standardizer, &basis).transform(eds_transformed.view());
        let selection_radii = selection
            .selected()
            .iter()
            .map(|&i| tolerance[i])
            .collect();

        debug!(
            "reduced {} points in {} dimensions to {} representatives ({:.2}%)",
            n_samples,
            n_features,
            selection.len(),
            selection.len() as f64 / n_samples as f64 * 100.0
        );

        Ok(EdsResult {
            eds,
            eds_transformed,
            selected_indices: selection.selected().to_vec(),
            assignments: selection.assignments().to_vec(),
            selection_radii,
            standardizer: Some(standardizer),
            basis: Some(basis),
        })
    }
}

/// Builds the set with the default configuration and the nalgebra backend.
pub fn construct_eds(data: ArrayView2<f64>, tolerance: ArrayView1<f64>) -> Result<EdsResult> {
    EdsBuilder::default().build().construct(data, tolerance)
}

/// Same tolerance for all `n` points.
pub fn uniform_tolerance(n: usize, epsilon: f64) -> Array1<f64> {
    Array1::from_elem(n, epsilon)
}

/// Representatives in original and decorrelated coordinates plus the
/// bookkeeping of the selection.
#[derive(Debug, Clone)]
pub struct EdsResult {
    eds: Array2<f64>,
    eds_transformed: Array2<f64>,
    selected_indices: Vec<usize>,
    assignments: Vec<usize>,
    selection_radii: Vec<f64>,
    standardizer: Option<Standardizer>,
    basis: Option<Basis>,
}

impl EdsResult {
    /// Every row equal: one representative, the transformed copy sits at the
    /// origin and no transform is fitted.
    fn coincident(data: ArrayView2<f64>, tolerance: ArrayView1<f64>) -> Self {
        let (n_samples, n_features) = data.dim();
        let pick = tolerance
            .iter()
            .enumerate()
            .fold(0, |best, (i, &t)| if t < tolerance[best] { i } else { best });

        EdsResult {
            eds: data.select(Axis(0), &[pick]),
            eds_transformed: Array2::zeros((1, n_features)),
            selected_indices: vec![pick],
            assignments: vec![0; n_samples],
            selection_radii: vec![tolerance[pick]],
            standardizer: None,
            basis: None,
        }
    }

    /// Representatives in original data coordinates (M×d), selection order.
    pub fn eds(&self) -> &Array2<f64> {
        &self.eds
    }

    /// Representatives in the decorrelated, unit-variance space (M×d).
    pub fn eds_transformed(&self) -> &Array2<f64> {
        &self.eds_transformed
    }

    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>) {
        (self.eds, self.eds_transformed)
    }

    /// Input row of every representative.
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected_indices
    }

    /// For every input row, the index (into the EDS) of the representative
    /// that eliminated it.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Tolerance of every representative, which was its elimination radius.
    pub fn selection_radii(&self) -> &[f64] {
        &self.selection_radii
    }

    /// `None` when the coincident shortcut was taken.
    pub fn standardizer(&self) -> Option<&Standardizer> {
        self.standardizer.as_ref()
    }

    /// `None` when the coincident shortcut was taken.
    pub fn basis(&self) -> Option<&Basis> {
        self.basis.as_ref()
    }

    pub fn len(&self) -> usize {
        self.selected_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_indices.is_empty()
    }

    /// One greedy iteration runs per representative.
    pub fn iterations(&self) -> usize {
        self.len()
    }

    pub fn n_input(&self) -> usize {
        self.assignments.len()
    }

    /// Fraction of input points kept, `M / n`.
    pub fn compression_ratio(&self) -> f64 {
        self.len() as f64 / self.n_input() as f64
    }
}

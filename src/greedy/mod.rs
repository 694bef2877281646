//! # Greedy selection
//!
//! Builds the representative set in the decorrelated space. Points are visited
//! in ascending order of squared tolerance; the first surviving point is
//! selected and every surviving point within *its* squared tolerance is
//! eliminated, itself included. Only the selecting point's radius matters, so
//! tight-tolerance points are resolved before a loose neighbour can swallow
//! them.
//!
//! Elimination never reorders survivors, so the ascending order is computed
//! once with a stable sort and the working set is compacted in place on every
//! step. The boundary test is an exact `d2 <= r2` with no epsilon; each
//! distance is accumulated in coordinate order regardless of whether the pass
//! runs on one thread or many, so the outcome does not depend on
//! `parallel_threshold`.

use log::trace;
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::error::{EdsError, Result};
use crate::utils::squared_euclidean;

/// Outcome of a greedy pass over `n` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    selected: Vec<usize>,
    assignments: Vec<usize>,
    radii_sq: Vec<f64>,
}

impl Selection {
    /// Input rows chosen as representatives, in selection order.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// For every input row, the selection step that eliminated it.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Squared elimination radius used at each selection step.
    pub fn radii_sq(&self) -> &[f64] {
        &self.radii_sq
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySelector {
    parallel_threshold: Option<usize>,
}

impl GreedySelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute distances with rayon whenever the working set holds at least
    /// this many points. `None` keeps the pass sequential.
    pub fn parallel_threshold(mut self, threshold: Option<usize>) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Runs the selection loop over `points` (one row per point) with one
    /// squared tolerance per row.
    ///
    /// Squared tolerances must be finite and non-negative. A zero tolerance
    /// selects its point on its own, eliminating only exact duplicates.
    pub fn select(&self, points: ArrayView2<f64>, sq_tol: ArrayView1<f64>) -> Result<Selection> {
        let n = points.nrows();
        if sq_tol.len() != n {
            return Err(EdsError::ToleranceLength {
                expected: n,
                found: sq_tol.len(),
            });
        }
        if let Some(row) = sq_tol.iter().position(|t| !t.is_finite() || *t < 0.0) {
            return Err(EdsError::InvalidTolerance {
                row,
                value: sq_tol[row],
            });
        }

        let mut working: Vec<usize> = (0..n).collect();
        working.sort_by(|&a, &b| sq_tol[a].total_cmp(&sq_tol[b]));

        let mut selected = Vec::new();
        let mut radii_sq = Vec::new();
        let mut assignments = vec![usize::MAX; n];

        while let Some(&p) = working.first() {
            let step = selected.len();
            let r2 = sq_tol[p];
            let center = points.row(p);
            let before = working.len();

            selected.push(p);
            radii_sq.push(r2);

            let parallel = self
                .parallel_threshold
                .is_some_and(|threshold| before >= threshold);
            if parallel {
                let eliminated: Vec<bool> = working
                    .par_iter()
                    .map(|&q| squared_euclidean(center, points.row(q)) <= r2)
                    .collect();
                let mut k = 0;
                working.retain(|&q| {
                    let gone = eliminated[k];
                    k += 1;
                    if gone {
                        assignments[q] = step;
                    }
                    !gone
                });
            } else {
                working.retain(|&q| {
                    let gone = squared_euclidean(center, points.row(q)) <= r2;
                    if gone {
                        assignments[q] = step;
                    }
                    !gone
                });
            }

            trace!(
                "step {}: selected row {} (r2 = {:e}), eliminated {}, {} remaining",
                step,
                p,
                r2,
                before - working.len(),
                working.len()
            );
        }

        debug_assert!(assignments.iter().all(|&a| a < selected.len()));

        Ok(Selection {
            selected,
            assignments,
            radii_sq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_smallest_tolerance_selected_first() {
        let points = array![[0.0, 0.0], [0.5, 0.0], [3.0, 0.0]];
        let sq_tol = array![1.0, 0.01, 1.0];
        let selection = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();

        // Row 1 has the tightest radius and goes first, eliminating only itself.
        assert_eq!(selection.selected(), &[1, 0, 2]);
        assert_eq!(selection.assignments(), &[1, 0, 2]);
        assert_eq!(selection.radii_sq(), &[0.01, 1.0, 1.0]);
    }

    #[test]
    fn test_threshold_is_selecting_points_radius() {
        // Row 0 is selected first; row 1 is within row 0's radius but its own
        // radius is much larger. Only row 0's radius decides.
        let points = array![[0.0], [0.9], [2.5]];
        let sq_tol = array![1.0, 100.0, 100.0];
        let selection = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();
        assert_eq!(selection.selected(), &[0, 2]);
        assert_eq!(selection.assignments(), &[0, 0, 1]);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let points = array![[0.0], [2.0]];
        let sq_tol = array![4.0, 4.0];
        let selection = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_zero_tolerance_selected_individually() {
        let points = array![[0.0, 0.0], [0.0, 0.0], [1e-6, 0.0], [5.0, 5.0]];
        let sq_tol = array![0.0, 10.0, 10.0, 10.0];
        let selection = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();
        // Row 0 only takes its exact duplicate with it.
        assert_eq!(selection.selected()[0], 0);
        assert_eq!(selection.assignments()[1], 0);
        assert_eq!(selection.assignments()[2], 1);
        assert_eq!(selection.selected(), &[0, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let points = array![[0.0], [10.0], [20.0]];
        let sq_tol = array![1.0, 1.0, 1.0];
        let selection = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();
        assert_eq!(selection.selected(), &[0, 1, 2]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 200;
        let points = Array2::from_shape_fn((n, 3), |(i, j)| {
            ((i * 7 + j * 13) % 31) as f64 * 0.1 + (i as f64).sin()
        });
        let sq_tol = Array1::from_shape_fn(n, |i| 0.05 + (i % 5) as f64 * 0.1);

        let sequential = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();
        let parallel = GreedySelector::new()
            .parallel_threshold(Some(1))
            .select(points.view(), sq_tol.view())
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_empty_input() {
        let points = Array2::<f64>::zeros((0, 2));
        let sq_tol = Array1::<f64>::zeros(0);
        let selection = GreedySelector::new()
            .select(points.view(), sq_tol.view())
            .unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_invalid_squared_tolerance() {
        let points = array![[0.0], [1.0]];
        assert!(matches!(
            GreedySelector::new().select(points.view(), array![0.1, -0.1].view()),
            Err(EdsError::InvalidTolerance { row: 1, .. })
        ));
        assert!(matches!(
            GreedySelector::new().select(points.view(), array![0.1].view()),
            Err(EdsError::ToleranceLength { .. })
        ));
        assert!(GreedySelector::new()
            .select(points.view(), array![f64::NAN, 0.1].view())
            .is_err());
    }
}

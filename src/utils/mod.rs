use ndarray::{ArrayView1, ArrayView2};

use crate::error::{EdsError, Result};

#[inline]
pub(crate) fn squared_euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Rejects empty datasets and datasets holding NaN or infinity.
pub(crate) fn check_dataset(data: ArrayView2<f64>) -> Result<()> {
    let (n, d) = data.dim();
    if n == 0 {
        return Err(EdsError::EmptyInput("dataset has no rows"));
    }
    if d == 0 {
        return Err(EdsError::EmptyInput("dataset has no columns"));
    }

    for (row, point) in data.rows().into_iter().enumerate() {
        if let Some(column) = point.iter().position(|v| !v.is_finite()) {
            return Err(EdsError::NonFinite { row, column });
        }
    }
    Ok(())
}

/// Tolerances must be finite and strictly positive, one per row.
pub(crate) fn check_tolerance(tolerance: ArrayView1<f64>, n_rows: usize) -> Result<()> {
    if tolerance.len() != n_rows {
        return Err(EdsError::ToleranceLength {
            expected: n_rows,
            found: tolerance.len(),
        });
    }
    match tolerance.iter().position(|&t| !t.is_finite() || t <= 0.0) {
        Some(row) => Err(EdsError::InvalidTolerance {
            row,
            value: tolerance[row],
        }),
        None => Ok(()),
    }
}

/// True when every row equals the first one exactly.
pub(crate) fn all_rows_identical(data: ArrayView2<f64>) -> bool {
    match data.rows().into_iter().next() {
        Some(first) => data.rows().into_iter().all(|row| row == first),
        None => true,
    }
}

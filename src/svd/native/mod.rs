use anyhow::anyhow;
use ndarray::{Array1, ArrayView2};
use nshare::{IntoNalgebra, IntoNdarray2};

use super::{SVDImplementation, SvdParts};

#[derive(Debug, Clone, Copy)]
pub struct NalgebraSVD {
    eps: f64,
    max_iterations: usize,
}

impl NalgebraSVD {
    pub fn new() -> Self {
        NalgebraSVD {
            eps: f64::EPSILON,
            max_iterations: 0,
        }
    }

    /// Caps the number of implicit QR sweeps; `0` iterates until convergence.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for NalgebraSVD {
    fn default() -> Self {
        Self::new()
    }
}

impl SVDImplementation for NalgebraSVD {
    fn compute(&self, matrix: ArrayView2<f64>) -> anyhow::Result<SvdParts> {
        let m = matrix.as_standard_layout().into_owned().into_nalgebra();

        let svd = nalgebra::linalg::SVD::try_new(m, false, true, self.eps, self.max_iterations)
            .ok_or_else(|| anyhow!("nalgebra SVD did not converge"))?;
        let vt = svd
            .v_t
            .ok_or_else(|| anyhow!("nalgebra SVD returned no right singular vectors"))?;

        Ok(SvdParts {
            s: Array1::from(svd.singular_values.as_slice().to_vec()),
            vt: vt.into_ndarray2().into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    use super::*;

    #[test]
    fn test_simple_svd() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let parts = NalgebraSVD::new().compute(a.view()).unwrap();

        assert_eq!(parts.s.len(), 2);
        assert_eq!(parts.vt.shape(), &[2, 2]);

        let mut s = parts.s.to_vec();
        s.sort_by(|a, b| b.total_cmp(a));
        assert_abs_diff_eq!(s[0], 5.4649857, epsilon = 1e-6);
        assert_abs_diff_eq!(s[1], 0.3659662, epsilon = 1e-6);

        // Rows of vt are orthonormal.
        let gram = parts.vt.dot(&parts.vt.t());
        let eye = Array2::<f64>::eye(2);
        for i in 0..2 {
            for j in 0..2 {
                assert_abs_diff_eq!(gram[[i, j]], eye[[i, j]], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_bounded_iterations() {
        let a = array![[2.0, 0.5], [0.5, 3.0], [1.0, 1.0]];
        let parts = NalgebraSVD::new()
            .max_iterations(500)
            .compute(a.view())
            .unwrap();
        let unbounded = NalgebraSVD::new().compute(a.view()).unwrap();
        let mut s = parts.s.to_vec();
        let mut t = unbounded.s.to_vec();
        s.sort_by(|a, b| b.total_cmp(a));
        t.sort_by(|a, b| b.total_cmp(a));
        for (x, y) in s.iter().zip(t.iter()) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tall_matrix_gives_square_vt() {
        let a = array![[1.0, 0.0, 2.0], [0.0, 1.0, 1.0], [3.0, 1.0, 0.0], [2.0, 2.0, 2.0]];
        let parts = NalgebraSVD::default().compute(a.view()).unwrap();
        assert_eq!(parts.s.len(), 3);
        assert_eq!(parts.vt.shape(), &[3, 3]);
    }
}

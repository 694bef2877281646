use faer_ext::*;
use ndarray::{Array1, ArrayView2};

use super::{SVDImplementation, SvdParts};

#[derive(Debug, Clone, Copy, Default)]
pub struct FaerSVD;

impl SVDImplementation for FaerSVD {
    fn compute(&self, matrix: ArrayView2<f64>) -> anyhow::Result<SvdParts> {
        let faer_mat = matrix.into_faer();
        let svd = faer_mat.thin_svd();
        let s: Array1<f64> = Array1::from_iter(svd.s_diagonal().iter().cloned());
        // faer hands back V, not its transpose.
        let v = svd.v().into_ndarray().to_owned();

        Ok(SvdParts {
            s,
            vt: v.t().to_owned(),
        })
    }
}

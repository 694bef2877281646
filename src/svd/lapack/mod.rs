use anyhow::anyhow;
use ndarray::{s, Array1, ArrayView2};
use nshare::{IntoNalgebra, IntoNdarray2};

use super::{SVDImplementation, SvdParts};

#[derive(Debug, Clone, Copy, Default)]
pub struct LapackSVD;

impl SVDImplementation for LapackSVD {
    fn compute(&self, matrix: ArrayView2<f64>) -> anyhow::Result<SvdParts> {
        let d = matrix.ncols();
        let m = matrix.as_standard_layout().into_owned().into_nalgebra();

        let svd = nalgebra_lapack::SVD::new(m).ok_or_else(|| anyhow!("LAPACK SVD failed"))?;
        let vt = svd.vt.into_ndarray2().into_owned();
        let s = Array1::from(svd.singular_values.as_slice().to_vec());
        let k = s.len().min(d);

        Ok(SvdParts {
            s,
            vt: vt.slice(s![..k, ..]).to_owned(),
        })
    }
}

use ndarray::{Array2, ArrayView2};

use crate::decorrelate::Basis;
use crate::normalize::Standardizer;

/// Maps points from the decorrelated selection space back to original data
/// coordinates by undoing the component scaling, the rotation and the
/// standardization, in that order.
#[derive(Debug, Clone, Copy)]
pub struct InverseTransformer<'a> {
    standardizer: &'a Standardizer,
    basis: &'a Basis,
}

impl<'a> InverseTransformer<'a> {
    pub fn new(standardizer: &'a Standardizer, basis: &'a Basis) -> Self {
        InverseTransformer {
            standardizer,
            basis,
        }
    }

    pub fn transform(&self, y: ArrayView2<f64>) -> Array2<f64> {
        let z = self.basis.inverse_transform(y);
        self.standardizer.inverse_transform(z.view())
    }

    /// Forward map matching [`InverseTransformer::transform`].
    pub fn forward(&self, x: ArrayView2<f64>) -> Array2<f64> {
        let z = self.standardizer.transform(x);
        self.basis.transform(z.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorrelate::Decorrelator;
    use crate::svd::NalgebraSVD;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_round_trip_all_points() {
        let x = array![
            [120.0, 0.003, -4.0],
            [118.5, 0.007, -3.5],
            [131.0, 0.001, -6.0],
            [125.2, 0.004, -2.0],
            [119.9, 0.009, -5.5]
        ];
        let scaler = Standardizer::fit(x.view()).unwrap();
        let z = scaler.transform(x.view());
        let (basis, y) = Decorrelator::new(NalgebraSVD::new())
            .fit_transform(z.view())
            .unwrap();

        let inverse = InverseTransformer::new(&scaler, &basis);
        let back = inverse.transform(y.view());
        for (a, b) in back.iter().zip(x.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-9, epsilon = 1e-12);
        }

        let forward = inverse.forward(x.view());
        for (a, b) in forward.iter().zip(y.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }
}

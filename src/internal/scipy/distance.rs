//! Distance computation functions ported from scipy.spatial.distance
//!
//! This module provides cdist-like functionality for computing pairwise
//! euclidean distances.

use nalgebra::DMatrix;

/// Compute pairwise euclidean distances between two sets of vectors.
///
/// # Arguments
/// * `xa` - First set of vectors (n_samples_a x n_features)
/// * `xb` - Second set of vectors (n_samples_b x n_features)
///
/// # Returns
/// Distance matrix of shape (n_samples_a x n_samples_b)
///
/// If either set is empty the result is an empty matrix of the matching shape,
/// regardless of the feature count of the other set.
pub fn cdist(xa: &DMatrix<f64>, xb: &DMatrix<f64>) -> DMatrix<f64> {
    let n_a = xa.nrows();
    let n_b = xb.nrows();

    if n_a == 0 || n_b == 0 {
        return DMatrix::zeros(n_a, n_b);
    }

    debug_assert_eq!(xa.ncols(), xb.ncols(), "Feature dimensions must match");
    let n_features = xa.ncols();

    let mut result = DMatrix::zeros(n_a, n_b);

    for i in 0..n_a {
        for j in 0..n_b {
            let mut sum = 0.0;
            for k in 0..n_features {
                let diff = xa[(i, k)] - xb[(j, k)];
                sum += diff * diff;
            }
            result[(i, j)] = sum.sqrt();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cdist_euclidean() {
        let xa = DMatrix::from_row_slice(2, 2, &[
            0.0, 0.0,
            1.0, 0.0,
        ]);
        let xb = DMatrix::from_row_slice(2, 2, &[
            0.0, 1.0,
            1.0, 1.0,
        ]);

        let result = cdist(&xa, &xb);

        // [0,0] to [0,1]: sqrt(1) = 1
        // [0,0] to [1,1]: sqrt(2)
        // [1,0] to [0,1]: sqrt(2)
        // [1,0] to [1,1]: sqrt(1) = 1
        assert_eq!(result.nrows(), 2);
        assert_eq!(result.ncols(), 2);
        assert_relative_eq!(result[(0, 0)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(result[(0, 1)], 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(result[(1, 0)], 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(result[(1, 1)], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cdist_three_dimensions() {
        let xa = DMatrix::from_row_slice(1, 3, &[0.0, 0.0, 0.0]);
        let xb = DMatrix::from_row_slice(2, 3, &[
            1.0, 2.0, 2.0,
            0.0, 0.0, 1.0,
        ]);

        let result = cdist(&xa, &xb);
        assert_relative_eq!(result[(0, 0)], 3.0, epsilon = 1e-10);
        assert_relative_eq!(result[(0, 1)], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_cdist_empty() {
        let xa = DMatrix::<f64>::zeros(0, 0);
        let xb = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 1.0, 1.0]);

        let result = cdist(&xa, &xb);
        assert_eq!(result.shape(), (0, 2));

        let result = cdist(&xb, &xa);
        assert_eq!(result.shape(), (2, 0));
    }
}

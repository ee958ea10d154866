//! Point-set linker trait definition.

use nalgebra::DMatrix;

use super::LinkResult;

/// Trait for strategies that link two point sets one-to-one.
///
/// Implementations receive the source and target points as the rows of two
/// matrices with the same number of columns. A pair whose euclidean distance
/// exceeds `max_distance` is never linked; such points are reported as
/// unmatched instead. Results must be deterministic for a fixed input order.
pub trait PointSetLinker: Send + Sync {
    /// Link source points to target points.
    ///
    /// # Arguments
    /// * `sources` - Source points (n_sources x n_dims)
    /// * `targets` - Target points (n_targets x n_dims)
    /// * `max_distance` - Maximum euclidean distance of any link
    ///
    /// # Returns
    /// `LinkResult` whose `assignment` has one entry per source.
    fn link(&self, sources: &DMatrix<f64>, targets: &DMatrix<f64>, max_distance: f64) -> LinkResult;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
}

//! Globally optimal linking via the Hungarian algorithm.

use nalgebra::DMatrix;

use super::traits::PointSetLinker;
use super::LinkResult;
use crate::internal::scipy::{cdist, linear_sum_assignment};
use crate::utils::warn_once;

/// Point-set size above which the cubic solver becomes slow.
pub const LARGE_FRAME_POINTS: usize = 1000;

/// Links two point sets by minimizing the summed euclidean distance.
///
/// Pairs further apart than `max_distance` are forbidden. Among the
/// assignments using only allowed pairs, the one linking the most points is
/// chosen, and among those the one with the smallest total distance.
/// Worst-case cost is cubic in the number of points.
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianLinker;

impl HungarianLinker {
    pub fn new() -> Self {
        Self
    }
}

impl PointSetLinker for HungarianLinker {
    fn link(&self, sources: &DMatrix<f64>, targets: &DMatrix<f64>, max_distance: f64) -> LinkResult {
        let n_sources = sources.nrows();
        let n_targets = targets.nrows();

        if n_sources == 0 || n_targets == 0 {
            return LinkResult::unlinked(n_sources, n_targets);
        }

        if n_sources.max(n_targets) > LARGE_FRAME_POINTS {
            warn_once(&format!(
                "hungarian linking on more than {} points per frame may be very slow; \
                 consider the nearest-neighbor method",
                LARGE_FRAME_POINTS
            ));
        }

        let distances = cdist(sources, targets);
        let solution = linear_sum_assignment(&distances, max_distance);

        let mut assignment = vec![None; n_sources];
        let mut link_distances = vec![None; n_sources];
        for a in &solution.assignments {
            assignment[a.row_idx] = Some(a.col_idx);
            link_distances[a.row_idx] = Some(a.cost);
        }

        LinkResult {
            assignment,
            distances: link_distances,
            unmatched_sources: solution.unmatched_rows,
            unmatched_targets: solution.unmatched_cols,
        }
    }

    fn name(&self) -> &'static str {
        "hungarian"
    }
}

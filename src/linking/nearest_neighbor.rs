//! Greedy nearest-neighbor linking.

use nalgebra::DMatrix;

use super::traits::PointSetLinker;
use super::LinkResult;
use crate::internal::scipy::cdist;
use crate::matching::greedy_match;

/// Links two point sets greedily, closest pair first.
///
/// The globally closest remaining (source, target) pair within
/// `max_distance` is linked and both points are removed, until no allowed
/// pair remains. Quadratic in the number of points, but only locally optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborLinker;

impl NearestNeighborLinker {
    pub fn new() -> Self {
        Self
    }
}

impl PointSetLinker for NearestNeighborLinker {
    fn link(&self, sources: &DMatrix<f64>, targets: &DMatrix<f64>, max_distance: f64) -> LinkResult {
        let n_sources = sources.nrows();
        let n_targets = targets.nrows();

        if n_sources == 0 || n_targets == 0 {
            return LinkResult::unlinked(n_sources, n_targets);
        }

        let distances = cdist(sources, targets);
        let (matched_sources, matched_targets) = greedy_match(&distances, max_distance);

        LinkResult::from_pairs(
            n_sources,
            n_targets,
            matched_sources
                .into_iter()
                .zip(matched_targets)
                .map(|(s, t)| (s, t, distances[(s, t)])),
        )
    }

    fn name(&self) -> &'static str {
        "nearest-neighbor"
    }
}

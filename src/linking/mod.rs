//! Strategies for linking the points of two frames.
//!
//! This module provides:
//! - `PointSetLinker` trait for all linking strategies
//! - `HungarianLinker` - globally optimal assignment (minimum summed distance)
//! - `NearestNeighborLinker` - greedy, locally optimal assignment
//! - `Linker` / `LinkingMethod` - closed set of strategies selected by name

mod traits;
mod hungarian;
mod nearest_neighbor;
mod dispatch;

pub use traits::PointSetLinker;
pub use hungarian::HungarianLinker;
pub use nearest_neighbor::NearestNeighborLinker;
pub use dispatch::{Linker, LinkingMethod};

use crate::matching::get_unmatched;

/// Outcome of linking a source point set to a target point set.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkResult {
    /// `assignment[i]` is the target index linked to source `i`, if any.
    pub assignment: Vec<Option<usize>>,
    /// `distances[i]` is the length of the link of source `i`, if any.
    pub distances: Vec<Option<f64>>,
    /// Source indices without a link, ascending.
    pub unmatched_sources: Vec<usize>,
    /// Target indices without a link, ascending.
    pub unmatched_targets: Vec<usize>,
}

impl LinkResult {
    /// Result for point sets where nothing could be linked.
    pub fn unlinked(n_sources: usize, n_targets: usize) -> Self {
        Self {
            assignment: vec![None; n_sources],
            distances: vec![None; n_sources],
            unmatched_sources: (0..n_sources).collect(),
            unmatched_targets: (0..n_targets).collect(),
        }
    }

    /// Build a result from matched `(source, target, distance)` triples.
    pub(crate) fn from_pairs(
        n_sources: usize,
        n_targets: usize,
        pairs: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Self {
        let mut assignment = vec![None; n_sources];
        let mut distances = vec![None; n_sources];
        let mut matched_sources = Vec::new();
        let mut matched_targets = Vec::new();

        for (source, target, distance) in pairs {
            assignment[source] = Some(target);
            distances[source] = Some(distance);
            matched_sources.push(source);
            matched_targets.push(target);
        }

        let unmatched_sources = get_unmatched(n_sources, &matched_sources);
        let unmatched_targets = get_unmatched(n_targets, &matched_targets);

        Self {
            assignment,
            distances,
            unmatched_sources,
            unmatched_targets,
        }
    }

    /// Linked `(source, target)` pairs in source order.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(source, target)| target.map(|t| (source, t)))
    }

    /// Number of links made.
    pub fn n_links(&self) -> usize {
        self.assignment.iter().filter(|a| a.is_some()).count()
    }

    /// Sum of the distances of all links.
    pub fn total_cost(&self) -> f64 {
        self.distances.iter().flatten().sum()
    }
}

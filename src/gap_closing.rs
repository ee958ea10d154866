//! Gap closing: bridging frames where a particle was not detected.
//!
//! After frame-to-frame linking, points that found no successor in the next
//! frame are offered to the still-unlinked points of later frames, up to a
//! maximum look-ahead. Candidate frames are tried nearest first and a point
//! is consumed by the first frame that accepts it, even if a farther frame
//! holds a spatially closer candidate. Gap closing always uses the greedy
//! nearest-neighbor linker.

use std::mem;

use crate::frame::Frame;
use crate::frame_linker::UnmatchedSet;
use crate::graph::AdjacencyGraph;
use crate::linking::{NearestNeighborLinker, PointSetLinker};
use crate::Result;

/// Outcome of one (source frame, target frame) attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapStep {
    /// Source indices still unmatched after the attempt.
    pub sources: Vec<usize>,
    /// Target indices still unmatched after the attempt.
    pub targets: Vec<usize>,
    /// Links made, as `(source local index, target local index, distance)`.
    pub links: Vec<(usize, usize, f64)>,
}

/// Try to link the given unmatched points of `source_frame` to the given
/// unmatched points of `target_frame`.
///
/// Takes ownership of both index lists and returns what is left of them
/// together with the links made. Indices are local to their frame.
pub fn close_gap(
    source_frame: &Frame,
    sources: Vec<usize>,
    target_frame: &Frame,
    targets: Vec<usize>,
    max_distance: f64,
) -> GapStep {
    if sources.is_empty() || targets.is_empty() {
        return GapStep {
            sources,
            targets,
            links: Vec::new(),
        };
    }

    let source_points = source_frame.points().select_rows(sources.iter());
    let target_points = target_frame.points().select_rows(targets.iter());

    let result = NearestNeighborLinker::new().link(&source_points, &target_points, max_distance);

    let links = result
        .assignment
        .iter()
        .zip(result.distances.iter())
        .enumerate()
        .filter_map(|(s, (t, d))| match (t, d) {
            (Some(t), Some(d)) => Some((sources[s], targets[*t], *d)),
            _ => None,
        })
        .collect();

    GapStep {
        sources: result.unmatched_sources.iter().map(|&s| sources[s]).collect(),
        targets: result.unmatched_targets.iter().map(|&t| targets[t]).collect(),
        links,
    }
}

/// Result of the gap-closing pass.
#[derive(Debug, Clone, Default)]
pub struct GapClosing {
    /// Unmatched sets left after gap closing.
    pub unmatched: Vec<UnmatchedSet>,
    /// Number of gap-closing edges added.
    pub n_links: usize,
    /// Summed length of the gap-closing edges.
    pub total_cost: f64,
}

/// Bridge detection gaps of up to `max_gap_closing` frames.
///
/// For each frame `i` and each frame `j` in `i + 2 ..= min(i + max_gap_closing,
/// n_frames - 1)`, in increasing `j`, the unmatched sources of `i` are linked
/// to the unmatched targets of `j`. Linked points leave their sets
/// immediately and each link becomes an edge in `graph`.
///
/// # Errors
/// Propagates `GraphInvariant` from the graph.
pub fn close_gaps(
    frames: &[Frame],
    mut unmatched: Vec<UnmatchedSet>,
    max_gap_closing: usize,
    max_distance: f64,
    graph: &mut AdjacencyGraph,
    debug: bool,
) -> Result<GapClosing> {
    debug_assert_eq!(frames.len(), unmatched.len());
    let n_frames = frames.len();
    let mut n_links = 0;
    let mut total_cost = 0.0;

    for i in 0..n_frames.saturating_sub(2) {
        let last = i.saturating_add(max_gap_closing).min(n_frames - 1);
        let mut closed_here = 0;

        for j in (i + 2)..=last {
            if unmatched[i].sources.is_empty() {
                break;
            }
            if unmatched[j].targets.is_empty() {
                continue;
            }

            let sources = mem::take(&mut unmatched[i].sources);
            let targets = mem::take(&mut unmatched[j].targets);
            let step = close_gap(&frames[i], sources, &frames[j], targets, max_distance);

            for &(s, t, d) in &step.links {
                graph.add_frame_edge(i, s, j, t)?;
                total_cost += d;
            }
            closed_here += step.links.len();

            unmatched[i].sources = step.sources;
            unmatched[j].targets = step.targets;
        }

        if closed_here > 0 {
            crate::progress!(debug, frame = i, links = closed_here, "closed gaps from frame {}", i);
        }
        n_links += closed_here;
    }

    Ok(GapClosing {
        unmatched,
        n_links,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameLayout;
    use approx::assert_relative_eq;

    fn frame(xs: &[f64]) -> Frame {
        let rows: Vec<[f64; 2]> = xs.iter().map(|&x| [x, 0.0]).collect();
        Frame::from_rows(&rows).unwrap()
    }

    fn residuals(n_frames: usize, entries: &[(usize, &[usize], &[usize])]) -> Vec<UnmatchedSet> {
        let mut sets = vec![UnmatchedSet::default(); n_frames];
        for &(frame, sources, targets) in entries {
            sets[frame].sources = sources.to_vec();
            sets[frame].targets = targets.to_vec();
        }
        sets
    }

    #[test]
    fn test_close_gap_maps_back_to_frame_indices() {
        let source = frame(&[0.0, 100.0, 200.0]);
        let target = frame(&[201.0, 5.0, 99.0]);

        let step = close_gap(&source, vec![0, 2], &target, vec![0, 1], 10.0);

        assert_eq!(step.links.len(), 2);
        assert_eq!((step.links[0].0, step.links[0].1), (0, 1));
        assert_eq!((step.links[1].0, step.links[1].1), (2, 0));
        assert_relative_eq!(step.links[0].2, 5.0, epsilon = 1e-10);
        assert!(step.sources.is_empty());
        assert!(step.targets.is_empty());
    }

    #[test]
    fn test_close_gap_pairs_greedily_on_crossing() {
        // The optimal pairing would be 0->1, 1->0 (3.5); closest pair first
        // takes 0->0 (1.0) and leaves 1->1 (4.5).
        let source = frame(&[0.0, 2.5]);
        let target = frame(&[1.0, -2.0]);

        let step = close_gap(&source, vec![0, 1], &target, vec![0, 1], f64::INFINITY);

        assert_eq!(step.links.len(), 2);
        assert_eq!((step.links[0].0, step.links[0].1), (0, 0));
        assert_eq!((step.links[1].0, step.links[1].1), (1, 1));
        let cost: f64 = step.links.iter().map(|l| l.2).sum();
        assert_relative_eq!(cost, 5.5, epsilon = 1e-10);
    }

    #[test]
    fn test_close_gap_returns_leftovers() {
        let source = frame(&[0.0, 50.0]);
        let target = frame(&[1.0, 500.0]);

        let step = close_gap(&source, vec![0, 1], &target, vec![0, 1], 10.0);

        assert_eq!(step.links.len(), 1);
        assert_eq!(step.sources, vec![1]);
        assert_eq!(step.targets, vec![1]);
    }

    #[test]
    fn test_close_gap_empty_input_passes_through() {
        let source = frame(&[0.0]);
        let target = frame(&[0.0]);

        let step = close_gap(&source, vec![0], &target, Vec::new(), 10.0);
        assert_eq!(step.sources, vec![0]);
        assert!(step.links.is_empty());
    }

    #[test]
    fn test_close_gaps_bridges_missing_frame() {
        let frames = vec![frame(&[0.0]), Frame::empty(), frame(&[1.0])];
        let mut graph = AdjacencyGraph::new(FrameLayout::from_frames(&frames));
        let unmatched = residuals(3, &[(0, &[0], &[]), (2, &[], &[0])]);

        let outcome = close_gaps(&frames, unmatched, 3, 5.0, &mut graph, false).unwrap();

        assert_eq!(outcome.n_links, 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert!(outcome.unmatched[0].sources.is_empty());
        assert!(outcome.unmatched[2].targets.is_empty());
    }

    #[test]
    fn test_close_gaps_prefers_nearest_frame() {
        // Source at x=0 can reach frame 2 (x=4) or frame 3 (x=0.5).
        // Frame 2 is tried first and wins although frame 3 is closer in space.
        let frames = vec![frame(&[0.0]), frame(&[]), frame(&[4.0]), frame(&[0.5])];
        let mut graph = AdjacencyGraph::new(FrameLayout::from_frames(&frames));
        let unmatched = residuals(4, &[(0, &[0], &[]), (2, &[0], &[0]), (3, &[], &[0])]);

        let outcome = close_gaps(&frames, unmatched, 3, 5.0, &mut graph, false).unwrap();

        // Globals: frame 0 -> 0, frame 2 -> 1, frame 3 -> 2
        assert_eq!(graph.successor(0), Some(1));
        assert_eq!(graph.predecessor(2), None);
        assert_eq!(outcome.n_links, 1);
        assert_eq!(outcome.unmatched[3].targets, vec![0]);
    }

    #[test]
    fn test_close_gaps_respects_horizon() {
        let frames = vec![frame(&[0.0]), frame(&[]), frame(&[]), frame(&[]), frame(&[0.0])];
        let mut graph = AdjacencyGraph::new(FrameLayout::from_frames(&frames));
        let unmatched = residuals(5, &[(0, &[0], &[]), (4, &[], &[0])]);

        let outcome = close_gaps(&frames, unmatched, 3, 5.0, &mut graph, false).unwrap();

        assert_eq!(outcome.n_links, 0);
        assert_eq!(graph.n_edges(), 0);
        assert_eq!(outcome.unmatched[0].sources, vec![0]);
    }

    #[test]
    fn test_close_gaps_horizon_inclusive() {
        let frames = vec![frame(&[0.0]), frame(&[]), frame(&[]), frame(&[0.0])];
        let mut graph = AdjacencyGraph::new(FrameLayout::from_frames(&frames));
        let unmatched = residuals(4, &[(0, &[0], &[]), (3, &[], &[0])]);

        let outcome = close_gaps(&frames, unmatched, 3, 5.0, &mut graph, false).unwrap();

        assert_eq!(outcome.n_links, 1);
        assert_eq!(graph.successor(0), Some(1));
    }

    #[test]
    fn test_close_gaps_disabled() {
        let frames = vec![frame(&[0.0]), frame(&[]), frame(&[0.0])];
        let mut graph = AdjacencyGraph::new(FrameLayout::from_frames(&frames));
        let unmatched = residuals(3, &[(0, &[0], &[]), (2, &[], &[0])]);

        let outcome = close_gaps(&frames, unmatched, 1, 5.0, &mut graph, false).unwrap();
        assert_eq!(outcome.n_links, 0);
    }
}

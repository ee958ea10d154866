//! Frame-to-frame linking of consecutive frames.

use crate::frame::Frame;
use crate::graph::AdjacencyGraph;
use crate::linking::PointSetLinker;
use crate::Result;

/// Local point indices of one frame not yet consumed by any edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnmatchedSet {
    /// Points without an outgoing edge (candidates to link forward).
    pub sources: Vec<usize>,
    /// Points without an incoming edge (candidates to be linked to).
    pub targets: Vec<usize>,
}

/// Result of the frame-to-frame pass.
#[derive(Debug, Clone, Default)]
pub struct FrameLinking {
    /// One unmatched set per frame.
    pub unmatched: Vec<UnmatchedSet>,
    /// Number of edges added.
    pub n_links: usize,
    /// Summed length of the edges added.
    pub total_cost: f64,
}

/// Link every pair of consecutive frames and record the residual points.
///
/// For each pair `(i, i + 1)` the linker is run on the full point sets, every
/// link becomes an edge in `graph`, and the unlinked sources of frame `i` and
/// unlinked targets of frame `i + 1` are recorded. The first frame never has
/// unmatched targets and the last frame never has unmatched sources.
///
/// # Errors
/// Propagates `GraphInvariant` from the graph.
pub fn link_frames<L: PointSetLinker + ?Sized>(
    frames: &[Frame],
    linker: &L,
    max_distance: f64,
    graph: &mut AdjacencyGraph,
    debug: bool,
) -> Result<FrameLinking> {
    let mut outcome = FrameLinking {
        unmatched: vec![UnmatchedSet::default(); frames.len()],
        ..FrameLinking::default()
    };

    for (i, pair) in frames.windows(2).enumerate() {
        let (source, target) = (&pair[0], &pair[1]);
        let result = linker.link(source.points(), target.points(), max_distance);

        for (s, t) in result.links() {
            graph.add_frame_edge(i, s, i + 1, t)?;
        }

        let n_links = result.n_links();
        outcome.n_links += n_links;
        outcome.total_cost += result.total_cost();
        outcome.unmatched[i].sources = result.unmatched_sources;
        outcome.unmatched[i + 1].targets = result.unmatched_targets;

        crate::progress!(
            debug,
            frame = i,
            linker = linker.name(),
            links = n_links,
            sources = source.num_points(),
            targets = target.num_points(),
            "linked frame {} to frame {}",
            i,
            i + 1
        );
    }

    Ok(outcome)
}

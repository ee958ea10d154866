//! Track extraction from a frozen adjacency graph.

use serde::{Deserialize, Serialize};

use crate::frame::FrameLayout;
use crate::graph::AdjacencyGraph;

/// One particle trajectory.
///
/// Stored both as the chain of visited global indices and as a per-frame
/// array of local point indices, with `None` marking frames where the
/// particle was not detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    global_indices: Vec<usize>,
    frame_indices: Vec<Option<usize>>,
}

impl Track {
    /// Build a track from its chain of global indices.
    ///
    /// Each global index is placed at its own frame slot using the layout's
    /// cumulative frame sizes, independently of its position in the chain.
    pub fn from_chain(global_indices: Vec<usize>, layout: &FrameLayout) -> Self {
        let mut frame_indices = vec![None; layout.n_frames()];
        for &global in &global_indices {
            if let Some((frame, local)) = layout.locate(global) {
                frame_indices[frame] = Some(local);
            }
        }
        Self {
            global_indices,
            frame_indices,
        }
    }

    /// Visited global indices, in frame order.
    pub fn global_indices(&self) -> &[usize] {
        &self.global_indices
    }

    /// Local point index per frame, `None` where the track has no point.
    pub fn frame_indices(&self) -> &[Option<usize>] {
        &self.frame_indices
    }

    /// Local point index in `frame`, if the track has a point there.
    pub fn point_in_frame(&self, frame: usize) -> Option<usize> {
        self.frame_indices.get(frame).copied().flatten()
    }

    /// Number of detections in the track.
    pub fn len(&self) -> usize {
        self.global_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.global_indices.is_empty()
    }

    /// First frame with a detection.
    pub fn start_frame(&self) -> Option<usize> {
        self.frame_indices.iter().position(Option::is_some)
    }

    /// Last frame with a detection.
    pub fn end_frame(&self) -> Option<usize> {
        self.frame_indices.iter().rposition(Option::is_some)
    }

    /// Number of frames between start and end without a detection.
    pub fn gap_count(&self) -> usize {
        match (self.start_frame(), self.end_frame()) {
            (Some(start), Some(end)) => (end - start + 1) - self.len(),
            _ => 0,
        }
    }

    pub fn has_gaps(&self) -> bool {
        self.gap_count() > 0
    }
}

/// Walk the graph and collect every maximal path as a track.
///
/// Tracks start at nodes without an incoming edge, in ascending global
/// index order, and follow outgoing edges until a node without one. Every
/// node, including isolated ones, ends up in exactly one track. Extraction
/// does not modify the graph, so repeated calls return identical tracks.
pub fn extract_tracks(graph: &AdjacencyGraph) -> Vec<Track> {
    graph
        .track_starts()
        .map(|start| {
            let mut chain = vec![start];
            let mut node = start;
            while let Some(next) = graph.successor(node) {
                chain.push(next);
                node = next;
            }
            Track::from_chain(chain, graph.layout())
        })
        .collect()
}

//! Sparse forward adjacency graph over all points of all frames.
//!
//! Nodes are global indices. Every node has at most one outgoing and at most
//! one incoming edge, and edges always point from an earlier frame to a
//! strictly later one, so the graph is a disjoint union of simple forward
//! paths. Edges are only ever added.

use nalgebra::DMatrix;

use crate::frame::FrameLayout;
use crate::{Error, Result};

/// Edge slots of a single node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Node {
    next: Option<usize>,
    prev: Option<usize>,
}

/// Node-indexed directed graph linking points across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    layout: FrameLayout,
    nodes: Vec<Node>,
    n_edges: usize,
}

impl AdjacencyGraph {
    /// Create an edgeless graph with one node per point of `layout`.
    pub fn new(layout: FrameLayout) -> Self {
        let nodes = vec![Node::default(); layout.total_points()];
        Self {
            layout,
            nodes,
            n_edges: 0,
        }
    }

    /// Add the edge `source -> target`.
    ///
    /// # Errors
    /// Returns `GraphInvariant` if either node is out of range, if `target`
    /// is not in a strictly later frame than `source`, or if `source` already
    /// has an outgoing edge or `target` an incoming one.
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<()> {
        let (Some(source_frame), Some(target_frame)) =
            (self.layout.frame_of(source), self.layout.frame_of(target))
        else {
            return Err(Error::GraphInvariant(format!(
                "edge {} -> {} references a node outside 0..{}",
                source,
                target,
                self.nodes.len()
            )));
        };

        if target_frame <= source_frame {
            return Err(Error::GraphInvariant(format!(
                "edge {} -> {} goes from frame {} to frame {}",
                source, target, source_frame, target_frame
            )));
        }
        if let Some(existing) = self.nodes[source].next {
            return Err(Error::GraphInvariant(format!(
                "node {} already links to {}",
                source, existing
            )));
        }
        if let Some(existing) = self.nodes[target].prev {
            return Err(Error::GraphInvariant(format!(
                "node {} is already linked from {}",
                target, existing
            )));
        }

        self.nodes[source].next = Some(target);
        self.nodes[target].prev = Some(source);
        self.n_edges += 1;
        Ok(())
    }

    /// Add an edge between local point indices of two frames.
    ///
    /// # Errors
    /// Returns `GraphInvariant` if a local index is not a point of its frame,
    /// plus everything [`add_edge`](Self::add_edge) rejects.
    pub fn add_frame_edge(
        &mut self,
        source_frame: usize,
        source_local: usize,
        target_frame: usize,
        target_local: usize,
    ) -> Result<()> {
        let source = self.frame_node(source_frame, source_local)?;
        let target = self.frame_node(target_frame, target_local)?;
        self.add_edge(source, target)
    }

    fn frame_node(&self, frame: usize, local: usize) -> Result<usize> {
        self.layout.global_index(frame, local).ok_or_else(|| {
            Error::GraphInvariant(format!("frame {} has no point {}", frame, local))
        })
    }

    /// Number of nodes (total points across frames).
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Node that `node` links to, if any.
    pub fn successor(&self, node: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.next)
    }

    /// Node linking to `node`, if any.
    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.prev)
    }

    /// Nodes without an incoming edge, ascending. Each starts one track.
    pub fn track_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.prev.is_none())
            .map(|(i, _)| i)
    }

    /// All edges as `(source, target)` pairs, ordered by source.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.next.map(|j| (i, j)))
    }

    /// Dense boolean adjacency matrix; entry `(i, j)` is true for edge `i -> j`.
    ///
    /// Quadratic in the number of nodes; intended for small inputs and inspection.
    pub fn to_dense(&self) -> DMatrix<bool> {
        let n = self.nodes.len();
        let mut dense = DMatrix::from_element(n, n, false);
        for (i, j) in self.edges() {
            dense[(i, j)] = true;
        }
        dense
    }
}

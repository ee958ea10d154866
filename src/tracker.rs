//! Main tracker implementation.

use serde::{Deserialize, Serialize};

use crate::frame::{validate_frames, Frame, FrameLayout};
use crate::frame_linker::link_frames;
use crate::gap_closing::close_gaps;
use crate::graph::AdjacencyGraph;
use crate::linking::{Linker, LinkingMethod, PointSetLinker};
use crate::tracks::{extract_tracks, Track};
use crate::{Error, Result};

/// Default maximum number of frames a gap-closing search looks ahead.
pub const DEFAULT_MAX_GAP_CLOSING: usize = 3;

/// Configuration for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Frame-to-frame linking strategy. Gap closing is always greedy.
    pub method: LinkingMethod,

    /// Maximum euclidean distance of any link; `None` means unrestricted.
    pub max_linking_distance: Option<f64>,

    /// Maximum number of frames a gap-closing link may span.
    /// Values below 2 disable gap closing.
    pub max_gap_closing: usize,

    /// Report progress at `info` level instead of `debug`.
    pub debug: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            method: LinkingMethod::default(),
            max_linking_distance: None,
            max_gap_closing: DEFAULT_MAX_GAP_CLOSING,
            debug: false,
        }
    }
}

impl TrackerConfig {
    /// Create a configuration with the given frame-to-frame method.
    pub fn new(method: LinkingMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Create configuration from a method name (e.g. "hungarian", "nearest_neighbor").
    pub fn from_method_name(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    pub fn with_max_linking_distance(mut self, max_linking_distance: f64) -> Self {
        self.max_linking_distance = Some(max_linking_distance);
        self
    }

    pub fn with_max_gap_closing(mut self, max_gap_closing: usize) -> Self {
        self.max_gap_closing = max_gap_closing;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Effective distance cap (infinite when unrestricted).
    pub fn linking_distance(&self) -> f64 {
        self.max_linking_distance.unwrap_or(f64::INFINITY)
    }

    /// Check the configuration before any linking happens.
    pub fn validate(&self) -> Result<()> {
        if let Some(distance) = self.max_linking_distance {
            if distance.is_nan() {
                return Err(Error::InvalidConfig(
                    "max_linking_distance must be a number".to_string(),
                ));
            }
            if distance < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "max_linking_distance must be non-negative, got {}",
                    distance
                )));
            }
        }
        Ok(())
    }
}

/// Counters describing a tracking run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkingStats {
    pub n_frames: usize,
    pub n_points: usize,
    /// Edges made between consecutive frames.
    pub frame_links: usize,
    /// Edges made by gap closing.
    pub gap_links: usize,
    pub n_tracks: usize,
    pub tracks_with_gaps: usize,
    /// Summed length of all edges.
    pub total_cost: f64,
}

/// Output of a tracking run.
///
/// Holds three views of the same result: per-frame local indices for each
/// track, global index chains for each track, and the adjacency graph.
#[derive(Debug, Clone)]
pub struct TrackingResult {
    tracks: Vec<Track>,
    graph: AdjacencyGraph,
    stats: LinkingStats,
}

impl TrackingResult {
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Per track, the local point index in each frame (`None` for a gap).
    pub fn frame_tracks(&self) -> Vec<Vec<Option<usize>>> {
        self.tracks.iter().map(|t| t.frame_indices().to_vec()).collect()
    }

    /// Per track, the visited global indices.
    pub fn adjacency_tracks(&self) -> Vec<Vec<usize>> {
        self.tracks.iter().map(|t| t.global_indices().to_vec()).collect()
    }

    /// Forward adjacency graph over all points.
    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    pub fn stats(&self) -> &LinkingStats {
        &self.stats
    }

    /// Coordinates of a track in each frame, `None` for gaps.
    ///
    /// `frames` must be the frames the result was computed from.
    pub fn track_coordinates(&self, frames: &[Frame], track: usize) -> Option<Vec<Option<Vec<f64>>>> {
        let track = self.tracks.get(track)?;
        Some(
            track
                .frame_indices()
                .iter()
                .zip(frames)
                .map(|(local, frame)| local.and_then(|l| frame.point(l)))
                .collect(),
        )
    }
}

/// Particle tracker linking point detections across frames.
///
/// Runs three passes over all frames: frame-to-frame linking with the
/// configured method, gap closing with the greedy linker, and track
/// extraction.
#[derive(Debug, Clone)]
pub struct SimpleTracker {
    config: TrackerConfig,
    linker: Linker,
}

impl SimpleTracker {
    /// Create a new tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        let linker = config.method.linker();
        Ok(Self { config, linker })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Link the points of all frames into tracks.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the frames do not share one
    /// dimensionality. An empty frame list gives an empty result.
    pub fn track(&self, frames: &[Frame]) -> Result<TrackingResult> {
        validate_frames(frames)?;

        let layout = FrameLayout::from_frames(frames);
        let mut graph = AdjacencyGraph::new(layout);
        let max_distance = self.config.linking_distance();
        let debug = self.config.debug;

        crate::progress!(
            debug,
            frames = frames.len(),
            points = graph.n_nodes(),
            "frame-to-frame linking using {} method",
            self.linker.name()
        );
        let linked = link_frames(frames, &self.linker, max_distance, &mut graph, debug)?;

        crate::progress!(
            debug,
            max_gap_closing = self.config.max_gap_closing,
            "closing gaps"
        );
        let closed = close_gaps(
            frames,
            linked.unmatched,
            self.config.max_gap_closing,
            max_distance,
            &mut graph,
            debug,
        )?;

        let tracks = extract_tracks(&graph);

        let stats = LinkingStats {
            n_frames: frames.len(),
            n_points: graph.n_nodes(),
            frame_links: linked.n_links,
            gap_links: closed.n_links,
            n_tracks: tracks.len(),
            tracks_with_gaps: tracks.iter().filter(|t| t.has_gaps()).count(),
            total_cost: linked.total_cost + closed.total_cost,
        };
        crate::progress!(
            debug,
            tracks = stats.n_tracks,
            frame_links = stats.frame_links,
            gap_links = stats.gap_links,
            "extracted {} tracks",
            stats.n_tracks
        );

        Ok(TrackingResult {
            tracks,
            graph,
            stats,
        })
    }
}

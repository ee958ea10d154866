//! # simpletracker - Particle Linking Library
//!
//! Reconstructs particle trajectories from per-frame point detections whose
//! identities are unknown across frames.
//!
//! ## Features
//!
//! - Frame-to-frame linking with a globally optimal (Hungarian) or greedy
//!   nearest-neighbor assignment
//! - Hard cap on the distance of any link
//! - Gap closing across frames where a particle was missed
//! - Tracks as per-frame point indices, global index chains, or the raw
//!   adjacency graph
//!
//! ## Example
//!
//! ```rust
//! use simpletracker_rs::{Frame, SimpleTracker, TrackerConfig};
//!
//! let frames = vec![
//!     Frame::from_rows(&[[0.0, 0.0], [10.0, 0.0]]).unwrap(),
//!     Frame::from_rows(&[[10.2, 0.1]]).unwrap(),
//!     Frame::from_rows(&[[0.3, 0.2], [10.4, 0.1]]).unwrap(),
//! ];
//!
//! let config = TrackerConfig::from_method_name("hungarian")
//!     .unwrap()
//!     .with_max_linking_distance(2.0)
//!     .with_max_gap_closing(3);
//! let tracker = SimpleTracker::new(config).unwrap();
//! let result = tracker.track(&frames).unwrap();
//!
//! assert_eq!(
//!     result.frame_tracks(),
//!     vec![vec![Some(0), None, Some(0)], vec![Some(1), Some(0), Some(1)]],
//! );
//! ```

/// Emit a progress event at `info` level when `debug` is set, `debug` level otherwise.
macro_rules! progress {
    ($debug:expr, $($arg:tt)+) => {
        if $debug {
            ::tracing::info!($($arg)+);
        } else {
            ::tracing::debug!($($arg)+);
        }
    };
}
pub(crate) use progress;

// Internal modules (ports of scipy)
pub(crate) mod internal;

// Public modules
pub mod frame;
pub mod linking;
pub mod matching;
pub mod graph;
pub mod frame_linker;
pub mod gap_closing;
pub mod tracks;
pub mod tracker;
pub mod utils;

// Re-exports for convenience
pub use frame::{Frame, FrameLayout};
pub use graph::AdjacencyGraph;
pub use linking::{LinkResult, Linker, LinkingMethod, PointSetLinker};
pub use tracks::Track;
pub use tracker::{LinkingStats, SimpleTracker, TrackerConfig, TrackingResult};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the simpletracker library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Unknown linking method: {0}")]
        UnknownMethod(String),

        #[error("Invalid points: {0}")]
        InvalidPoints(String),

        #[error("Dimension mismatch in frame {frame}: expected {expected}, got {got}")]
        DimensionMismatch {
            frame: usize,
            expected: usize,
            got: usize,
        },

        #[error("Adjacency graph invariant violated: {0}")]
        GraphInvariant(String),
    }

    /// Result type for simpletracker operations
    pub type Result<T> = std::result::Result<T, Error>;
}

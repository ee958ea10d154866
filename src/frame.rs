//! Frames of point detections and the global index layout over them.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::utils::exclusive_cumsum;
use crate::{Error, Result};

/// One time step worth of point detections.
///
/// Points are stored as the rows of an `(n_points x n_dims)` matrix. A frame
/// with no detections is allowed and matches any dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    points: DMatrix<f64>,
}

impl Frame {
    /// Create a frame from a point matrix (one point per row).
    ///
    /// # Errors
    /// Returns `InvalidPoints` if any coordinate is NaN or infinite.
    pub fn new(points: DMatrix<f64>) -> Result<Self> {
        if let Some(pos) = points.iter().position(|x| !x.is_finite()) {
            // nalgebra storage is column-major
            let row = pos % points.nrows().max(1);
            return Err(Error::InvalidPoints(format!(
                "point {} has a non-finite coordinate",
                row
            )));
        }
        Ok(Self { points })
    }

    /// Create a frame from a flat row-major slice.
    ///
    /// # Arguments
    /// * `points` - Flat slice of coordinates in row-major order
    /// * `n_points` - Number of points
    /// * `n_dims` - Number of dimensions per point
    pub fn from_slice(points: &[f64], n_points: usize, n_dims: usize) -> Result<Self> {
        if points.len() != n_points * n_dims {
            return Err(Error::InvalidPoints(format!(
                "points slice length {} doesn't match {}x{}",
                points.len(),
                n_points,
                n_dims
            )));
        }
        Self::new(DMatrix::from_row_slice(n_points, n_dims, points))
    }

    /// Create a frame from a list of coordinate vectors.
    ///
    /// All vectors must share the same length.
    pub fn from_rows<P: AsRef<[f64]>>(rows: &[P]) -> Result<Self> {
        let n_dims = rows.first().map_or(0, |row| row.as_ref().len());
        let mut flat = Vec::with_capacity(rows.len() * n_dims);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_dims {
                return Err(Error::InvalidPoints(format!(
                    "point {} has {} coordinates, expected {}",
                    i,
                    row.len(),
                    n_dims
                )));
            }
            flat.extend_from_slice(row);
        }
        Self::from_slice(&flat, rows.len(), n_dims)
    }

    /// A frame without detections.
    pub fn empty() -> Self {
        Self {
            points: DMatrix::zeros(0, 0),
        }
    }

    /// Number of points in this frame.
    pub fn num_points(&self) -> usize {
        self.points.nrows()
    }

    /// Dimensionality of the points (0 for an empty frame built without shape).
    pub fn num_dims(&self) -> usize {
        self.points.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Underlying point matrix.
    pub fn points(&self) -> &DMatrix<f64> {
        &self.points
    }

    /// Coordinates of a single point.
    pub fn point(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.num_points() {
            return None;
        }
        Some(self.points.row(index).iter().copied().collect())
    }
}

/// Check that every non-empty frame has the same dimensionality.
///
/// Returns the common dimensionality, or `None` if all frames are empty.
pub fn validate_frames(frames: &[Frame]) -> Result<Option<usize>> {
    let mut expected: Option<usize> = None;
    for (i, frame) in frames.iter().enumerate() {
        if frame.is_empty() {
            continue;
        }
        match expected {
            None => expected = Some(frame.num_dims()),
            Some(dims) if dims != frame.num_dims() => {
                return Err(Error::DimensionMismatch {
                    frame: i,
                    expected: dims,
                    got: frame.num_dims(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(expected)
}

/// Mapping between global indices and `(frame, local index)` pairs.
///
/// The global index of a point is its position in the concatenation of all
/// frames, in frame order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayout {
    sizes: Vec<usize>,
    offsets: Vec<usize>,
    total: usize,
}

impl FrameLayout {
    /// Build a layout from per-frame point counts.
    pub fn new(sizes: Vec<usize>) -> Self {
        let offsets = exclusive_cumsum(&sizes);
        let total = sizes.iter().sum();
        Self {
            sizes,
            offsets,
            total,
        }
    }

    pub fn from_frames(frames: &[Frame]) -> Self {
        Self::new(frames.iter().map(Frame::num_points).collect())
    }

    pub fn n_frames(&self) -> usize {
        self.sizes.len()
    }

    /// Total number of points across all frames.
    pub fn total_points(&self) -> usize {
        self.total
    }

    pub fn frame_size(&self, frame: usize) -> usize {
        self.sizes[frame]
    }

    /// Global index of the first point of `frame`.
    pub fn frame_offset(&self, frame: usize) -> usize {
        self.offsets[frame]
    }

    /// Global index of point `local` in `frame`, or `None` if the frame
    /// does not exist or has no point `local`.
    pub fn global_index(&self, frame: usize, local: usize) -> Option<usize> {
        let size = *self.sizes.get(frame)?;
        (local < size).then(|| self.offsets[frame] + local)
    }

    /// Frame containing the given global index.
    pub fn frame_of(&self, global: usize) -> Option<usize> {
        if global >= self.total {
            return None;
        }
        // Empty frames share their offset with the next frame; the last
        // frame starting at or before `global` is the one that owns it.
        Some(self.offsets.partition_point(|&start| start <= global) - 1)
    }

    /// Convert a global index back to `(frame, local index)`.
    pub fn locate(&self, global: usize) -> Option<(usize, usize)> {
        let frame = self.frame_of(global)?;
        Some((frame, global - self.offsets[frame]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_new() {
        let points = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let frame = Frame::new(points).unwrap();

        assert_eq!(frame.num_points(), 2);
        assert_eq!(frame.num_dims(), 2);
        assert_relative_eq!(frame.points()[(1, 0)], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_frame_from_rows() {
        let frame = Frame::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(frame.num_points(), 2);
        assert_eq!(frame.num_dims(), 3);
        assert_eq!(frame.point(1), Some(vec![4.0, 5.0, 6.0]));
        assert_eq!(frame.point(2), None);
    }

    #[test]
    fn test_frame_from_rows_ragged() {
        let result = Frame::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(Error::InvalidPoints(_))));
    }

    #[test]
    fn test_frame_from_slice_wrong_length() {
        assert!(Frame::from_slice(&[1.0, 2.0, 3.0], 2, 2).is_err());
    }

    #[test]
    fn test_frame_rejects_nan() {
        let result = Frame::from_rows(&[vec![0.0, 0.0], vec![f64::NAN, 1.0]]);
        assert!(matches!(result, Err(Error::InvalidPoints(msg)) if msg.contains("point 1")));
    }

    #[test]
    fn test_empty_frame() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let frame = Frame::from_rows(&rows).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame, Frame::empty());
    }

    #[test]
    fn test_validate_frames_mismatch() {
        let frames = vec![
            Frame::from_rows(&[[0.0, 0.0]]).unwrap(),
            Frame::empty(),
            Frame::from_rows(&[[0.0, 0.0]]).unwrap(),
            Frame::from_rows(&[[0.0, 0.0, 0.0]]).unwrap(),
        ];
        match validate_frames(&frames) {
            Err(Error::DimensionMismatch { frame, expected, got }) => {
                assert_eq!(frame, 3);
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_frames_all_empty() {
        let frames = vec![Frame::empty(), Frame::empty()];
        assert_eq!(validate_frames(&frames).unwrap(), None);
        assert_eq!(validate_frames(&[]).unwrap(), None);
    }

    #[test]
    fn test_layout_offsets() {
        let layout = FrameLayout::new(vec![2, 0, 3, 1]);
        assert_eq!(layout.n_frames(), 4);
        assert_eq!(layout.total_points(), 6);
        assert_eq!(layout.frame_offset(2), 2);
        assert_eq!(layout.global_index(2, 1), Some(3));
        assert_eq!(layout.global_index(3, 0), Some(5));
    }

    #[test]
    fn test_layout_global_index_out_of_range() {
        let layout = FrameLayout::new(vec![2, 0, 3, 1]);
        assert_eq!(layout.global_index(0, 2), None);
        assert_eq!(layout.global_index(1, 0), None);
        assert_eq!(layout.global_index(4, 0), None);
    }

    #[test]
    fn test_layout_locate_skips_empty_frames() {
        let layout = FrameLayout::new(vec![2, 0, 3, 1]);
        assert_eq!(layout.locate(0), Some((0, 0)));
        assert_eq!(layout.locate(1), Some((0, 1)));
        assert_eq!(layout.locate(2), Some((2, 0)));
        assert_eq!(layout.locate(4), Some((2, 2)));
        assert_eq!(layout.locate(5), Some((3, 0)));
        assert_eq!(layout.locate(6), None);
    }

    #[test]
    fn test_layout_leading_empty_frame() {
        let layout = FrameLayout::new(vec![0, 1]);
        assert_eq!(layout.locate(0), Some((1, 0)));
    }
}

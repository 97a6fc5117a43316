use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::analysis::bbox::Bbox;

/// A detector polygon: four corner points in the detector's point order.
///
/// Text detectors emit points clockwise starting at the top-left corner, so
/// `points[0]` is the reference point for reading order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad {
    pub points: [Vec2; 4],
}

impl Quad {
    pub fn new(points: [Vec2; 4]) -> Self {
        Self { points }
    }

    /// Axis-aligned quad spanning `bbox`, in clockwise order.
    pub fn from_bbox(bbox: &Bbox) -> Self {
        Self::new([
            bbox.min,
            Vec2::new(bbox.max.x, bbox.min.y),
            bbox.max,
            Vec2::new(bbox.min.x, bbox.max.y),
        ])
    }

    pub fn top_left(&self) -> Vec2 {
        self.points[0]
    }

    /// Min/max rectangle of the four points grown by `outset` on each side.
    pub fn text_box(&self, outset: f32) -> Bbox {
        Bbox::from_points(self.points).outset(outset)
    }
}

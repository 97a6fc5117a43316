use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box in image coordinates.
///
/// `min` is the top-left corner and `max` the bottom-right corner, with y
/// growing downward. Zero-width or zero-height boxes are valid; every metric
/// below is defined for them.
///
/// Serialized as a flat `[x_min, y_min, x_max, y_max]` array, the layout used
/// by table structure models for cell boxes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Bbox {
    /// The top-left corner.
    pub min: Vec2,
    /// The bottom-right corner.
    pub max: Vec2,
}

impl Bbox {
    /// Creates a new bounding box from its top-left and bottom-right corners.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrtable_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
    /// assert_eq!(bbox.width(), 10.0);
    /// ```
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point.
    ///
    /// An empty point set yields a zero box at the origin.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrtable_core::analysis::bbox::Bbox;
    /// let points = [Vec2::new(4.0, 1.0), Vec2::new(1.0, 3.0), Vec2::new(2.0, 7.0)];
    /// let bbox = Bbox::from_points(points);
    /// assert_eq!(bbox.min, Vec2::new(1.0, 1.0));
    /// assert_eq!(bbox.max, Vec2::new(4.0, 7.0));
    /// ```
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::new(Vec2::ZERO, Vec2::ZERO);
        };

        points.fold(Self::new(first, first), |bbox, point| Self {
            min: bbox.min.min(point),
            max: bbox.max.max(point),
        })
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Calculates the area of the bounding box (width × height).
    pub fn area(&self) -> f32 {
        let length = self.max - self.min;

        length.x * length.y
    }

    /// Calculates the area of intersection between this bounding box and another.
    ///
    /// Boxes that only touch along an edge, or do not overlap at all, have an
    /// intersection of 0.0.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrtable_core::analysis::bbox::Bbox;
    /// let bbox1 = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0));
    /// let bbox2 = Bbox::new(Vec2::new(2.0, 2.0), Vec2::new(6.0, 6.0));
    /// assert_eq!(bbox1.intersection(&bbox2), 4.0);
    /// ```
    pub fn intersection(&self, other: &Self) -> f32 {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);

        if max.x > min.x && max.y > min.y {
            (max.x - min.x) * (max.y - min.y)
        } else {
            0.
        }
    }

    /// Calculates the Intersection over Union (IoU) between this bounding box and another.
    ///
    /// Returns a value in `[0.0, 1.0]`. When the union area is zero (both
    /// boxes degenerate) the IoU is defined as 0.0.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrtable_core::analysis::bbox::Bbox;
    /// let bbox1 = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
    /// let bbox2 = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
    /// assert_eq!(bbox1.iou(&bbox2), 1.0);
    /// ```
    pub fn iou(&self, other: &Self) -> f32 {
        let intersection_area = self.intersection(other);
        let union_area = self.area() + other.area() - intersection_area;

        if union_area > 0.0 {
            intersection_area / union_area
        } else {
            0.0
        }
    }

    /// Corner distance between two boxes.
    ///
    /// The Euclidean distance between the two top-left corners plus the
    /// Euclidean distance between the two bottom-right corners. Used as the
    /// tie-break when a text box overlaps several cells equally.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrtable_core::analysis::bbox::Bbox;
    /// let a = Bbox::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    /// let b = Bbox::new(Vec2::new(3.0, 4.0), Vec2::new(10.0, 10.0));
    /// assert_eq!(a.corner_distance(&b), 5.0);
    /// ```
    pub fn corner_distance(&self, other: &Self) -> f32 {
        self.min.distance(other.min) + self.max.distance(other.max)
    }

    /// Grows the box by `margin` on every side.
    pub fn outset(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Clamps the bounding box coordinates to stay within the specified bounds.
    ///
    /// Only the top-left corner is raised to `min_bounds` and only the
    /// bottom-right corner is lowered to `max_bounds`.
    pub fn clamp(&self, min_bounds: Vec2, max_bounds: Vec2) -> Self {
        Self {
            min: self.min.max(min_bounds),
            max: self.max.min(max_bounds),
        }
    }

    /// Grows the box by `margin` and clamps it to `[0, bounds]`.
    ///
    /// This is the framing used before cropping a text box out of an image of
    /// size `bounds`: never negative, never past the image edge.
    ///
    /// # Example
    /// ```
    /// use glam::Vec2;
    /// use ferrtable_core::analysis::bbox::Bbox;
    /// let bbox = Bbox::new(Vec2::new(1.0, 10.0), Vec2::new(50.0, 99.0));
    /// let framed = bbox.expand_within(2.0, Vec2::new(100.0, 100.0));
    /// assert_eq!(framed.min, Vec2::new(0.0, 8.0));
    /// assert_eq!(framed.max, Vec2::new(52.0, 100.0));
    /// ```
    pub fn expand_within(&self, margin: f32, bounds: Vec2) -> Self {
        self.outset(margin).clamp(Vec2::ZERO, bounds)
    }
}

impl From<[f32; 4]> for Bbox {
    fn from([x_min, y_min, x_max, y_max]: [f32; 4]) -> Self {
        Self::new(Vec2::new(x_min, y_min), Vec2::new(x_max, y_max))
    }
}

impl From<Bbox> for [f32; 4] {
    fn from(bbox: Bbox) -> Self {
        [bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Bbox {
        Bbox::from([x_min, y_min, x_max, y_max])
    }

    #[test]
    fn test_bbox_area() {
        assert_eq!(bbox(0.0, 0.0, 2.0, 3.0).area(), 6.0);
        assert_eq!(bbox(1.0, 1.0, 6.0, 6.0).area(), 25.0);

        // Zero area (degenerate case)
        assert_eq!(bbox(0.0, 0.0, 5.0, 0.0).area(), 0.0);
        assert_eq!(bbox(3.0, 3.0, 3.0, 3.0).area(), 0.0);
    }

    #[test]
    fn test_bbox_from_points() {
        let rotated = [
            Vec2::new(10.0, 2.0),
            Vec2::new(30.0, 4.0),
            Vec2::new(29.0, 14.0),
            Vec2::new(9.0, 12.0),
        ];
        let bounds = Bbox::from_points(rotated);
        assert_eq!(bounds.min, Vec2::new(9.0, 2.0));
        assert_eq!(bounds.max, Vec2::new(30.0, 14.0));

        let single = Bbox::from_points([Vec2::new(5.0, 7.0)]);
        assert_eq!(single.min, single.max);

        let empty = Bbox::from_points(std::iter::empty());
        assert_eq!(empty, bbox(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_bbox_intersection_area() {
        // Partial overlap (2×2)
        assert_eq!(bbox(0.0, 0.0, 4.0, 4.0).intersection(&bbox(2.0, 2.0, 6.0, 6.0)), 4.0);

        // No overlap
        assert_eq!(bbox(0.0, 0.0, 2.0, 2.0).intersection(&bbox(3.0, 3.0, 5.0, 5.0)), 0.0);

        // Containment, both directions
        let outer = bbox(0.0, 0.0, 10.0, 10.0);
        let inner = bbox(2.0, 3.0, 5.0, 7.0);
        assert_eq!(outer.intersection(&inner), 12.0);
        assert_eq!(inner.intersection(&outer), 12.0);

        // Edge touching
        assert_eq!(bbox(0.0, 0.0, 2.0, 2.0).intersection(&bbox(2.0, 0.0, 4.0, 2.0)), 0.0);
    }

    #[test]
    fn test_bbox_iou() {
        let a = bbox(0.0, 0.0, 4.0, 4.0);
        assert_eq!(a.iou(&a), 1.0);

        // 4 / (16 + 16 - 4)
        let b = bbox(2.0, 2.0, 6.0, 6.0);
        assert!((a.iou(&b) - 4.0 / 28.0).abs() < 1e-6);

        // Cell containing a text box
        let cell = bbox(0.0, 0.0, 10.0, 10.0);
        let text = bbox(2.0, 3.0, 5.0, 7.0);
        assert_eq!(cell.iou(&text), 0.12);

        assert_eq!(bbox(0.0, 0.0, 2.0, 2.0).iou(&bbox(3.0, 3.0, 5.0, 5.0)), 0.0);
    }

    #[test]
    fn test_bbox_iou_degenerate() {
        // Zero union area must not divide by zero
        let line1 = bbox(0.0, 0.0, 5.0, 0.0);
        let line2 = bbox(2.0, 0.0, 7.0, 0.0);
        assert_eq!(line1.iou(&line2), 0.0);

        let point = bbox(5.0, 5.0, 5.0, 5.0);
        assert_eq!(point.iou(&point), 0.0);

        // Degenerate against a real box
        let cell = bbox(0.0, 0.0, 10.0, 10.0);
        assert_eq!(point.iou(&cell), 0.0);
        assert_eq!(cell.iou(&point), 0.0);
    }

    #[test]
    fn test_bbox_iou_symmetric_and_bounded() {
        let boxes = [
            bbox(0.0, 0.0, 4.0, 4.0),
            bbox(2.0, 1.0, 9.0, 3.0),
            bbox(-3.0, -3.0, 1.0, 1.0),
            bbox(10.0, 10.0, 12.0, 30.0),
            bbox(1.0, 1.0, 1.0, 8.0),
            bbox(0.5, 0.5, 3.5, 3.5),
        ];

        for a in &boxes {
            for b in &boxes {
                let ab = a.iou(b);
                assert_eq!(ab, b.iou(a));
                assert!((0.0..=1.0).contains(&ab));
            }
            if a.area() > 0.0 {
                assert_eq!(a.iou(a), 1.0);
            }
        }
    }

    #[test]
    fn test_bbox_corner_distance() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.corner_distance(&a), 0.0);

        // 3-4-5 on the top-left, 6-8-10 on the bottom-right
        let b = bbox(3.0, 4.0, 16.0, 18.0);
        assert_eq!(a.corner_distance(&b), 15.0);
        assert_eq!(b.corner_distance(&a), 15.0);

        // Corners are compared like-for-like, never crosswise
        let shifted = bbox(10.0, 0.0, 20.0, 10.0);
        assert_eq!(a.corner_distance(&shifted), 20.0);

        let degenerate = bbox(5.0, 5.0, 5.0, 5.0);
        assert!(a.corner_distance(&degenerate).is_finite());
    }

    #[test]
    fn test_bbox_outset() {
        let grown = bbox(10.0, 20.0, 30.0, 40.0).outset(1.0);
        assert_eq!(grown, bbox(9.0, 19.0, 31.0, 41.0));

        let point = bbox(5.0, 5.0, 5.0, 5.0).outset(1.0);
        assert_eq!(point.area(), 4.0);
    }

    #[test]
    fn test_bbox_expand_within() {
        let bounds = Vec2::new(200.0, 100.0);

        // Interior box gets the full margin
        let interior = bbox(50.0, 30.0, 80.0, 45.0).expand_within(2.0, bounds);
        assert_eq!(interior, bbox(48.0, 28.0, 82.0, 47.0));

        // Clamped at the top-left image edge
        let corner = bbox(1.0, 0.5, 20.0, 10.0).expand_within(2.0, bounds);
        assert_eq!(corner, bbox(0.0, 0.0, 22.0, 12.0));

        // Clamped at the bottom-right image edge
        let far = bbox(190.0, 90.0, 199.0, 99.0).expand_within(2.0, bounds);
        assert_eq!(far, bbox(188.0, 88.0, 200.0, 100.0));
    }

    #[test]
    fn test_bbox_json_layout() -> Result<(), Box<dyn std::error::Error>> {
        let cell: Bbox = serde_json::from_str("[1.0, 2.0, 30.5, 40.0]")?;
        assert_eq!(cell, bbox(1.0, 2.0, 30.5, 40.0));

        let json = serde_json::to_string(&cell)?;
        assert_eq!(json, "[1.0,2.0,30.5,40.0]");

        Ok(())
    }
}

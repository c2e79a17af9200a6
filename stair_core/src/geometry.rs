//! # Plan Geometry Primitives
//!
//! Points and bounding boxes in the horizontal plan. Every coordinate in the
//! emitted model is an absolute plan position in centimeters.

use serde::{Deserialize, Serialize};

/// A point in the horizontal plan (cm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    /// Move by `distance` along the vector `(dx, dy)`.
    pub fn offset(self, (dx, dy): (f64, f64), distance: f64) -> Self {
        Point2::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// Point at `radius` from `self` along the angle `angle_deg`.
    pub fn polar(self, radius: f64, angle_deg: f64) -> Self {
        let theta = angle_deg.to_radians();
        Point2::new(self.x + radius * theta.cos(), self.y + radius * theta.sin())
    }

    pub fn midpoint(self, other: Point2) -> Self {
        Point2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Signed area of a closed polygon (shoelace). Positive when counter-clockwise.
pub fn signed_area(polygon: &[Point2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice / 2.0
}

/// Axis-aligned bounding box of the plan, for view fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlanBounds {
    /// Bounds of a set of points; `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = PlanBounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.include(*p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: Point2) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

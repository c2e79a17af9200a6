//! # Cursor Transport
//!
//! The cursor is the moving placement frame: a plan position, an elevation
//! and a heading. Flights are laid out to the left of the cursor line
//! (along [`Cursor::perp`]), starting at the cursor and running along
//! [`Cursor::dir`].
//!
//! The cursor is a plain `Copy` value. The assembler rebinds it after every
//! segment; nothing mutates it in place and it is never rewound.
//!
//! ```rust
//! use stair_core::calculations::cursor::{Cursor, FrameDelta};
//!
//! let start = Cursor::origin();
//! let after_ramp = start.advance_by_run(476.0).rise(300.0);
//! assert_eq!((after_ramp.x, after_ramp.z), (476.0, 300.0));
//!
//! let turned = after_ramp.advance_by_connector(&FrameDelta {
//!     dx: 0.0,
//!     dy: 100.0,
//!     dz: 0.0,
//!     d_heading_deg: 90.0,
//! });
//! assert_eq!(turned.heading_deg, 90.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;
use crate::units::Degrees;

/// Placement frame: position (cm), elevation (cm) and heading (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Heading measured counter-clockwise from +x. Not normalized.
    pub heading_deg: f64,
}

/// Frame change produced by a connector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameDelta {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub d_heading_deg: f64,
}

impl Cursor {
    /// Start of every assembly: origin, elevation 0, heading 0°.
    pub fn origin() -> Self {
        Cursor::default()
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Walking direction `(cos θ, sin θ)`
    pub fn dir(&self) -> (f64, f64) {
        Degrees(self.heading_deg).unit_vector()
    }

    /// Left-hand perpendicular `(-sin θ, cos θ)`
    pub fn perp(&self) -> (f64, f64) {
        let (c, s) = self.dir();
        (-s, c)
    }

    /// Plan point at `along` cm in the walking direction and `across` cm to the left.
    pub fn local_to_plan(&self, along: f64, across: f64) -> Point2 {
        self.position().offset(self.dir(), along).offset(self.perp(), across)
    }

    /// Move `run` cm along the heading; elevation and heading unchanged.
    #[must_use]
    pub fn advance_by_run(self, run: f64) -> Cursor {
        let (dx, dy) = self.dir();
        Cursor {
            x: self.x + dx * run,
            y: self.y + dy * run,
            ..self
        }
    }

    /// Raise the elevation by `dz` cm.
    #[must_use]
    pub fn rise(self, dz: f64) -> Cursor {
        Cursor { z: self.z + dz, ..self }
    }

    /// Apply a connector's frame change.
    #[must_use]
    pub fn advance_by_connector(self, delta: &FrameDelta) -> Cursor {
        Cursor {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
            z: self.z + delta.dz,
            heading_deg: self.heading_deg + delta.d_heading_deg,
        }
    }

    /// The delta that takes `self` to `target`.
    pub fn delta_to(&self, target: &Cursor) -> FrameDelta {
        FrameDelta {
            dx: target.x - self.x,
            dy: target.y - self.y,
            dz: target.z - self.z,
            d_heading_deg: target.heading_deg - self.heading_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_origin() {
        let c = Cursor::origin();
        assert_eq!((c.x, c.y, c.z, c.heading_deg), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(c.dir(), (1.0, 0.0));
    }

    #[test]
    fn test_perp_is_left_hand() {
        let c = Cursor { heading_deg: 90.0, ..Cursor::origin() };
        let (px, py) = c.perp();
        assert!((px + 1.0).abs() < EPS);
        assert!(py.abs() < EPS);
    }

    #[test]
    fn test_advance_by_run_keeps_elevation() {
        let c = Cursor { z: 120.0, heading_deg: 180.0, ..Cursor::origin() };
        let moved = c.advance_by_run(250.0);
        assert!((moved.x + 250.0).abs() < EPS);
        assert!(moved.y.abs() < EPS);
        assert_eq!(moved.z, 120.0);
        assert_eq!(moved.heading_deg, 180.0);
    }

    #[test]
    fn test_connector_delta_roundtrip() {
        let a = Cursor { x: 10.0, y: 5.0, z: 100.0, heading_deg: 90.0 };
        let b = Cursor { x: -40.0, y: 75.0, z: 160.0, heading_deg: 270.0 };
        let delta = a.delta_to(&b);
        assert_eq!(a.advance_by_connector(&delta), b);
    }

    #[test]
    fn test_local_to_plan() {
        let c = Cursor { x: 100.0, y: 0.0, z: 0.0, heading_deg: 90.0 };
        let p = c.local_to_plan(30.0, 100.0);
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - 30.0).abs() < EPS);
    }
}

//! # Unit Types
//!
//! Type-safe wrappers for the units the stair engine works in. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just f64 wrappers).
//!
//! ## Conventions
//!
//! All plan coordinates, rises and runs are centimeters. Headings and
//! angular sweeps are degrees in the model and in configuration files;
//! radians only appear at the trigonometry boundary.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::units::{Centimeters, Degrees, Meters, Radians};
//!
//! let rise = Centimeters(300.0);
//! let rise_m: Meters = rise.into();
//! assert_eq!(rise_m.0, 3.0);
//!
//! let quarter: Radians = Degrees(90.0).into();
//! assert!((quarter.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Degrees {
    /// Unit vector `(cos θ, sin θ)` pointing along this angle
    pub fn unit_vector(self) -> (f64, f64) {
        let Radians(theta) = self.into();
        (theta.cos(), theta.sin())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Degrees);

// ============================================================================
// Display Rounding
// ============================================================================

/// Round to 2 decimal places for display.
///
/// The model keeps full precision; this is only for messages and summaries.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centimeters_to_meters() {
        let cm = Centimeters(476.0);
        let m: Meters = cm.into();
        assert!((m.0 - 4.76).abs() < 1e-12);
    }

    #[test]
    fn test_meters_to_centimeters() {
        let cm: Centimeters = Meters(2.9).into();
        assert!((cm.0 - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_degrees_unit_vector() {
        let (x, y) = Degrees(90.0).unit_vector();
        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Degrees(90.0);
        let b = Degrees(30.0);
        assert_eq!((a + b).0, 120.0);
        assert_eq!((a - b).0, 60.0);
        assert_eq!((b * 3.0).0, 90.0);
        assert_eq!((a / 3.0).0, 30.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(16.666_666), 16.67);
        assert_eq!(round2(32.224_9), 32.22);
        assert_eq!(round2(-0.004), -0.0);
    }

    #[test]
    fn test_serialization() {
        let cm = Centimeters(12.5);
        let json = serde_json::to_string(&cm).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Centimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(cm, roundtrip);
    }
}

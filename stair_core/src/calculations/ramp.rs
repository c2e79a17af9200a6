//! # Ramp Sizing
//!
//! Turns a flight's vertical rise and a riser/tread target into an integral
//! number of risers and the exact riser/tread dimensions that result.
//!
//! ## Rules
//!
//! - `num_risers = round(height / desired_riser)`, at least 2
//! - `actual_riser = height / num_risers` (re-derived, never the rounded target)
//! - `num_treads = num_risers - 1` (the last riser lands on the next level)
//! - With Blondel sizing and no explicit tread, the tread is
//!   `clamp(63 - 2 × riser, 20, 40)`
//! - `slope = atan2(height, total_run)` in degrees
//!
//! ## Example
//!
//! ```rust
//! use stair_core::calculations::compliance::ComplianceSettings;
//! use stair_core::calculations::ramp::{size, RampRequest};
//!
//! let request = RampRequest {
//!     label: "Ramp 1".to_string(),
//!     height_cm: 300.0,
//!     desired_riser_cm: 17.0,
//!     desired_tread_cm: Some(28.0),
//!     run_length_cm: None,
//!     width_cm: 100.0,
//!     use_blondel: false,
//! };
//!
//! let ramp = size(&request, &ComplianceSettings::default()).unwrap();
//! assert_eq!(ramp.num_risers, 18);
//! assert_eq!(ramp.num_treads, 17);
//! assert!((ramp.total_run_cm - 476.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::compliance::ComplianceSettings;
use crate::errors::{StairError, StairResult};

/// Upper bound on risers in a single flight
pub const MAX_RISERS: u32 = 200;

/// Sizing request for one flight, after height allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RampRequest {
    /// Label used in error messages (e.g. "Ramp 2")
    pub label: String,

    /// Vertical rise of this flight (cm)
    pub height_cm: f64,

    /// Target riser height (cm)
    pub desired_riser_cm: f64,

    /// Explicit tread depth (cm), takes precedence over everything else
    pub desired_tread_cm: Option<f64>,

    /// Horizontal length of the flight (cm); tread = run / num_treads
    pub run_length_cm: Option<f64>,

    /// Clear width of the flight (cm)
    pub width_cm: f64,

    /// Derive the tread from the Blondel formula when no tread is given
    pub use_blondel: bool,
}

/// Where the actual tread depth came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreadSource {
    /// `tread_target_cm` from the configuration
    Explicit,
    /// `run_length_cm / num_treads`
    RunLength,
    /// `63 - 2 × riser`, clamped
    Blondel,
}

/// A sized straight flight. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    /// Vertical rise (cm)
    pub height_cm: f64,

    /// Clear width (cm)
    pub width_cm: f64,

    /// Number of risers (≥ 2)
    pub num_risers: u32,

    /// Number of treads, always `num_risers - 1`
    pub num_treads: u32,

    /// `height / num_risers` (cm)
    pub actual_riser_cm: f64,

    /// Tread depth (cm)
    pub actual_tread_cm: f64,

    /// `num_treads × actual_tread` (cm)
    pub total_run_cm: f64,

    /// Pitch of the flight (degrees)
    pub slope_angle_deg: f64,

    pub tread_source: TreadSource,

    /// `2 × riser + tread` (cm), present when Blondel sizing is on
    pub blondel_value_cm: Option<f64>,

    /// Whether the Blondel value lies in the configured band
    pub blondel_ok: Option<bool>,
}

impl Ramp {
    /// Step comfort value `2 × riser + tread` (cm)
    pub fn blondel(&self) -> f64 {
        2.0 * self.actual_riser_cm + self.actual_tread_cm
    }
}

impl RampRequest {
    /// Validate input parameters.
    pub fn validate(&self) -> StairResult<()> {
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(StairError::invalid_configuration(
                format!("{}: height_cm", self.label),
                self.height_cm.to_string(),
                "Height must be positive",
            ));
        }
        if !(self.desired_riser_cm.is_finite() && self.desired_riser_cm > 0.0) {
            return Err(StairError::invalid_configuration(
                format!("{}: riser_target_cm", self.label),
                self.desired_riser_cm.to_string(),
                "Riser target must be positive",
            ));
        }
        if !(self.width_cm.is_finite() && self.width_cm > 0.0) {
            return Err(StairError::invalid_configuration(
                format!("{}: width_cm", self.label),
                self.width_cm.to_string(),
                "Width must be positive",
            ));
        }
        Ok(())
    }
}

/// Blondel-optimal tread for a riser, clamped to the ergonomic bounds.
pub fn blondel_tread(riser_cm: f64, settings: &ComplianceSettings) -> f64 {
    (settings.blondel_target_cm - 2.0 * riser_cm)
        .clamp(settings.min_blondel_tread_cm, settings.max_blondel_tread_cm)
}

/// Size one flight.
///
/// # Returns
///
/// * `Ok(Ramp)` - Sized flight
/// * `Err(StairError::InvalidConfiguration)` - Non-positive height, riser target or width
/// * `Err(StairError::GeometryDegenerate)` - Fewer than 2 risers, or a tread ≤ 0
pub fn size(request: &RampRequest, settings: &ComplianceSettings) -> StairResult<Ramp> {
    request.validate()?;

    let rounded = (request.height_cm / request.desired_riser_cm).round();
    if rounded < 2.0 {
        return Err(StairError::degenerate(
            &request.label,
            format!(
                "{:.2} cm rise at a {:.2} cm riser target gives {} riser(s); a flight needs at least 2",
                request.height_cm, request.desired_riser_cm, rounded
            ),
        ));
    }
    if rounded > f64::from(MAX_RISERS) {
        return Err(StairError::invalid_configuration(
            format!("{}: riser_target_cm", request.label),
            request.desired_riser_cm.to_string(),
            format!("Resolves to {} risers, more than {}", rounded, MAX_RISERS),
        ));
    }
    let num_risers = rounded as u32;
    let num_treads = num_risers - 1;
    let actual_riser_cm = request.height_cm / f64::from(num_risers);

    let (actual_tread_cm, tread_source) = match (request.desired_tread_cm, request.run_length_cm) {
        (Some(tread), _) => (tread, TreadSource::Explicit),
        (None, _) if request.use_blondel => {
            (blondel_tread(actual_riser_cm, settings), TreadSource::Blondel)
        }
        (None, Some(run)) => (run / f64::from(num_treads), TreadSource::RunLength),
        (None, None) => (blondel_tread(actual_riser_cm, settings), TreadSource::Blondel),
    };
    if !(actual_tread_cm.is_finite() && actual_tread_cm > 0.0) {
        return Err(StairError::degenerate(
            &request.label,
            format!("tread depth {} cm is not positive", actual_tread_cm),
        ));
    }

    let total_run_cm = f64::from(num_treads) * actual_tread_cm;
    let slope_angle_deg = request.height_cm.atan2(total_run_cm).to_degrees();

    let (blondel_value_cm, blondel_ok) = if request.use_blondel {
        let value = 2.0 * actual_riser_cm + actual_tread_cm;
        (Some(value), Some(settings.blondel_band.contains(value)))
    } else {
        (None, None)
    };

    Ok(Ramp {
        height_cm: request.height_cm,
        width_cm: request.width_cm,
        num_risers,
        num_treads,
        actual_riser_cm,
        actual_tread_cm,
        total_run_cm,
        slope_angle_deg,
        tread_source,
        blondel_value_cm,
        blondel_ok,
    })
}

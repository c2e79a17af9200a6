//! # Ergonomic Compliance
//!
//! Advisory checks over sized flights and winders. Nothing here halts
//! assembly: every finding becomes a [`ComplianceWarning`] in the model,
//! and all of them are collected.
//!
//! ## Checks
//!
//! | Check | Default threshold |
//! |-------|-------------------|
//! | Blondel `2a + p` outside band (only when Blondel sizing is on) | `[60, 66]` cm |
//! | Slope steep / very steep | > 40° / > 45° |
//! | Riser too high | > 22 cm |
//! | Tread too narrow | < 22 cm |
//!
//! The Blondel band is a parameter: [`BlondelBand::ADVISORY`] (`[60, 66]`)
//! is the default, [`BlondelBand::STRICT`] (`[62, 64]`) is the textbook ideal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::connector::WinderGeometry;
use crate::calculations::ramp::Ramp;
use crate::units::round2;

/// Closed interval of acceptable `2 × riser + tread` values (cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlondelBand {
    pub min_cm: f64,
    pub max_cm: f64,
}

impl BlondelBand {
    /// Textbook ideal range
    pub const STRICT: BlondelBand = BlondelBand { min_cm: 62.0, max_cm: 64.0 };

    /// Tolerance used for advisory warnings
    pub const ADVISORY: BlondelBand = BlondelBand { min_cm: 60.0, max_cm: 66.0 };

    pub fn new(min_cm: f64, max_cm: f64) -> Self {
        BlondelBand { min_cm, max_cm }
    }

    pub fn contains(&self, value_cm: f64) -> bool {
        value_cm >= self.min_cm && value_cm <= self.max_cm
    }
}

impl Default for BlondelBand {
    fn default() -> Self {
        BlondelBand::ADVISORY
    }
}

/// Thresholds for sizing and compliance checks.
///
/// ## JSON Example
///
/// ```json
/// {
///   "blondel_band": { "min_cm": 62.0, "max_cm": 64.0 },
///   "max_riser_cm": 20.0
/// }
/// ```
///
/// Omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceSettings {
    /// Acceptable Blondel range
    pub blondel_band: BlondelBand,

    /// Blondel step length used to derive a tread (cm)
    pub blondel_target_cm: f64,

    /// Lower clamp for a Blondel-derived tread (cm)
    pub min_blondel_tread_cm: f64,

    /// Upper clamp for a Blondel-derived tread (cm)
    pub max_blondel_tread_cm: f64,

    /// Slope above which a flight is "steep" (degrees)
    pub steep_slope_deg: f64,

    /// Slope above which a flight is "very steep" (degrees)
    pub very_steep_slope_deg: f64,

    /// Highest comfortable riser (cm)
    pub max_riser_cm: f64,

    /// Narrowest comfortable tread (cm)
    pub min_tread_cm: f64,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        ComplianceSettings {
            blondel_band: BlondelBand::ADVISORY,
            blondel_target_cm: 63.0,
            min_blondel_tread_cm: 20.0,
            max_blondel_tread_cm: 40.0,
            steep_slope_deg: 40.0,
            very_steep_slope_deg: 45.0,
            max_riser_cm: 22.0,
            min_tread_cm: 22.0,
        }
    }
}

/// Category of an advisory finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    BlondelOutOfBand,
    Steep,
    VerySteep,
    HighRiser,
    NarrowTread,
}

/// One advisory finding. Never aborts assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceWarning {
    /// Segment the finding refers to, e.g. "Ramp 2" or "Winder 1"
    pub segment: String,
    pub kind: WarningKind,
    /// Offending value at full precision
    pub value: f64,
    /// Human-readable message with 2-decimal values
    pub message: String,
}

impl ComplianceWarning {
    fn new(segment: &str, kind: WarningKind, value: f64, detail: String) -> Self {
        ComplianceWarning {
            segment: segment.to_string(),
            kind,
            value,
            message: format!("{}: {}", segment, detail),
        }
    }
}

impl fmt::Display for ComplianceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Check one flight. `index` is 0-based; messages use 1-based numbering.
pub fn check_ramp(index: usize, ramp: &Ramp, settings: &ComplianceSettings) -> Vec<ComplianceWarning> {
    let segment = format!("Ramp {}", index + 1);
    let mut warnings = Vec::new();

    if let (Some(value), Some(false)) = (ramp.blondel_value_cm, ramp.blondel_ok) {
        warnings.push(ComplianceWarning::new(
            &segment,
            WarningKind::BlondelOutOfBand,
            value,
            format!(
                "Blondel = {} cm (acceptable {}-{})",
                round2(value),
                settings.blondel_band.min_cm,
                settings.blondel_band.max_cm
            ),
        ));
    }

    let slope = ramp.slope_angle_deg;
    if slope > settings.very_steep_slope_deg {
        warnings.push(ComplianceWarning::new(
            &segment,
            WarningKind::VerySteep,
            slope,
            format!("slope {}° (> {}° - very steep)", round2(slope), settings.very_steep_slope_deg),
        ));
    } else if slope > settings.steep_slope_deg {
        warnings.push(ComplianceWarning::new(
            &segment,
            WarningKind::Steep,
            slope,
            format!("slope {}° (> {}° - steep)", round2(slope), settings.steep_slope_deg),
        ));
    }

    if ramp.actual_riser_cm > settings.max_riser_cm {
        warnings.push(ComplianceWarning::new(
            &segment,
            WarningKind::HighRiser,
            ramp.actual_riser_cm,
            format!(
                "riser {} cm (> {} cm - high)",
                round2(ramp.actual_riser_cm),
                settings.max_riser_cm
            ),
        ));
    }

    if ramp.actual_tread_cm < settings.min_tread_cm {
        warnings.push(ComplianceWarning::new(
            &segment,
            WarningKind::NarrowTread,
            ramp.actual_tread_cm,
            format!(
                "tread {} cm (< {} cm - narrow)",
                round2(ramp.actual_tread_cm),
                settings.min_tread_cm
            ),
        ));
    }

    warnings
}

/// Check the riser height of a winder run.
pub fn check_winder(
    index: usize,
    winder: &WinderGeometry,
    settings: &ComplianceSettings,
) -> Vec<ComplianceWarning> {
    let segment = format!("Winder {}", index + 1);
    if winder.riser_height_cm > settings.max_riser_cm {
        vec![ComplianceWarning::new(
            &segment,
            WarningKind::HighRiser,
            winder.riser_height_cm,
            format!(
                "riser {} cm (> {} cm - high)",
                round2(winder.riser_height_cm),
                settings.max_riser_cm
            ),
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::ramp::TreadSource;

    fn ramp(riser: f64, tread: f64, slope: f64, blondel: Option<f64>) -> Ramp {
        let band = BlondelBand::ADVISORY;
        Ramp {
            height_cm: riser * 10.0,
            width_cm: 100.0,
            num_risers: 10,
            num_treads: 9,
            actual_riser_cm: riser,
            actual_tread_cm: tread,
            total_run_cm: tread * 9.0,
            slope_angle_deg: slope,
            tread_source: TreadSource::Explicit,
            blondel_value_cm: blondel,
            blondel_ok: blondel.map(|v| band.contains(v)),
        }
    }

    #[test]
    fn test_comfortable_ramp_has_no_warnings() {
        let r = ramp(17.0, 29.0, 32.0, Some(63.0));
        assert!(check_ramp(0, &r, &ComplianceSettings::default()).is_empty());
    }

    #[test]
    fn test_all_warnings_are_collected() {
        // Steep, high riser, narrow tread and out-of-band Blondel at once
        let r = ramp(24.0, 20.0, 50.0, Some(68.0));
        let warnings = check_ramp(1, &r, &ComplianceSettings::default());
        let kinds: Vec<WarningKind> = warnings.iter().map(|w| w.kind).collect();

        assert_eq!(
            kinds,
            vec![
                WarningKind::BlondelOutOfBand,
                WarningKind::VerySteep,
                WarningKind::HighRiser,
                WarningKind::NarrowTread,
            ]
        );
        assert!(warnings.iter().all(|w| w.segment == "Ramp 2"));
        assert!(warnings[1].message.starts_with("Ramp 2: slope 50°"));
    }

    #[test]
    fn test_steep_but_not_very_steep() {
        let r = ramp(18.0, 25.0, 42.5, None);
        let warnings = check_ramp(0, &r, &ComplianceSettings::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Steep);
    }

    #[test]
    fn test_blondel_skipped_when_not_computed() {
        let r = ramp(17.0, 40.0, 25.0, None);
        assert!(check_ramp(0, &r, &ComplianceSettings::default()).is_empty());
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        assert!(BlondelBand::STRICT.contains(62.0));
        assert!(BlondelBand::STRICT.contains(64.0));
        assert!(!BlondelBand::STRICT.contains(64.01));
        assert!(BlondelBand::ADVISORY.contains(60.0));
        assert!(!BlondelBand::ADVISORY.contains(59.99));
    }

    #[test]
    fn test_partial_settings_deserialize() {
        let settings: ComplianceSettings =
            serde_json::from_str(r#"{ "max_riser_cm": 20.0 }"#).unwrap();
        assert_eq!(settings.max_riser_cm, 20.0);
        assert_eq!(settings.blondel_band, BlondelBand::ADVISORY);
        assert_eq!(settings.steep_slope_deg, 40.0);
    }
}

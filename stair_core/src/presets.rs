//! # Presets
//!
//! Ready-made configurations for every named [`StairType`], in proportional
//! sizing mode. Useful as a starting point for a configuration file and for
//! the CLI's `--preset` flag.
//!
//! Defaults:
//!
//! - about one step per 17 cm of height, at least 2 risers per flight
//! - Blondel-derived treads
//! - landings as deep as the stair is wide, 10 cm between U flights
//! - 3 winders over a quarter turn (6 over a half turn) around a 10 cm pivot
//!
//! ```rust
//! use stair_core::calculations::stair::{assemble, StairType};
//! use stair_core::presets::preset;
//!
//! let input = preset(StairType::LWinder, 290.0, 90.0).unwrap();
//! let model = assemble(&input).unwrap();
//! assert!((model.totals.total_height_cm - 290.0).abs() < 1e-9);
//! ```

use crate::calculations::compliance::ComplianceSettings;
use crate::calculations::connector::{ConnectorSpec, LandingSpec, WinderSpec, DEFAULT_U_GAP_CM};
use crate::calculations::stair::{RampSpec, SizingMode, StairInput, StairType};
use crate::errors::{StairError, StairResult};

/// Riser height used to estimate the step count (cm)
pub const PRESET_RISER_CM: f64 = 17.0;

/// Winders in a quarter turn
pub const PRESET_WINDERS_PER_QUARTER: u32 = 3;

/// Pivot radius of quarter-turn winders (cm)
pub const PRESET_INNER_RADIUS_CM: f64 = 10.0;

/// Default floor slab thickness (cm)
pub const PRESET_SLAB_THICKNESS_CM: f64 = 20.0;

/// Build a complete configuration for `stair_type`.
///
/// `StairType::Custom` has no fixed layout and gets a straight flight.
///
/// # Returns
///
/// * `Ok(StairInput)` - Proportional-mode configuration
/// * `Err(StairError::InvalidConfiguration)` - Non-positive height or width,
///   or a height too low to give every flight 2 risers
pub fn preset(stair_type: StairType, total_height_cm: f64, width_cm: f64) -> StairResult<StairInput> {
    if !(total_height_cm.is_finite() && total_height_cm > 0.0) {
        return Err(StairError::invalid_configuration(
            "total_height_cm",
            total_height_cm.to_string(),
            "Total height must be positive",
        ));
    }
    if !(width_cm.is_finite() && width_cm > 0.0) {
        return Err(StairError::invalid_configuration(
            "stair_width_cm",
            width_cm.to_string(),
            "Width must be positive",
        ));
    }

    let total_steps = (total_height_cm / PRESET_RISER_CM).round() as u32;
    let landing = |angle: f64| {
        let mut spec = LandingSpec::new(width_cm, angle);
        if angle == 180.0 {
            spec.gap_cm = Some(DEFAULT_U_GAP_CM);
        }
        ConnectorSpec::Landing(spec)
    };
    let quarter_winder = ConnectorSpec::Winder(WinderSpec::new(
        PRESET_WINDERS_PER_QUARTER,
        90.0,
        PRESET_INNER_RADIUS_CM,
    ));
    // Pivot at half the gap keeps the two flights DEFAULT_U_GAP_CM apart
    let half_winder = ConnectorSpec::Winder(WinderSpec::new(
        2 * PRESET_WINDERS_PER_QUARTER,
        180.0,
        DEFAULT_U_GAP_CM / 2.0,
    ));

    let (flights, connectors) = match stair_type {
        StairType::Straight | StairType::Custom => (1, vec![]),
        StairType::LLanding => (2, vec![landing(90.0)]),
        StairType::ULanding => (2, vec![landing(180.0)]),
        StairType::LWinder => (2, vec![quarter_winder]),
        StairType::UWinder => (2, vec![half_winder]),
        StairType::ThreeFlight => (3, vec![landing(90.0), landing(90.0)]),
    };

    let winder_steps: u32 = connectors
        .iter()
        .map(|c| match c {
            ConnectorSpec::Winder(w) => w.num_winders,
            ConnectorSpec::Landing(_) => 0,
        })
        .sum();
    let flight_steps = split_steps(total_steps.saturating_sub(winder_steps), flights);
    if flight_steps.iter().any(|&n| n < 2) {
        return Err(StairError::invalid_configuration(
            "total_height_cm",
            total_height_cm.to_string(),
            format!("Too low for a {} stair: every flight needs at least 2 risers", stair_type.tag()),
        ));
    }

    tracing::debug!(
        stair_type = stair_type.tag(),
        total_steps,
        ?flight_steps,
        "built preset"
    );

    Ok(StairInput {
        label: stair_type.display_name().to_string(),
        stair_type,
        stair_width_cm: width_cm,
        slab_thickness_cm: PRESET_SLAB_THICKNESS_CM,
        sizing: SizingMode::Proportional { total_height_cm },
        ramps: flight_steps
            .into_iter()
            .map(|n| RampSpec {
                num_steps: Some(n),
                ..RampSpec::default()
            })
            .collect(),
        connectors,
        use_blondel: true,
        check_compliance: true,
        compliance: ComplianceSettings::default(),
    })
}

/// Split `steps` across `parts` flights, earlier flights taking the extra.
fn split_steps(steps: u32, parts: u32) -> Vec<u32> {
    let base = steps / parts;
    let extra = steps % parts;
    (0..parts).map(|i| base + u32::from(i < extra)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::connector::ConnectorShape;
    use crate::calculations::stair::assemble;

    #[test]
    fn test_every_preset_assembles() {
        for stair_type in StairType::ALL {
            let input = preset(stair_type, 300.0, 100.0).unwrap();
            input.validate().unwrap();
            let model = assemble(&input).unwrap();
            assert!(
                (model.totals.total_height_cm - 300.0).abs() < 1e-9,
                "{} height",
                stair_type.tag()
            );
        }
    }

    #[test]
    fn test_step_split() {
        assert_eq!(split_steps(18, 1), vec![18]);
        assert_eq!(split_steps(17, 2), vec![9, 8]);
        assert_eq!(split_steps(16, 3), vec![6, 5, 5]);
    }

    #[test]
    fn test_l_winder_counts_wedges() {
        // 306 / 17 = 18 steps, 3 of them winders
        let input = preset(StairType::LWinder, 306.0, 100.0).unwrap();
        let steps: Vec<u32> = input.ramps.iter().filter_map(|r| r.num_steps).collect();
        assert_eq!(steps, vec![8, 7]);

        let model = assemble(&input).unwrap();
        match &model.connectors[0].shape {
            ConnectorShape::Winder(w) => {
                assert_eq!(w.steps.len(), 3);
                assert!((w.riser_height_cm - 17.0).abs() < 1e-9);
            }
            other => panic!("expected winder, got {:?}", other),
        }
    }

    #[test]
    fn test_u_landing_gap() {
        let input = preset(StairType::ULanding, 300.0, 90.0).unwrap();
        match &input.connectors[0] {
            ConnectorSpec::Landing(l) => {
                assert_eq!(l.depth_cm, 90.0);
                assert_eq!(l.gap_cm, Some(DEFAULT_U_GAP_CM));
            }
            other => panic!("expected landing, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_preset_inputs() {
        assert!(preset(StairType::Straight, 0.0, 100.0).is_err());
        assert!(preset(StairType::Straight, 300.0, -1.0).is_err());
        // 60 cm gives 4 steps: not enough for three flights
        let err = preset(StairType::ThreeFlight, 60.0, 100.0).unwrap_err();
        assert!(err.is_configuration_error());
    }
}

//! # Side Profile
//!
//! Unrolls the stair along its walking line into a sawtooth elevation
//! profile: x is distance walked (cm), z is elevation (cm). Section-view
//! renderers draw these segments directly.

use serde::{Deserialize, Serialize};

use crate::calculations::connector::ConnectorShape;
use crate::calculations::stair::{ConnectorGeometry, RampGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSegmentKind {
    Riser,
    Tread,
    Landing,
    WinderRiser,
    WinderTread,
}

/// Straight segment of the unrolled profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSegment {
    pub kind: ProfileSegmentKind,
    pub x1: f64,
    pub z1: f64,
    pub x2: f64,
    pub z2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideProfile {
    pub segments: Vec<ProfileSegment>,
    pub total_run_cm: f64,
    pub total_rise_cm: f64,
}

/// Build the profile from placed flights and the connectors between them.
///
/// `connectors[i]` is expected to follow `ramps[i]`.
pub fn build(ramps: &[RampGeometry], connectors: &[ConnectorGeometry]) -> SideProfile {
    let mut segments = Vec::new();
    let mut x = 0.0;
    let mut z = 0.0;

    for (i, geo) in ramps.iter().enumerate() {
        let ramp = &geo.ramp;
        let tread = ramp.actual_tread_cm;
        let riser = ramp.actual_riser_cm;

        for s in 0..ramp.num_risers {
            let sx = x + f64::from(s) * tread;
            let sz = z + f64::from(s) * riser;
            segments.push(ProfileSegment {
                kind: ProfileSegmentKind::Riser,
                x1: sx,
                z1: sz,
                x2: sx,
                z2: sz + riser,
            });
            // The top riser lands on the next level, no tread of its own
            if s < ramp.num_treads {
                segments.push(ProfileSegment {
                    kind: ProfileSegmentKind::Tread,
                    x1: sx,
                    z1: sz + riser,
                    x2: sx + tread,
                    z2: sz + riser,
                });
            }
        }
        x += ramp.total_run_cm;
        z += ramp.height_cm;

        let Some(connector) = connectors.get(i) else {
            continue;
        };
        match &connector.shape {
            ConnectorShape::Landing(landing) => {
                segments.push(ProfileSegment {
                    kind: ProfileSegmentKind::Landing,
                    x1: x,
                    z1: z,
                    x2: x + landing.depth_cm,
                    z2: z,
                });
            }
            ConnectorShape::Winder(winder) => {
                let n = winder.steps.len().max(1) as f64;
                let wedge_run = winder.walking_run_cm / n;
                for (w, step) in winder.steps.iter().enumerate() {
                    let wx = x + w as f64 * wedge_run;
                    let wz = z + w as f64 * step.riser_cm;
                    segments.push(ProfileSegment {
                        kind: ProfileSegmentKind::WinderRiser,
                        x1: wx,
                        z1: wz,
                        x2: wx,
                        z2: wz + step.riser_cm,
                    });
                    segments.push(ProfileSegment {
                        kind: ProfileSegmentKind::WinderTread,
                        x1: wx,
                        z1: wz + step.riser_cm,
                        x2: wx + wedge_run,
                        z2: wz + step.riser_cm,
                    });
                }
                z += winder.total_rise_cm;
            }
        }
        x += connector.shape.walking_run_cm();
    }

    SideProfile {
        segments,
        total_run_cm: x,
        total_rise_cm: z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::stair::{assemble, RampSpec, SizingMode, StairInput, StairType};
    use crate::calculations::connector::{ConnectorSpec, LandingSpec, WinderSpec};

    fn ramp_spec(num_steps: u32) -> RampSpec {
        RampSpec {
            num_steps: Some(num_steps),
            tread_target_cm: Some(28.0),
            ..RampSpec::default()
        }
    }

    #[test]
    fn test_straight_profile_sawtooth() {
        let input = StairInput {
            label: "S".to_string(),
            stair_type: StairType::Straight,
            stair_width_cm: 100.0,
            slab_thickness_cm: 20.0,
            sizing: SizingMode::Absolute,
            ramps: vec![RampSpec {
                height_cm: Some(300.0),
                riser_target_cm: Some(17.0),
                tread_target_cm: Some(28.0),
                ..RampSpec::default()
            }],
            connectors: vec![],
            use_blondel: false,
            check_compliance: true,
            compliance: Default::default(),
        };
        let model = assemble(&input).unwrap();
        let profile = &model.profile;

        // 18 risers + 17 treads
        assert_eq!(profile.segments.len(), 35);
        assert!((profile.total_run_cm - 476.0).abs() < 1e-9);
        assert!((profile.total_rise_cm - 300.0).abs() < 1e-9);

        let last = profile.segments.last().unwrap();
        assert_eq!(last.kind, ProfileSegmentKind::Riser);
        assert!((last.z2 - 300.0).abs() < 1e-9);
        assert!((last.x1 - 476.0).abs() < 1e-9);
    }

    #[test]
    fn test_landing_and_winder_segments() {
        let input = StairInput {
            label: "Mixed".to_string(),
            stair_type: StairType::Custom,
            stair_width_cm: 100.0,
            slab_thickness_cm: 0.0,
            sizing: SizingMode::Proportional { total_height_cm: 360.0 },
            ramps: vec![ramp_spec(6), ramp_spec(6), ramp_spec(6)],
            connectors: vec![
                ConnectorSpec::Landing(LandingSpec::new(110.0, 0.0)),
                ConnectorSpec::Winder(WinderSpec::new(2, 90.0, 10.0)),
            ],
            use_blondel: false,
            check_compliance: false,
            compliance: Default::default(),
        };
        let model = assemble(&input).unwrap();
        let segs = &model.profile.segments;

        let landings: Vec<_> = segs.iter().filter(|s| s.kind == ProfileSegmentKind::Landing).collect();
        assert_eq!(landings.len(), 1);
        assert!((landings[0].x2 - landings[0].x1 - 110.0).abs() < 1e-9);
        assert_eq!(landings[0].z1, landings[0].z2);

        let winder_risers = segs.iter().filter(|s| s.kind == ProfileSegmentKind::WinderRiser).count();
        let winder_treads = segs.iter().filter(|s| s.kind == ProfileSegmentKind::WinderTread).count();
        assert_eq!((winder_risers, winder_treads), (2, 2));

        assert!((model.profile.total_rise_cm - 360.0).abs() < 1e-9);
        assert!((model.profile.total_run_cm - model.totals.total_run_cm).abs() < 1e-9);
    }
}

//! # Connectors
//!
//! A connector joins two flights: either a flat [`LandingSpec`] or a run of
//! wedge-shaped [`WinderSpec`] steps. Resolving a connector against the
//! cursor at its entry gives the connector's absolute geometry and the
//! [`FrameDelta`] that carries the cursor to the next flight's entry.
//!
//! ## Turn convention
//!
//! Left turns increase the heading (counter-clockwise). Right turns mirror
//! the same layout across the flight's centerline. Winders sweep their
//! wedges counter-clockwise on left turns and clockwise (decreasing angles)
//! on right turns, about a pivot on the inside of the turn.
//!
//! ## Example
//!
//! ```rust
//! use stair_core::calculations::connector::{resolve, ConnectorContext, ConnectorShape, ConnectorSpec, LandingSpec};
//! use stair_core::calculations::cursor::Cursor;
//!
//! let spec = ConnectorSpec::Landing(LandingSpec::new(100.0, 90.0));
//! let ctx = ConnectorContext { label: "Landing 1".into(), width_cm: 100.0, rise_cm: 0.0, first_label: 1 };
//! let resolved = resolve(&spec, &Cursor::origin(), &ctx).unwrap();
//!
//! let exit = Cursor::origin().advance_by_connector(&resolved.delta);
//! assert!((exit.x - 100.0).abs() < 1e-9 && (exit.y - 100.0).abs() < 1e-9);
//! assert_eq!(exit.heading_deg, 90.0);
//! assert!(matches!(resolved.shape, ConnectorShape::Landing(_)));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::cursor::{Cursor, FrameDelta};
use crate::errors::{StairError, StairResult};
use crate::geometry::{signed_area, Point2};

/// Gap between the two flights of a U-shaped landing when none is given (cm)
pub const DEFAULT_U_GAP_CM: f64 = 10.0;

/// Largest sweep a single winder run may turn (degrees)
pub const MAX_WINDER_TURN_DEG: f64 = 180.0;

/// Most wedges a single winder run may have
pub const MAX_WINDERS: u32 = 36;

/// Side the stair turns towards, seen walking up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    /// Counter-clockwise, heading increases
    #[default]
    Left,
    /// Clockwise, heading decreases
    Right,
}

impl TurnDirection {
    /// +1 for left, -1 for right
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Left => 1.0,
            TurnDirection::Right => -1.0,
        }
    }
}

/// Flat landing between two flights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingSpec {
    /// Extent along the incoming heading (cm)
    pub depth_cm: f64,

    /// 0 (straight), 90 (L) or 180 (U)
    pub turn_angle_deg: f64,

    /// Spacing between parallel flights, 180° only (cm)
    #[serde(default)]
    pub gap_cm: Option<f64>,

    #[serde(default)]
    pub turn: TurnDirection,
}

impl LandingSpec {
    /// Left-turning landing without an explicit gap
    pub fn new(depth_cm: f64, turn_angle_deg: f64) -> Self {
        LandingSpec {
            depth_cm,
            turn_angle_deg,
            gap_cm: None,
            turn: TurnDirection::Left,
        }
    }
}

/// Run of wedge steps turning about a pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinderSpec {
    /// Number of wedges (≥ 1)
    pub num_winders: u32,

    /// Total angular sweep (degrees), in (0, 180]
    pub turn_angle_deg: f64,

    /// Radius of the inner (pivot-side) edge of the wedges (cm)
    pub inner_radius_cm: f64,

    /// Rise over the whole winder run when heights are absolute (cm)
    #[serde(default)]
    pub rise_cm: Option<f64>,

    #[serde(default)]
    pub turn: TurnDirection,
}

impl WinderSpec {
    /// Left-turning winder with the rise left to the assembler
    pub fn new(num_winders: u32, turn_angle_deg: f64, inner_radius_cm: f64) -> Self {
        WinderSpec {
            num_winders,
            turn_angle_deg,
            inner_radius_cm,
            rise_cm: None,
            turn: TurnDirection::Left,
        }
    }
}

/// Connector descriptor from the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectorSpec {
    Landing(LandingSpec),
    Winder(WinderSpec),
}

impl ConnectorSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectorSpec::Landing(_) => "landing",
            ConnectorSpec::Winder(_) => "winder",
        }
    }

    pub fn turn_angle_deg(&self) -> f64 {
        match self {
            ConnectorSpec::Landing(l) => l.turn_angle_deg,
            ConnectorSpec::Winder(w) => w.turn_angle_deg,
        }
    }
}

/// Absolute geometry of a landing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingGeometry {
    pub depth_cm: f64,
    pub turn_angle_deg: f64,
    pub turn: TurnDirection,
    /// Spacing between flights (0 unless 180°)
    pub gap_cm: f64,
    pub elevation_cm: f64,
    /// Counter-clockwise outline; 6 vertices for a 180° landing, marking
    /// where both flights meet it.
    pub polygon: Vec<Point2>,
}

/// One wedge of a winder run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinderStep {
    /// 0-based index within the winder run
    pub index: u32,
    /// Sequential step number across the whole stair
    pub label: u32,
    /// Walking surface elevation (cm)
    pub elevation_cm: f64,
    pub riser_cm: f64,
    /// Angle of the leading edge about the pivot (degrees)
    pub start_angle_deg: f64,
    /// Angle of the trailing edge about the pivot (degrees)
    pub end_angle_deg: f64,
    pub inner_start: Point2,
    pub inner_end: Point2,
    pub outer_start: Point2,
    pub outer_end: Point2,
}

impl WinderStep {
    pub fn span_deg(&self) -> f64 {
        (self.end_angle_deg - self.start_angle_deg).abs()
    }

    /// Outline `[inner_start, outer_start, outer_end, inner_end]`
    pub fn corners(&self) -> [Point2; 4] {
        [self.inner_start, self.outer_start, self.outer_end, self.inner_end]
    }
}

/// Absolute geometry of a winder run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinderGeometry {
    /// Pivot of the wedges
    pub center: Point2,
    pub inner_radius_cm: f64,
    /// `inner_radius + width`
    pub outer_radius_cm: f64,
    pub turn_angle_deg: f64,
    pub turn: TurnDirection,
    /// `turn_angle / num_winders`
    pub step_angle_deg: f64,
    /// Rise per wedge (cm)
    pub riser_height_cm: f64,
    /// Rise over the whole run (cm)
    pub total_rise_cm: f64,
    /// Arc length along the walking line at mid-width (cm)
    pub walking_run_cm: f64,
    pub steps: Vec<WinderStep>,
}

/// Connector geometry in absolute coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectorShape {
    Landing(LandingGeometry),
    Winder(WinderGeometry),
}

impl ConnectorShape {
    /// Horizontal distance walked across the connector (cm)
    pub fn walking_run_cm(&self) -> f64 {
        match self {
            ConnectorShape::Landing(l) => l.depth_cm,
            ConnectorShape::Winder(w) => w.walking_run_cm,
        }
    }

    /// Every plan point of the connector
    pub fn plan_points(&self) -> Vec<Point2> {
        match self {
            ConnectorShape::Landing(l) => l.polygon.clone(),
            ConnectorShape::Winder(w) => w.steps.iter().flat_map(|s| s.corners()).collect(),
        }
    }
}

/// What the resolver needs to know beyond the descriptor itself.
#[derive(Debug, Clone)]
pub struct ConnectorContext {
    /// Label used in error messages (e.g. "Connector 1")
    pub label: String,
    /// Width of the flights being joined (cm)
    pub width_cm: f64,
    /// Elevation gained across the connector (cm); ignored by landings
    pub rise_cm: f64,
    /// Label of the first winder wedge
    pub first_label: u32,
}

/// Resolved connector: geometry plus the cursor change it causes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConnector {
    pub shape: ConnectorShape,
    pub delta: FrameDelta,
}

/// Resolve a connector at the cursor `entry`.
///
/// # Returns
///
/// * `Ok(ResolvedConnector)` - Geometry and frame delta
/// * `Err(StairError::InvalidConfiguration)` - Unsupported turn angle, non-positive
///   depth, `num_winders < 1`, negative inner radius
/// * `Err(StairError::GeometryDegenerate)` - A 90° landing shallower than the flight width
pub fn resolve(spec: &ConnectorSpec, entry: &Cursor, ctx: &ConnectorContext) -> StairResult<ResolvedConnector> {
    match spec {
        ConnectorSpec::Landing(landing) => resolve_landing(landing, entry, ctx),
        ConnectorSpec::Winder(winder) => resolve_winder(winder, entry, ctx),
    }
}

fn resolve_landing(spec: &LandingSpec, entry: &Cursor, ctx: &ConnectorContext) -> StairResult<ResolvedConnector> {
    let w = ctx.width_cm;
    let d = spec.depth_cm;
    if !(d.is_finite() && d > 0.0) {
        return Err(StairError::invalid_configuration(
            format!("{}: depth_cm", ctx.label),
            d.to_string(),
            "Landing depth must be positive",
        ));
    }

    let gap = match spec.gap_cm {
        Some(g) if !(g.is_finite() && g >= 0.0) => {
            return Err(StairError::invalid_configuration(
                format!("{}: gap_cm", ctx.label),
                g.to_string(),
                "Gap cannot be negative",
            ));
        }
        Some(g) => g,
        None => DEFAULT_U_GAP_CM,
    };

    // Local frame: u along the incoming heading, v to the left, laid out
    // for a left turn. Right turns are mirrored below.
    let (outline, exit_uv, gap_cm): (Vec<(f64, f64)>, (f64, f64), f64) = match spec.turn_angle_deg {
        a if a == 0.0 => (vec![(0.0, 0.0), (d, 0.0), (d, w), (0.0, w)], (d, 0.0), 0.0),
        a if a == 90.0 => {
            if d < w {
                return Err(StairError::degenerate(
                    &ctx.label,
                    format!(
                        "90° landing depth {} cm is less than the flight width {} cm; the next flight would overlap the previous one",
                        d, w
                    ),
                ));
            }
            (vec![(0.0, 0.0), (d, 0.0), (d, w), (0.0, w)], (d, w), 0.0)
        }
        a if a == 180.0 => {
            let envelope = 2.0 * w + gap;
            (
                vec![
                    (0.0, 0.0),
                    (d, 0.0),
                    (d, envelope),
                    (0.0, envelope),
                    (0.0, w + gap),
                    (0.0, w),
                ],
                (0.0, envelope),
                gap,
            )
        }
        other => {
            return Err(StairError::invalid_configuration(
                format!("{}: turn_angle_deg", ctx.label),
                other.to_string(),
                "Landing turn angle must be 0, 90 or 180",
            ));
        }
    };

    let d_heading_deg = spec.turn.sign() * spec.turn_angle_deg;
    let (polygon, exit_point) = match spec.turn {
        TurnDirection::Left => {
            let polygon = outline.iter().map(|&(u, v)| entry.local_to_plan(u, v)).collect();
            (polygon, entry.local_to_plan(exit_uv.0, exit_uv.1))
        }
        TurnDirection::Right => {
            // Mirror v -> w - v, then move the exit from the mirrored far
            // edge back onto the cursor line.
            let mut polygon: Vec<Point2> = outline
                .iter()
                .map(|&(u, v)| entry.local_to_plan(u, w - v))
                .collect();
            if signed_area(&polygon) < 0.0 {
                polygon.reverse();
            }
            let mirrored = entry.local_to_plan(exit_uv.0, w - exit_uv.1);
            let exit_frame = Cursor {
                heading_deg: entry.heading_deg + d_heading_deg,
                ..*entry
            };
            (polygon, mirrored.offset(exit_frame.perp(), -w))
        }
    };

    tracing::debug!(
        connector = %ctx.label,
        turn_angle_deg = spec.turn_angle_deg,
        depth_cm = d,
        "resolved landing"
    );

    let exit = Cursor {
        x: exit_point.x,
        y: exit_point.y,
        z: entry.z,
        heading_deg: entry.heading_deg + d_heading_deg,
    };
    Ok(ResolvedConnector {
        shape: ConnectorShape::Landing(LandingGeometry {
            depth_cm: d,
            turn_angle_deg: spec.turn_angle_deg,
            turn: spec.turn,
            gap_cm,
            elevation_cm: entry.z,
            polygon,
        }),
        delta: entry.delta_to(&exit),
    })
}

/// Check a wedge count against `1..=MAX_WINDERS`.
pub fn check_num_winders(num_winders: u32, label: &str) -> StairResult<()> {
    if !(1..=MAX_WINDERS).contains(&num_winders) {
        return Err(StairError::invalid_configuration(
            format!("{}: num_winders", label),
            num_winders.to_string(),
            format!("A winder run needs between 1 and {} wedges", MAX_WINDERS),
        ));
    }
    Ok(())
}

fn resolve_winder(spec: &WinderSpec, entry: &Cursor, ctx: &ConnectorContext) -> StairResult<ResolvedConnector> {
    check_num_winders(spec.num_winders, &ctx.label)?;
    let r = spec.inner_radius_cm;
    if !(r.is_finite() && r >= 0.0) {
        return Err(StairError::invalid_configuration(
            format!("{}: inner_radius_cm", ctx.label),
            r.to_string(),
            "Inner radius cannot be negative",
        ));
    }
    let turn_angle = spec.turn_angle_deg;
    if !(turn_angle > 0.0 && turn_angle <= MAX_WINDER_TURN_DEG) {
        return Err(StairError::invalid_configuration(
            format!("{}: turn_angle_deg", ctx.label),
            turn_angle.to_string(),
            format!("Winder turn angle must be in (0, {}]", MAX_WINDER_TURN_DEG),
        ));
    }
    if !(ctx.rise_cm.is_finite() && ctx.rise_cm > 0.0) {
        return Err(StairError::invalid_configuration(
            format!("{}: rise_cm", ctx.label),
            ctx.rise_cm.to_string(),
            "Winder rise must be positive",
        ));
    }

    let w = ctx.width_cm;
    let outer = r + w;
    let n = spec.num_winders;
    let s = spec.turn.sign();

    // Pivot sits on the inside of the turn. The leading edge of the first
    // wedge is the flight's end line, which points from the pivot along -s·perp.
    let center = match spec.turn {
        TurnDirection::Left => entry.local_to_plan(0.0, w + r),
        TurnDirection::Right => entry.local_to_plan(0.0, -r),
    };
    let start_deg = entry.heading_deg - s * 90.0;
    let angle_at = |i: u32| start_deg + s * (turn_angle * f64::from(i) / f64::from(n));

    let riser = ctx.rise_cm / f64::from(n);
    let steps: Vec<WinderStep> = (0..n)
        .map(|i| {
            let a1 = angle_at(i);
            let a2 = angle_at(i + 1);
            WinderStep {
                index: i,
                label: ctx.first_label + i,
                elevation_cm: entry.z + riser * f64::from(i + 1),
                riser_cm: riser,
                start_angle_deg: a1,
                end_angle_deg: a2,
                inner_start: center.polar(r, a1),
                inner_end: center.polar(r, a2),
                outer_start: center.polar(outer, a1),
                outer_end: center.polar(outer, a2),
            }
        })
        .collect();

    let end_deg = angle_at(n);
    let exit_point = match spec.turn {
        TurnDirection::Left => center.polar(outer, end_deg),
        TurnDirection::Right => center.polar(r, end_deg),
    };
    let walking_run_cm = (r + w / 2.0) * turn_angle.to_radians();

    tracing::debug!(
        connector = %ctx.label,
        num_winders = n,
        turn_angle_deg = turn_angle,
        riser_cm = riser,
        "resolved winder"
    );

    Ok(ResolvedConnector {
        shape: ConnectorShape::Winder(WinderGeometry {
            center,
            inner_radius_cm: r,
            outer_radius_cm: outer,
            turn_angle_deg: turn_angle,
            turn: spec.turn,
            step_angle_deg: turn_angle / f64::from(n),
            riser_height_cm: riser,
            total_rise_cm: ctx.rise_cm,
            walking_run_cm,
            steps,
        }),
        delta: entry.delta_to(&Cursor {
            x: exit_point.x,
            y: exit_point.y,
            z: entry.z + ctx.rise_cm,
            heading_deg: entry.heading_deg + s * turn_angle,
        }),
    })
}

//! # Stair Assembly
//!
//! Walks the chain `ramp, connector, ramp, connector, …, ramp`, sizing each
//! flight, placing its steps at the cursor, and resolving each connector to
//! carry the cursor on to the next flight. The result is a [`StairModel`]:
//! absolute plan coordinates for every tread, landing and winder wedge,
//! plus totals, a side profile and advisory warnings.
//!
//! ## Height allocation
//!
//! - [`SizingMode::Absolute`]: every ramp carries its own `height_cm`.
//! - [`SizingMode::Proportional`]: one total height is split across the
//!   segments by step count (winders count their wedges); the last ramp
//!   takes the remainder so the split sums exactly to the total.
//!
//! ## Example (L-shaped stair with a landing)
//!
//! ```rust
//! use stair_core::calculations::connector::{ConnectorSpec, LandingSpec};
//! use stair_core::calculations::stair::{assemble, RampSpec, SizingMode, StairInput, StairType};
//!
//! let flight = RampSpec {
//!     num_steps: Some(9),
//!     tread_target_cm: Some(28.0),
//!     ..RampSpec::default()
//! };
//!
//! let input = StairInput {
//!     label: "Stair A".to_string(),
//!     stair_type: StairType::LLanding,
//!     stair_width_cm: 100.0,
//!     slab_thickness_cm: 20.0,
//!     sizing: SizingMode::Proportional { total_height_cm: 306.0 },
//!     ramps: vec![flight.clone(), flight],
//!     connectors: vec![ConnectorSpec::Landing(LandingSpec::new(100.0, 90.0))],
//!     use_blondel: false,
//!     check_compliance: true,
//!     compliance: Default::default(),
//! };
//!
//! let model = assemble(&input).unwrap();
//! assert_eq!(model.ramps.len(), 2);
//! assert!((model.totals.total_height_cm - 306.0).abs() < 1e-9);
//! assert_eq!(model.ramps[1].entry.heading_deg, 90.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::compliance::{self, ComplianceSettings, ComplianceWarning};
use crate::calculations::connector::{self, ConnectorContext, ConnectorShape, ConnectorSpec};
use crate::calculations::ramp::MAX_RISERS;
use crate::calculations::cursor::Cursor;
use crate::calculations::profile::{self, SideProfile};
use crate::calculations::ramp::{self, Ramp, RampRequest};
use crate::errors::{StairError, StairResult};
use crate::geometry::{PlanBounds, Point2};

// ============================================================================
// Input
// ============================================================================

/// Named stair shapes. Each one except `Custom` fixes the chain layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StairType {
    Straight,
    LLanding,
    LWinder,
    ULanding,
    UWinder,
    ThreeFlight,
    /// Any well-formed chain
    Custom,
}

impl StairType {
    pub const ALL: [StairType; 7] = [
        StairType::Straight,
        StairType::LLanding,
        StairType::LWinder,
        StairType::ULanding,
        StairType::UWinder,
        StairType::ThreeFlight,
        StairType::Custom,
    ];

    /// Configuration tag (e.g. "l-winder")
    pub fn tag(&self) -> &'static str {
        match self {
            StairType::Straight => "straight",
            StairType::LLanding => "l-landing",
            StairType::LWinder => "l-winder",
            StairType::ULanding => "u-landing",
            StairType::UWinder => "u-winder",
            StairType::ThreeFlight => "three-flight",
            StairType::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StairType::Straight => "Straight stair",
            StairType::LLanding => "L-shaped stair with landing",
            StairType::LWinder => "L-shaped stair with winders",
            StairType::ULanding => "U-shaped stair with landing",
            StairType::UWinder => "U-shaped stair with winders",
            StairType::ThreeFlight => "Three flights with two landings",
            StairType::Custom => "Custom stair",
        }
    }

    /// Expected ramp count and `(connector kind, turn angle)` sequence.
    fn layout(&self) -> Option<(usize, &'static [(&'static str, f64)])> {
        const NONE: &[(&str, f64)] = &[];
        const QUARTER_LANDING: &[(&str, f64)] = &[("landing", 90.0)];
        const QUARTER_WINDER: &[(&str, f64)] = &[("winder", 90.0)];
        const HALF_LANDING: &[(&str, f64)] = &[("landing", 180.0)];
        const HALF_WINDER: &[(&str, f64)] = &[("winder", 180.0)];
        const TWO_QUARTER_LANDINGS: &[(&str, f64)] = &[("landing", 90.0), ("landing", 90.0)];

        match self {
            StairType::Straight => Some((1, NONE)),
            StairType::LLanding => Some((2, QUARTER_LANDING)),
            StairType::LWinder => Some((2, QUARTER_WINDER)),
            StairType::ULanding => Some((2, HALF_LANDING)),
            StairType::UWinder => Some((2, HALF_WINDER)),
            StairType::ThreeFlight => Some((3, TWO_QUARTER_LANDINGS)),
            StairType::Custom => None,
        }
    }

    /// Check that a chain matches this shape.
    pub fn check_layout(&self, num_ramps: usize, connectors: &[ConnectorSpec]) -> StairResult<()> {
        let Some((ramps, expected)) = self.layout() else {
            return Ok(());
        };
        if num_ramps != ramps {
            return Err(StairError::invalid_configuration(
                "ramps",
                num_ramps.to_string(),
                format!("A {} stair has {} flight(s)", self.tag(), ramps),
            ));
        }
        for (i, (spec, (kind, angle))) in connectors.iter().zip(expected.iter()).enumerate() {
            if spec.kind() != *kind || spec.turn_angle_deg() != *angle {
                return Err(StairError::invalid_configuration(
                    format!("connectors[{}]", i),
                    format!("{} {}°", spec.kind(), spec.turn_angle_deg()),
                    format!("A {} stair expects a {} turning {}°", self.tag(), kind, angle),
                ));
            }
        }
        Ok(())
    }
}

/// How flight heights are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizingMode {
    /// Every ramp carries `height_cm`
    Absolute,
    /// Split one total height by step count
    Proportional { total_height_cm: f64 },
}

/// Flight descriptor from the configuration.
///
/// ## JSON Example
///
/// ```json
/// { "num_steps": 9, "tread_target_cm": 28.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampSpec {
    /// Vertical rise (absolute mode)
    pub height_cm: Option<f64>,

    /// Target riser height; otherwise `height / num_steps`
    pub riser_target_cm: Option<f64>,

    /// Explicit tread depth
    pub tread_target_cm: Option<f64>,

    /// Horizontal length of the flight; tread = run / treads
    pub run_length_cm: Option<f64>,

    /// Number of risers (required in proportional mode)
    pub num_steps: Option<u32>,
}

/// Complete stair description.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Stair B",
///   "stair_type": "u-winder",
///   "stair_width_cm": 90.0,
///   "sizing": { "mode": "proportional", "total_height_cm": 290.0 },
///   "ramps": [
///     { "num_steps": 7, "tread_target_cm": 27.0 },
///     { "num_steps": 7, "tread_target_cm": 27.0 }
///   ],
///   "connectors": [
///     { "kind": "winder", "num_winders": 4, "turn_angle_deg": 180.0, "inner_radius_cm": 5.0 }
///   ],
///   "use_blondel": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairInput {
    /// User label (e.g. "Stair A", "Cellar stair")
    #[serde(default)]
    pub label: String,

    pub stair_type: StairType,

    /// Clear width of every flight (cm)
    pub stair_width_cm: f64,

    /// Floor slab thickness at the top landing (cm), passed through for section views
    #[serde(default)]
    pub slab_thickness_cm: f64,

    pub sizing: SizingMode,

    /// Flights in walking order
    pub ramps: Vec<RampSpec>,

    /// Connectors; `connectors[i]` joins `ramps[i]` and `ramps[i + 1]`
    #[serde(default)]
    pub connectors: Vec<ConnectorSpec>,

    /// Derive treads from the Blondel formula and report Blondel values
    #[serde(default)]
    pub use_blondel: bool,

    /// Run the advisory compliance checks
    #[serde(default = "default_true")]
    pub check_compliance: bool,

    #[serde(default)]
    pub compliance: ComplianceSettings,
}

fn default_true() -> bool {
    true
}

impl StairInput {
    /// Validate the overall structure of the description.
    pub fn validate(&self) -> StairResult<()> {
        if !(self.stair_width_cm.is_finite() && self.stair_width_cm > 0.0) {
            return Err(StairError::invalid_configuration(
                "stair_width_cm",
                self.stair_width_cm.to_string(),
                "Width must be positive",
            ));
        }
        if !(self.slab_thickness_cm.is_finite() && self.slab_thickness_cm >= 0.0) {
            return Err(StairError::invalid_configuration(
                "slab_thickness_cm",
                self.slab_thickness_cm.to_string(),
                "Slab thickness cannot be negative",
            ));
        }
        if self.ramps.is_empty() {
            return Err(StairError::invalid_configuration("ramps", "[]", "At least one flight is required"));
        }
        if self.connectors.len() + 1 != self.ramps.len() {
            return Err(StairError::invalid_configuration(
                "connectors",
                self.connectors.len().to_string(),
                format!("{} flight(s) need exactly {} connector(s)", self.ramps.len(), self.ramps.len() - 1),
            ));
        }
        if let SizingMode::Proportional { total_height_cm } = self.sizing {
            if !(total_height_cm.is_finite() && total_height_cm > 0.0) {
                return Err(StairError::invalid_configuration(
                    "sizing.total_height_cm",
                    total_height_cm.to_string(),
                    "Total height must be positive",
                ));
            }
        }
        self.stair_type.check_layout(self.ramps.len(), &self.connectors)
    }
}

// ============================================================================
// Height allocation
// ============================================================================

/// Heights and riser targets per segment, before sizing.
#[derive(Debug, Clone, PartialEq)]
struct HeightPlan {
    ramp_heights: Vec<f64>,
    ramp_risers: Vec<f64>,
    /// Winder rise when known up front; `None` for landings and for
    /// absolute-mode winders without `rise_cm`
    connector_rises: Vec<Option<f64>>,
}

/// Step count of a flight in proportional mode, where heights and riser
/// targets come from the split and may not be given per flight.
fn required_steps(spec: &RampSpec, index: usize) -> StairResult<u32> {
    let fixed = [("height_cm", spec.height_cm), ("riser_target_cm", spec.riser_target_cm)];
    if let Some((field, Some(value))) = fixed.into_iter().find(|(_, v)| v.is_some()) {
        return Err(StairError::invalid_configuration(
            format!("ramps[{}].{}", index, field),
            value.to_string(),
            "Not allowed in proportional sizing; the split of total_height_cm sets it",
        ));
    }
    match spec.num_steps {
        Some(n) if (2..=MAX_RISERS).contains(&n) => Ok(n),
        Some(n) => Err(StairError::invalid_configuration(
            format!("ramps[{}].num_steps", index),
            n.to_string(),
            format!("A flight needs between 2 and {} risers", MAX_RISERS),
        )),
        None => Err(StairError::missing_field(format!("ramps[{}].num_steps", index))),
    }
}

fn allocate_heights(input: &StairInput) -> StairResult<HeightPlan> {
    match input.sizing {
        SizingMode::Absolute => {
            let mut ramp_heights = Vec::with_capacity(input.ramps.len());
            let mut ramp_risers = Vec::with_capacity(input.ramps.len());
            for (i, spec) in input.ramps.iter().enumerate() {
                let height = spec
                    .height_cm
                    .ok_or_else(|| StairError::missing_field(format!("ramps[{}].height_cm", i)))?;
                let riser = match (spec.riser_target_cm, spec.num_steps) {
                    (Some(riser), _) => riser,
                    (None, Some(n)) if n > 0 => height / f64::from(n),
                    _ => return Err(StairError::missing_field(format!("ramps[{}].riser_target_cm", i))),
                };
                ramp_heights.push(height);
                ramp_risers.push(riser);
            }
            let connector_rises = input
                .connectors
                .iter()
                .map(|c| match c {
                    ConnectorSpec::Landing(_) => Some(0.0),
                    ConnectorSpec::Winder(w) => w.rise_cm,
                })
                .collect();
            Ok(HeightPlan {
                ramp_heights,
                ramp_risers,
                connector_rises,
            })
        }
        SizingMode::Proportional { total_height_cm } => {
            let ramp_steps = input
                .ramps
                .iter()
                .enumerate()
                .map(|(i, spec)| required_steps(spec, i))
                .collect::<StairResult<Vec<u32>>>()?;
            let winder_steps = input
                .connectors
                .iter()
                .enumerate()
                .map(|(i, c)| -> StairResult<u32> {
                    match c {
                        ConnectorSpec::Landing(_) => Ok(0),
                        ConnectorSpec::Winder(w) => {
                            connector::check_num_winders(w.num_winders, &format!("connectors[{}]", i))?;
                            Ok(w.num_winders)
                        }
                    }
                })
                .collect::<StairResult<Vec<u32>>>()?;
            let total_steps = ramp_steps
                .iter()
                .chain(winder_steps.iter())
                .try_fold(0u32, |acc, &n| acc.checked_add(n))
                .ok_or_else(|| {
                    StairError::invalid_configuration(
                        "ramps",
                        input.ramps.len().to_string(),
                        "Too many steps in total",
                    )
                })?;
            let share = |steps: u32| total_height_cm * f64::from(steps) / f64::from(total_steps);

            let connector_rises: Vec<Option<f64>> = winder_steps
                .iter()
                .zip(input.connectors.iter())
                .map(|(&n, c)| match c {
                    ConnectorSpec::Landing(_) => Some(0.0),
                    ConnectorSpec::Winder(_) => Some(share(n)),
                })
                .collect();

            let last = ramp_steps.len() - 1;
            let mut ramp_heights: Vec<f64> = ramp_steps[..last].iter().map(|&n| share(n)).collect();
            let allocated: f64 = ramp_heights.iter().sum::<f64>()
                + connector_rises.iter().flatten().sum::<f64>();
            ramp_heights.push(total_height_cm - allocated);

            let ramp_risers = ramp_heights
                .iter()
                .zip(ramp_steps.iter())
                .map(|(&h, &n)| h / f64::from(n))
                .collect();

            Ok(HeightPlan {
                ramp_heights,
                ramp_risers,
                connector_rises,
            })
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// One tread's footprint. Left is the side the cursor's perpendicular
/// points to; front is the edge nearer the bottom of the flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 0-based index within the flight
    pub index: u32,
    /// Sequential step number across the whole stair
    pub label: u32,
    /// Walking surface elevation (cm)
    pub elevation_cm: f64,
    pub riser_cm: f64,
    pub tread_cm: f64,
    pub front_left: Point2,
    pub front_right: Point2,
    pub back_left: Point2,
    pub back_right: Point2,
}

impl Step {
    /// Outline `[front_right, back_right, back_left, front_left]`
    pub fn corners(&self) -> [Point2; 4] {
        [self.front_right, self.back_right, self.back_left, self.front_left]
    }
}

/// Arrow from the first to the last tread along the flight's centerline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionArrow {
    pub start: Point2,
    pub end: Point2,
}

/// A sized flight placed in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampGeometry {
    pub index: usize,
    pub ramp: Ramp,
    /// Frame at the bottom riser; frozen for the whole flight
    pub entry: Cursor,
    /// Frame after the top riser
    pub exit: Cursor,
    pub outline: Vec<Point2>,
    pub steps: Vec<Step>,
    pub direction: DirectionArrow,
}

impl RampGeometry {
    /// Lay out a sized flight at `entry`, numbering treads from `first_label`.
    pub fn place(index: usize, ramp: Ramp, entry: Cursor, first_label: u32) -> Self {
        let t = ramp.actual_tread_cm;
        let w = ramp.width_cm;
        let run = ramp.total_run_cm;

        let steps = (0..ramp.num_treads)
            .map(|s| {
                let front = f64::from(s) * t;
                let back = f64::from(s + 1) * t;
                Step {
                    index: s,
                    label: first_label + s,
                    elevation_cm: entry.z + f64::from(s + 1) * ramp.actual_riser_cm,
                    riser_cm: ramp.actual_riser_cm,
                    tread_cm: t,
                    front_left: entry.local_to_plan(front, w),
                    front_right: entry.local_to_plan(front, 0.0),
                    back_left: entry.local_to_plan(back, w),
                    back_right: entry.local_to_plan(back, 0.0),
                }
            })
            .collect();

        let outline = vec![
            entry.local_to_plan(0.0, 0.0),
            entry.local_to_plan(run, 0.0),
            entry.local_to_plan(run, w),
            entry.local_to_plan(0.0, w),
        ];
        let direction = DirectionArrow {
            start: outline[0].midpoint(outline[3]),
            end: outline[1].midpoint(outline[2]),
        };
        let exit = entry.advance_by_run(run).rise(ramp.height_cm);

        RampGeometry {
            index,
            ramp,
            entry,
            exit,
            outline,
            steps,
            direction,
        }
    }
}

/// A resolved connector with the frames on either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorGeometry {
    pub index: usize,
    pub entry: Cursor,
    pub exit: Cursor,
    pub shape: ConnectorShape,
}

/// Aggregate dimensions of the whole stair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairTotals {
    /// Elevation of the final frame (cm)
    pub total_height_cm: f64,
    /// Walking-line horizontal run: flights, landing depths and winder arcs (cm)
    pub total_run_cm: f64,
    pub stair_width_cm: f64,
    /// Risers across flights and winders
    pub total_risers: u32,
    /// Treads across flights plus winder wedges
    pub total_treads: u32,
}

/// The emitted artifact: immutable snapshot of one assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairModel {
    pub label: String,
    pub stair_type: StairType,
    pub stair_width_cm: f64,
    pub slab_thickness_cm: f64,
    pub ramps: Vec<RampGeometry>,
    pub connectors: Vec<ConnectorGeometry>,
    pub totals: StairTotals,
    pub profile: SideProfile,
    pub bounds: PlanBounds,
    /// Frame after the last flight
    pub final_frame: Cursor,
    pub warnings: Vec<ComplianceWarning>,
}

impl StairModel {
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }

    /// Every plan point of the model: flight outlines, then connectors
    pub fn plan_points(&self) -> Vec<Point2> {
        plan_points(&self.ramps, &self.connectors)
    }
}

fn plan_points(ramps: &[RampGeometry], connectors: &[ConnectorGeometry]) -> Vec<Point2> {
    ramps
        .iter()
        .flat_map(|r| r.outline.iter().copied())
        .chain(connectors.iter().flat_map(|c| c.shape.plan_points()))
        .collect()
}

// ============================================================================
// Assembly
// ============================================================================

/// Assemble the full stair model.
///
/// Structural problems abort with an error and no partial model; compliance
/// findings are collected into [`StairModel::warnings`].
///
/// # Returns
///
/// * `Ok(StairModel)` - Complete geometry
/// * `Err(StairError)` - Invalid configuration or degenerate geometry
pub fn assemble(input: &StairInput) -> StairResult<StairModel> {
    input.validate()?;
    let plan = allocate_heights(input)?;
    let width = input.stair_width_cm;

    let mut cursor = Cursor::origin();
    let mut next_label: u32 = 1;
    let mut ramps: Vec<RampGeometry> = Vec::with_capacity(input.ramps.len());
    let mut connectors: Vec<ConnectorGeometry> = Vec::with_capacity(input.connectors.len());

    for (i, spec) in input.ramps.iter().enumerate() {
        let request = RampRequest {
            label: format!("Ramp {}", i + 1),
            height_cm: plan.ramp_heights[i],
            desired_riser_cm: plan.ramp_risers[i],
            desired_tread_cm: spec.tread_target_cm,
            run_length_cm: spec.run_length_cm,
            width_cm: width,
            use_blondel: input.use_blondel,
        };
        let sized = ramp::size(&request, &input.compliance)?;
        tracing::debug!(
            ramp = i + 1,
            risers = sized.num_risers,
            riser_cm = sized.actual_riser_cm,
            tread_cm = sized.actual_tread_cm,
            x = cursor.x,
            y = cursor.y,
            z = cursor.z,
            heading_deg = cursor.heading_deg,
            "placed ramp"
        );

        let previous_riser = sized.actual_riser_cm;
        let geometry = RampGeometry::place(i, sized, cursor, next_label);
        next_label += geometry.ramp.num_treads;
        cursor = cursor
            .advance_by_run(geometry.ramp.total_run_cm)
            .rise(geometry.ramp.height_cm);
        ramps.push(geometry);

        let Some(connector_spec) = input.connectors.get(i) else {
            continue;
        };
        let rise_cm = match (connector_spec, plan.connector_rises[i]) {
            (_, Some(rise)) => rise,
            (ConnectorSpec::Winder(w), None) => f64::from(w.num_winders) * previous_riser,
            (ConnectorSpec::Landing(_), None) => 0.0,
        };
        let ctx = ConnectorContext {
            label: format!("Connector {}", i + 1),
            width_cm: width,
            rise_cm,
            first_label: next_label,
        };
        let resolved = connector::resolve(connector_spec, &cursor, &ctx)?;
        if let ConnectorShape::Winder(w) = &resolved.shape {
            next_label += w.steps.len() as u32;
        }
        let exit = cursor.advance_by_connector(&resolved.delta);
        connectors.push(ConnectorGeometry {
            index: i,
            entry: cursor,
            exit,
            shape: resolved.shape,
        });
        cursor = exit;
    }

    let warnings = if input.check_compliance {
        collect_warnings(&ramps, &connectors, &input.compliance)
    } else {
        Vec::new()
    };

    let totals = StairTotals {
        total_height_cm: cursor.z,
        total_run_cm: ramps.iter().map(|r| r.ramp.total_run_cm).sum::<f64>()
            + connectors.iter().map(|c| c.shape.walking_run_cm()).sum::<f64>(),
        stair_width_cm: width,
        total_risers: ramps.iter().map(|r| r.ramp.num_risers).sum::<u32>() + winder_count(&connectors),
        total_treads: next_label - 1,
    };
    let profile = profile::build(&ramps, &connectors);
    let bounds = PlanBounds::from_points(&plan_points(&ramps, &connectors))
        .ok_or_else(|| StairError::degenerate(&input.label, "stair has no plan points"))?;

    let model = StairModel {
        label: input.label.clone(),
        stair_type: input.stair_type,
        stair_width_cm: width,
        slab_thickness_cm: input.slab_thickness_cm,
        ramps,
        connectors,
        totals,
        profile,
        bounds,
        final_frame: cursor,
        warnings,
    };

    tracing::info!(
        stair_type = model.stair_type.tag(),
        total_height_cm = model.totals.total_height_cm,
        total_run_cm = model.totals.total_run_cm,
        treads = model.totals.total_treads,
        warnings = model.warnings.len(),
        "assembled stair"
    );

    Ok(model)
}

fn winder_count(connectors: &[ConnectorGeometry]) -> u32 {
    connectors
        .iter()
        .map(|c| match &c.shape {
            ConnectorShape::Winder(w) => w.steps.len() as u32,
            ConnectorShape::Landing(_) => 0,
        })
        .sum()
}

fn collect_warnings(
    ramps: &[RampGeometry],
    connectors: &[ConnectorGeometry],
    settings: &ComplianceSettings,
) -> Vec<ComplianceWarning> {
    let mut warnings: Vec<ComplianceWarning> = ramps
        .iter()
        .flat_map(|r| compliance::check_ramp(r.index, &r.ramp, settings))
        .collect();

    let winders = connectors.iter().filter_map(|c| match &c.shape {
        ConnectorShape::Winder(w) => Some(w),
        ConnectorShape::Landing(_) => None,
    });
    for (i, winder) in winders.enumerate() {
        warnings.extend(compliance::check_winder(i, winder, settings));
    }

    for warning in &warnings {
        tracing::warn!(segment = %warning.segment, "{}", warning.message);
    }
    warnings
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::calculations::connector::{LandingSpec, TurnDirection, WinderSpec};
    use proptest::prelude::*;

    // -- Strategy helpers --

    fn arb_turn() -> impl Strategy<Value = TurnDirection> {
        prop_oneof![Just(TurnDirection::Left), Just(TurnDirection::Right)]
    }

    fn arb_connector() -> impl Strategy<Value = ConnectorSpec> {
        prop_oneof![
            (prop_oneof![Just(0.0), Just(90.0), Just(180.0)], 120.0f64..200.0, 0.0f64..30.0, arb_turn()).prop_map(
                |(angle, depth, gap, turn)| ConnectorSpec::Landing(LandingSpec {
                    depth_cm: depth,
                    turn_angle_deg: angle,
                    gap_cm: Some(gap),
                    turn,
                })
            ),
            (1u32..8, 10.0f64..180.0, 0.0f64..40.0, arb_turn()).prop_map(|(n, angle, r, turn)| {
                ConnectorSpec::Winder(WinderSpec {
                    num_winders: n,
                    turn_angle_deg: angle,
                    inner_radius_cm: r,
                    rise_cm: None,
                    turn,
                })
            }),
        ]
    }

    fn arb_stair() -> impl Strategy<Value = StairInput> {
        (1usize..4)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec((2u32..16, 24.0f64..32.0), n),
                    prop::collection::vec(arb_connector(), n - 1),
                    200.0f64..600.0,
                    70.0f64..120.0,
                )
            })
            .prop_map(|(flights, connectors, total, width)| StairInput {
                label: "prop".to_string(),
                stair_type: StairType::Custom,
                stair_width_cm: width,
                slab_thickness_cm: 20.0,
                sizing: SizingMode::Proportional { total_height_cm: total },
                ramps: flights
                    .into_iter()
                    .map(|(n, tread)| RampSpec {
                        num_steps: Some(n),
                        tread_target_cm: Some(tread),
                        ..RampSpec::default()
                    })
                    .collect(),
                connectors,
                use_blondel: false,
                check_compliance: true,
                compliance: ComplianceSettings::default(),
            })
    }

    /// Absolute heights with riser targets that rarely divide evenly
    fn arb_absolute_stair() -> impl Strategy<Value = StairInput> {
        (
            prop::collection::vec((100.0f64..400.0, 15.0f64..21.0, prop::option::of(22.0f64..34.0)), 1..4),
            any::<bool>(),
            70.0f64..120.0,
        )
            .prop_map(|(flights, use_blondel, width)| {
                let connectors = (1..flights.len())
                    .map(|_| ConnectorSpec::Landing(LandingSpec::new(width, 90.0)))
                    .collect();
                StairInput {
                    label: "prop".to_string(),
                    stair_type: StairType::Custom,
                    stair_width_cm: width,
                    slab_thickness_cm: 20.0,
                    sizing: SizingMode::Absolute,
                    ramps: flights
                        .into_iter()
                        .map(|(height, riser, tread)| RampSpec {
                            height_cm: Some(height),
                            riser_target_cm: Some(riser),
                            tread_target_cm: tread,
                            ..RampSpec::default()
                        })
                        .collect(),
                    connectors,
                    use_blondel,
                    check_compliance: true,
                    compliance: ComplianceSettings::default(),
                }
            })
    }

    proptest! {
        #[test]
        fn absolute_sizing_rebuilds_height(stair in arb_absolute_stair()) {
            let model = assemble(&stair).unwrap();
            let mut expected_total = 0.0;
            for (geo, spec) in model.ramps.iter().zip(stair.ramps.iter()) {
                let r = &geo.ramp;
                let height = spec.height_cm.unwrap();
                let target = spec.riser_target_cm.unwrap();
                prop_assert_eq!(f64::from(r.num_risers), (height / target).round());
                prop_assert!((f64::from(r.num_risers) * r.actual_riser_cm - height).abs() < 1e-9);
                prop_assert_eq!(r.num_treads, r.num_risers - 1);
                expected_total += height;
            }
            prop_assert!((model.totals.total_height_cm - expected_total).abs() < 1e-9);
        }

        #[test]
        fn blondel_value_matches_dimensions(stair in arb_absolute_stair()) {
            let model = assemble(&stair).unwrap();
            let band = stair.compliance.blondel_band;
            for geo in &model.ramps {
                let r = &geo.ramp;
                if stair.use_blondel {
                    let value = r.blondel_value_cm.unwrap();
                    prop_assert_eq!(value, 2.0 * r.actual_riser_cm + r.actual_tread_cm);
                    prop_assert_eq!(r.blondel_ok, Some(band.contains(value)));
                } else {
                    prop_assert!(r.blondel_value_cm.is_none());
                    prop_assert!(r.blondel_ok.is_none());
                }
            }
        }

        #[test]
        fn risers_rebuild_height(stair in arb_stair()) {
            let model = assemble(&stair).unwrap();
            for geo in &model.ramps {
                let r = &geo.ramp;
                prop_assert!((f64::from(r.num_risers) * r.actual_riser_cm - r.height_cm).abs() < 1e-9);
                prop_assert_eq!(r.num_treads, r.num_risers - 1);
            }
            if let SizingMode::Proportional { total_height_cm } = stair.sizing {
                prop_assert!((model.totals.total_height_cm - total_height_cm).abs() < 1e-9);
            }
        }

        #[test]
        fn winder_spans_sum_to_turn(stair in arb_stair()) {
            let model = assemble(&stair).unwrap();
            for (connector, spec) in model.connectors.iter().zip(stair.connectors.iter()) {
                if let (ConnectorShape::Winder(geo), ConnectorSpec::Winder(w)) = (&connector.shape, spec) {
                    prop_assert_eq!(geo.steps.len() as u32, w.num_winders);
                    let swept: f64 = geo.steps.iter().map(|s| s.span_deg()).sum();
                    prop_assert!((swept - w.turn_angle_deg).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn cursor_is_continuous(stair in arb_stair()) {
            let model = assemble(&stair).unwrap();
            for (i, geo) in model.ramps.iter().enumerate() {
                match model.connectors.get(i) {
                    Some(connector) => {
                        prop_assert_eq!(geo.exit, connector.entry);
                        prop_assert_eq!(connector.exit, model.ramps[i + 1].entry);
                    }
                    None => prop_assert_eq!(geo.exit, model.final_frame),
                }
            }
        }

        #[test]
        fn assembly_is_deterministic(stair in arb_stair()) {
            let a = assemble(&stair).unwrap();
            let b = assemble(&stair).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}

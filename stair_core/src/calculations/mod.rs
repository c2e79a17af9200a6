//! # Stair Calculations
//!
//! Each stage of the geometry pipeline lives in its own module:
//!
//! - [`ramp`] - size a straight flight from its rise and riser/tread targets
//! - [`connector`] - resolve a landing or winder run at the cursor
//! - [`cursor`] - the placement frame carried from segment to segment
//! - [`compliance`] - advisory ergonomic checks
//! - [`profile`] - unrolled side profile for section views
//! - [`stair`] - the assembler that chains everything into a [`StairModel`]
//!
//! All inputs and outputs are JSON-serializable; every fallible operation
//! returns [`crate::errors::StairResult`].

pub mod compliance;
pub mod connector;
pub mod cursor;
pub mod profile;
pub mod ramp;
pub mod stair;

// Re-export commonly used types
pub use compliance::{BlondelBand, ComplianceSettings, ComplianceWarning, WarningKind};
pub use connector::{ConnectorShape, ConnectorSpec, LandingSpec, TurnDirection, WinderSpec};
pub use cursor::{Cursor, FrameDelta};
pub use ramp::{Ramp, RampRequest};
pub use stair::{assemble, RampSpec, SizingMode, StairInput, StairModel, StairType};

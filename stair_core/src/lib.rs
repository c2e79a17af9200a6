//! # stair_core - Stair Geometry Engine
//!
//! `stair_core` turns a stair description (flights, landings, winders and a
//! total height) into a fully placed geometric model: every tread, landing
//! and winder wedge in absolute plan coordinates, per-step elevations, a
//! side profile, aggregate totals and advisory ergonomic warnings.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: `assemble` is a pure function of its input
//! - **Deterministic**: identical input gives a bit-identical model
//! - **JSON-First**: all inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use stair_core::calculations::stair::{assemble, StairType};
//! use stair_core::presets::preset;
//!
//! let input = preset(StairType::ULanding, 300.0, 100.0).unwrap();
//! let model = assemble(&input).unwrap();
//!
//! // Serialize for a renderer or exporter
//! let json = serde_json::to_string_pretty(&model).unwrap();
//! assert!(json.contains("\"u-landing\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Ramp sizing, connectors, cursor transport, compliance and assembly
//! - [`config`] - Loading stair descriptions from JSON or TOML
//! - [`presets`] - Ready-made descriptions for each stair type
//! - [`geometry`] - Plan points and bounds
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod presets;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::stair::{assemble, StairInput, StairModel, StairType};
pub use config::{from_json_str, from_toml_str, load_stair_input};
pub use errors::{StairError, StairResult};
pub use geometry::{PlanBounds, Point2};

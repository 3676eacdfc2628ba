//! Accelerometer calibration state machines
//!
//! Two independent, stateful averaging procedures share the live trim state:
//!
//! - [`ground`]: one-shot fixed-window averaging run while stationary,
//!   writing a permanent zero offset.
//! - [`inflight`]: re-triggerable window measured during flight, fully
//!   reversible until the operator commits it after landing.
//!
//! At most one of the two advances on any pipeline pass.

pub mod ground;
pub mod inflight;

pub use ground::{GroundCalibration, GROUND_CAL_CYCLES};
pub use inflight::{InflightCalibration, INFLIGHT_CAL_CYCLES};

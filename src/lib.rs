//! accel_conditioning - Accelerometer signal conditioning for a flight-control loop
//!
//! This crate turns raw 3-axis accelerometer samples into a calibrated,
//! filtered, axis-aligned reading suitable for attitude estimation and
//! stabilization. It is platform-agnostic: sensor acquisition, board-frame
//! alignment, persistence and operator indication are injected via traits.
//!
//! # Design Principles
//!
//! - **Pure no_std**: no std library dependencies, testable on host
//! - **Trait abstractions**: hardware and board services injected via traits
//! - **No hidden globals**: all pipeline state lives in [`AccelPipeline`]
//!
//! # Modules
//!
//! - [`filter`]: Per-axis low-pass filter bank (biquad or bypass)
//! - [`trims`]: Shared zero-offset and angle trim state
//! - [`calibration`]: Ground and in-flight calibration state machines
//! - [`pipeline`]: Per-cycle reading pipeline orchestration
//! - [`traits`]: Collaborator seams (sensor acquisition, board services)
//! - [`mock`]: Mock collaborators for host-side testing

#![no_std]

pub mod calibration;
pub mod filter;
pub mod mock;
pub mod pipeline;
pub mod traits;
pub mod trims;

pub use calibration::{
    GroundCalibration, InflightCalibration, GROUND_CAL_CYCLES, INFLIGHT_CAL_CYCLES,
};
pub use filter::{AccelFilterBank, BiquadLpf, DEFAULT_CUTOFF_HZ};
pub use pipeline::AccelPipeline;
pub use traits::{AccelBoard, AccelSensor};
pub use trims::{AccelTrims, AngleTrims};

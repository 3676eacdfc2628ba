//! Collaborator seams for the conditioning pipeline
//!
//! Device-independent interfaces injected into [`AccelPipeline`]: raw sample
//! acquisition on one side, board-level services (alignment, gravity
//! reference, persistence, operator indication, feature gating) on the
//! other. Mock implementations for host testing live in [`crate::mock`].
//!
//! [`AccelPipeline`]: crate::pipeline::AccelPipeline

use nalgebra::Vector3;

use crate::trims::AccelTrims;

/// Raw accelerometer acquisition.
///
/// Abstracts the bus/register read producing one 3-axis integer sample per
/// sampling interval.
pub trait AccelSensor {
    /// Read one raw sample.
    ///
    /// Returns `None` when no new data is available this cycle; the pipeline
    /// skips the pass and leaves the previous published sample unchanged.
    fn read_raw(&mut self) -> Option<Vector3<i32>>;
}

/// Board-level services consumed by the pipeline.
///
/// Aggregates the remaining external collaborators behind one seam, the way
/// the platform layer is injected elsewhere in the flight stack. All methods
/// must complete within the sampling interval budget; none may block.
pub trait AccelBoard {
    /// Remap a sensor-frame sample into the airframe frame.
    ///
    /// Pure geometric transform; called once per pass between filtering and
    /// calibration.
    fn align(&self, sample: Vector3<i32>) -> Vector3<i32>;

    /// Sensor output magnitude corresponding to 1 g at rest.
    ///
    /// Subtracted from the Z-axis offset at the end of a calibration window,
    /// since Z measures gravity on a level airframe.
    fn acc_1g(&self) -> i32;

    /// Request an asynchronous durable save of `trims`.
    ///
    /// Fire and forget; the pipeline does not wait for confirmation.
    fn request_persist(&mut self, trims: &AccelTrims);

    /// One-shot operator indication that a calibration window finished.
    fn notify_calibration_complete(&mut self);

    /// Feature gate for in-flight calibration, checked once per cycle.
    fn inflight_cal_enabled(&self) -> bool;
}

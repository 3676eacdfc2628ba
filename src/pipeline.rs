//! Reading pipeline orchestration
//!
//! Drives the per-cycle sequence: acquire -> filter -> align -> (one
//! calibration step at most) -> apply trims -> publish. One [`AccelPipeline`]
//! instance owns all conditioning state for a flight session; there are no
//! hidden globals.

use nalgebra::Vector3;

use crate::calibration::{GroundCalibration, InflightCalibration};
use crate::filter::AccelFilterBank;
use crate::traits::{AccelBoard, AccelSensor};
use crate::trims::AccelTrims;

/// Accelerometer conditioning pipeline.
///
/// Call [`update`](Self::update) once per sampling interval from the main
/// loop. All state mutation happens inside that call; readers of
/// [`published`](Self::published) and [`trims`](Self::trims) must run between
/// invocations, never mid-invocation.
pub struct AccelPipeline {
    filter: AccelFilterBank,
    trims: AccelTrims,
    ground: GroundCalibration,
    inflight: InflightCalibration,
    published: Vector3<i32>,
}

impl AccelPipeline {
    /// Create a pipeline with the given filter configuration and neutral
    /// trims. Both calibration machines start inactive.
    pub fn new(cutoff_hz: u8, sampling_interval_us: u32) -> Self {
        Self {
            filter: AccelFilterBank::new(cutoff_hz, sampling_interval_us),
            trims: AccelTrims::default(),
            ground: GroundCalibration::new(),
            inflight: InflightCalibration::new(),
            published: Vector3::zeros(),
        }
    }

    /// Latest conditioned sample: filtered, aligned, trim-corrected.
    ///
    /// Updated once per successful cycle; unchanged on cycles where the
    /// sensor had no new data. Readings taken while a calibration window is
    /// running carry no meaning for control.
    pub fn published(&self) -> Vector3<i32> {
        self.published
    }

    /// Live trim state.
    pub fn trims(&self) -> &AccelTrims {
        &self.trims
    }

    /// Replace the live trims, e.g. with values loaded from persistent
    /// configuration at startup. Must not be called while a calibration
    /// window is running.
    pub fn set_trims(&mut self, trims: AccelTrims) {
        self.trims = trims;
    }

    /// Rebuild the filter bank for a new cutoff or sampling interval.
    ///
    /// Discards all filter history; a cutoff of 0 Hz selects pass-through.
    pub fn configure_filter(&mut self, cutoff_hz: u8, sampling_interval_us: u32) {
        self.filter = AccelFilterBank::new(cutoff_hz, sampling_interval_us);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "acc filter configured: cutoff={=u8} Hz, interval={=u32} us",
            cutoff_hz,
            sampling_interval_us
        );
    }

    /// Arm ground calibration for a window of `cycles` pipeline passes.
    pub fn arm_ground_calibration(&mut self, cycles: u16) {
        self.ground.arm(cycles);
    }

    /// True when no ground-calibration window is running.
    pub fn is_ground_calibration_complete(&self) -> bool {
        self.ground.is_complete()
    }

    /// Arm in-flight calibration for a window of `cycles` passes,
    /// snapshotting the current trims for rollback.
    pub fn arm_inflight_calibration(&mut self, cycles: u16) {
        let current = self.trims;
        self.inflight.arm(cycles, &current);
    }

    /// Request that a completed in-flight measurement be committed on the
    /// next pass. See [`InflightCalibration::request_commit`] for the caller
    /// preconditions.
    pub fn request_inflight_commit(&mut self) {
        self.inflight.request_commit();
    }

    /// Run one sampling-interval pass.
    ///
    /// Skips the pass entirely when the sensor reports no new data. At most
    /// one calibration machine advances per pass: ground calibration while
    /// its window is incomplete, otherwise in-flight calibration when the
    /// board's feature gate allows it. Trim application is a no-op during a
    /// window because the active machine zeroes the live trims.
    pub fn update<S, B>(&mut self, sensor: &mut S, board: &mut B)
    where
        S: AccelSensor,
        B: AccelBoard,
    {
        let Some(raw) = sensor.read_raw() else {
            return;
        };

        let filtered = self.filter.apply(raw);
        self.published = board.align(filtered);

        if !self.ground.is_complete() {
            self.ground.step(&mut self.published, &mut self.trims, board);
        } else if board.inflight_cal_enabled() {
            self.inflight.step(&mut self.published, &mut self.trims, board);
        }

        self.published -= self.trims.offset;
    }
}

//! In-flight calibration state machine
//!
//! Re-triggerable averaging window measured during flight. Completion
//! restores the trims that were live when the window was armed, so control
//! behavior is undisturbed; the measured sum is held until the operator
//! commits it (landed and disarmed) or a new window discards it.

use nalgebra::Vector3;

use crate::traits::AccelBoard;
use crate::trims::AccelTrims;

/// Cycle count used by the stock in-flight calibration trigger.
pub const INFLIGHT_CAL_CYCLES: u16 = 50;

/// A completed measurement window, held until commit or re-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Measurement {
    sum: Vector3<i32>,
    window: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Dormant,
    Measuring {
        remaining: u16,
        window: u16,
        sum: Vector3<i32>,
        saved: AccelTrims,
    },
}

/// In-flight calibration:
/// `Dormant -> Measuring { remaining } -> Dormant (holding measurement) -> committed`.
///
/// Re-entrant: measuring can be re-armed from any dormant state, discarding
/// an unsaved prior measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflightCalibration {
    state: State,
    measured: Option<Measurement>,
    commit_requested: bool,
}

impl InflightCalibration {
    /// Create a dormant state machine holding no measurement.
    pub const fn new() -> Self {
        Self {
            state: State::Dormant,
            measured: None,
            commit_requested: false,
        }
    }

    /// Arm a measurement window of `cycles` passes.
    ///
    /// Snapshots `current` for rollback: flight continues under these trims
    /// until an explicit commit. Any unsaved prior measurement is discarded.
    /// Arming with 0 cycles is a no-op.
    pub fn arm(&mut self, cycles: u16, current: &AccelTrims) {
        if cycles == 0 {
            return;
        }
        self.measured = None;
        self.state = State::Measuring {
            remaining: cycles,
            window: cycles,
            sum: Vector3::zeros(),
            saved: *current,
        };
    }

    /// True while a measurement window is in progress.
    pub fn is_measuring(&self) -> bool {
        matches!(self.state, State::Measuring { .. })
    }

    /// True once a window has completed and its measurement is still held.
    pub fn has_measurement(&self) -> bool {
        self.measured.is_some()
    }

    /// Request that the held measurement be written to the live trims on the
    /// next pipeline pass.
    ///
    /// Caller precondition: the aircraft is landed and disarmed and a
    /// measurement has completed. A request with no held measurement is
    /// consumed without effect.
    pub fn request_commit(&mut self) {
        self.commit_requested = true;
    }

    /// Advance one pipeline pass.
    ///
    /// While measuring: accumulate the published sample, zero it and the live
    /// raw trims for the pass. On the final pass of the window: hold the sum,
    /// notify the operator, and restore the rollback snapshot into the live
    /// trims. Independently, an outstanding commit request writes the held
    /// average (`sum / m`, truncating; Z reduced by 1 g), resets the angle
    /// trims and requests persistence.
    pub(crate) fn step<B: AccelBoard>(
        &mut self,
        published: &mut Vector3<i32>,
        trims: &mut AccelTrims,
        board: &mut B,
    ) {
        if let State::Measuring {
            remaining,
            window,
            mut sum,
            saved,
        } = self.state
        {
            sum += *published;
            *published = Vector3::zeros();
            trims.offset = Vector3::zeros();

            if remaining == 1 {
                self.measured = Some(Measurement { sum, window });
                board.notify_calibration_complete();
                // Recover the saved trims so current flight behavior holds
                // until the measurement is explicitly committed
                *trims = saved;
                self.state = State::Dormant;

                #[cfg(feature = "defmt")]
                defmt::info!("acc in-flight calibration window complete");
            } else {
                self.state = State::Measuring {
                    remaining: remaining - 1,
                    window,
                    sum,
                    saved,
                };
            }
        }

        if self.commit_requested {
            self.commit_requested = false;
            if let Some(m) = self.measured {
                let n = m.window as i32;
                trims.offset = Vector3::new(m.sum.x / n, m.sum.y / n, m.sum.z / n - board.acc_1g());
                trims.angle.reset();
                board.request_persist(trims);

                #[cfg(feature = "defmt")]
                defmt::info!(
                    "acc in-flight calibration committed, offset=({=i32},{=i32},{=i32})",
                    trims.offset.x,
                    trims.offset.y,
                    trims.offset.z
                );
            }
        }
    }
}

impl Default for InflightCalibration {
    fn default() -> Self {
        Self::new()
    }
}

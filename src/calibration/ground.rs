//! Ground calibration state machine
//!
//! One-shot averaging procedure run while the airframe sits level and
//! stationary. Accumulates a fixed number of filtered, aligned samples, then
//! writes the per-axis average into the live trims as the permanent zero
//! offset, with the Z axis re-centered by the 1 g reference.

use nalgebra::Vector3;

use crate::traits::AccelBoard;
use crate::trims::AccelTrims;

/// Cycle count used by the stock ground-calibration trigger.
pub const GROUND_CAL_CYCLES: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Armed {
        remaining: u16,
        window: u16,
        sum: Vector3<i32>,
    },
}

/// Ground calibration: `Idle -> Armed { remaining } -> Idle`.
///
/// The terminal transition writes the live trims, resets the angle trims to
/// level (a level airframe is assumed by convention) and issues one
/// persistence request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundCalibration {
    state: State,
}

impl GroundCalibration {
    /// Create an idle (complete) state machine.
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Arm a fresh averaging window of `cycles` pipeline passes.
    ///
    /// Arming resets the accumulator. Callers are responsible for not
    /// re-arming mid-window; a re-arm restarts the window from scratch.
    /// Arming with 0 cycles is a no-op.
    pub fn arm(&mut self, cycles: u16) {
        if cycles == 0 {
            return;
        }
        self.state = State::Armed {
            remaining: cycles,
            window: cycles,
            sum: Vector3::zeros(),
        };
    }

    /// True once the window has run to completion (or was never armed).
    pub fn is_complete(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// True on the pass that consumes the first sample of the window.
    pub fn is_on_first_cycle(&self) -> bool {
        matches!(self.state, State::Armed { remaining, window, .. } if remaining == window)
    }

    /// True on the pass that consumes the last sample of the window.
    pub fn is_on_final_cycle(&self) -> bool {
        matches!(self.state, State::Armed { remaining: 1, .. })
    }

    /// Advance one pipeline pass while armed.
    ///
    /// Consumes the current filtered, aligned sample into the running sum,
    /// then zeroes both the published sample and the live raw trims so stale
    /// offsets cannot skew the uncorrected average. On the final pass the
    /// per-axis offset is `(sum + n/2) / n` (half-up on the sum), Z reduced
    /// by the 1 g reference, the angle trims are reset and a persist request
    /// is issued. No-op while idle.
    pub(crate) fn step<B: AccelBoard>(
        &mut self,
        published: &mut Vector3<i32>,
        trims: &mut AccelTrims,
        board: &mut B,
    ) {
        let State::Armed {
            remaining,
            window,
            mut sum,
        } = self.state
        else {
            return;
        };

        sum += *published;
        *published = Vector3::zeros();
        trims.offset = Vector3::zeros();

        if remaining == 1 {
            let n = window as i32;
            let half = n / 2;
            trims.offset = Vector3::new(
                (sum.x + half) / n,
                (sum.y + half) / n,
                (sum.z + half) / n - board.acc_1g(),
            );
            trims.angle.reset();
            board.request_persist(trims);

            #[cfg(feature = "defmt")]
            defmt::info!(
                "acc ground calibration complete, offset=({=i32},{=i32},{=i32})",
                trims.offset.x,
                trims.offset.y,
                trims.offset.z
            );

            self.state = State::Idle;
        } else {
            self.state = State::Armed {
                remaining: remaining - 1,
                window,
                sum,
            };
        }
    }
}

impl Default for GroundCalibration {
    fn default() -> Self {
        Self::new()
    }
}

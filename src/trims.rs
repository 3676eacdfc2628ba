//! Shared trim state
//!
//! Trims normalize the accelerometer's zero point: a raw per-axis offset
//! subtracted from every conditioned sample, plus a residual mounting-angle
//! correction consumed by the downstream attitude estimator. Both calibration
//! state machines write this state; the trim application stage reads it every
//! pipeline pass.

use nalgebra::Vector3;

/// Residual mounting-angle correction in roll and pitch.
///
/// Not applied by the conditioning pipeline itself; the attitude estimator
/// consumes it. Calibration resets it to level by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleTrims {
    /// Roll correction, raw units
    pub roll: i16,

    /// Pitch correction, raw units
    pub pitch: i16,
}

impl AngleTrims {
    /// Reset both angle trims to level.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Long-lived accelerometer trim state.
///
/// Written only at the end of a calibration window (never partially), read
/// every pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelTrims {
    /// Raw per-axis zero offset, subtracted from every conditioned sample
    pub offset: Vector3<i32>,

    /// Mounting-angle correction (roll, pitch)
    pub angle: AngleTrims,
}

impl Default for AccelTrims {
    fn default() -> Self {
        Self {
            offset: Vector3::zeros(),
            angle: AngleTrims::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trims_are_neutral() {
        let trims = AccelTrims::default();
        assert_eq!(trims.offset, Vector3::zeros());
        assert_eq!(trims.angle, AngleTrims { roll: 0, pitch: 0 });
    }

    #[test]
    fn test_angle_trims_reset() {
        let mut angle = AngleTrims { roll: 12, pitch: -7 };
        angle.reset();
        assert_eq!(angle, AngleTrims::default());
    }
}

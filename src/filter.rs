//! Per-axis low-pass filtering for raw accelerometer samples
//!
//! Smooths vibration-induced noise out of the raw readings before they reach
//! calibration and trim application. The filter implementation is selected
//! once at configuration time: a cutoff of 0 Hz selects an exact integer
//! pass-through, anything else a second-order Butterworth low-pass per axis.

use core::f32::consts::{FRAC_1_SQRT_2, PI};
use nalgebra::Vector3;

/// Default low-pass cutoff in Hz for the accelerometer profile.
pub const DEFAULT_CUTOFF_HZ: u8 = 15;

/// Butterworth Q for the low-pass sections.
const BIQUAD_Q: f32 = FRAC_1_SQRT_2;

/// Second-order low-pass section (RBJ biquad, direct form 1).
///
/// Holds normalized coefficients plus the two input and two output delay
/// terms. DC gain is exactly 1, so a held constant input converges to the
/// same constant output.
#[derive(Debug, Clone, Copy)]
pub struct BiquadLpf {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BiquadLpf {
    /// Build a low-pass section for `cutoff_hz` at the given sampling
    /// interval in microseconds. Delay terms start at zero.
    pub fn new_lowpass(cutoff_hz: u8, sampling_interval_us: u32) -> Self {
        let omega = 2.0 * PI * cutoff_hz as f32 * sampling_interval_us as f32 * 1e-6;
        let sn = libm::sinf(omega);
        let cs = libm::cosf(omega);
        let alpha = sn / (2.0 * BIQUAD_Q);

        let a0 = 1.0 + alpha;
        Self {
            b0: ((1.0 - cs) / 2.0) / a0,
            b1: (1.0 - cs) / a0,
            b2: ((1.0 - cs) / 2.0) / a0,
            a1: (-2.0 * cs) / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Advance the section by one sample and return the filtered value.
    pub fn apply(&mut self, input: f32) -> f32 {
        let result = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = result;

        result
    }
}

/// Per-axis accelerometer filter bank.
///
/// The variant is chosen when the bank is built and never changes per
/// sample. Rebuilding the bank (cutoff or sampling-interval change) discards
/// all filter history; the bank is never reset implicitly on a read.
#[derive(Debug, Clone, Copy)]
pub enum AccelFilterBank {
    /// Pass-through mode (cutoff configured as 0 Hz). Deliberate bypass,
    /// not an error: output sample == input sample, bit for bit.
    Bypass,

    /// One low-pass section per spatial axis.
    LowPass([BiquadLpf; 3]),
}

impl AccelFilterBank {
    /// Build a filter bank for `cutoff_hz` at `sampling_interval_us`.
    pub fn new(cutoff_hz: u8, sampling_interval_us: u32) -> Self {
        if cutoff_hz == 0 {
            return Self::Bypass;
        }

        let section = BiquadLpf::new_lowpass(cutoff_hz, sampling_interval_us);
        Self::LowPass([section; 3])
    }

    /// Advance all three axis filters by one raw sample.
    ///
    /// Low-pass output is rounded to the nearest integer; bypass returns the
    /// input unchanged without touching floating point.
    pub fn apply(&mut self, raw: Vector3<i32>) -> Vector3<i32> {
        match self {
            Self::Bypass => raw,
            Self::LowPass(axes) => Vector3::new(
                libm::roundf(axes[0].apply(raw.x as f32)) as i32,
                libm::roundf(axes[1].apply(raw.y as f32)) as i32,
                libm::roundf(axes[2].apply(raw.z as f32)) as i32,
            ),
        }
    }
}

//! Mock collaborators for host-side testing
//!
//! Configurable implementations of [`AccelSensor`] and [`AccelBoard`] for
//! exercising the conditioning pipeline without hardware.

use nalgebra::Vector3;

use crate::traits::{AccelBoard, AccelSensor};
use crate::trims::AccelTrims;

/// Mock accelerometer source.
///
/// Returns queued samples first, then a configurable default. A default of
/// `None` models "no new data this cycle" once the queue drains.
pub struct MockAccelSensor {
    /// Queue of samples to return
    samples: heapless::Deque<Vector3<i32>, 64>,

    /// Sample returned when the queue is empty
    default_sample: Option<Vector3<i32>>,
}

impl MockAccelSensor {
    /// Create a sensor that returns `sample` on every read.
    pub fn constant(sample: Vector3<i32>) -> Self {
        Self {
            samples: heapless::Deque::new(),
            default_sample: Some(sample),
        }
    }

    /// Create a sensor with a queue of samples and no data afterwards.
    pub fn with_samples(samples: &[Vector3<i32>]) -> Self {
        let mut deque = heapless::Deque::new();
        for sample in samples.iter().take(64) {
            let _ = deque.push_back(*sample);
        }

        Self {
            samples: deque,
            default_sample: None,
        }
    }

    /// Set the sample returned when the queue is empty.
    pub fn set_default_sample(&mut self, sample: Option<Vector3<i32>>) {
        self.default_sample = sample;
    }

    /// Push a sample onto the queue.
    pub fn push_sample(&mut self, sample: Vector3<i32>) -> Result<(), Vector3<i32>> {
        self.samples.push_back(sample)
    }
}

impl AccelSensor for MockAccelSensor {
    fn read_raw(&mut self) -> Option<Vector3<i32>> {
        self.samples.pop_front().or(self.default_sample)
    }
}

/// Mock board services with counters for the fire-and-forget hooks.
pub struct MockBoard {
    /// 1 g reference magnitude
    pub acc_1g: i32,

    /// In-flight calibration feature gate
    pub inflight_enabled: bool,

    /// Axis alignment applied between filtering and calibration
    pub align_fn: fn(Vector3<i32>) -> Vector3<i32>,

    /// Number of persistence requests issued
    pub persist_requests: u32,

    /// Trims passed with the most recent persistence request
    pub last_persisted: Option<AccelTrims>,

    /// Number of calibration-complete notifications issued
    pub notifications: u32,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self {
            acc_1g: 256,
            inflight_enabled: false,
            align_fn: |sample| sample,
            persist_requests: 0,
            last_persisted: None,
            notifications: 0,
        }
    }
}

impl AccelBoard for MockBoard {
    fn align(&self, sample: Vector3<i32>) -> Vector3<i32> {
        (self.align_fn)(sample)
    }

    fn acc_1g(&self) -> i32 {
        self.acc_1g
    }

    fn request_persist(&mut self, trims: &AccelTrims) {
        self.persist_requests += 1;
        self.last_persisted = Some(*trims);
    }

    fn notify_calibration_complete(&mut self) {
        self.notifications += 1;
    }

    fn inflight_cal_enabled(&self) -> bool {
        self.inflight_enabled
    }
}

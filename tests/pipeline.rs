//! End-to-end conditioning pipeline scenarios driven through the mock
//! collaborators.

use accel_conditioning::mock::{MockAccelSensor, MockBoard};
use accel_conditioning::{
    AccelPipeline, AccelTrims, AngleTrims, GROUND_CAL_CYCLES, INFLIGHT_CAL_CYCLES,
};
use nalgebra::Vector3;

#[test]
fn ground_calibration_full_window() {
    // Window 400, constant raw sample 500 on every axis, 1 g = 256.
    let mut pipeline = AccelPipeline::new(0, 2500);
    let mut sensor = MockAccelSensor::constant(Vector3::new(500, 500, 500));
    let mut board = MockBoard {
        acc_1g: 256,
        ..Default::default()
    };

    pipeline.arm_ground_calibration(GROUND_CAL_CYCLES);
    for _ in 0..GROUND_CAL_CYCLES {
        assert!(!pipeline.is_ground_calibration_complete());
        pipeline.update(&mut sensor, &mut board);
    }

    // X/Y offsets equal the input value, Z is re-centered by 1 g
    assert!(pipeline.is_ground_calibration_complete());
    assert_eq!(pipeline.trims().offset, Vector3::new(500, 500, 500 - 256));
    assert_eq!(pipeline.trims().angle, AngleTrims::default());
    assert_eq!(board.persist_requests, 1);

    // Steady state afterwards: the corrected Z reads exactly 1 g
    pipeline.update(&mut sensor, &mut board);
    assert_eq!(pipeline.published(), Vector3::new(0, 0, 256));
    assert_eq!(board.persist_requests, 1);
}

#[test]
fn ground_calibration_terminates_regardless_of_samples() {
    let mut pipeline = AccelPipeline::new(0, 2500);
    let mut sensor = MockAccelSensor::constant(Vector3::zeros());
    let mut board = MockBoard::default();

    pipeline.arm_ground_calibration(GROUND_CAL_CYCLES);
    for i in 0..GROUND_CAL_CYCLES {
        // Wildly varying samples must not cause early exit or overrun
        sensor.set_default_sample(Some(Vector3::new(
            i as i32 * 13 - 2000,
            -(i as i32),
            (i as i32 % 7) * 100,
        )));
        pipeline.update(&mut sensor, &mut board);
    }

    assert!(pipeline.is_ground_calibration_complete());
    assert_eq!(board.persist_requests, 1);
}

#[test]
fn inflight_calibration_rollback_then_commit() {
    // Window 50, measured constant sample (10, 20, 30), 1 g = 256.
    let pre_arm = AccelTrims {
        offset: Vector3::new(1, 2, 3),
        angle: AngleTrims { roll: 4, pitch: 5 },
    };

    let mut pipeline = AccelPipeline::new(0, 2500);
    pipeline.set_trims(pre_arm);

    let mut sensor = MockAccelSensor::constant(Vector3::new(10, 20, 30));
    let mut board = MockBoard {
        acc_1g: 256,
        inflight_enabled: true,
        ..Default::default()
    };

    pipeline.arm_inflight_calibration(INFLIGHT_CAL_CYCLES);
    for _ in 0..INFLIGHT_CAL_CYCLES {
        pipeline.update(&mut sensor, &mut board);
    }

    // Measurement complete: trims bit-for-bit identical to pre-arm values
    assert_eq!(*pipeline.trims(), pre_arm);
    assert_eq!(board.notifications, 1);
    assert_eq!(board.persist_requests, 0);

    // Landed and disarmed: commit the measurement
    pipeline.request_inflight_commit();
    pipeline.update(&mut sensor, &mut board);

    assert_eq!(pipeline.trims().offset, Vector3::new(10, 20, 30 - 256));
    assert_eq!(pipeline.trims().angle, AngleTrims::default());
    assert_eq!(board.persist_requests, 1);
}

#[test]
fn inflight_rearm_discards_previous_window() {
    let mut pipeline = AccelPipeline::new(0, 2500);
    let mut board = MockBoard {
        acc_1g: 0,
        inflight_enabled: true,
        ..Default::default()
    };

    let mut sensor = MockAccelSensor::constant(Vector3::new(100, 100, 100));
    pipeline.arm_inflight_calibration(4);
    for _ in 0..4 {
        pipeline.update(&mut sensor, &mut board);
    }

    // Second window with different samples, committed afterwards
    let mut sensor = MockAccelSensor::constant(Vector3::new(8, 8, 8));
    pipeline.arm_inflight_calibration(4);
    for _ in 0..4 {
        pipeline.update(&mut sensor, &mut board);
    }

    pipeline.request_inflight_commit();
    pipeline.update(&mut sensor, &mut board);

    // Only the latest window is reflected
    assert_eq!(pipeline.trims().offset, Vector3::new(8, 8, 8));
    assert_eq!(board.notifications, 2);
}

#[test]
fn missing_samples_leave_published_reading_unchanged() {
    let mut pipeline = AccelPipeline::new(0, 2500);
    let mut sensor = MockAccelSensor::with_samples(&[Vector3::new(12, 34, 56)]);
    let mut board = MockBoard::default();

    pipeline.update(&mut sensor, &mut board);
    assert_eq!(pipeline.published(), Vector3::new(12, 34, 56));

    // Sensor starved: repeated passes change nothing
    for _ in 0..5 {
        pipeline.update(&mut sensor, &mut board);
    }
    assert_eq!(pipeline.published(), Vector3::new(12, 34, 56));
}

#[test]
fn filtered_pipeline_settles_to_calibrated_reading() {
    // 15 Hz low-pass at 400 Hz sampling; constant input settles to the
    // trim-corrected value within rounding.
    let mut pipeline = AccelPipeline::new(15, 2500);
    pipeline.set_trims(AccelTrims {
        offset: Vector3::new(0, 0, 244),
        ..Default::default()
    });

    let mut sensor = MockAccelSensor::constant(Vector3::new(0, 0, 500));
    let mut board = MockBoard::default();

    for _ in 0..2000 {
        pipeline.update(&mut sensor, &mut board);
    }

    let published = pipeline.published();
    assert!((published.z - 256).abs() <= 1, "settled at {}", published.z);
}

//! End-to-end tests of the roll engine on synthetic swell
//!
//! Covers:
//! - Turning-point periods on a clean sinusoid, for every window size
//! - Zero-crossing half-periods and the Zero×2 tail average
//! - Rejection of sub-degree noise
//! - Reset, reconfiguration and ignored ticks
//! - Pulling samples through angle and accelerometer sources

mod common;

use rollperiod_core::{
    config::{EngineConfig, WindowSize},
    errors::SourceError,
    events::{PeakSide, ZeroDirection},
    gravity::GravityRollSource,
    source::{AngleSource, MemorySource, Sample},
    EnginePhase, PeriodMode, RollEngine, Snapshot,
};

use common::{assert_close, run, RollGenerator};

const SWELL_PERIOD: f64 = 6.0;

fn swell(seed: u32) -> Vec<Sample> {
    RollGenerator::new(5.0, SWELL_PERIOD, seed).samples(60.0)
}

#[test]
fn sine_swell_alternates_right_and_left() {
    let mut engine = RollEngine::new();
    let snapshots = run(&mut engine, &swell(42));

    let turning_points: Vec<_> = snapshots.iter().filter_map(|s| s.turning_point).collect();
    assert!(turning_points.len() >= 18, "only {} turning points", turning_points.len());

    for pair in turning_points.windows(2) {
        assert_eq!(pair[1].side, pair[0].side.opposite());
    }

    let last = snapshots.last().unwrap();
    assert!(last.has_right_peak && last.has_left_peak);
    assert_close(last.period_right_s.unwrap(), SWELL_PERIOD, 0.05);
    assert_close(last.period_left_s.unwrap(), SWELL_PERIOD, 0.05);
    assert_close(last.period_chosen_avg_s.unwrap(), SWELL_PERIOD, 0.05);
}

#[test]
fn every_window_size_tracks_the_period() {
    for (window, seed) in WindowSize::ALL.iter().zip([7, 42, 12345]) {
        let mut engine = RollEngine::with_config(EngineConfig::default().with_window_size(*window));
        run(&mut engine, &swell(seed));

        let snapshot = engine.snapshot();
        assert_close(snapshot.period_right_s.unwrap(), SWELL_PERIOD, 0.05);
        assert_close(snapshot.period_left_s.unwrap(), SWELL_PERIOD, 0.05);
    }
}

#[test]
fn each_peak_period_is_close_to_the_swell() {
    let mut engine = RollEngine::new();
    let snapshots = run(&mut engine, &swell(12345));

    let events: Vec<_> = snapshots.iter().filter_map(Snapshot::peak_event).collect();
    assert!(!events.is_empty());
    for event in events {
        assert_close(event.period, SWELL_PERIOD, 0.1);
    }
}

#[test]
fn zero_crossings_give_doubled_half_periods() {
    let mut engine = RollEngine::new();
    engine.configure(32, 10, 1, PeriodMode::ZeroCrossDoubled).unwrap();
    let snapshots = run(&mut engine, &swell(42));

    let crossings: Vec<_> = snapshots.iter().filter_map(|s| s.zero_crossing).collect();
    assert!(crossings.len() >= 18);
    for pair in crossings.windows(2) {
        assert_ne!(pair[0].direction, pair[1].direction);
    }
    for crossing in &crossings[1..] {
        assert_close(crossing.interval.unwrap(), SWELL_PERIOD / 2.0, 0.05);
    }

    let last = snapshots.last().unwrap();
    assert_eq!(last.mode, PeriodMode::ZeroCrossDoubled);
    assert_eq!(last.last_zero_direction, Some(crossings.last().unwrap().direction));
    assert_close(last.period_half_s.unwrap(), SWELL_PERIOD, 0.05);
    assert_close(last.period_chosen_avg_s.unwrap(), SWELL_PERIOD, 0.05);
    assert_close(last.period_half_s.unwrap(), last.period_right_s.unwrap(), 0.1);
}

#[test]
fn sub_degree_noise_produces_no_periods() {
    let mut rng = common::TestRng::new(99);
    let mut engine = RollEngine::new();

    for i in 0..3000u64 {
        let angle = (0.5 + rng.gen_range(-0.3, 0.3)).to_radians();
        let snapshot = engine.process_sample(i * 20_000_000, angle);
        assert!(snapshot.turning_point.is_none());
        assert!(snapshot.zero_crossing.is_none());
    }

    let snapshot = engine.snapshot();
    assert!(!snapshot.has_right_peak && !snapshot.has_left_peak);
    assert_eq!(snapshot.period_right_s, None);
    assert_eq!(snapshot.period_left_s, None);
    assert_eq!(snapshot.period_half_s, None);
    assert_eq!(snapshot.period_chosen_avg_s, None);
    assert_eq!(snapshot.last_zero_direction, None);
}

#[test]
fn snr_is_finite_on_noisy_swell_and_saturates_when_still() {
    let mut engine = RollEngine::new();
    let snapshots = run(&mut engine, &swell(42));
    for snapshot in &snapshots[100..] {
        let snr = snapshot.snr_db.unwrap();
        assert!(snr > 20.0 && snr < 99.0, "snr {snr} dB");
    }

    let mut engine = RollEngine::new();
    for i in 0..50u64 {
        engine.process_sample(i * 20_000_000, 2f64.to_radians());
    }
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, EnginePhase::Fitting);
    assert!(snapshot.snr_saturated());
    assert_eq!(snapshot.snr_db, Some(99.0));
}

#[test]
fn reset_makes_a_replay_identical() {
    let samples = swell(7);

    let mut fresh = RollEngine::new();
    let expected = run(&mut fresh, &samples);

    let mut engine = RollEngine::new();
    run(&mut engine, &swell(42));
    engine.reset();
    engine.reset();
    assert_eq!(engine.snapshot(), Snapshot::initial(PeriodMode::Peaks));

    assert_eq!(run(&mut engine, &samples), expected);
}

#[test]
fn duplicate_samples_leave_state_untouched() {
    let samples = swell(42);

    let mut clean = RollEngine::new();
    run(&mut clean, &samples);

    let mut engine = RollEngine::new();
    for sample in &samples {
        engine.process_sample(sample.timestamp, sample.angle);
        let duplicate = engine.process_sample(sample.timestamp, -sample.angle);
        assert!(duplicate.skipped);
        assert!(duplicate.turning_point.is_none());
    }

    assert_eq!(engine.snapshot(), clean.snapshot());
}

#[test]
fn backwards_clock_is_ignored() {
    let samples = swell(42);
    let mut engine = RollEngine::new();
    run(&mut engine, &samples[..500]);
    let before = engine.snapshot();

    let snapshot = engine.process_sample(samples[10].timestamp, 0.3);
    assert!(snapshot.skipped);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn inverted_mounting_swaps_sides() {
    let samples = swell(42);

    let mut normal = RollEngine::new();
    let normal_points: Vec<_> = run(&mut normal, &samples)
        .iter()
        .filter_map(|s| s.turning_point)
        .collect();

    let mut inverted = RollEngine::new();
    inverted.configure(32, 10, -1, PeriodMode::Peaks).unwrap();
    let inverted_points: Vec<_> = run(&mut inverted, &samples)
        .iter()
        .filter_map(|s| s.turning_point)
        .collect();

    assert_eq!(normal_points[0].side, PeakSide::Right);
    assert_eq!(inverted_points[0].side, PeakSide::Left);
    assert_close(inverted.snapshot().period_right_s.unwrap(), SWELL_PERIOD, 0.05);
}

#[test]
fn reconfiguring_keeps_history() {
    let mut engine = RollEngine::new();
    run(&mut engine, &swell(42));

    let peaks = engine.state().periods().peaks_history().len();
    let right = engine.snapshot().period_right_s;

    engine.configure(8, 5, 1, PeriodMode::ZeroCrossDoubled).unwrap();
    assert_eq!(engine.state().periods().peaks_history().len(), peaks);
    assert_eq!(engine.snapshot().period_right_s, right);
    assert_eq!(
        engine.snapshot().period_chosen_avg_s,
        engine.state().periods().zero_history().tail_average(5)
    );
}

#[test]
fn drain_matches_direct_processing() {
    let samples = swell(42);

    let mut direct = RollEngine::new();
    let expected = run(&mut direct, &samples);

    let mut engine = RollEngine::new();
    let mut collected = Vec::new();
    let pulled = engine
        .drain(&mut MemorySource::new(&samples), |s| collected.push(*s))
        .unwrap();

    assert_eq!(pulled, samples.len());
    assert_eq!(collected, expected);
}

#[test]
fn accelerometer_source_recovers_the_period() {
    let readings = RollGenerator::new(8.0, SWELL_PERIOD, 1).accelerations(60.0);
    let mut source = GravityRollSource::new(MemorySource::new(&readings));

    let mut engine = RollEngine::new();
    let pulled = engine.drain(&mut source, |_| {}).unwrap();
    assert_eq!(pulled, readings.len());

    let snapshot = engine.snapshot();
    assert_close(snapshot.period_right_s.unwrap(), SWELL_PERIOD, 0.05);
    assert_close(snapshot.period_left_s.unwrap(), SWELL_PERIOD, 0.05);
}

/// Delivers a few samples, then blocks once, then fails
struct FlakySensor {
    polls: u32,
}

impl AngleSource for FlakySensor {
    type Error = &'static str;

    fn poll_sample(&mut self) -> nb::Result<Sample, SourceError<&'static str>> {
        self.polls += 1;
        match self.polls {
            1..=3 => Ok(Sample {
                timestamp: self.polls as u64 * 20_000_000,
                angle: 0.01,
            }),
            4 => Err(nb::Error::WouldBlock),
            _ => Err(nb::Error::Other(SourceError::Device("i2c timeout"))),
        }
    }
}

#[test]
fn drain_stops_on_would_block_and_surfaces_device_errors() {
    let mut sensor = FlakySensor { polls: 0 };
    let mut engine = RollEngine::new();

    assert_eq!(engine.drain(&mut sensor, |_| {}), Ok(3));
    assert_eq!(engine.drain(&mut sensor, |_| {}), Err("i2c timeout"));
    assert_eq!(engine.state().buffer().count(), 2);
}

#[test]
fn zero_direction_follows_last_crossing() {
    let mut engine = RollEngine::new();
    engine.process_sample(0, 0.02);
    engine.process_sample(20_000_000, 0.01);
    let snapshot = engine.process_sample(40_000_000, -0.01);

    assert_eq!(snapshot.last_zero_direction, Some(ZeroDirection::Falling));
}

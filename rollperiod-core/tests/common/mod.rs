//! Shared helpers for integration tests
//!
//! - Deterministic xorshift RNG so noisy scenarios are reproducible
//! - Synthetic roll generators at a fixed sample rate

#![allow(dead_code)]

use rollperiod_core::{
    gravity::AccelSample,
    source::Sample,
    time::Timestamp,
    RollEngine, Snapshot,
};

/// Standard gravity used by the accelerometer generator (m/s²)
pub const GRAVITY: f32 = 9.81;

/// Xorshift generator, good enough for test noise
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Sinusoidal roll with uniform noise
pub struct RollGenerator {
    pub amplitude_deg: f64,
    pub period_s: f64,
    pub phase_s: f64,
    pub noise_deg: f64,
    pub rate_hz: f64,
    rng: TestRng,
}

impl RollGenerator {
    pub fn new(amplitude_deg: f64, period_s: f64, seed: u32) -> Self {
        Self {
            amplitude_deg,
            period_s,
            phase_s: 0.01,
            noise_deg: 0.01,
            rate_hz: 50.0,
            rng: TestRng::new(seed),
        }
    }

    pub fn with_noise(mut self, noise_deg: f64) -> Self {
        self.noise_deg = noise_deg;
        self
    }

    pub fn tick(&self) -> Timestamp {
        (1e9 / self.rate_hz) as Timestamp
    }

    /// Samples covering `seconds`, starting at timestamp 0
    pub fn samples(&mut self, seconds: f64) -> Vec<Sample> {
        let count = (seconds * self.rate_hz) as u64 + 1;
        let tick = self.tick();
        (0..count)
            .map(|i| {
                let t = i as f64 / self.rate_hz;
                let clean = self.amplitude_deg.to_radians()
                    * (2.0 * std::f64::consts::PI * (t + self.phase_s) / self.period_s).sin();
                let noise = self.rng.gen_range(-self.noise_deg, self.noise_deg).to_radians();
                Sample { timestamp: i * tick, angle: clean + noise }
            })
            .collect()
    }

    /// Accelerometer readings of a device rolling with this profile, noise free
    pub fn accelerations(&self, seconds: f64) -> Vec<AccelSample> {
        let count = (seconds * self.rate_hz) as u64 + 1;
        let tick = self.tick();
        (0..count)
            .map(|i| {
                let t = i as f64 / self.rate_hz;
                let roll = self.amplitude_deg.to_radians()
                    * (2.0 * std::f64::consts::PI * (t + self.phase_s) / self.period_s).sin();
                AccelSample {
                    timestamp: i * tick,
                    acceleration: [
                        GRAVITY * roll.sin() as f32,
                        GRAVITY * roll.cos() as f32,
                        0.0,
                    ],
                }
            })
            .collect()
    }
}

/// Run every sample through `engine`, collecting the snapshots
pub fn run(engine: &mut RollEngine, samples: &[Sample]) -> Vec<Snapshot> {
    samples
        .iter()
        .map(|s| engine.process_sample(s.timestamp, s.angle))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

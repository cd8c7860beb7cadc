//! Simulated Swell Example
//!
//! Feeds the engine a few minutes of synthetic roll and prints what a
//! display would show once per second.
//!
//! ## What You'll Learn
//!
//! - Pushing samples with `process_sample`
//! - Reading periods, rates and SNR from a `Snapshot`
//! - Switching the period mode mid-stream
//! - Pulling roll from a raw accelerometer with `GravityRollSource`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example simulated_swell
//! ```

use rollperiod_core::{
    gravity::{AccelSample, GravityRollSource},
    source::MemorySource,
    PeriodMode, RollEngine, Snapshot,
};

const RATE_HZ: u64 = 50;
const TICK_NS: u64 = 1_000_000_000 / RATE_HZ;

/// Two superposed swells and a little sensor noise (rad)
fn roll_at(t: f64, seed: &mut u32) -> f64 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    let noise = (*seed as f64 / u32::MAX as f64 - 0.5) * 0.04;

    let primary = 6.0 * (2.0 * std::f64::consts::PI * t / 7.5).sin();
    let secondary = 1.5 * (2.0 * std::f64::consts::PI * t / 4.2 + 0.6).sin();
    (primary + secondary + noise).to_radians()
}

fn fmt_period(value: Option<f64>) -> String {
    value.map_or_else(|| "  --  ".to_string(), |p| format!("{p:5.2}s"))
}

fn print_snapshot(seconds: u64, snapshot: &Snapshot) {
    println!(
        "{seconds:4}s  θ {:6.2}°  ω {:6.2}°/s  α {:7.2}°/s²  R {}  L {}  ½ {}  avg[{}] {}  SNR {}",
        snapshot.angle_deg,
        snapshot.velocity_deg_s,
        snapshot.acceleration_deg_s2,
        fmt_period(snapshot.period_right_s),
        fmt_period(snapshot.period_left_s),
        fmt_period(snapshot.period_half_s),
        snapshot.mode.label(),
        fmt_period(snapshot.period_chosen_avg_s),
        snapshot
            .snr_db
            .map_or_else(|| "--".to_string(), |db| format!("{db:.1} dB")),
    );
}

fn main() {
    println!("=== Roll Period: Simulated Swell ===\n");

    let mut engine = RollEngine::new();
    let mut seed = 42;

    for i in 0..(120 * RATE_HZ) {
        let t = i as f64 / RATE_HZ as f64;

        // Half way through, switch the tail average to zero crossings
        if i == 60 * RATE_HZ {
            let config = *engine.config();
            engine.set_config(config.with_mode(PeriodMode::ZeroCrossDoubled));
            println!("--- mode switched to {} ---", engine.config().mode.label());
        }

        let snapshot = engine.process_sample(i * TICK_NS, roll_at(t, &mut seed));

        if let Some(event) = snapshot.peak_event() {
            println!("        {} peak, period {:.2}s", event.side.name(), event.period);
        }
        if i % RATE_HZ == 0 {
            print_snapshot(i / RATE_HZ, &snapshot);
        }
    }

    println!("\n=== Accelerometer Input ===\n");

    let readings: Vec<AccelSample> = (0..(60 * RATE_HZ))
        .map(|i| {
            let roll = roll_at(i as f64 / RATE_HZ as f64, &mut seed) as f32;
            AccelSample {
                timestamp: i * TICK_NS,
                acceleration: [9.81 * roll.sin(), 9.81 * roll.cos(), 0.3],
            }
        })
        .collect();

    engine.reset();
    let mut source = GravityRollSource::new(MemorySource::new(&readings));
    match engine.drain(&mut source, |_| {}) {
        Ok(count) => {
            println!("processed {count} accelerometer readings");
            print_snapshot(60, &engine.snapshot());
        }
        Err(()) => println!("accelerometer failed"),
    }
}

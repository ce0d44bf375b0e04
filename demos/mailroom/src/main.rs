//! mailroom — runs one automail delivery simulation and prints a summary.
//!
//! ```text
//! mailroom [config.json] [arrivals.csv]
//! ```
//!
//! Without a config file the defaults are used: 3 carriers, a 15-floor
//! building, 80 randomly generated items.  With an arrivals CSV the generator
//! is skipped and the schedule is read from the file instead.
//!
//! Set `RUST_LOG=am_sim=debug,am_pool=debug` to follow every state change and
//! coalition event.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use am_carrier::{CarrierState, Transition};
use am_core::{SimConfig, SimRng, Tick};
use am_pool::AllocationEngine;
use am_sim::{
    DeliveryRecord, GeneratorConfig, ScheduledArrivals, SimBuilder, SimObserver, SimSummary,
    TracingObserver, generate_mail, load_arrivals_csv,
};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Top-level JSON document.  Every field is optional.
///
/// ```json
/// { "sim": { "carriers": 4, "seed": 7 }, "mail": { "mail_count": 120 } }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:  SimConfig,
    mail: GeneratorConfig,
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Observer wrapper to count events ─────────────────────────────────────────

struct CountingObserver {
    inner:       TracingObserver,
    departures:  usize,
    deliveries:  usize,
    peak_queue:  usize,
}

impl CountingObserver {
    fn new() -> Self {
        Self { inner: TracingObserver, departures: 0, deliveries: 0, peak_queue: 0 }
    }
}

impl SimObserver for CountingObserver {
    fn on_arrival(&mut self, item: &am_core::MailItem) {
        self.inner.on_arrival(item);
    }

    fn on_transition(&mut self, transition: &Transition) {
        if transition.from == CarrierState::Waiting && transition.started_route() {
            self.departures += 1;
        }
        self.inner.on_transition(transition);
    }

    fn on_delivery(&mut self, record: &DeliveryRecord) {
        self.deliveries += 1;
        self.inner.on_delivery(record);
    }

    fn on_tick_end(&mut self, _tick: Tick, pool: &AllocationEngine) {
        self.peak_queue = self.peak_queue.max(pool.pending());
    }

    fn on_sim_end(&mut self, summary: &SimSummary) {
        self.inner.on_sim_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let arrivals_path = args.next();

    // 1. Configuration.
    let DemoConfig { sim: config, mail } = load_config(config_path.as_deref())?;
    println!("=== mailroom — automail delivery simulation ===");
    println!(
        "Carriers: {}  |  Floors: {}..={}  |  Seed: {}  |  Tick ceiling: {}",
        config.carriers,
        config.building.mailroom_floor,
        config.building.floors,
        config.seed,
        config.total_ticks
    );

    // 2. Mail schedule.
    let schedule: ScheduledArrivals = match arrivals_path.as_deref() {
        Some(path) => load_arrivals_csv(path, &config.building)
            .with_context(|| format!("loading arrivals {}", path.display()))?,
        None => {
            let mut rng = SimRng::new(config.seed);
            generate_mail(&mail, &config.building, &mut rng)?
        }
    };
    println!(
        "Mail: {} items, last arrival {}",
        schedule.len(),
        schedule.iter().map(|i| i.arrival).max().unwrap_or(Tick::ZERO)
    );
    println!();

    // 3. Build and run.
    let mut sim = SimBuilder::new(config, schedule).build()?;
    let mut obs = CountingObserver::new();

    let t0 = Instant::now();
    let summary = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  {summary}");
    println!("  departures        : {}", obs.departures);
    println!("  deliveries        : {}", obs.deliveries);
    println!("  peak queue length : {}", obs.peak_queue);
    println!();

    // 5. Final carrier table.
    println!("{:<8} {:<12} {:<8}", "Carrier", "State", "Floor");
    println!("{}", "-".repeat(28));
    for carrier in sim.fleet.iter() {
        println!("{:<8} {:<12} {:<8.2}", carrier.id().to_string(), carrier.state().to_string(), carrier.floor());
    }

    Ok(())
}

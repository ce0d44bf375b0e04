//! The `Sim` struct and its tick loop.

use std::fmt;

use am_carrier::Fleet;
use am_core::{SimClock, SimConfig, Tick};
use am_pool::AllocationEngine;

use crate::{DeliveryLog, ItemSource, SimObserver, SimResult};

// ── SimSummary ────────────────────────────────────────────────────────────────

/// Outcome of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSummary {
    /// Tick the run stopped at (exclusive).
    pub final_tick: Tick,
    /// `true` if every arrived item was delivered and the source ran dry.
    pub completed:  bool,
    pub arrived:    usize,
    pub delivered:  usize,
    pub score:      f64,
    pub mean_delay: f64,
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} delivered, score {:.2}, mean delay {:.2} ticks{}",
            self.final_tick,
            self.delivered,
            self.arrived,
            self.score,
            self.mean_delay,
            if self.completed { "" } else { " (incomplete)" }
        )
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: ItemSource> {
    pub config: SimConfig,

    pub clock: SimClock,

    /// Every carrier, indexed by id.
    pub fleet: Fleet,

    /// The allocation engine (waiting queue, idle set, coalition).
    pub pool: AllocationEngine,

    pub source: S,

    /// Completed deliveries, stamped with their tick.
    pub deliveries: DeliveryLog,

    /// Items taken from the source so far.
    arrived: usize,
}

impl<S: ItemSource> Sim<S> {
    pub(crate) fn new(
        config:     SimConfig,
        fleet:      Fleet,
        pool:       AllocationEngine,
        source:     S,
        deliveries: DeliveryLog,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            fleet,
            pool,
            source,
            deliveries,
            arrived: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until all mail is delivered or `config.end_tick()` is reached.
    ///
    /// # Errors
    /// Stops at the first `ItemTooHeavy` or `ExcessiveDelivery`; both mean
    /// the run cannot continue meaningfully.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimSummary> {
        while !self.is_finished() && self.clock.now() < self.config.end_tick() {
            self.tick(observer)?;
        }
        let summary = self.summary();
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// `true` once the source is exhausted and everything that arrived has
    /// been delivered.
    pub fn is_finished(&self) -> bool {
        self.source.is_exhausted() && self.deliveries.len() == self.arrived
    }

    /// Items taken from the source so far.
    pub fn arrived(&self) -> usize {
        self.arrived
    }

    pub fn summary(&self) -> SimSummary {
        SimSummary {
            final_tick: self.clock.now(),
            completed:  self.is_finished(),
            arrived:    self.arrived,
            delivered:  self.deliveries.len(),
            score:      self.deliveries.total_score(),
            mean_delay: self.deliveries.mean_delay(),
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now();
        observer.on_tick_start(now);

        // ── Phase 1: arrivals ─────────────────────────────────────────────
        for item in self.source.arrivals(now) {
            observer.on_arrival(&item);
            self.pool.add_to_pool(item);
            self.arrived += 1;
        }

        // ── Phase 2: allocation, strictly before any movement ─────────────
        self.pool.step(&mut self.fleet)?;

        // ── Phase 3: carriers in id order ─────────────────────────────────
        self.deliveries.set_tick(now);
        let delivered_before = self.deliveries.len();
        for carrier in self.fleet.iter_mut() {
            if let Some(transition) = carrier.step(now, &mut self.pool, &mut self.deliveries)? {
                observer.on_transition(&transition);
            }
        }

        // ── Phase 4: report ───────────────────────────────────────────────
        for record in &self.deliveries.records()[delivered_before..] {
            observer.on_delivery(record);
        }
        observer.on_tick_end(now, &self.pool);

        self.clock.advance();
        Ok(())
    }
}

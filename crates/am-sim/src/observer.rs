//! Simulation observer trait for tracing and data collection.
//!
//! Observers run after each step has finished; nothing they do can affect
//! allocation or carrier state.

use am_carrier::Transition;
use am_core::{MailItem, Tick};
use am_pool::AllocationEngine;

use crate::{DeliveryRecord, SimSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — delivery counter
///
/// ```rust,ignore
/// struct Counter { delivered: usize }
///
/// impl SimObserver for Counter {
///     fn on_delivery(&mut self, _record: &DeliveryRecord) {
///         self.delivered += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before arrivals.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for each item as it enters the waiting queue.
    fn on_arrival(&mut self, _item: &MailItem) {}

    /// Called after a carrier completes a state change (or a tube refill).
    fn on_transition(&mut self, _transition: &Transition) {}

    /// Called for each item handed over this tick.
    fn on_delivery(&mut self, _record: &DeliveryRecord) {}

    /// Called at the end of each tick with read-only access to the engine.
    fn on_tick_end(&mut self, _tick: Tick, _pool: &AllocationEngine) {}

    /// Called once after the final tick.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Emits `tracing` events: state changes and arrivals at `debug`, deliveries
/// and the final summary at `info`.
#[derive(Default)]
pub struct TracingObserver;

impl SimObserver for TracingObserver {
    fn on_arrival(&mut self, item: &MailItem) {
        tracing::debug!(tick = item.arrival.0, item = %item, "added to pool");
    }

    fn on_transition(&mut self, t: &Transition) {
        if t.is_state_change() {
            tracing::debug!(
                tick = t.tick.0,
                carrier = %t.carrier,
                tube = t.tube,
                "changed from {} to {}",
                t.from,
                t.to
            );
        }
        if let Some(item) = t.item {
            tracing::debug!(tick = t.tick.0, carrier = %t.carrier, item = %item, "-> delivering");
        }
    }

    fn on_delivery(&mut self, record: &DeliveryRecord) {
        tracing::info!(
            tick = record.tick.0,
            item = %record.item,
            delay = record.delay(),
            "delivered"
        );
    }

    fn on_sim_end(&mut self, summary: &SimSummary) {
        tracing::info!(%summary, "simulation finished");
    }
}

//! The delivery sink used by the driver, with scoring.

use am_carrier::DeliverySink;
use am_core::{MailItem, Tick};

/// Exponent applied to delivery delay when scoring.
pub const DELAY_PENALTY: f64 = 1.2;

/// One completed delivery.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeliveryRecord {
    pub item: MailItem,
    pub tick: Tick,
}

impl DeliveryRecord {
    /// Ticks between arrival in the mailroom and hand-over.
    #[inline]
    pub fn delay(&self) -> u64 {
        self.tick.since(self.item.arrival)
    }

    /// `delay^penalty * (1 + sqrt(priority))`.  Lower is better.
    pub fn score(&self, penalty: f64) -> f64 {
        (self.delay() as f64).powf(penalty) * (1.0 + (self.item.priority as f64).sqrt())
    }
}

/// Records every delivery stamped with the tick it happened on.
///
/// The driver calls [`set_tick`][Self::set_tick] before stepping carriers;
/// carriers only see the [`DeliverySink`] side.
#[derive(Debug, Clone)]
pub struct DeliveryLog {
    now:     Tick,
    penalty: f64,
    records: Vec<DeliveryRecord>,
}

impl DeliveryLog {
    pub fn new(penalty: f64) -> Self {
        Self { now: Tick::ZERO, penalty, records: Vec::new() }
    }

    #[inline]
    pub fn set_tick(&mut self, now: Tick) {
        self.now = now;
    }

    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of per-delivery scores.
    pub fn total_score(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(|r| r.score(self.penalty)).sum()
    }

    /// Mean delay in ticks, or `0.0` if nothing has been delivered.
    pub fn mean_delay(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let total: u64 = self.records.iter().map(DeliveryRecord::delay).sum();
        total as f64 / self.records.len() as f64
    }
}

impl Default for DeliveryLog {
    fn default() -> Self {
        Self::new(DELAY_PENALTY)
    }
}

impl DeliverySink for DeliveryLog {
    fn deliver(&mut self, item: MailItem) {
        debug_assert!(
            self.records.iter().all(|r| r.item.id != item.id),
            "item {} delivered twice",
            item.id
        );
        self.records.push(DeliveryRecord { item, tick: self.now });
    }
}

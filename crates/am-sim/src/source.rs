//! Item sources — where new mail comes from.

use std::collections::BTreeMap;

use am_core::{MailItem, Tick};

/// Supplies the items that enter the mailroom each tick.
pub trait ItemSource {
    /// Items arriving at or before `now` that have not been handed out yet.
    fn arrivals(&mut self, now: Tick) -> Vec<MailItem>;

    /// `true` once no further items will ever arrive.
    fn is_exhausted(&self) -> bool;
}

/// A fixed, pre-computed arrival schedule keyed by tick.
///
/// Items sharing a tick are handed out in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct ScheduledArrivals {
    inner: BTreeMap<Tick, Vec<MailItem>>,
    total: usize,
}

impl ScheduledArrivals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule every item at its own `arrival` tick.
    pub fn from_items(items: impl IntoIterator<Item = MailItem>) -> Self {
        let mut schedule = Self::new();
        for item in items {
            schedule.push(item);
        }
        schedule
    }

    pub fn push(&mut self, item: MailItem) {
        self.inner.entry(item.arrival).or_default().push(item);
        self.total += 1;
    }

    /// Items not yet handed out.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Tick of the next pending arrival, or `None` if drained.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// All pending items in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &MailItem> {
        self.inner.values().flatten()
    }
}

impl ItemSource for ScheduledArrivals {
    fn arrivals(&mut self, now: Tick) -> Vec<MailItem> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let items: Vec<MailItem> = due.into_values().flatten().collect();
        self.total -= items.len();
        items
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_empty()
    }
}

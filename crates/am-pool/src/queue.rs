//! The waiting queue of unassigned items.

use std::cmp::Ordering;
use std::collections::VecDeque;

use am_core::{ItemId, MailItem};

/// Order in which waiting items are offered to carriers.
///
/// Higher priority first; at equal priority the higher destination floor
/// goes first.
pub fn dispatch_order(a: &MailItem, b: &MailItem) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.destination.cmp(&a.destination))
}

/// Unassigned items, kept sorted by [`dispatch_order`].
///
/// The sort is stable, so items with equal keys keep their arrival order.
#[derive(Debug, Clone, Default)]
pub struct WaitingQueue {
    items: VecDeque<MailItem>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item` and restore ordering.
    pub fn push(&mut self, item: MailItem) {
        self.items.push_back(item);
        self.items.make_contiguous().sort_by(dispatch_order);
    }

    /// The item the next idle carrier will be offered.
    #[inline]
    pub fn head(&self) -> Option<&MailItem> {
        self.items.front()
    }

    pub fn pop_head(&mut self) -> Option<MailItem> {
        self.items.pop_front()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Items in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &MailItem> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! The two collaborators a carrier talks to while stepping.

use am_core::{CarrierId, MailItem};

/// The mailroom side of the allocation engine, as seen by a carrier.
///
/// A carrier reaching the mailroom hands back any undelivered tube item and
/// then registers itself as idle.
pub trait Mailroom {
    /// Mark `carrier` idle and available for loading on the next engine step.
    fn register_waiting(&mut self, carrier: CarrierId);

    /// Return `item` to the waiting queue.
    fn add_to_pool(&mut self, item: MailItem);
}

/// Receives each item exactly once when its delivery completes.
pub trait DeliverySink {
    fn deliver(&mut self, item: MailItem);
}

impl DeliverySink for Vec<MailItem> {
    fn deliver(&mut self, item: MailItem) {
        self.push(item);
    }
}

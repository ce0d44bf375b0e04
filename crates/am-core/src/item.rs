//! The immutable mail item value.

use std::fmt;

use crate::{ItemId, Tick};

/// Priority level of ordinary (non-priority) mail.
pub const REGULAR_PRIORITY: u32 = 1;

/// One parcel waiting for, or undergoing, delivery.
///
/// Items are plain values: every carrier in a coalition holds its own copy of
/// the same item, and identity is decided by [`ItemId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailItem {
    pub id:          ItemId,
    /// Weight in grams.
    pub weight:      u32,
    /// Floor the item must be delivered to.
    pub destination: u32,
    /// Higher is more urgent.  Regular mail uses [`REGULAR_PRIORITY`].
    pub priority:    u32,
    /// Tick at which the item entered the mailroom.
    pub arrival:     Tick,
}

impl MailItem {
    /// A regular-priority item.
    pub fn new(id: ItemId, destination: u32, arrival: Tick, weight: u32) -> Self {
        Self { id, weight, destination, priority: REGULAR_PRIORITY, arrival }
    }

    /// Return a copy of this item at priority `level`.
    pub fn with_priority(mut self, level: u32) -> Self {
        self.priority = level;
        self
    }

    #[inline]
    pub fn is_priority(&self) -> bool {
        self.priority > REGULAR_PRIORITY
    }
}

impl fmt::Display for MailItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} floor {} weight {} g arrived {}",
            self.id, self.destination, self.weight, self.arrival
        )?;
        if self.is_priority() {
            write!(f, " priority {}", self.priority)?;
        }
        Ok(())
    }
}

//! Carrier states and the transition record handed to observers.

use std::fmt;

use am_core::{CarrierId, MailItem, Tick};

/// Where a carrier is in its delivery cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CarrierState {
    /// Heading back to the mailroom.
    Returning,
    /// Idle at the mailroom and registered with the allocation engine.
    Waiting,
    /// En route to a destination with an item in hand.
    Delivering,
}

impl fmt::Display for CarrierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarrierState::Returning  => "RETURNING",
            CarrierState::Waiting    => "WAITING",
            CarrierState::Delivering => "DELIVERING",
        };
        f.write_str(s)
    }
}

/// A completed state change, reported after the carrier has finished it.
///
/// `from == to == Delivering` marks a tube refill: the carrier delivered its
/// hand item and set off with the former tube item without returning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub carrier: CarrierId,
    pub tick:    Tick,
    pub from:    CarrierState,
    pub to:      CarrierState,
    /// The item now in hand when `to` is `Delivering`.
    pub item:    Option<MailItem>,
    /// Whether the tube still holds an item after the transition.
    pub tube:    bool,
}

impl Transition {
    /// `true` if the carrier set off with a new item (fresh dispatch or refill).
    #[inline]
    pub fn started_route(&self) -> bool {
        self.to == CarrierState::Delivering
    }

    /// `true` if the state actually changed.
    #[inline]
    pub fn is_state_change(&self) -> bool {
        self.from != self.to
    }
}

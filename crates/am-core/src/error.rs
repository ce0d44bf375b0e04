//! Simulator error type.
//!
//! Both designed failure kinds are logic-level invariant violations, not
//! transient faults: callers surface them and stop, they never retry.
//! Configuration, parse and I/O failures belong to the driver layer and live
//! in `am-sim`'s `SimError`, which wraps `MailError` as one variant.

use thiserror::Error;

use crate::{CarrierId, ItemId};

/// Errors raised by carriers and the allocation engine.
#[derive(Debug, Error)]
pub enum MailError {
    /// The item exceeds the weight ceiling of the slot (or coalition size) it
    /// was routed to.  It can never be delivered under the current capacity
    /// rules.
    #[error("item {item} weighs {weight} g, above the {limit} g limit")]
    ItemTooHeavy {
        item:   ItemId,
        weight: u32,
        limit:  u32,
    },

    /// A carrier completed more than two hand-offs without returning to the
    /// mailroom.  Indicates a defect in the ride-along logic.
    #[error("carrier {carrier} made {deliveries} deliveries without a refill")]
    ExcessiveDelivery {
        carrier:    CarrierId,
        deliveries: u32,
    },

    #[error("carrier {0} is not part of the fleet")]
    UnknownCarrier(CarrierId),
}

/// Shorthand result type for all `am-*` crates.
pub type MailResult<T> = Result<T, MailError>;

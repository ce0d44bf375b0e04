//! `am-carrier` — the per-carrier delivery state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`state`]     | `CarrierState`, `Transition`                                |
//! | [`carrier`]   | `Carrier` — hand/tube slots, motion, delivery, return       |
//! | [`fleet`]     | `Fleet` — all carriers of a run, looked up by `CarrierId`   |
//! | [`port`]      | `Mailroom`, `DeliverySink` — what a carrier talks to        |
//!
//! # State machine
//!
//! ```text
//!            reach mailroom                 dispatch + non-empty
//! RETURNING ────────────────▶ WAITING ───────────────────────────▶ DELIVERING
//!     ▲                                                               │  │
//!     │           arrive, tube empty                                  │  │ arrive, tube
//!     └───────────────────────────────────────────────────────────────┘  │ refills hand
//!                                                                        ▼
//!                                                                    DELIVERING
//! ```
//!
//! A carrier never prints or logs.  [`Carrier::step`] returns the
//! [`Transition`] it made (if any) and the driver forwards it to observers.

pub mod carrier;
pub mod fleet;
pub mod port;
pub mod state;


pub use carrier::{Carrier, MAX_DELIVERIES_PER_RUN};
pub use fleet::Fleet;
pub use port::{DeliverySink, Mailroom};
pub use state::{CarrierState, Transition};

//! `am-core` — foundational types for the automail delivery simulator.
//!
//! This crate is a dependency of every other `am-*` crate.  It has no `am-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CarrierId`, `ItemId`, `IdGenerator`                  |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`building`]    | `Building` layout constants                           |
//! | [`item`]        | `MailItem`                                            |
//! | [`capacity`]    | `Capacity`, `WeightBand`, carrier speeds              |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `MailError`, `MailResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod building;
pub mod capacity;
pub mod error;
pub mod ids;
pub mod item;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use building::Building;
pub use capacity::{Capacity, GROUP_SPEED, SINGLE_SPEED, WeightBand};
pub use error::{MailError, MailResult};
pub use ids::{CarrierId, IdGenerator, ItemId, SequentialId};
pub use item::{MailItem, REGULAR_PRIORITY};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};

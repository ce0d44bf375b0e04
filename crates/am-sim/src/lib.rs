//! `am-sim` — tick loop orchestrator for the automail simulator.
//!
//! # Tick order
//!
//! ```text
//! for tick in 0..config.total_ticks (or until all mail is delivered):
//!   ① Arrivals   — drain the item source, add_to_pool each item.
//!   ② Allocate   — AllocationEngine::step loads and dispatches idle carriers.
//!   ③ Carriers   — Carrier::step for every carrier in id order; returning
//!                  carriers re-register, deliveries land in the DeliveryLog.
//!   ④ Observe    — transitions and deliveries are forwarded to the observer.
//! ```
//!
//! Allocation always completes before any carrier moves, so coalition
//! completion and dispatch are decided on the positions of the previous tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use am_core::{SimConfig, SimRng};
//! use am_sim::{GeneratorConfig, NoopObserver, SimBuilder, generate_mail};
//!
//! let config = SimConfig::default();
//! let mut rng = SimRng::new(config.seed);
//! let mail = generate_mail(&GeneratorConfig::default(), &config.building, &mut rng)?;
//! let mut sim = SimBuilder::new(config, mail).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod delivery;
pub mod error;
pub mod generator;
pub mod loader;
pub mod observer;
pub mod sim;
pub mod source;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use delivery::{DELAY_PENALTY, DeliveryLog, DeliveryRecord};
pub use error::{SimError, SimResult};
pub use generator::{GeneratorConfig, generate_mail};
pub use loader::{load_arrivals_csv, load_arrivals_reader};
pub use observer::{NoopObserver, SimObserver, TracingObserver};
pub use sim::{Sim, SimSummary};
pub use source::{ItemSource, ScheduledArrivals};

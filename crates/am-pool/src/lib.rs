//! `am-pool` — the allocation engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`queue`]       | `WaitingQueue` — items ordered by `dispatch_order`        |
//! | [`coalition`]   | `Coalition` — carriers gathered for one heavy item        |
//! | [`engine`]      | `AllocationEngine` — per-tick matching and dispatch       |
//!
//! # Per-tick matching
//!
//! ```text
//! for carrier in idle (registration order):
//!   ① queue empty                → carrier stays idle
//!   ② head ≠ coalition target    → dissolve coalition, members released
//!   ③ head to hand               → solo: done; heavy: join / open coalition
//!   ④ done and next head is solo → next head rides along in the tube
//!   ⑤ done                       → dispatch carrier (or whole coalition)
//!   ⑥ carrier leaves idle set
//! released carriers rejoin idle after the pass
//! ```
//!
//! The engine owns the waiting queue, the idle set, and the single active
//! coalition.  Carriers are reached through [`am_carrier::Fleet`] by id only.

pub mod coalition;
pub mod engine;
pub mod queue;


pub use coalition::Coalition;
pub use engine::AllocationEngine;
pub use queue::{WaitingQueue, dispatch_order};

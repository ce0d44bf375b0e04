//! The allocation engine: matches waiting items to idle carriers each tick.

use am_carrier::{Carrier, Fleet, Mailroom};
use am_core::{Capacity, CarrierId, MailError, MailItem, MailResult, WeightBand};

use crate::{Coalition, WaitingQueue};

/// Owns the waiting queue, the idle set, and the active coalition.
///
/// Drive it with [`step`][Self::step] once per tick, before any carrier
/// steps: coalition completion and dispatch are decided before movement.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    capacity:  Capacity,
    queue:     WaitingQueue,
    /// Idle carriers in registration order.
    idle:      Vec<CarrierId>,
    coalition: Option<Coalition>,
}

impl AllocationEngine {
    pub fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            queue:     WaitingQueue::new(),
            idle:      Vec::new(),
            coalition: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    #[inline]
    pub fn queue(&self) -> &WaitingQueue {
        &self.queue
    }

    /// Idle carriers in the order they will be offered items.
    #[inline]
    pub fn idle(&self) -> &[CarrierId] {
        &self.idle
    }

    /// The coalition currently being assembled, if any.
    #[inline]
    pub fn coalition(&self) -> Option<&Coalition> {
        self.coalition.as_ref()
    }

    /// Number of items still waiting for a carrier.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    // ── Inputs ────────────────────────────────────────────────────────────

    /// Queue a newly arrived (or handed back) item.
    pub fn add_to_pool(&mut self, item: MailItem) {
        self.queue.push(item);
    }

    /// Mark `carrier` idle.  A carrier registers at most once per return.
    pub fn register_waiting(&mut self, carrier: CarrierId) {
        debug_assert!(!self.idle.contains(&carrier), "carrier {carrier} registered twice");
        self.idle.push(carrier);
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Offer the queue to every idle carrier, in registration order.
    ///
    /// Carriers released by a preemption rejoin the idle set after the pass,
    /// so they are next considered on the following tick.
    ///
    /// # Errors
    /// [`MailError::ItemTooHeavy`] if the queue head is above every weight
    /// band.  The item stays queued and the carrier that was offered it stays
    /// idle; the rest of the pass is skipped.
    pub fn step(&mut self, fleet: &mut Fleet) -> MailResult<()> {
        let offered = std::mem::take(&mut self.idle);
        let mut released = Vec::new();
        let mut outcome = Ok(());

        for id in offered {
            if outcome.is_err() || self.queue.is_empty() {
                self.idle.push(id);
                continue;
            }
            if let Err(e) = self.load_carrier(id, fleet, &mut released) {
                self.idle.push(id);
                outcome = Err(e);
            }
        }

        self.idle.extend(released);
        outcome
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Give the queue head to `id`, growing or completing a coalition and
    /// dispatching when the item can leave.
    fn load_carrier(
        &mut self,
        id:       CarrierId,
        fleet:    &mut Fleet,
        released: &mut Vec<CarrierId>,
    ) -> MailResult<()> {
        let Some(head) = self.queue.head().copied() else {
            return Ok(());
        };

        let preempted = self.coalition.as_ref().is_some_and(|c| c.item().id != head.id);
        if preempted {
            self.dissolve(fleet, released)?;
        }

        let band = self.capacity.band(head.weight).ok_or(MailError::ItemTooHeavy {
            item:   head.id,
            weight: head.weight,
            limit:  self.capacity.triple_max,
        })?;

        let fleet_size = fleet.len();
        let carrier = carrier_mut(fleet, id)?;
        carrier.add_to_hand(head)?;

        let ready = match band {
            WeightBand::Solo => true,
            WeightBand::Pair | WeightBand::Triple => self.enlist(carrier, head, band),
        };
        if !ready {
            if let Some(coalition) = self.coalition.as_ref().filter(|c| c.is_stranded(fleet_size)) {
                tracing::warn!(
                    coalition = %coalition,
                    fleet = fleet_size,
                    "coalition can never complete with this fleet; item waits until preempted"
                );
            }
            return Ok(());
        }

        self.queue.pop_head();
        self.ride_along(carrier)?;

        match self.coalition.take() {
            Some(coalition) => {
                tracing::debug!(coalition = %coalition, "dispatching coalition");
                for &member in coalition.members() {
                    carrier_mut(fleet, member)?.dispatch();
                }
            }
            None => {
                tracing::trace!(carrier = %id, item = %head.id, "dispatching carrier");
                carrier_mut(fleet, id)?.dispatch();
            }
        }
        Ok(())
    }

    /// Add `carrier` to the coalition for `item`, opening one if none is
    /// active.  Returns `true` once the coalition is large enough.
    fn enlist(&mut self, carrier: &mut Carrier, item: MailItem, band: WeightBand) -> bool {
        match self.coalition.as_mut() {
            Some(coalition) => {
                if coalition.add(carrier.id()) {
                    carrier.join_coalition(false);
                }
                tracing::debug!(coalition = %coalition, "carrier joined coalition");
            }
            None => {
                carrier.join_coalition(true);
                let coalition = Coalition::new(item, band, carrier.id());
                tracing::debug!(coalition = %coalition, "coalition opened");
                self.coalition = Some(coalition);
            }
        }
        self.coalition.as_ref().is_some_and(Coalition::is_complete)
    }

    /// Load the new queue head into `carrier`'s tube if it can go solo.
    fn ride_along(&mut self, carrier: &mut Carrier) -> MailResult<()> {
        let Some(next) = self.queue.head().copied() else {
            return Ok(());
        };
        if self.capacity.band(next.weight) != Some(WeightBand::Solo) {
            return Ok(());
        }
        carrier.add_to_tube(next)?;
        self.queue.pop_head();
        tracing::trace!(carrier = %carrier.id(), item = %next.id, "ride-along loaded into tube");
        Ok(())
    }

    /// Break up the active coalition; members drop their copy of the item and
    /// are queued for re-registration.
    fn dissolve(&mut self, fleet: &mut Fleet, released: &mut Vec<CarrierId>) -> MailResult<()> {
        let Some(coalition) = self.coalition.take() else {
            return Ok(());
        };
        tracing::debug!(coalition = %coalition, "coalition preempted");
        for &member in coalition.members() {
            carrier_mut(fleet, member)?.release_hand();
            released.push(member);
        }
        Ok(())
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(Capacity::default())
    }
}

impl Mailroom for AllocationEngine {
    fn register_waiting(&mut self, carrier: CarrierId) {
        AllocationEngine::register_waiting(self, carrier);
    }

    fn add_to_pool(&mut self, item: MailItem) {
        AllocationEngine::add_to_pool(self, item);
    }
}

fn carrier_mut(fleet: &mut Fleet, id: CarrierId) -> MailResult<&mut Carrier> {
    fleet.get_mut(id).ok_or(MailError::UnknownCarrier(id))
}

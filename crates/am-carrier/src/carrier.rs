//! The carrier state machine.

use am_core::{
    Building, Capacity, CarrierId, GROUP_SPEED, MailError, MailItem, MailResult, SINGLE_SPEED,
    Tick,
};

use crate::{CarrierState, DeliverySink, Mailroom, Transition};

/// Hand-offs a carrier may complete per run: the hand item plus one tube refill.
pub const MAX_DELIVERIES_PER_RUN: u32 = 2;

/// Distance under which a carrier counts as standing on a floor.
///
/// Motion never overshoots, so after the last step a carrier sits on its
/// target up to float rounding; half a coalition step absorbs that.
const ARRIVAL_TOLERANCE: f64 = GROUP_SPEED / 2.0;

/// One autonomous carrier unit.
///
/// Everything except coalition membership is owned by the carrier itself.
/// The allocation engine toggles membership through
/// [`join_coalition`][Self::join_coalition] and
/// [`release_hand`][Self::release_hand] while the carrier is still waiting;
/// once a fresh route starts the carrier clears it on its own.
#[derive(Debug, Clone)]
pub struct Carrier {
    id:               CarrierId,
    state:            CarrierState,
    floor:            f64,
    destination:      Option<u32>,
    mailroom_floor:   u32,
    capacity:         Capacity,
    hand:             Option<MailItem>,
    tube:             Option<MailItem>,
    in_coalition:     bool,
    /// Set when this carrier is the one that reports the hand item to the
    /// delivery sink.  Only one member of a coalition reports.
    reports_delivery: bool,
    dispatched:       bool,
    pub(crate) deliveries_this_run: u32,
}

impl Carrier {
    /// A carrier standing in the mailroom, about to register itself.
    ///
    /// Carriers start in `Returning` so their first [`step`][Self::step]
    /// registers them with the allocation engine.
    pub fn new(id: CarrierId, building: &Building, capacity: Capacity) -> Self {
        Self {
            id,
            state:               CarrierState::Returning,
            floor:               building.mailroom_position(),
            destination:         None,
            mailroom_floor:      building.mailroom_floor,
            capacity,
            hand:                None,
            tube:                None,
            in_coalition:        false,
            reports_delivery:    false,
            dispatched:          false,
            deliveries_this_run: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> CarrierId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> CarrierState {
        self.state
    }

    /// Current position; fractional while moving with a coalition.
    #[inline]
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Destination floor, set only while delivering.
    #[inline]
    pub fn destination(&self) -> Option<u32> {
        self.destination
    }

    #[inline]
    pub fn hand(&self) -> Option<&MailItem> {
        self.hand.as_ref()
    }

    #[inline]
    pub fn tube(&self) -> Option<&MailItem> {
        self.tube.as_ref()
    }

    /// `true` if neither the hand nor the tube holds an item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hand.is_none() && self.tube.is_none()
    }

    #[inline]
    pub fn in_coalition(&self) -> bool {
        self.in_coalition
    }

    #[inline]
    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }

    #[inline]
    pub fn reports_delivery(&self) -> bool {
        self.reports_delivery
    }

    /// Hand-offs completed since the last dispatch.
    #[inline]
    pub fn deliveries_this_run(&self) -> u32 {
        self.deliveries_this_run
    }

    // ── Loading (driven by the allocation engine) ─────────────────────────

    /// Put `item` in the hand slot.  The carrier reports it on delivery
    /// unless a later [`join_coalition`][Self::join_coalition] says otherwise.
    ///
    /// # Errors
    /// [`MailError::ItemTooHeavy`] if the item exceeds the hand ceiling; the
    /// slot stays empty.
    ///
    /// # Panics
    /// Panics if the hand is already occupied.
    pub fn add_to_hand(&mut self, item: MailItem) -> MailResult<()> {
        assert!(self.hand.is_none(), "carrier {} already has an item in hand", self.id);
        check_weight(&item, self.capacity.hand_limit())?;
        self.hand = Some(item);
        self.reports_delivery = true;
        Ok(())
    }

    /// Put `item` in the tube, to be delivered right after the hand item.
    ///
    /// # Errors
    /// [`MailError::ItemTooHeavy`] if the item is too heavy to deliver solo;
    /// the slot stays empty.
    ///
    /// # Panics
    /// Panics if the tube is already occupied.
    pub fn add_to_tube(&mut self, item: MailItem) -> MailResult<()> {
        assert!(self.tube.is_none(), "carrier {} already has an item in the tube", self.id);
        check_weight(&item, self.capacity.tube_limit())?;
        self.tube = Some(item);
        Ok(())
    }

    /// Mark this carrier as a coalition member.  Only the `lead` member
    /// reports the shared item to the delivery sink.
    pub fn join_coalition(&mut self, lead: bool) {
        self.in_coalition = true;
        self.reports_delivery = lead;
    }

    /// Drop the hand item and coalition membership after a preemption.
    ///
    /// The item itself is still in the engine's queue; only this carrier's
    /// copy is discarded.
    pub fn release_hand(&mut self) {
        debug_assert_eq!(self.state, CarrierState::Waiting);
        self.hand = None;
        self.reports_delivery = false;
        self.in_coalition = false;
    }

    /// Authorize the carrier to leave the mailroom on its next step.
    #[inline]
    pub fn dispatch(&mut self) {
        self.dispatched = true;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick.
    ///
    /// Returns the transition made this tick, if any.
    ///
    /// # Errors
    /// [`MailError::ExcessiveDelivery`] if this arrival is the third hand-off
    /// since the last dispatch.
    pub fn step<M, S>(&mut self, now: Tick, mailroom: &mut M, sink: &mut S) -> MailResult<Option<Transition>>
    where
        M: Mailroom + ?Sized,
        S: DeliverySink + ?Sized,
    {
        match self.state {
            CarrierState::Returning => {
                let home = self.mailroom_floor as f64;
                if !self.is_at(home) {
                    self.move_towards(home, SINGLE_SPEED);
                    return Ok(None);
                }
                self.floor = home;
                if let Some(item) = self.tube.take() {
                    mailroom.add_to_pool(item);
                }
                mailroom.register_waiting(self.id);
                Ok(Some(self.change_state(now, CarrierState::Waiting)))
            }

            CarrierState::Waiting => {
                if !self.dispatched {
                    return Ok(None);
                }
                let Some(item) = self.hand else {
                    // Nothing to carry yet; keep the signal for when the hand is filled.
                    return Ok(None);
                };
                self.dispatched = false;
                self.deliveries_this_run = 0;
                self.destination = Some(item.destination);
                Ok(Some(self.change_state(now, CarrierState::Delivering)))
            }

            CarrierState::Delivering => {
                let Some(dest) = self.destination else {
                    return Ok(Some(self.head_home(now)));
                };
                let target = dest as f64;
                if self.is_at(target) {
                    self.floor = target;
                    self.arrive(now, sink)
                } else {
                    let speed = if self.in_coalition { GROUP_SPEED } else { SINGLE_SPEED };
                    self.move_towards(target, speed);
                    Ok(None)
                }
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Hand the item over, then refill from the tube or head home.
    fn arrive<S: DeliverySink + ?Sized>(&mut self, now: Tick, sink: &mut S) -> MailResult<Option<Transition>> {
        let Some(item) = self.hand.take() else {
            return Ok(Some(self.head_home(now)));
        };
        if self.reports_delivery {
            sink.deliver(item);
        }
        self.reports_delivery = false;

        self.deliveries_this_run += 1;
        if self.deliveries_this_run > MAX_DELIVERIES_PER_RUN {
            return Err(MailError::ExcessiveDelivery {
                carrier:    self.id,
                deliveries: self.deliveries_this_run,
            });
        }

        self.in_coalition = false;
        match self.tube.take() {
            Some(next) => {
                self.hand = Some(next);
                self.reports_delivery = true;
                self.destination = Some(next.destination);
                Ok(Some(self.change_state(now, CarrierState::Delivering)))
            }
            None => Ok(Some(self.head_home(now))),
        }
    }

    fn head_home(&mut self, now: Tick) -> Transition {
        self.in_coalition = false;
        self.destination = None;
        self.change_state(now, CarrierState::Returning)
    }

    fn change_state(&mut self, now: Tick, next: CarrierState) -> Transition {
        debug_assert!(
            !(self.hand.is_none() && self.tube.is_some()),
            "carrier {} holds a tube item with an empty hand",
            self.id
        );
        let transition = Transition {
            carrier: self.id,
            tick:    now,
            from:    self.state,
            to:      next,
            item:    if next == CarrierState::Delivering { self.hand } else { None },
            tube:    self.tube.is_some(),
        };
        self.state = next;
        transition
    }

    #[inline]
    fn is_at(&self, target: f64) -> bool {
        (self.floor - target).abs() < ARRIVAL_TOLERANCE
    }

    /// Move toward `target` by at most `speed` floors.
    fn move_towards(&mut self, target: f64, speed: f64) {
        let remaining = target - self.floor;
        if remaining.abs() <= speed {
            self.floor = target;
        } else {
            self.floor += speed.copysign(remaining);
        }
    }
}

fn check_weight(item: &MailItem, limit: u32) -> MailResult<()> {
    if item.weight > limit {
        return Err(MailError::ItemTooHeavy { item: item.id, weight: item.weight, limit });
    }
    Ok(())
}

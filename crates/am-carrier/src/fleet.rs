//! `Fleet` — every carrier of one simulation run.

use am_core::{Building, Capacity, CarrierId, IdGenerator};

use crate::{Carrier, CarrierState};

/// Owns all carriers; the allocation engine refers to them only by id.
///
/// Ids are drawn consecutively from the injected generator at construction,
/// so lookup is a subtraction and an index.
#[derive(Debug, Clone)]
pub struct Fleet {
    first:    u32,
    carriers: Vec<Carrier>,
}

impl Fleet {
    /// Create `count` carriers in the mailroom of `building`.
    pub fn new(
        count:    usize,
        building: &Building,
        capacity: Capacity,
        ids:      &mut IdGenerator<CarrierId>,
    ) -> Self {
        let first = ids.peek();
        let carriers = (0..count)
            .map(|_| Carrier::new(ids.next_id(), building, capacity))
            .collect();
        Self { first, carriers }
    }

    pub fn get(&self, id: CarrierId) -> Option<&Carrier> {
        let slot = id.0.checked_sub(self.first)? as usize;
        self.carriers.get(slot)
    }

    pub fn get_mut(&mut self, id: CarrierId) -> Option<&mut Carrier> {
        let slot = id.0.checked_sub(self.first)? as usize;
        self.carriers.get_mut(slot)
    }

    /// Carriers in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Carrier> {
        self.carriers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Carrier> {
        self.carriers.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = CarrierId> + '_ {
        self.carriers.iter().map(Carrier::id)
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }

    /// `true` once every carrier is back in the mailroom with nothing loaded.
    pub fn is_settled(&self) -> bool {
        self.carriers
            .iter()
            .all(|c| c.state() == CarrierState::Waiting && c.is_empty())
    }

    /// Number of carriers in `state`.
    pub fn count_in(&self, state: CarrierState) -> usize {
        self.carriers.iter().filter(|c| c.state() == state).count()
    }
}

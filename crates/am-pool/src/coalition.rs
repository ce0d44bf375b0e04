//! Ad-hoc groups of carriers lifting one heavy item together.

use std::fmt;

use am_core::{CarrierId, MailItem, WeightBand};

/// Carriers gathered for one over-capacity item.
///
/// Membership is unique; insertion order is kept for display.  The engine
/// drops the coalition as soon as it dispatches or is preempted.
#[derive(Debug, Clone)]
pub struct Coalition {
    item:    MailItem,
    band:    WeightBand,
    members: Vec<CarrierId>,
}

impl Coalition {
    /// Open a coalition for `item` with `first` as its lead member.
    pub fn new(item: MailItem, band: WeightBand, first: CarrierId) -> Self {
        Self { item, band, members: vec![first] }
    }

    /// The item this coalition is assembling for.
    #[inline]
    pub fn item(&self) -> &MailItem {
        &self.item
    }

    #[inline]
    pub fn band(&self) -> WeightBand {
        self.band
    }

    /// Add `carrier`.  Returns `false` if it was already a member.
    pub fn add(&mut self, carrier: CarrierId) -> bool {
        if self.contains(carrier) {
            return false;
        }
        self.members.push(carrier);
        true
    }

    pub fn contains(&self, carrier: CarrierId) -> bool {
        self.members.contains(&carrier)
    }

    /// Members in the order they joined.
    #[inline]
    pub fn members(&self) -> &[CarrierId] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `true` once enough carriers have joined to lift the item.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.members.len() >= self.band.required_carriers()
    }

    /// `true` if a fleet of `fleet_size` carriers can never complete this
    /// coalition.  The item then waits until it is preempted.
    #[inline]
    pub fn is_stranded(&self, fleet_size: usize) -> bool {
        self.band.required_carriers() > fleet_size
    }
}

impl fmt::Display for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{id}")?;
        }
        write!(
            f,
            "] {}/{} for {}",
            self.members.len(),
            self.band.required_carriers(),
            self.item.id
        )
    }
}

//! Building layout constants.

/// Static layout of the building the fleet operates in.
///
/// Floors are numbered from `mailroom_floor` upward; every delivery
/// destination lies in `mailroom_floor..=floors`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    /// Highest floor in the building.
    pub floors: u32,
    /// The floor where idle carriers wait and returning carriers head to.
    pub mailroom_floor: u32,
}

impl Building {
    pub fn new(floors: u32, mailroom_floor: u32) -> Self {
        Self { floors, mailroom_floor }
    }

    /// `true` if `floor` is a valid delivery destination.
    #[inline]
    pub fn contains(&self, floor: u32) -> bool {
        (self.mailroom_floor..=self.floors).contains(&floor)
    }

    /// Mailroom floor as a position value for carrier motion.
    #[inline]
    pub fn mailroom_position(&self) -> f64 {
        self.mailroom_floor as f64
    }
}

impl Default for Building {
    fn default() -> Self {
        Self { floors: 15, mailroom_floor: 1 }
    }
}

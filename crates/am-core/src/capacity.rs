//! Weight bands and carrier speeds.
//!
//! The bands are contiguous and non-overlapping:
//!
//! | Band     | Weight (g)                  | Carriers |
//! |----------|-----------------------------|----------|
//! | `Solo`   | `0..=solo_max`              | 1        |
//! | `Pair`   | `solo_max+1..=pair_max`     | 2        |
//! | `Triple` | `pair_max+1..=triple_max`   | 3        |
//!
//! Anything above `triple_max` is unassignable.

/// Floors per tick for a carrier travelling alone.
pub const SINGLE_SPEED: f64 = 1.0;

/// Floors per tick for a carrier moving as part of a coalition.
pub const GROUP_SPEED: f64 = 1.0 / 3.0;

/// How many carriers an item needs, decided by its weight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightBand {
    Solo,
    Pair,
    Triple,
}

impl WeightBand {
    /// Coalition size needed before the item can be dispatched.
    #[inline]
    pub fn required_carriers(self) -> usize {
        match self {
            WeightBand::Solo   => 1,
            WeightBand::Pair   => 2,
            WeightBand::Triple => 3,
        }
    }
}

/// Weight ceilings of the three bands, in grams.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capacity {
    pub solo_max:   u32,
    pub pair_max:   u32,
    pub triple_max: u32,
}

impl Capacity {
    /// Classify `weight`, or `None` if no supported coalition can lift it.
    pub fn band(&self, weight: u32) -> Option<WeightBand> {
        if weight <= self.solo_max {
            Some(WeightBand::Solo)
        } else if weight <= self.pair_max {
            Some(WeightBand::Pair)
        } else if weight <= self.triple_max {
            Some(WeightBand::Triple)
        } else {
            None
        }
    }

    /// Largest weight any hand-off may carry (the hand-slot ceiling).
    #[inline]
    pub fn hand_limit(&self) -> u32 {
        self.triple_max
    }

    /// Largest weight the tube may hold; tube items are always delivered solo.
    #[inline]
    pub fn tube_limit(&self) -> u32 {
        self.solo_max
    }

    /// `true` if the ceilings are strictly increasing.
    pub fn is_ordered(&self) -> bool {
        self.solo_max < self.pair_max && self.pair_max < self.triple_max
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self { solo_max: 2_000, pair_max: 2_600, triple_max: 3_000 }
    }
}

//! Strongly typed identifier wrappers and the sequential id generator.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Identifiers are handed out by an
//! [`IdGenerator`] owned by whoever sets up the simulation; there is no
//! process-wide identity table.

use std::fmt;
use std::marker::PhantomData;

/// An identifier that can be minted from a sequence number.
pub trait SequentialId: Copy {
    fn from_seq(n: u32) -> Self;
}

/// Generate a typed ID wrapper around a `u32`, displayed as `<prefix><n>`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, prefix = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl SequentialId for $name {
            #[inline(always)]
            fn from_seq(n: u32) -> Self {
                $name(n)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Stable identifier of a carrier unit, assigned once at fleet creation.
    pub struct CarrierId, prefix = "R";
}

typed_id! {
    /// Unique identifier of a mail item, assigned by the item source.
    pub struct ItemId, prefix = "M";
}

// ── IdGenerator ───────────────────────────────────────────────────────────────

/// Hands out consecutive identifiers of type `I`, starting at a fixed value.
///
/// Scope one generator to a single simulation setup so two runs in the same
/// process never share numbering.
#[derive(Debug, Clone)]
pub struct IdGenerator<I: SequentialId> {
    next:    u32,
    _marker: PhantomData<I>,
}

impl<I: SequentialId> IdGenerator<I> {
    /// A generator whose first id is `0`.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first, _marker: PhantomData }
    }

    /// Return the next id and advance the sequence.
    ///
    /// # Panics
    /// Panics if the `u32` sequence is exhausted.
    pub fn next_id(&mut self) -> I {
        let id = I::from_seq(self.next);
        self.next = self.next.checked_add(1).expect("id sequence exhausted");
        id
    }

    /// The value the next call to [`next_id`][Self::next_id] will use.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl<I: SequentialId> Default for IdGenerator<I> {
    fn default() -> Self {
        Self::new()
    }
}

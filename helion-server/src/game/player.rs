//! Player Slots
//!
//! A player is identified by the engine slot it occupies, bounded by
//! [`MAX_PLAYERS`]. Slots are wrapped in [`PlayerIndex`] so an observer and
//! an observed player can never be swapped silently for raw integers.

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Engine compile-time maximum of concurrent players (`MAXPLAYERS`).
pub const MAX_PLAYERS: usize = 8;

/// Validated player slot.
///
/// Construction checks the slot against a capacity; after that it can be
/// used to index any store of at least that capacity. Deserialization goes
/// through [`TryFrom<usize>`], so a decoded index is checked the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerIndex(u8);

impl PlayerIndex {
    /// Validate `slot` against `capacity`.
    pub fn new(slot: usize, capacity: usize) -> Result<Self, SlotError> {
        if slot >= capacity || slot >= MAX_PLAYERS {
            return Err(SlotError::OutOfRange { slot, capacity: capacity.min(MAX_PLAYERS) });
        }
        Ok(Self(slot as u8))
    }

    /// Raw slot number.
    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Every slot below `capacity`, in ascending order.
    pub fn all(capacity: usize) -> impl Iterator<Item = PlayerIndex> {
        (0..capacity.min(MAX_PLAYERS)).map(|slot| PlayerIndex(slot as u8))
    }
}

impl TryFrom<usize> for PlayerIndex {
    type Error = SlotError;

    fn try_from(slot: usize) -> Result<Self, Self::Error> {
        Self::new(slot, MAX_PLAYERS)
    }
}

impl From<PlayerIndex> for usize {
    fn from(index: PlayerIndex) -> usize {
        index.get()
    }
}

impl fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    /// Slot is not below the capacity.
    #[error("player slot {slot} out of range (capacity {capacity})")]
    OutOfRange {
        /// Rejected slot.
        slot: usize,
        /// Capacity it was checked against.
        capacity: usize,
    },
}

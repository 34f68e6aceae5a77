//! Lag-Compensation Position Store
//!
//! Per-player, per-other-player snapshot of positions. Hit validation reads
//! the shooter's row to see where the shooter believed each target was,
//! instead of trusting the target's authoritative current position.
//!
//! ```text
//!                  observed →
//!              0     1     2     3
//!            ┌─────┬─────┬─────┬─────┐
//!  observer 0│self │     │     │     │
//!      ↓    1│     │self │ 1→2 │     │   row 1 = player 1's perspective
//!           2│     │     │self │     │
//!           3│     │     │     │self │
//!            └─────┴─────┴─────┴─────┘
//! ```
//!
//! Each cell holds only the most recent value written for the pair; there
//! is no history. The zero vector is the reset value and means "no data
//! yet", so a player genuinely standing on the origin is indistinguishable
//! from an unset cell.

use crate::core::fixed::Fixed;
use crate::core::hash::{StateHash, compute_unlagged_hash};
use crate::core::vec3::FixedVec3;
use crate::game::player::{PlayerIndex, SlotError, MAX_PLAYERS};

/// The store sized for the engine's player limit.
pub type ServerUnlagged = PerspectiveStore<MAX_PLAYERS>;

/// `N × N` matrix of last known positions.
///
/// The major index is the observing player, the minor index the observed
/// player: `get(2, 4)` is the third player's view of the fifth player.
/// The diagonal holds each player's own last reported position.
///
/// Indices are a checked precondition: a [`PlayerIndex`] at or beyond `N`
/// panics rather than touching any other cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerspectiveStore<const N: usize> {
    players: [[FixedVec3; N]; N],
}

impl<const N: usize> PerspectiveStore<N> {
    const DIMENSION_FITS_SLOTS: () = assert!(
        N > 0 && N <= MAX_PLAYERS,
        "store dimension must be within 1..=MAX_PLAYERS"
    );

    /// Create a store with every cell at the zero vector.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::DIMENSION_FITS_SLOTS;
        Self {
            players: [[FixedVec3::ZERO; N]; N],
        }
    }

    /// Number of player slots on each axis.
    #[inline]
    pub const fn dimension(&self) -> usize {
        N
    }

    /// Validate a raw slot against this store's dimension.
    pub fn slot(&self, raw: usize) -> Result<PlayerIndex, SlotError> {
        PlayerIndex::new(raw, N)
    }

    /// Overwrite every cell with the zero vector.
    pub fn reset(&mut self) {
        for row in self.players.iter_mut() {
            row.fill(FixedVec3::ZERO);
        }
    }

    /// Record `observer`'s own position (the diagonal cell).
    #[inline]
    pub fn set_self(&mut self, observer: PlayerIndex, x: Fixed, y: Fixed, z: Fixed) {
        self.set(observer, observer, x, y, z);
    }

    /// Record where `observed` appears from `observer`'s perspective.
    #[inline]
    pub fn set(
        &mut self,
        observer: PlayerIndex,
        observed: PlayerIndex,
        x: Fixed,
        y: Fixed,
        z: Fixed,
    ) {
        self.set_position(observer, observed, FixedVec3::new(x, y, z));
    }

    /// Vector form of [`set`](Self::set).
    #[inline]
    pub fn set_position(&mut self, observer: PlayerIndex, observed: PlayerIndex, position: FixedVec3) {
        *self.cell_mut(observer, observed) = position;
    }

    /// Last position recorded for `observed` from `observer`'s perspective.
    ///
    /// Returns [`FixedVec3::ZERO`] for a cell not written since the last reset.
    #[inline]
    pub fn get(&self, observer: PlayerIndex, observed: PlayerIndex) -> FixedVec3 {
        let (row, col) = Self::checked(observer, observed);
        self.players[row][col]
    }

    /// Borrow one observer's full row.
    pub fn perspective(&self, observer: PlayerIndex) -> Perspective<'_, N> {
        let (row, _) = Self::checked(observer, observer);
        Perspective {
            observer,
            row: &self.players[row],
        }
    }

    /// Every `(observer, observed, position)` triple, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (PlayerIndex, PlayerIndex, FixedVec3)> + '_ {
        PlayerIndex::all(N).flat_map(move |observer| {
            PlayerIndex::all(N)
                .map(move |observed| (observer, observed, self.players[observer.get()][observed.get()]))
        })
    }

    /// True when no cell has been written since the last reset
    /// (or every write was the origin).
    pub fn is_clear(&self) -> bool {
        self.players.iter().flatten().all(|cell| cell.is_zero())
    }

    /// Digest of every cell, row-major.
    pub fn compute_hash(&self) -> StateHash {
        compute_unlagged_hash(N as u32, |hasher| {
            for position in self.players.iter().flatten() {
                hasher.update_vec3(*position);
            }
        })
    }

    fn cell_mut(&mut self, observer: PlayerIndex, observed: PlayerIndex) -> &mut FixedVec3 {
        let (row, col) = Self::checked(observer, observed);
        &mut self.players[row][col]
    }

    #[inline]
    fn checked(observer: PlayerIndex, observed: PlayerIndex) -> (usize, usize) {
        let (row, col) = (observer.get(), observed.get());
        assert!(
            row < N && col < N,
            "player index out of range: observer {} observed {} (dimension {})",
            row, col, N
        );
        (row, col)
    }
}

impl<const N: usize> Default for PerspectiveStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// One observer's row: where that player last saw everyone.
#[derive(Clone, Copy, Debug)]
pub struct Perspective<'a, const N: usize> {
    observer: PlayerIndex,
    row: &'a [FixedVec3; N],
}

impl<'a, const N: usize> Perspective<'a, N> {
    /// Player whose perspective this is.
    pub fn observer(&self) -> PlayerIndex {
        self.observer
    }

    /// The observer's own last reported position.
    pub fn own_position(&self) -> FixedVec3 {
        self.row[self.observer.get()]
    }

    /// Where the observer last saw `observed`.
    ///
    /// # Panics
    /// If `observed` is outside the store's dimension.
    pub fn position_of(&self, observed: PlayerIndex) -> FixedVec3 {
        self.row[observed.get()]
    }

    /// All cells of the row, including the observer's own.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, FixedVec3)> + 'a {
        let row = self.row;
        PlayerIndex::all(N).map(move |observed| (observed, row[observed.get()]))
    }

    /// Other players with a non-sentinel position.
    pub fn known(&self) -> impl Iterator<Item = (PlayerIndex, FixedVec3)> + 'a {
        let observer = self.observer;
        self.iter()
            .filter(move |(observed, position)| *observed != observer && !position.is_zero())
    }

    /// Raw row, indexed by observed slot.
    pub fn as_slice(&self) -> &'a [FixedVec3] {
        self.row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::fixed_from_int;

    type Store4 = PerspectiveStore<4>;

    fn p(slot: usize) -> PlayerIndex {
        PlayerIndex::new(slot, 4).unwrap()
    }

    fn int3(x: i32, y: i32, z: i32) -> (Fixed, Fixed, Fixed) {
        (fixed_from_int(x), fixed_from_int(y), fixed_from_int(z))
    }

    fn assert_only(store: &Store4, written: &[(usize, usize, FixedVec3)]) {
        for (observer, observed, position) in store.cells() {
            let expected = written
                .iter()
                .find(|(o, t, _)| *o == observer.get() && *t == observed.get())
                .map(|(_, _, v)| *v)
                .unwrap_or(FixedVec3::ZERO);
            assert_eq!(position, expected, "cell ({}, {})", observer, observed);
        }
    }

    #[test]
    fn test_new_store_is_zero() {
        let store = Store4::new();
        assert_eq!(store.dimension(), 4);
        assert_eq!(store.cells().count(), 16);
        assert!(store.is_clear());
        assert_only(&store, &[]);
    }

    #[test]
    fn test_set_self_writes_diagonal_only() {
        let mut store = Store4::new();
        let (x, y, z) = int3(10, 20, 30);
        store.set_self(p(1), x, y, z);

        assert_eq!(store.get(p(1), p(1)), FixedVec3::from_ints(10, 20, 30));
        assert_only(&store, &[(1, 1, FixedVec3::from_ints(10, 20, 30))]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = Store4::new();
        let (x, y, z) = int3(5, 5, 5);
        store.set(p(1), p(2), x, y, z);
        let (x, y, z) = int3(7, 7, 7);
        store.set(p(1), p(2), x, y, z);

        assert_eq!(store.get(p(1), p(2)), FixedVec3::from_ints(7, 7, 7));
        assert_only(&store, &[(1, 2, FixedVec3::from_ints(7, 7, 7))]);
    }

    #[test]
    fn test_perspectives_are_asymmetric() {
        let mut store = Store4::new();
        let (x, y, z) = int3(1, 1, 1);
        store.set(p(0), p(3), x, y, z);
        let (x, y, z) = int3(2, 2, 2);
        store.set(p(3), p(0), x, y, z);

        assert_ne!(store.get(p(0), p(3)), store.get(p(3), p(0)));
        assert_eq!(store.get(p(0), p(3)), FixedVec3::from_ints(1, 1, 1));
        assert_eq!(store.get(p(3), p(0)), FixedVec3::from_ints(2, 2, 2));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = Store4::new();
        for observer in 0..4 {
            for observed in 0..4 {
                let (x, y, z) = int3(observer as i32 + 1, observed as i32 + 1, -3);
                store.set(p(observer), p(observed), x, y, z);
            }
        }
        assert!(!store.is_clear());

        store.reset();
        assert!(store.is_clear());
        assert_eq!(store, Store4::default());
    }

    #[test]
    fn test_set_self_matches_set_on_diagonal() {
        let mut a = Store4::new();
        let mut b = Store4::new();
        let (x, y, z) = int3(-4, 8, 15);
        a.set_self(p(2), x, y, z);
        b.set(p(2), p(2), x, y, z);
        assert_eq!(a, b);
    }

    #[test]
    fn test_boundary_indices() {
        let mut store = Store4::new();
        let corners = [(0, 0), (0, 3), (3, 0), (3, 3)];
        for (i, (observer, observed)) in corners.iter().enumerate() {
            let v = FixedVec3::from_ints(i as i32 + 1, 0, 0);
            store.set_position(p(*observer), p(*observed), v);
        }

        let expected: Vec<_> = corners
            .iter()
            .enumerate()
            .map(|(i, (o, t))| (*o, *t, FixedVec3::from_ints(i as i32 + 1, 0, 0)))
            .collect();
        assert_only(&store, &expected);
    }

    #[test]
    #[should_panic(expected = "player index out of range")]
    fn test_out_of_range_index_panics() {
        let mut store = Store4::new();
        let beyond = PlayerIndex::try_from(4).unwrap();
        store.set_position(p(0), beyond, FixedVec3::from_ints(1, 1, 1));
    }

    #[test]
    fn test_slot_validation() {
        let store = Store4::new();
        assert!(store.slot(3).is_ok());
        assert_eq!(
            store.slot(4),
            Err(SlotError::OutOfRange { slot: 4, capacity: 4 })
        );
    }

    #[test]
    fn test_perspective_view() {
        let mut store = Store4::new();
        store.set_position(p(1), p(1), FixedVec3::from_ints(9, 9, 9));
        store.set_position(p(1), p(0), FixedVec3::from_ints(1, 0, 0));
        store.set_position(p(1), p(3), FixedVec3::from_ints(3, 0, 0));
        store.set_position(p(2), p(0), FixedVec3::from_ints(5, 5, 5));

        let view = store.perspective(p(1));
        assert_eq!(view.observer(), p(1));
        assert_eq!(view.own_position(), FixedVec3::from_ints(9, 9, 9));
        assert_eq!(view.position_of(p(0)), FixedVec3::from_ints(1, 0, 0));
        assert_eq!(view.position_of(p(2)), FixedVec3::ZERO);
        assert_eq!(view.iter().count(), 4);
        assert_eq!(view.as_slice().len(), 4);

        let known: Vec<_> = view.known().collect();
        assert_eq!(
            known,
            vec![
                (p(0), FixedVec3::from_ints(1, 0, 0)),
                (p(3), FixedVec3::from_ints(3, 0, 0)),
            ]
        );
    }

    #[test]
    fn test_hash_tracks_contents() {
        let mut store = Store4::new();
        let empty = store.compute_hash();
        assert_eq!(empty, Store4::new().compute_hash());

        store.set_position(p(0), p(1), FixedVec3::from_ints(1, 2, 3));
        let written = store.compute_hash();
        assert_ne!(empty, written);

        store.reset();
        assert_eq!(store.compute_hash(), empty);
    }

    #[test]
    fn test_server_unlagged_dimension() {
        let store = ServerUnlagged::new();
        assert_eq!(store.dimension(), MAX_PLAYERS);
        let last = PlayerIndex::try_from(MAX_PLAYERS - 1).unwrap();
        assert_eq!(store.get(last, last), FixedVec3::ZERO);
    }
}

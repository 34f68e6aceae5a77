//! Server Session
//!
//! Owns the single authoritative lag-compensation store for a running
//! server. The network layer funnels decoded position reports in here; hit
//! validation borrows a perspective back out.
//!
//! The store is reset on construction and again at every level boundary
//! (map change, roster reset).

use serde::{Serialize, Deserialize};
use tracing::{debug, info, trace, warn};

use crate::config::ServerConfig;
use crate::core::hash::StateHash;
use crate::core::vec3::FixedVec3;
use crate::game::player::{PlayerIndex, SlotError, MAX_PLAYERS};
use crate::game::unlagged::{Perspective, ServerUnlagged};

/// A decoded client position update.
///
/// `observer == observed` is the reporting player's own position;
/// anything else is where the observer saw another player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    /// Slot of the player whose perspective this is.
    pub observer: u8,
    /// Slot of the player being positioned.
    pub observed: u8,
    /// Reported position.
    pub position: FixedVec3,
}

impl PositionReport {
    /// A player's report of its own position.
    pub const fn own(player: u8, position: FixedVec3) -> Self {
        Self { observer: player, observed: player, position }
    }

    /// A player's report of another player's position.
    pub const fn seen(observer: u8, observed: u8, position: FixedVec3) -> Self {
        Self { observer, observed, position }
    }
}

/// One observer's row, in serialisable form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerspectiveSnapshot {
    /// Level counter when captured.
    pub level: u32,
    /// Tick when captured.
    pub tick: u32,
    /// Observer slot.
    pub observer: u8,
    /// Positions indexed by observed slot (zero = no data).
    pub positions: Vec<FixedVec3>,
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Slot outside the active player slots.
    #[error("invalid player slot: {0}")]
    InvalidSlot(#[from] SlotError),
}

/// Server session owning the lag-compensation store.
#[derive(Debug)]
pub struct ServerSession {
    /// The perspective matrix.
    unlagged: ServerUnlagged,
    /// Active player slots (1..=MAX_PLAYERS).
    player_slots: usize,
    /// Level counter, incremented at every level boundary.
    level: u32,
    /// Current level name.
    level_name: String,
    /// Ticks since the current level began.
    tick: u32,
}

impl ServerSession {
    /// Create a session with a freshly reset store.
    pub fn new(config: &ServerConfig) -> Self {
        let player_slots = config.player_slots.clamp(1, MAX_PLAYERS);
        info!("Session created with {} player slots", player_slots);

        Self {
            unlagged: ServerUnlagged::new(),
            player_slots,
            level: 0,
            level_name: String::new(),
            tick: 0,
        }
    }

    /// Start a new level: discard every recorded perspective.
    pub fn begin_level(&mut self, name: &str) {
        self.unlagged.reset();
        self.level = self.level.wrapping_add(1);
        self.level_name = name.to_string();
        self.tick = 0;
        info!("Level {} ({}) started, unlagged store reset", self.level, name);
    }

    /// Advance the tick counter.
    pub fn advance_tick(&mut self) -> u32 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    /// Validate a raw slot against the active slots.
    pub fn slot(&self, raw: u8) -> Result<PlayerIndex, SessionError> {
        Ok(PlayerIndex::new(raw as usize, self.player_slots)?)
    }

    /// Apply one position report.
    pub fn apply_report(&mut self, report: &PositionReport) -> Result<(), SessionError> {
        let observer = self.slot(report.observer)?;
        let observed = self.slot(report.observed)?;
        let p = report.position;

        if observer == observed {
            self.unlagged.set_self(observer, p.x, p.y, p.z);
        } else {
            self.unlagged.set(observer, observed, p.x, p.y, p.z);
        }

        trace!("Tick {}: {} sees {} at {}", self.tick, observer, observed, p);
        Ok(())
    }

    /// Apply reports in order, skipping invalid ones. Returns the count applied.
    pub fn apply_reports(&mut self, reports: &[PositionReport]) -> usize {
        let mut applied = 0;
        for report in reports {
            match self.apply_report(report) {
                Ok(()) => applied += 1,
                Err(e) => warn!("Dropping position report {:?}: {}", report, e),
            }
        }
        if applied > 0 {
            debug!("Tick {}: applied {}/{} position reports", self.tick, applied, reports.len());
        }
        applied
    }

    /// The store, read-only.
    pub fn unlagged(&self) -> &ServerUnlagged {
        &self.unlagged
    }

    /// One observer's view, for hit validation.
    pub fn perspective(&self, observer: PlayerIndex) -> Perspective<'_, MAX_PLAYERS> {
        self.unlagged.perspective(observer)
    }

    /// Serialisable copy of one observer's row, limited to the active slots.
    pub fn snapshot(&self, observer: PlayerIndex) -> PerspectiveSnapshot {
        let view = self.perspective(observer);
        PerspectiveSnapshot {
            level: self.level,
            tick: self.tick,
            observer: observer.get() as u8,
            positions: view.as_slice()[..self.player_slots].to_vec(),
        }
    }

    /// Digest of the whole store.
    pub fn compute_hash(&self) -> StateHash {
        self.unlagged.compute_hash()
    }

    /// Active player slots.
    pub fn player_slots(&self) -> usize {
        self.player_slots
    }

    /// Level counter (0 until the first level begins).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current level name.
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Ticks since the current level began.
    pub fn tick(&self) -> u32 {
        self.tick
    }
}

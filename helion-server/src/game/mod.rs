//! Game Logic Module
//!
//! ## Module Structure
//!
//! - `player`: Player slot index and the engine player limit
//! - `unlagged`: Per-observer perspective position store
//! - `session`: Session object owning the authoritative store

pub mod player;
pub mod unlagged;
pub mod session;

// Re-export key types
pub use player::{PlayerIndex, SlotError, MAX_PLAYERS};
pub use unlagged::{Perspective, PerspectiveStore, ServerUnlagged};
pub use session::{PositionReport, PerspectiveSnapshot, ServerSession, SessionError};

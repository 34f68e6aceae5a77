//! # Helion Server
//!
//! Server-side lag compensation for Helion multiplayer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HELION SERVER                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Engine-compatible primitives              │
//! │  ├── fixed.rs    - Q16.16 fixed-point (fixed_t)              │
//! │  ├── vec3.rs     - 3D fixed-point position                   │
//! │  ├── hash.rs     - State hashing for verification            │
//! │  └── version.rs  - Application version                       │
//! │                                                              │
//! │  game/           - Lag compensation                          │
//! │  ├── player.rs   - Player slot index                         │
//! │  ├── unlagged.rs - Perspective position store                │
//! │  └── session.rs  - Session owning the store                  │
//! │                                                              │
//! │  network/        - Tick ownership                            │
//! │  └── driver.rs   - Report funnel and tick loop               │
//! │                                                              │
//! │  config.rs       - Environment configuration                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Perspective Store
//!
//! For every observing player the server keeps where that player last saw
//! every other player. When a shot is resolved, hit validation reads the
//! shooter's row rather than the targets' current positions, compensating
//! for the latency between client input and server processing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use config::{ServerConfig, ConfigError};
pub use crate::core::fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use crate::core::vec3::FixedVec3;
pub use crate::core::version::{Version, APPLICATION_NAME, APPLICATION_VERSION};
pub use game::player::{PlayerIndex, MAX_PLAYERS};
pub use game::unlagged::{Perspective, PerspectiveStore, ServerUnlagged};
pub use game::session::{PositionReport, ServerSession};
pub use network::driver::{DriverHandle, TickDriver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Core deterministic primitives.
//!
//! Value types shared with the host engine: its fixed-point convention and
//! the 3D position built on it, plus hashing and version metadata.

pub mod fixed;
pub mod vec3;
pub mod hash;
pub mod version;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use vec3::FixedVec3;
pub use hash::{StateHash, StateHasher, compute_unlagged_hash};
pub use version::{Version, APPLICATION_NAME, APPLICATION_VERSION};

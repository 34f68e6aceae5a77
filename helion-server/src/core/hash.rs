//! State Hashing for Verification
//!
//! Deterministic digests of lag-compensation state, used to:
//! - Compare two servers (or a replay) fed the same position reports
//! - Log a compact fingerprint at level boundaries

use sha2::{Sha256, Digest};
use super::fixed::Fixed;
use super::vec3::FixedVec3;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for store state.
///
/// Wraps SHA-256 with helpers for fixed-point types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for the perspective matrix.
    pub fn for_unlagged() -> Self {
        Self::new(b"HELION_UNLAGGED_V1")
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed value (little-endian).
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a FixedVec3.
    #[inline]
    pub fn update_vec3(&mut self, value: FixedVec3) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
        self.update_fixed(value.z);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a perspective-matrix hash.
///
/// The matrix dimension goes in first so stores of different sizes never
/// collide; the closure then feeds the cells.
pub fn compute_unlagged_hash<F>(dimension: u32, add_cells: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_unlagged();
    hasher.update_u32(dimension);
    add_cells(&mut hasher);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_unlagged();
            hasher.update_u32(100);
            hasher.update_fixed(to_fixed(5.5));
            hasher.update_vec3(FixedVec3::new(to_fixed(1.0), to_fixed(2.0), to_fixed(3.0)));
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let hash = |domain: &[u8]| {
            let mut h = StateHasher::new(domain);
            h.update_vec3(FixedVec3::from_ints(1, 2, 3));
            h.finalize()
        };

        assert_ne!(hash(b"DOMAIN_A"), hash(b"DOMAIN_B"));
    }

    #[test]
    fn test_dimension_is_hashed() {
        let four = compute_unlagged_hash(4, |_| {});
        let eight = compute_unlagged_hash(8, |_| {});
        assert_ne!(four, eight);
    }
}

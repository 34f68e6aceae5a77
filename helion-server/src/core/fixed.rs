//! Q16.16 Fixed-Point Values
//!
//! The engine stores every world coordinate as a `fixed_t`: a 32-bit signed
//! integer with 16 fractional bits. This module mirrors that convention so
//! positions reported by the engine can be stored without conversion.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 map units                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

/// Q16.16 fixed-point number stored as i32 (the engine's `fixed_t`).
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use for literals or initialization. Reported positions arrive
/// already in fixed-point.
///
/// # Example
/// ```
/// use helion::core::fixed::{to_fixed, FIXED_ONE};
/// const MY_VALUE: i32 = to_fixed(2.5);
/// assert_eq!(MY_VALUE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/logging.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Convert a whole map unit count to fixed-point.
#[inline]
pub const fn fixed_from_int(i: i32) -> Fixed {
    i.wrapping_shl(FIXED_SCALE as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_HALF, 32768);
        assert_eq!(FIXED_SCALE, 16);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_HALF);
        assert_eq!(to_fixed(-1.0), -FIXED_ONE);
        assert_eq!(to_fixed(64.25), 64 * FIXED_ONE + FIXED_ONE / 4);
    }

    #[test]
    fn test_fixed_from_int() {
        assert_eq!(fixed_from_int(0), 0);
        assert_eq!(fixed_from_int(3), 3 * FIXED_ONE);
        assert_eq!(fixed_from_int(-128), to_fixed(-128.0));
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(FIXED_HALF), 0.5);
        assert_eq!(to_float(fixed_from_int(-2)), -2.0);
    }
}

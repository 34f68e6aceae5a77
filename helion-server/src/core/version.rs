//! Application Version
//!
//! Comparable version triple reported in startup logs.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Application name shown in logs.
pub const APPLICATION_NAME: &str = "Helion";

/// Current application version.
pub const APPLICATION_VERSION: Version = Version::new(0, 1, 0);

/// A `major.minor.patch` version.
///
/// Ordering is lexicographic over (major, minor, patch), which is what the
/// field order gives the derived `Ord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major component
    pub major: u32,
    /// Minor component
    pub minor: u32,
    /// Patch component
    pub patch: u32,
}

impl Version {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_ordering() {
        let base = Version::new(1, 2, 3);

        assert!(Version::new(2, 0, 0) > base);
        assert!(Version::new(1, 3, 0) > base);
        assert!(Version::new(1, 2, 4) > base);
        assert!(Version::new(0, 9, 9) < base);
        assert!(Version::new(1, 1, 99) < base);
        assert!(base <= Version::new(1, 2, 3));
        assert!(base >= Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(APPLICATION_VERSION.to_string(), "0.1.0");
        assert_eq!(Version::new(10, 0, 2).to_string(), "10.0.2");
    }
}

//! Capability masks.
//!
//! A [`Capability`] is a set of independent single-bit flags, one per
//! component kind. An entity's mask says which component stores hold data
//! for it. Test membership the usual way:
//!
//! ```rust
//! use lify_entity::Capability;
//!
//! let mask = Capability::POSITIONED;
//! assert!(mask & Capability::POSITIONED == Capability::POSITIONED);
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of capability bits.
///
/// Sixteen bits leave room for sixteen component kinds. Bits outside
/// [`Capability::DEFINED`] have no backing store; the entity manager rejects
/// them unless configured to be permissive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Capability(u16);

impl Capability {
    /// The entity has position, scale and velocity data.
    pub const POSITIONED: Self = Self(1 << 0);

    /// Union of every capability with a backing component store.
    pub const DEFINED: Self = Self(Self::POSITIONED.0);

    /// Display names of the defined bits.
    const NAMES: [(Self, &'static str); 1] = [(Self::POSITIONED, "POSITIONED")];

    /// The empty mask: no capabilities.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a mask from raw bits, keeping bits that are not defined.
    #[must_use]
    pub const fn from_bits_retain(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the bits of `self` that are not part of [`Capability::DEFINED`].
    #[must_use]
    pub const fn unknown_bits(self) -> u16 {
        self.0 & !Self::DEFINED.0
    }
}

impl BitOr for Capability {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capability {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Capability {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        let unknown = self.unknown_bits();
        if unknown != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{unknown:#06x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask() {
        let mask = Capability::empty();
        assert!(mask.is_empty());
        assert_eq!(mask, Capability::default());
        assert!(!mask.contains(Capability::POSITIONED));
        // Every mask contains the empty mask.
        assert!(Capability::POSITIONED.contains(Capability::empty()));
    }

    #[test]
    fn test_membership_via_and() {
        let mask = Capability::POSITIONED;
        assert_eq!(mask & Capability::POSITIONED, Capability::POSITIONED);
        assert!(mask.contains(Capability::POSITIONED));
    }

    #[test]
    fn test_or_combines_bits() {
        let extra = Capability::from_bits_retain(1 << 5);
        let mut mask = Capability::POSITIONED | extra;
        assert_eq!(mask.bits(), 0b10_0001);
        assert!(mask.contains(extra));

        mask |= Capability::from_bits_retain(1 << 6);
        assert_eq!(mask.bits(), 0b110_0001);
    }

    #[test]
    fn test_unknown_bits() {
        assert_eq!(Capability::POSITIONED.unknown_bits(), 0);
        assert_eq!(Capability::empty().unknown_bits(), 0);
        let mask = Capability::POSITIONED | Capability::from_bits_retain(0x8000);
        assert_eq!(mask.unknown_bits(), 0x8000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Capability::empty().to_string(), "(empty)");
        assert_eq!(Capability::POSITIONED.to_string(), "POSITIONED");
        let mask = Capability::POSITIONED | Capability::from_bits_retain(0x0100);
        assert_eq!(mask.to_string(), "POSITIONED | 0x0100");
    }
}

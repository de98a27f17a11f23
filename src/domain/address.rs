//! Account identity used for callers, holders, and the registry admin.

use core::fmt;

/// A chain-agnostic 32-byte account address.
///
/// Addresses identify asset holders in the ledger and the caller of every
/// [`Exchange`](crate::exchange::Exchange) operation.  Privileged
/// operations compare the caller against the stored administrator address.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::Address;
///
/// let admin = Address::from_bytes([1u8; 32]);
/// assert_eq!(admin.as_bytes(), [1u8; 32]);
/// assert_ne!(admin, Address::zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(Address::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Address::zero() < Address::from_bytes([1u8; 32]));
    }

    #[test]
    fn display_is_hex() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0xab;
        let shown = Address::from_bytes(bytes).to_string();
        assert!(shown.starts_with("0x00"));
        assert!(shown.ends_with("ab"));
        assert_eq!(shown.len(), 66);
    }
}

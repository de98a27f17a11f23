//! Pagination bounds for the pair registry.

use crate::error::AmmError;

/// Page-size limits applied by
/// [`PairRegistry::get_pairs`](crate::registry::PairRegistry::get_pairs).
///
/// # Validation
///
/// - Both sizes are non-zero.
/// - `default_page_size <= max_page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    max_page_size: usize,
    default_page_size: usize,
}

impl RegistryConfig {
    /// Page size used when a caller does not supply a limit.
    pub const DEFAULT_PAGE_SIZE: usize = 20;

    /// Largest page a caller may request.
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Creates a validated `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either size is zero or
    /// the default exceeds the maximum.
    pub const fn new(max_page_size: usize, default_page_size: usize) -> Result<Self, AmmError> {
        let config = Self {
            max_page_size,
            default_page_size,
        };
        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err(e),
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either size is zero or
    /// the default exceeds the maximum.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.max_page_size == 0 || self.default_page_size == 0 {
            return Err(AmmError::InvalidConfiguration(
                "page sizes must be greater than zero",
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(AmmError::InvalidConfiguration(
                "default page size must not exceed the maximum",
            ));
        }
        Ok(())
    }

    /// Returns the maximum page size.
    #[must_use]
    pub const fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    /// Returns the default page size.
    #[must_use]
    pub const fn default_page_size(&self) -> usize {
        self.default_page_size
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_page_size: Self::MAX_PAGE_SIZE,
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = RegistryConfig::default();
        assert_eq!(cfg.max_page_size(), 100);
        assert_eq!(cfg.default_page_size(), 20);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_sizes_rejected() {
        assert!(matches!(
            RegistryConfig::new(0, 0),
            Err(AmmError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            RegistryConfig::new(10, 0),
            Err(AmmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn default_above_max_rejected() {
        assert!(matches!(
            RegistryConfig::new(10, 11),
            Err(AmmError::InvalidConfiguration(_))
        ));
        assert!(RegistryConfig::new(10, 10).is_ok());
    }
}

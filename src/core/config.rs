//! Store configuration
//!
//! Loaded from TOML or built in code:
//!
//! ```toml
//! height = 10   # 1024 positions per block
//! ```

use crate::core::pyramid::MAX_HEIGHT;
use crate::error::{Result, WaveletError};
use serde::{Deserialize, Serialize};

/// Default pyramid height (32 positions per block)
pub const DEFAULT_HEIGHT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Pyramid height. Each block spans `2^height` positions.
    pub height: u32,
}

impl StoreConfig {
    pub fn new(height: u32) -> Self {
        StoreConfig { height }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.height > MAX_HEIGHT {
            return Err(WaveletError::InvalidHeight {
                height: self.height,
                max: MAX_HEIGHT,
            });
        }
        Ok(())
    }

    /// Positions per block
    pub fn alignment(&self) -> i64 {
        1i64 << self.height.min(MAX_HEIGHT)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            height: DEFAULT_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.height, 5);
        assert_eq!(config.alignment(), 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = StoreConfig::from_toml_str("height = 10").unwrap();
        assert_eq!(config, StoreConfig::new(10));
        assert_eq!(config.alignment(), 1024);
    }

    #[test]
    fn test_from_empty_toml_uses_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_height() {
        let result = StoreConfig::from_toml_str("height = 31");
        assert!(matches!(
            result,
            Err(WaveletError::InvalidHeight { height: 31, max: 30 })
        ));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            StoreConfig::from_toml_str("height = -1"),
            Err(WaveletError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::from_toml_str("depth = 4"),
            Err(WaveletError::Config(_))
        ));
    }
}

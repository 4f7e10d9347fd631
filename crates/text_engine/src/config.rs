//! Font system configuration
//!
//! Configuration for atlas dimensions, cache behavior, and layout
//! defaults. Values can be loaded from TOML so applications can tune the
//! text system without recompiling.

use serde::{Deserialize, Serialize};

use crate::error::{FontError, FontResult};

/// Configuration for a [`Font`](crate::text::Font) and its glyph atlas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Atlas texture width in pixels
    pub atlas_width: u32,

    /// Atlas texture height in pixels
    pub atlas_height: u32,

    /// How many generations back a cache entry may have been used and
    /// still survive `update()`. Zero evicts everything every generation.
    pub cache_ttl: u32,

    /// Left margin in pixels used by `init_position`
    pub margin: i32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            atlas_width: 128,
            atlas_height: 128,
            cache_ttl: 1,
            margin: 5,
        }
    }
}

impl FontConfig {
    /// Parse a configuration from a TOML document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_toml_str(input: &str) -> FontResult<Self> {
        toml::from_str(input).map_err(|e| FontError::LoadError(format!("config parse: {e}")))
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> FontResult<String> {
        toml::to_string(self).map_err(|e| FontError::LoadError(format!("config encode: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FontConfig::default();
        assert_eq!(config.atlas_width, 128);
        assert_eq!(config.atlas_height, 128);
        assert_eq!(config.cache_ttl, 1);
        assert_eq!(config.margin, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = FontConfig::from_toml_str("atlas_width = 512\natlas_height = 256\n").unwrap();
        assert_eq!(config.atlas_width, 512);
        assert_eq!(config.atlas_height, 256);
        assert_eq!(config.cache_ttl, 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FontConfig {
            atlas_width: 256,
            atlas_height: 256,
            cache_ttl: 2,
            margin: 8,
        };
        let encoded = config.to_toml_string().unwrap();
        let decoded = FontConfig::from_toml_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_invalid_toml_is_a_load_error() {
        let err = FontConfig::from_toml_str("atlas_width = \"wide\"").unwrap_err();
        assert!(matches!(err, FontError::LoadError(_)));
    }
}

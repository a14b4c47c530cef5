use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::VoxbagError;
use crate::types::ChunkDims;

/// World construction parameters, typically loaded from a `.ron` file.
///
/// ```ron
/// (
///     chunk_width: 16,
///     chunk_height: 32,
///     chunk_depth: 16,
///     max_chunks: Some(4096),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk_width: u32,
    pub chunk_height: u32,
    pub chunk_depth: u32,
    /// Upper bound on resident chunks. None keeps every chunk ever written.
    pub max_chunks: Option<usize>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_width: DEFAULT_CHUNK_WIDTH,
            chunk_height: DEFAULT_CHUNK_HEIGHT,
            chunk_depth: DEFAULT_CHUNK_DEPTH,
            max_chunks: None,
        }
    }
}

impl WorldConfig {
    /// Parse a config from RON. Missing fields take their defaults.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, VoxbagError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| VoxbagError::ConfigParse(e.to_string()))
    }

    /// Write the config back out as pretty RON.
    pub fn to_ron_string(&self) -> Result<String, VoxbagError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| VoxbagError::ConfigSerialize(e.to_string()))
    }

    /// Validated chunk extent.
    pub fn dims(&self) -> Result<ChunkDims, VoxbagError> {
        ChunkDims::new(self.chunk_width, self.chunk_height, self.chunk_depth)
    }

    /// Check the whole config, warning about legal but questionable values.
    pub fn validate(&self) -> Result<ChunkDims, VoxbagError> {
        let dims = self.dims()?;
        match self.max_chunks {
            Some(0) => return Err(VoxbagError::ZeroCapacity),
            Some(n) if n < MIN_RECOMMENDED_CHUNK_CAPACITY => {
                log::warn!(
                    "max_chunks = {n} cannot hold a 3x3x3 neighbourhood; expect eviction churn"
                );
            }
            _ => {}
        }
        Ok(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg = WorldConfig::from_ron_str(
            "(chunk_width: 8, chunk_height: 4, chunk_depth: 2, max_chunks: Some(64))",
        )
        .expect("valid RON");
        assert_eq!(cfg.chunk_width, 8);
        assert_eq!(cfg.chunk_height, 4);
        assert_eq!(cfg.chunk_depth, 2);
        assert_eq!(cfg.max_chunks, Some(64));
        let dims = cfg.validate().expect("valid config");
        assert_eq!(dims.volume(), 64);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg = WorldConfig::from_ron_str("(chunk_height: 64)").expect("valid RON");
        assert_eq!(cfg.chunk_width, DEFAULT_CHUNK_WIDTH);
        assert_eq!(cfg.chunk_height, 64);
        assert_eq!(cfg.chunk_depth, DEFAULT_CHUNK_DEPTH);
        assert_eq!(cfg.max_chunks, None);
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let err = WorldConfig::from_ron_str("(chunk_width: \"wide\")").unwrap_err();
        assert!(matches!(err, VoxbagError::ConfigParse(_)));
    }

    #[test]
    fn test_error_messages_name_direction() {
        let parse = VoxbagError::ConfigParse("bad".into()).to_string();
        let write = VoxbagError::ConfigSerialize("bad".into()).to_string();
        assert_eq!(parse, "failed to parse world config RON: bad");
        assert_eq!(write, "failed to serialize world config RON: bad");
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let cfg = WorldConfig {
            chunk_depth: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(VoxbagError::InvalidDimensions { depth: 0, .. })
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let cfg = WorldConfig {
            max_chunks: Some(0),
            ..WorldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(VoxbagError::ZeroCapacity));
    }

    #[test]
    fn test_ron_roundtrip() {
        let cfg = WorldConfig {
            max_chunks: Some(27),
            ..WorldConfig::default()
        };
        let text = cfg.to_ron_string().expect("serializes");
        assert_eq!(WorldConfig::from_ron_str(&text).expect("parses"), cfg);
    }
}

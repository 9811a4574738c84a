//! Array pool configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Smallest size class handed out by the pool. Must be a power of two.
    pub min_array_length: usize,

    /// Largest pooled size class. Bigger rentals are allocated exactly and
    /// dropped on return. Must be a power of two.
    pub max_array_length: usize,

    /// Idle buffers kept per size class (per element type).
    pub max_arrays_per_bucket: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_array_length: 16,
            max_array_length: 1 << 20,
            max_arrays_per_bucket: 32,
        }
    }
}

impl PoolConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `STACKSEQ_POOL_MIN_ARRAY_LENGTH`: smallest size class
    /// - `STACKSEQ_POOL_MAX_ARRAY_LENGTH`: largest pooled size class
    /// - `STACKSEQ_POOL_MAX_ARRAYS_PER_BUCKET`: idle buffers per class
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("STACKSEQ_POOL_MIN_ARRAY_LENGTH") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.min_array_length = v;
            }
        }

        if let Ok(s) = std::env::var("STACKSEQ_POOL_MAX_ARRAY_LENGTH") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_array_length = v;
            }
        }

        if let Ok(s) = std::env::var("STACKSEQ_POOL_MAX_ARRAYS_PER_BUCKET") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_arrays_per_bucket = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_array_length.is_power_of_two() {
            return Err(Error::Config(format!(
                "min_array_length must be a power of two, got {}",
                self.min_array_length
            )));
        }
        if !self.max_array_length.is_power_of_two() {
            return Err(Error::Config(format!(
                "max_array_length must be a power of two, got {}",
                self.max_array_length
            )));
        }
        if self.min_array_length > self.max_array_length {
            return Err(Error::Config(format!(
                "min_array_length ({}) exceeds max_array_length ({})",
                self.min_array_length, self.max_array_length
            )));
        }
        Ok(())
    }

    /// Number of pooled size classes between the min and max lengths.
    pub fn size_classes(&self) -> usize {
        (self.max_array_length / self.min_array_length).trailing_zeros() as usize + 1
    }
}

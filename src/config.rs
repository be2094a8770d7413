//! Batch configuration types
//!
//! [`BatchConfig`] carries the serializable half of an invocation plan: chunk
//! size, inter-chunk delay and an optional explicit call count. Delays use
//! humantime strings (`"1s"`, `"250ms"`) when read from TOML or JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chunking and pacing settings for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of calls dispatched together in one window
    pub chunk_size: usize,

    /// Pause between consecutive windows
    #[serde(default, with = "humantime_serde")]
    pub delay: Duration,

    /// Explicit call count; defaults to the payload length when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calls: Option<usize>,
}

impl BatchConfig {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            delay: Duration::ZERO,
            total_calls: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_total_calls(mut self, total_calls: usize) -> Self {
        self.total_calls = Some(total_calls);
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_chunk_size(self.chunk_size)
    }
}

pub(crate) fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(Error::invalid_configuration(
            "chunk_size must be a positive integer",
        ));
    }
    Ok(())
}

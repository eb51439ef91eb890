//! Configuration for the reorder buffer.
//!
//! This module defines the parameters a [`Rob`](crate::Rob) is built from. It provides:
//! 1. **Defaults:** Baseline buffer geometry (capacity, squash width, thread count).
//! 2. **Structures:** [`RobConfig`], deserializable from JSON.
//! 3. **Enums:** [`SmtPolicy`], the rule for dividing capacity among thread contexts.
//!
//! Configuration is supplied as JSON by the surrounding simulator, or use
//! `RobConfig::default()` for a single-threaded buffer.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::MAX_THREADS;
use crate::common::error::ConfigError;

/// Default configuration constants for the reorder buffer.
mod defaults {
    /// Total number of buffer entries shared by all threads.
    pub const NUM_ENTRIES: usize = 192;

    /// Entries the squash unit can invalidate per call.
    pub const SQUASH_WIDTH: usize = 8;

    /// Number of configured hardware thread contexts.
    pub const NUM_THREADS: usize = 1;

    /// Per-thread entry threshold for [`SmtPolicy::Threshold`](super::SmtPolicy::Threshold).
    pub const THRESHOLD: usize = 100;
}

/// Capacity sharing policy among SMT thread contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SmtPolicy {
    /// Every thread may use the whole buffer; quotas are advisory.
    #[serde(alias = "dynamic", alias = "DYNAMIC")]
    Dynamic,
    /// Capacity is split evenly across active threads, rounding down.
    #[default]
    #[serde(alias = "partitioned", alias = "PARTITIONED")]
    Partitioned,
    /// Each thread is capped at a fixed threshold; a lone active thread gets everything.
    #[serde(alias = "threshold", alias = "THRESHOLD")]
    Threshold,
}

/// Reorder buffer configuration.
///
/// # Examples
///
/// ```
/// use robsim_core::config::{RobConfig, SmtPolicy};
///
/// let json = r#"{
///     "num_entries": 64,
///     "squash_width": 4,
///     "num_threads": 2,
///     "policy": "Threshold",
///     "threshold": 24
/// }"#;
///
/// let config = RobConfig::from_json(json).unwrap();
/// assert_eq!(config.num_entries, 64);
/// assert_eq!(config.policy, SmtPolicy::Threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RobConfig {
    /// Global capacity in entries
    #[serde(default = "RobConfig::default_num_entries")]
    pub num_entries: usize,

    /// Entries invalidated per squash step
    #[serde(default = "RobConfig::default_squash_width")]
    pub squash_width: usize,

    /// Configured hardware thread contexts (at most `MAX_THREADS`)
    #[serde(default = "RobConfig::default_num_threads")]
    pub num_threads: usize,

    /// Capacity sharing policy
    #[serde(default)]
    pub policy: SmtPolicy,

    /// Per-thread entry cap, only read by the `Threshold` policy
    #[serde(default = "RobConfig::default_threshold")]
    pub threshold: usize,
}

impl RobConfig {
    const fn default_num_entries() -> usize {
        defaults::NUM_ENTRIES
    }

    const fn default_squash_width() -> usize {
        defaults::SQUASH_WIDTH
    }

    const fn default_num_threads() -> usize {
        defaults::NUM_THREADS
    }

    const fn default_threshold() -> usize {
        defaults::THRESHOLD
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, or the validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as [`RobConfig::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that the configuration describes a buildable buffer.
    ///
    /// # Errors
    ///
    /// The first zero-sized or out-of-range parameter found.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.num_entries == 0 {
            return Err(ConfigError::ZeroEntries);
        }
        if self.squash_width == 0 {
            return Err(ConfigError::ZeroSquashWidth);
        }
        if self.num_threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.num_threads > MAX_THREADS {
            return Err(ConfigError::TooManyThreads {
                requested: self.num_threads,
                max: MAX_THREADS,
            });
        }
        if matches!(self.policy, SmtPolicy::Threshold) && self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }
}

impl Default for RobConfig {
    fn default() -> Self {
        Self {
            num_entries: defaults::NUM_ENTRIES,
            squash_width: defaults::SQUASH_WIDTH,
            num_threads: defaults::NUM_THREADS,
            policy: SmtPolicy::default(),
            threshold: defaults::THRESHOLD,
        }
    }
}

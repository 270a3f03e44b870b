use crate::core::io::frames::MalformedCountPolicy;
use thiserror::Error;

/// Default number of segments buffered per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionConfig {
    /// Synthesize sites for a batch of molecule groups on the rayon pool.
    pub parallel: bool,
    /// Number of segments (molecule groups and passthrough lines) per batch.
    pub batch_size: usize,
}

impl Default for InsertionConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizationConfig {
    pub malformed_count: MalformedCountPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub insertion: InsertionConfig,
    pub normalization: NormalizationConfig,
}

#[derive(Default)]
pub struct RunConfigBuilder {
    parallel: Option<bool>,
    batch_size: Option<usize>,
    malformed_count: Option<MalformedCountPolicy>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }
    pub fn malformed_count(mut self, policy: MalformedCountPolicy) -> Self {
        self.malformed_count = Some(policy);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let batch_size = self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(RunConfig {
            insertion: InsertionConfig {
                parallel: self.parallel.unwrap_or(false),
                batch_size,
            },
            normalization: NormalizationConfig {
                malformed_count: self.malformed_count.unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_uses_defaults_for_unset_values() {
        let config = RunConfigBuilder::new().build().unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.insertion.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(
            config.normalization.malformed_count,
            MalformedCountPolicy::Skip
        );
    }

    #[test]
    fn builder_applies_overrides() {
        let config = RunConfigBuilder::new()
            .parallel(true)
            .batch_size(16)
            .malformed_count(MalformedCountPolicy::Fail)
            .build()
            .unwrap();
        assert!(config.insertion.parallel);
        assert_eq!(config.insertion.batch_size, 16);
        assert_eq!(
            config.normalization.malformed_count,
            MalformedCountPolicy::Fail
        );
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = RunConfigBuilder::new().batch_size(0).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "batch_size",
                ..
            }
        ));
    }
}

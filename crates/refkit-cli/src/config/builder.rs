use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileMalformedCount};
use crate::cli::Cli;
use crate::error::{CliError, Result};
use refkit::core::io::frames::MalformedCountPolicy;
use refkit::engine::config::{RunConfig, RunConfigBuilder};

impl From<FileMalformedCount> for MalformedCountPolicy {
    fn from(value: FileMalformedCount) -> Self {
        match value {
            FileMalformedCount::Skip => MalformedCountPolicy::Skip,
            FileMalformedCount::Fail => MalformedCountPolicy::Fail,
        }
    }
}

/// Resolves the run configuration: CLI flags, then `--set` overrides, then the config file,
/// then built-in defaults.
pub fn build_config(cli: &Cli) -> Result<RunConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &cli.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &cli.set_values)?;

    let insertion = file_config.insertion.take().unwrap_or_default();
    let normalization = file_config.normalization.take().unwrap_or_default();

    let parallel = cli.threads.is_some_and(|n| n > 1);

    RunConfigBuilder::new()
        .parallel(parallel)
        .batch_size(insertion.batch_size.unwrap_or(defaults.batch_size))
        .malformed_count(
            normalization
                .malformed_count
                .map(Into::into)
                .unwrap_or(defaults.malformed_count),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        match key {
            "insertion.batch-size" => {
                config
                    .insertion
                    .get_or_insert_with(Default::default)
                    .batch_size = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!(
                        "Invalid integer value for {}: {}",
                        key, value_str
                    ))
                })?);
            }
            "normalization.malformed-count" => {
                let policy = match value_str.to_ascii_lowercase().as_str() {
                    "skip" => FileMalformedCount::Skip,
                    "fail" => FileMalformedCount::Fail,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: {} (expected 'skip' or 'fail')",
                            key, value_str
                        )));
                    }
                };
                config
                    .normalization
                    .get_or_insert_with(Default::default)
                    .malformed_count = Some(policy);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

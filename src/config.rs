//! Configuration file support for si-usage-report.
//!
//! Provides YAML-based configuration through `si-usage-report.config.yml`
//! files, and the merge of file values with command-line flags.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::outbound::network::{ApiClientSettings, MAX_PER_PAGE};
use crate::application::dto::{
    OutputFormat, UsageReportRequest, DEFAULT_DEADLINE_SECS, DEFAULT_MAX_CONCURRENT_LOOKUPS,
};
use crate::cli::Args;
use crate::shared::error::UsageReportError;
use crate::shared::Result;
use crate::usage_reporting::policies::PlanOrdering;

pub const CONFIG_FILENAME: &str = "si-usage-report.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub plan_order: Option<String>,
    pub timeout_secs: Option<u64>,
    pub per_page: Option<u32>,
    pub max_retries: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
    pub max_concurrent_lookups: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty document deserializes to unit, not a mapping
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "using discovered config file");
    load_config_from_path(&config_path).map(Some)
}

fn invalid(message: String) -> anyhow::Error {
    UsageReportError::Validation { message }.into()
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref format) = config.format {
        OutputFormat::from_str(format).map_err(invalid)?;
    }
    if let Some(ref plan_order) = config.plan_order {
        PlanOrdering::from_str(plan_order).map_err(invalid)?;
    }
    if config.timeout_secs == Some(0) {
        return Err(invalid("timeout_secs must be greater than 0".to_string()));
    }
    if let Some(per_page) = config.per_page {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(invalid(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }
    }
    if config.max_retries == Some(0) {
        return Err(invalid("max_retries must be at least 1".to_string()));
    }
    if config.max_concurrent_lookups == Some(0) {
        return Err(invalid(
            "max_concurrent_lookups must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings for one run: CLI flags over config file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub request: UsageReportRequest,
    pub api: ApiClientSettings,
}

impl RunSettings {
    pub fn resolve(args: &Args, config: &ConfigFile) -> Result<Self> {
        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => OutputFormat::from_str(format).map_err(invalid)?,
            (None, None) => OutputFormat::default(),
        };

        let plan_ordering = match (args.plan_order, config.plan_order.as_deref()) {
            (Some(order), _) => order,
            (None, Some(order)) => PlanOrdering::from_str(order).map_err(invalid)?,
            (None, None) => PlanOrdering::default(),
        };

        let deadline_secs = args
            .timeout
            .or(config.timeout_secs)
            .unwrap_or(DEFAULT_DEADLINE_SECS);

        let request = UsageReportRequest::new(plan_ordering, Duration::from_secs(deadline_secs))
            .with_max_concurrent_lookups(
                config
                    .max_concurrent_lookups
                    .unwrap_or(DEFAULT_MAX_CONCURRENT_LOOKUPS),
            );

        let mut api = ApiClientSettings::default();
        if let Some(per_page) = config.per_page {
            api = api.with_per_page(per_page);
        }
        if let Some(max_retries) = config.max_retries {
            api = api.with_max_retries(max_retries);
        }
        if let Some(backoff_ms) = config.retry_backoff_ms {
            api = api.with_retry_backoff(Duration::from_millis(backoff_ms));
        }

        Ok(Self {
            format,
            output: args.output.clone(),
            request,
            api,
        })
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Pipeline settings. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Organization label printed in report headers and footers.
    pub organization: String,
    /// ISO 4217 code used when formatting amounts.
    pub currency: String,
    /// Principal recorded as the report author when the caller gives none.
    pub generated_by: String,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub sweep_interval_secs: u64,
    /// `None` leaves the cache unbounded (TTL expiry only).
    pub cache_max_entries: Option<usize>,
    /// Background job workers started with the service.
    pub workers: usize,
    /// How long finished jobs stay queryable.
    pub job_retention_secs: u64,
    /// Where `save_report` writes artifacts.
    pub output_dir: PathBuf,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            organization: "AfricaSuite Hotel".to_string(),
            currency: "XOF".to_string(),
            generated_by: "system".to_string(),
            cache_enabled: true,
            cache_ttl_secs: 24 * 60 * 60,
            sweep_interval_secs: 60 * 60,
            cache_max_entries: Some(256),
            workers: 2,
            job_retention_secs: 24 * 60 * 60,
            output_dir: PathBuf::from("reports"),
        }
    }
}

impl ReportsConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        let config: ReportsConfig = serde_json::from_str(&contents)
            .map_err(|e| ReportError::Config(format!("invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.cache_ttl_secs == 0 {
            return Err(ReportError::Config("cache_ttl_secs must be positive".to_string()));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ReportError::Config(
                "sweep_interval_secs must be positive".to_string(),
            ));
        }
        if self.cache_max_entries == Some(0) {
            return Err(ReportError::Config(
                "cache_max_entries must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn job_retention(&self) -> Duration {
        Duration::from_secs(self.job_retention_secs)
    }
}

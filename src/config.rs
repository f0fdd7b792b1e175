use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Go through the CORS proxy worker.
    Proxy,
    /// Talk to the portal directly.
    Direct,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    #[serde(default = "default_details_url")]
    pub details_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub impersonate: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ParsingConfig {
    #[serde(default = "default_true")]
    pub normalize_city: bool,
    #[serde(default = "default_true")]
    pub decode_emails: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_gateway")]
    pub gateway: GatewayKind,

    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub portal: PortalConfig,

    #[serde(default)]
    pub parsing: ParsingConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            details_url: default_details_url(),
            user_agent: default_user_agent(),
            impersonate: false,
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            normalize_city: true,
            decode_emails: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: default_gateway(),
            proxy_url: default_proxy_url(),
            batch_size: default_batch_size(),
            output: default_output(),
            portal: PortalConfig::default(),
            parsing: ParsingConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        let config = Self::from_toml(&content)?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Like [`Config::from_file`], but falls back to the defaults when the
    /// file does not exist.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validate_url("proxy_url", &self.proxy_url)?;
        validate_url("portal.listing_url", &self.portal.listing_url)?;
        validate_url("portal.details_url", &self.portal.details_url)?;

        if self.portal.user_agent.trim().is_empty() {
            return Err(ConfigError::MissingField("portal.user_agent".to_string()).into());
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue(
                "batch_size must be greater than 0".to_string(),
            )
            .into());
        }

        if self.output.trim().is_empty() {
            return Err(ConfigError::InvalidValue("output cannot be empty".to_string()).into());
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ConfigError::MissingField(field.to_string()).into());
    }
    if !value.starts_with("http") {
        return Err(ConfigError::InvalidValue(format!(
            "{} must start with http(s): {}",
            field, value
        ))
        .into());
    }
    Ok(())
}

fn default_gateway() -> GatewayKind {
    GatewayKind::Proxy
}

fn default_proxy_url() -> String {
    "https://get-job-board.fannk987.workers.dev/".to_string()
}

fn default_listing_url() -> String {
    "https://yes.umass.edu/portal/jobsearch?cmd=search".to_string()
}

fn default_details_url() -> String {
    "https://yes.umass.edu/portal/jobsearch?cmd=Details&job_number_details=".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_batch_size() -> usize {
    40
}

fn default_output() -> String {
    "json_data/job_postings.json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "job-board.log".to_string()
}

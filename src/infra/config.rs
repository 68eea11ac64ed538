//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! The PORT environment variable (or --port) overrides the configured port.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Take the client IP from the first X-Forwarded-For entry when present
    #[serde(default = "default_trust_forwarded_for")]
    pub trust_forwarded_for: bool,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_trust_forwarded_for() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            trust_forwarded_for: default_trust_forwarded_for(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    /// Line store for qualifying page visits
    #[serde(default = "default_visits_file")]
    pub visits_file: String,
    /// Line store for qualifying username submissions
    #[serde(default = "default_submissions_file")]
    pub submissions_file: String,
}

fn default_visits_file() -> String {
    "ips.txt".to_string()
}

fn default_submissions_file() -> String {
    "submissions.txt".to_string()
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { visits_file: default_visits_file(), submissions_file: default_submissions_file() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignatureEntry {
    pub keyword: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClassifierConfig {
    /// Appended after the built-in signatures
    #[serde(default)]
    pub extra_signatures: Vec<SignatureEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Serve GET /metrics
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    /// Interval for the periodic metrics log line (0 to disable)
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_report_interval_secs() -> u64 {
    60
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    bind_address: String,
    port: u16,
    trust_forwarded_for: bool,
    visits_file: String,
    submissions_file: String,
    extra_signatures: Vec<SignatureEntry>,
    metrics_enabled: bool,
    metrics_report_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default")
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: &str) -> Self {
        Self {
            bind_address: toml_config.server.bind_address,
            port: toml_config.server.port,
            trust_forwarded_for: toml_config.server.trust_forwarded_for,
            visits_file: toml_config.logs.visits_file,
            submissions_file: toml_config.logs.submissions_file,
            extra_signatures: toml_config.classifier.extra_signatures,
            metrics_enabled: toml_config.metrics.enabled,
            metrics_report_interval_secs: toml_config.metrics.report_interval_secs,
            config_file: config_file.to_string(),
        }
    }

    /// Determine config file path from args or environment
    pub fn resolve_config_path(args: &[String]) -> String {
        for (i, arg) in args.iter().enumerate() {
            if arg == "--config" {
                if let Some(path) = args.get(i + 1) {
                    return path.clone();
                }
            }
            if let Some(path) = arg.strip_prefix("--config=") {
                return path.to_string();
            }
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        "config/dev.toml".to_string()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, source: &str) -> anyhow::Result<Self> {
        let toml_config: TomlConfig = toml::from_str(content)
            .with_context(|| format!("Failed to parse config file {}", source))?;
        Ok(Self::from_toml(toml_config, source))
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load from a path, falling back to defaults when missing or invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_fallback_to_defaults");
                Self::default()
            }
        }
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load(args: &[String]) -> Self {
        Self::load_from_path(Self::resolve_config_path(args))
    }

    /// Apply the PORT environment variable, if set to a valid port
    pub fn with_env_overrides(self) -> Self {
        match env::var("PORT") {
            Ok(value) => self.with_port_override(&value),
            Err(_) => self,
        }
    }

    fn with_port_override(mut self, value: &str) -> Self {
        match value.trim().parse::<u16>() {
            Ok(port) => self.port = port,
            Err(_) => warn!(value = %value, "invalid_port_override_ignored"),
        }
        self
    }

    /// Builder method to override the listen port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to point both log stores at new paths
    pub fn with_log_files(mut self, visits_file: &str, submissions_file: &str) -> Self {
        self.visits_file = visits_file.to_string();
        self.submissions_file = submissions_file.to_string();
        self
    }

    /// Builder method to toggle X-Forwarded-For trust
    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    // Getters for all config fields
    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn trust_forwarded_for(&self) -> bool {
        self.trust_forwarded_for
    }

    pub fn visits_file(&self) -> &str {
        &self.visits_file
    }

    pub fn submissions_file(&self) -> &str {
        &self.submissions_file
    }

    pub fn extra_signatures(&self) -> &[SignatureEntry] {
        &self.extra_signatures
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }

    pub fn metrics_report_interval_secs(&self) -> u64 {
        self.metrics_report_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

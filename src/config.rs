//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.verifpal-web.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".verifpal-web.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Verifier invocation settings.
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1MB
}

/// Verifier invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Executable name used for the PATH lookup and in error messages.
    #[serde(default = "default_name")]
    pub name: String,

    /// Paths checked in order before falling back to PATH.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<PathBuf>,

    /// Subcommand passed before the input file.
    #[serde(default = "default_subcommand")]
    pub subcommand: String,

    /// Extension given to the temporary input file.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Wall-clock limit for one run, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Directory for temporary input files. System temp dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,

    /// Search path used instead of `$PATH` for the fallback lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_path: Option<String>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            candidates: default_candidates(),
            subcommand: default_subcommand(),
            extension: default_extension(),
            timeout_seconds: default_timeout(),
            temp_dir: None,
            search_path: None,
        }
    }
}

impl VerifierConfig {
    /// Returns the run timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_name() -> String {
    "verifpal".to_string()
}

fn default_candidates() -> Vec<PathBuf> {
    vec!["verifpal", "/usr/local/bin/verifpal", "/usr/bin/verifpal"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

fn default_subcommand() -> String {
    "verify".to_string()
}

fn default_extension() -> String {
    "vp".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Reject values the file format accepts but the service cannot use.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.verifier.timeout_seconds > 0,
            "verifier.timeout_seconds must be at least 1"
        );
        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given explicitly on the command line (or through their
    /// environment variables) override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref bind) = args.bind {
            self.server.bind = bind.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(timeout) = args.timeout {
            self.verifier.timeout_seconds = timeout;
        }

        // An explicit executable is tried before any configured candidate
        if let Some(ref verifpal) = args.verifpal {
            self.verifier.candidates.insert(0, verifpal.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

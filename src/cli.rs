//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// verifpal-web - web front end for the Verifpal protocol verifier
///
/// Serves a page where protocol models can be pasted or dropped, runs
/// `verifpal verify` on each submission and returns its output as JSON.
///
/// Examples:
///   verifpal-web
///   verifpal-web --port 8080 --verifpal /opt/verifpal/verifpal
///   verifpal-web --analyze ./models/signal.vp
///   verifpal-web --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Port to listen on
    ///
    /// Defaults to 5000, or the value from .verifpal-web.toml.
    #[arg(short, long, env = "PORT", value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind the HTTP server to
    ///
    /// Defaults to 0.0.0.0 (all interfaces).
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .verifpal-web.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the verifpal executable
    ///
    /// Checked before the built-in candidate locations and PATH.
    #[arg(long, value_name = "PATH", env = "VERIFPAL_PATH")]
    pub verifpal: Option<PathBuf>,

    /// Analysis timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Analyze a local protocol file once and exit
    ///
    /// Exit code 0 when the output looks clean, 2 when it reports errors or
    /// attacks, 1 when verifpal could not be run.
    #[arg(long, value_name = "FILE")]
    pub analyze: Option<PathBuf>,

    /// Generate a default .verifpal-web.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref bind) = self.bind {
            if bind.trim().is_empty() {
                return Err("Bind address must not be empty".to_string());
            }
        }

        // Validate the one-shot input file if provided
        if let Some(ref path) = self.analyze {
            if !path.is_file() {
                return Err(format!("Protocol file does not exist: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

//! verifpal-web - web front end for the Verifpal protocol verifier
//!
//! Serves a single page and a JSON endpoint that runs `verifpal verify`
//! on submitted protocol models, one bounded process per request.
//!
//! Exit codes for `--analyze`:
//!   0 - verifpal ran and its output looks clean (or only has warnings)
//!   1 - Runtime error (verifpal missing, timeout, config, I/O)
//!   2 - verifpal reported errors or attacks

mod cli;
mod config;
mod models;
mod orchestrator;
mod server;
mod verdict;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use orchestrator::Orchestrator;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use verdict::classify_verdict;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("verifpal-web v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    if let Some(ref path) = args.analyze {
        match analyze_once(path, &config).await {
            Ok(exit_code) => std::process::exit(exit_code),
            Err(e) => {
                error!("Analysis failed: {}", e);
                eprintln!("\n❌ Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    server::serve(&config).await
}

/// Handle --init-config: generate a default .verifpal-web.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change the port, verifpal location, timeout, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings. `RUST_LOG` overrides.
fn init_logging(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(args.log_level()).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Handle --analyze: run verifpal once on a local file. Returns exit code.
async fn analyze_once(path: &Path, config: &Config) -> Result<i32> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read protocol file: {}", path.display()))?;
    let text = server::intake::validate_code(Some(text))?;

    println!("🔍 Analyzing {} ...", path.display());

    let orchestrator = Orchestrator::new(config.verifier.clone());
    let raw = orchestrator.run(&text).await?;

    let output = raw.merged();
    let verdict = classify_verdict(&output);

    println!("\n{} {}\n", verdict.emoji(), verdict.title());
    println!("{}", output);
    println!("\nverifpal exit code: {}", raw.exit_code);

    Ok(if verdict.is_failure() { 2 } else { 0 })
}

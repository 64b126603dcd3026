//! Analysis orchestration.
//!
//! One analysis is strictly sequential: resolve the verifier, write the
//! input file, run the verifier under a timeout, build the result, and
//! delete the input file. Failures to run the verifier are reported as
//! `OrchestrationError`; problems the verifier finds in the protocol are
//! not failures and come back as ordinary output.

pub mod artifact;
pub mod resolver;
pub mod runner;

pub use artifact::InputArtifact;
pub use resolver::{ExecutableResolver, Resolution};
pub use runner::{RunError, ToolRunner};

use crate::config::VerifierConfig;
use crate::models::{AnalysisResult, RawOutput};
use crate::verdict::classify_verdict;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasons an analysis could not be carried out.
#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("{tool} not found. Please ensure {tool} is installed and in PATH.")]
    ToolNotFound { tool: String },

    #[error("Analysis timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Error running {tool}: {message}")]
    LaunchFailure { tool: String, message: String },
}

/// Runs one bounded verifier invocation per call.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: VerifierConfig,
}

impl Orchestrator {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Build the executable resolver from the current settings.
    pub fn resolver(&self) -> ExecutableResolver {
        let resolver =
            ExecutableResolver::new(self.config.name.clone(), self.config.candidates.clone());

        match self.config.search_path {
            Some(ref search_path) => resolver.with_search_path(search_path),
            None => resolver,
        }
    }

    /// Analyze `text` and convert the outcome to a response envelope.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let start = Instant::now();

        match self.run(text).await {
            Ok(raw) => {
                let output = raw.merged();
                info!(
                    exit_code = raw.exit_code,
                    verdict = %classify_verdict(&output),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Analysis complete"
                );
                AnalysisResult::completed(output, raw.exit_code)
            }
            Err(e) => {
                warn!(
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Analysis failed: {}", e
                );
                AnalysisResult::failure(e.to_string())
            }
        }
    }

    /// Resolve, write, run, and clean up. The input file never outlives
    /// this call.
    pub async fn run(&self, text: &str) -> Result<RawOutput, OrchestrationError> {
        let executable = match self.resolver().resolve() {
            Resolution::Found(path) => path,
            Resolution::NotFound => {
                return Err(OrchestrationError::ToolNotFound {
                    tool: self.config.name.clone(),
                })
            }
        };

        let artifact = InputArtifact::create(
            text,
            self.config.temp_dir.as_deref(),
            &self.config.extension,
        )
        .map_err(|e| self.launch_failure(e))?;

        debug!(
            executable = %executable.display(),
            input = %artifact.path().display(),
            bytes = text.len(),
            "Running verifier"
        );

        let runner = ToolRunner::new(self.config.subcommand.clone(), self.config.timeout());
        let result = runner.run(&executable, artifact.path()).await;

        let input_path = artifact.path().to_path_buf();
        if let Err(e) = artifact.release() {
            warn!("Failed to remove {}: {}", input_path.display(), e);
        }

        result.map_err(|e| match e {
            RunError::TimedOut => OrchestrationError::Timeout {
                seconds: self.config.timeout_seconds,
            },
            RunError::Io(e) => self.launch_failure(e),
        })
    }

    fn launch_failure(&self, error: impl std::fmt::Display) -> OrchestrationError {
        OrchestrationError::LaunchFailure {
            tool: self.config.name.clone(),
            message: error.to_string(),
        }
    }
}

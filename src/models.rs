//! Data models for the analysis service.
//!
//! This module contains the request and response envelopes exchanged
//! over HTTP and the raw output captured from one verifier run.

use serde::{Deserialize, Serialize};

/// Body of a `POST /analyze` request.
///
/// `code` is optional here so a missing field can be reported in-band
/// instead of as an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Protocol description in the verifier's input syntax.
    #[serde(default)]
    pub code: Option<String>,
}

/// Result of one analysis, serialized as the `/analyze` response body.
///
/// Exactly one of `output` and `error` is set. A successful result always
/// carries the tool's exit code, a failed one never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Whether the verifier ran to completion.
    pub success: bool,
    /// Merged verifier output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Human-readable orchestration failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Verifier exit code, reported verbatim.
    #[serde(
        rename = "returncode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_code: Option<i32>,
}

impl AnalysisResult {
    /// Creates a result for a verifier run that completed.
    pub fn completed(output: String, exit_code: i32) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
            exit_code: Some(exit_code),
        }
    }

    /// Creates a failed result carrying only an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
            exit_code: None,
        }
    }
}

/// Output captured from a verifier process that exited on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    /// Returns stdout, followed by a newline and stderr when stderr is non-empty.
    pub fn merged(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_serialization() {
        let result = AnalysisResult::completed(
            "Verification completed, 0 attacks found.".to_string(),
            0,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "output": "Verification completed, 0 attacks found.",
                "returncode": 0
            })
        );
    }

    #[test]
    fn test_failure_omits_output_and_returncode() {
        let result = AnalysisResult::failure("Analysis timed out after 30 seconds");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Analysis timed out after 30 seconds"
            })
        );
    }

    #[test]
    fn test_completed_with_empty_output_keeps_field() {
        let json = serde_json::to_string(&AnalysisResult::completed(String::new(), 3)).unwrap();
        assert!(json.contains("\"output\":\"\""));
        assert!(json.contains("\"returncode\":3"));
    }

    #[test]
    fn test_merged_output() {
        let mut raw = RawOutput {
            exit_code: 1,
            stdout: "result".to_string(),
            stderr: String::new(),
        };
        assert_eq!(raw.merged(), "result");

        raw.stderr = "error: bad syntax".to_string();
        assert_eq!(raw.merged(), "result\nerror: bad syntax");

        raw.stdout.clear();
        assert_eq!(raw.merged(), "\nerror: bad syntax");
    }

    #[test]
    fn test_request_missing_code() {
        let request: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert!(request.code.is_none());

        let request: AnalysisRequest =
            serde_json::from_str(r#"{"code": "principal Alice[]"}"#).unwrap();
        assert_eq!(request.code.as_deref(), Some("principal Alice[]"));
    }
}

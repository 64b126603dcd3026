//! Request validation for `/analyze`.
//!
//! Only presence and non-emptiness are checked here; the verifier is the
//! sole judge of protocol syntax.

use crate::models::AnalysisRequest;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use thiserror::Error;

/// Reasons a submission is rejected before any verifier work starts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Missing required field: code")]
    MissingField,

    #[error("No protocol code provided")]
    EmptyInput,

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Check a submitted protocol description.
///
/// Whitespace is trimmed for the emptiness check only; the returned text
/// is the untouched submission.
pub fn validate_code(code: Option<String>) -> Result<String, IntakeError> {
    let code = code.ok_or(IntakeError::MissingField)?;

    if code.trim().is_empty() {
        return Err(IntakeError::EmptyInput);
    }

    Ok(code)
}

/// Extract the protocol description from a JSON body.
pub fn validate_body(
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<String, IntakeError> {
    let Json(request) =
        body.map_err(|rejection| IntakeError::MalformedBody(rejection.body_text()))?;
    validate_code(request.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_code() {
        assert_eq!(validate_code(None), Err(IntakeError::MissingField));
        assert_eq!(
            validate_body(Ok(Json(AnalysisRequest { code: None }))),
            Err(IntakeError::MissingField)
        );
    }

    #[test]
    fn test_empty_after_trim() {
        assert_eq!(validate_code(Some(String::new())), Err(IntakeError::EmptyInput));
        assert_eq!(
            validate_code(Some(" \n\t ".to_string())),
            Err(IntakeError::EmptyInput)
        );
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let code = "\nattacker[active]\n\nprincipal Alice[]\n".to_string();
        assert_eq!(validate_code(Some(code.clone())), Ok(code));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            IntakeError::MissingField.to_string(),
            "Missing required field: code"
        );
        assert_eq!(IntakeError::EmptyInput.to_string(), "No protocol code provided");
    }
}

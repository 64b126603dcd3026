//! Best-effort verdict classification of verifier output.
//!
//! This is substring matching over human-readable text and is not
//! authoritative. It feeds log fields and the one-shot CLI summary and
//! never changes what `/analyze` returns.

use std::fmt;

/// Coarse reading of a verifier report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictClass {
    Verified,
    Warning,
    VerificationError,
    AttackFound,
}

impl VerdictClass {
    /// Heading shown to users for this class.
    pub fn title(&self) -> &'static str {
        match self {
            VerdictClass::Verified => "Protocol Verified",
            VerdictClass::Warning => "Analysis Complete with Warnings",
            VerdictClass::VerificationError => "Verification Errors",
            VerdictClass::AttackFound => "Attack Found",
        }
    }

    /// Returns an emoji representation of the class.
    pub fn emoji(&self) -> &'static str {
        match self {
            VerdictClass::Verified => "✅",
            VerdictClass::Warning => "⚠️",
            VerdictClass::VerificationError => "❌",
            VerdictClass::AttackFound => "🚨",
        }
    }

    /// Whether the report points at a problem with the protocol.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            VerdictClass::VerificationError | VerdictClass::AttackFound
        )
    }
}

impl fmt::Display for VerdictClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictClass::Verified => write!(f, "verified"),
            VerdictClass::Warning => write!(f, "warning"),
            VerdictClass::VerificationError => write!(f, "verification_error"),
            VerdictClass::AttackFound => write!(f, "attack_found"),
        }
    }
}

const ERROR_MARKERS: &[&str] = &["error:", "Error:"];
const ATTACK_MARKERS: &[&str] = &["attack found", "ATTACK"];
const WARNING_MARKERS: &[&str] = &["warning:", "Warning:"];

/// Classify merged verifier output. Errors take precedence over attacks,
/// attacks over warnings.
pub fn classify_verdict(output: &str) -> VerdictClass {
    if contains_any(output, ERROR_MARKERS) {
        VerdictClass::VerificationError
    } else if contains_any(output, ATTACK_MARKERS) {
        VerdictClass::AttackFound
    } else if contains_any(output, WARNING_MARKERS) {
        VerdictClass::Warning
    } else {
        VerdictClass::Verified
    }
}

fn contains_any(output: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| output.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_output_is_verified() {
        assert_eq!(
            classify_verdict("Verification completed, 0 attacks found."),
            VerdictClass::Verified
        );
        assert_eq!(classify_verdict(""), VerdictClass::Verified);
    }

    #[test]
    fn test_markers() {
        assert_eq!(
            classify_verdict("Error: parse failure at line 3"),
            VerdictClass::VerificationError
        );
        assert_eq!(
            classify_verdict("confidentiality? a: attack found"),
            VerdictClass::AttackFound
        );
        assert_eq!(
            classify_verdict("ATTACK on authentication? Alice -> Bob: e"),
            VerdictClass::AttackFound
        );
        assert_eq!(
            classify_verdict("warning: constant never used"),
            VerdictClass::Warning
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            classify_verdict("warning: x\nattack found\nerror: y"),
            VerdictClass::VerificationError
        );
        assert_eq!(
            classify_verdict("Warning: x\nATTACK"),
            VerdictClass::AttackFound
        );
    }

    #[test]
    fn test_marker_case_is_exact() {
        assert_eq!(classify_verdict("ERROR happened"), VerdictClass::Verified);
        assert_eq!(classify_verdict("Attack Found"), VerdictClass::Verified);
    }

    #[test]
    fn test_is_failure() {
        assert!(VerdictClass::AttackFound.is_failure());
        assert!(VerdictClass::VerificationError.is_failure());
        assert!(!VerdictClass::Warning.is_failure());
        assert!(!VerdictClass::Verified.is_failure());
        assert_eq!(VerdictClass::Warning.title(), "Analysis Complete with Warnings");
    }
}

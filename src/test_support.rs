//! Helpers for tests that run a fake verifier script.

use crate::config::VerifierConfig;
use std::path::{Path, PathBuf};

/// Subdirectory of a test dir that receives input files.
const ARTIFACT_DIR: &str = "artifacts";

/// Write an executable `/bin/sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Verifier settings isolated to `dir`.
///
/// `tool` becomes the only candidate; with `None` the tool cannot be
/// found because the search path points at an empty directory.
pub fn verifier_config(dir: &Path, tool: Option<PathBuf>) -> VerifierConfig {
    let artifacts = dir.join(ARTIFACT_DIR);
    std::fs::create_dir_all(&artifacts).unwrap();
    let empty = dir.join("empty-path");
    std::fs::create_dir_all(&empty).unwrap();

    VerifierConfig {
        candidates: vec![tool.unwrap_or_else(|| dir.join("missing-verifpal"))],
        temp_dir: Some(artifacts),
        search_path: Some(empty.display().to_string()),
        timeout_seconds: 10,
        ..VerifierConfig::default()
    }
}

/// Number of input files left behind in a test dir.
pub fn artifact_count(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(ARTIFACT_DIR))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

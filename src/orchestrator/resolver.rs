//! Verifier executable discovery.
//!
//! Candidates are checked in order; the first regular file with an
//! executable bit wins. When none match, the tool name is looked up on
//! the search path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of an executable lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PathBuf),
    NotFound,
}

/// Ordered lookup of the verifier executable.
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
    name: String,
    candidates: Vec<PathBuf>,
    /// `None` means the process `$PATH`.
    search_path: Option<OsString>,
}

impl ExecutableResolver {
    /// Create a resolver for `name` with explicit candidate locations.
    pub fn new(name: impl Into<String>, candidates: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            candidates,
            search_path: None,
        }
    }

    /// Replace `$PATH` with a fixed search path for the fallback lookup.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Resolve the executable. Never cached; every call checks the filesystem.
    pub fn resolve(&self) -> Resolution {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.resolve_in(&cwd)
    }

    /// Resolve with relative candidates anchored at `cwd`.
    pub fn resolve_in(&self, cwd: &Path) -> Resolution {
        for candidate in &self.candidates {
            // Relative candidates are anchored to the working directory so
            // they are not mistaken for a PATH lookup at spawn time
            let path = if candidate.is_relative() {
                cwd.join(candidate)
            } else {
                candidate.clone()
            };

            if is_executable(&path) {
                debug!("Resolved {} at candidate {}", self.name, path.display());
                return Resolution::Found(path);
            }
        }

        let search_path = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));

        match which::which_in(&self.name, search_path.as_ref(), cwd) {
            Ok(path) => {
                debug!("Resolved {} on search path: {}", self.name, path.display());
                Resolution::Found(path)
            }
            Err(e) => {
                debug!("{} not found on search path: {}", self.name, e);
                Resolution::NotFound
            }
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

//! Temporary input file handed to the verifier.

use std::io::{self, Write};
use std::path::Path;
use tempfile::TempPath;

/// Prefix shared by every input file name.
const ARTIFACT_PREFIX: &str = "verifpal-";

/// A uniquely named temporary file holding one protocol description.
///
/// The file is removed when the value is dropped, so every exit path of
/// an analysis releases it.
#[derive(Debug)]
pub struct InputArtifact {
    path: TempPath,
}

impl InputArtifact {
    /// Write `text` to a new file with the given extension.
    ///
    /// The file is created in `dir`, or the system temp directory when
    /// `dir` is `None`. The write handle is closed before returning.
    pub fn create(text: &str, dir: Option<&Path>, extension: &str) -> io::Result<Self> {
        let suffix = format!(".{}", extension.trim_start_matches('.'));

        let mut builder = tempfile::Builder::new();
        builder.prefix(ARTIFACT_PREFIX).suffix(&suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(text.as_bytes())?;
        file.flush()?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// Path of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, reporting failures instead of ignoring them.
    pub fn release(self) -> io::Result<()> {
        self.path.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_text() {
        let dir = TempDir::new().unwrap();
        let artifact =
            InputArtifact::create("principal Alice[ knows private a ]", Some(dir.path()), "vp")
                .unwrap();

        let path = artifact.path().to_path_buf();
        assert!(path.starts_with(dir.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("vp"));
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(ARTIFACT_PREFIX)));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "principal Alice[ knows private a ]"
        );
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = TempDir::new().unwrap();
        let artifact = InputArtifact::create("attacker[active]", Some(dir.path()), "vp").unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_release_removes_file() {
        let dir = TempDir::new().unwrap();
        let artifact = InputArtifact::create("attacker[passive]", Some(dir.path()), ".vp").unwrap();
        let path = artifact.path().to_path_buf();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("vp"));

        artifact.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_names_are_unique() {
        let dir = TempDir::new().unwrap();
        let first = InputArtifact::create("a", Some(dir.path()), "vp").unwrap();
        let second = InputArtifact::create("a", Some(dir.path()), "vp").unwrap();
        assert_ne!(first.path(), second.path());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = InputArtifact::create("a", Some(&dir.path().join("missing")), "vp");
        assert!(result.is_err());
    }
}

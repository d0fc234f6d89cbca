use crate::domain::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A file written by an export action, with the MIME type the artifact was
/// exported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub path: PathBuf,
    pub mime: String,
}

/// Writes `content` under `dir` with the exact `filename`. Any string
/// content is accepted, the empty string included.
pub fn export_artifact(
    dir: &Path,
    filename: &str,
    content: &str,
    mime: &str,
) -> Result<ExportedArtifact> {
    ensure_dir(dir)?;
    let path = dir.join(filename);
    fs::write(&path, content.as_bytes())?;
    Ok(ExportedArtifact {
        path,
        mime: mime.to_string(),
    })
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let artifact =
            export_artifact(dir.path(), "test-output.md", "# Heading\n", "text/markdown").unwrap();
        assert_eq!(artifact.path, dir.path().join("test-output.md"));
        assert_eq!(artifact.mime, "text/markdown");
        assert_eq!(fs::read_to_string(&artifact.path).unwrap(), "# Heading\n");
    }

    #[test]
    fn test_export_accepts_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = export_artifact(dir.path(), "test-output.txt", "", "text/plain").unwrap();
        assert_eq!(fs::read_to_string(&artifact.path).unwrap(), "");
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");
        let artifact =
            export_artifact(&nested, "postman-test.js", "pm.test();", "application/javascript")
                .unwrap();
        assert!(artifact.path.exists());
    }
}

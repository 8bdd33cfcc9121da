// 📁 Vault Storage - Note files addressed by vault-relative path
// The vault is the storage root; everything above it is out of bounds.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// NOTE FILE HANDLE
// ============================================================================

/// NoteFile - Value handle for a resolved note
///
/// Owned and cheap to clone so that UI actions (the "Open" button) can
/// capture the handle at render time. A later render that resolves a
/// different file for the same year must not redirect an already-built
/// action; cloning the handle into the section guarantees that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFile {
    /// Vault-relative path, forward-slash separated
    pub path: String,
}

impl NoteFile {
    pub fn new(path: impl Into<String>) -> Self {
        NoteFile { path: path.into() }
    }

    /// File name without the `.md` extension, for display
    pub fn display_name(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.strip_suffix(".md").unwrap_or(name)
    }
}

// ============================================================================
// STORAGE SEAM
// ============================================================================

/// NoteStore - Minimal storage collaborator
///
/// Two queries only: "does this relative path resolve to a file" and
/// "read this handle's full text". Both are read-only; the panel never
/// writes to storage.
pub trait NoteStore: Send + Sync {
    /// True iff `path` resolves to an existing regular file
    fn is_file(&self, path: &str) -> bool;

    /// Full text content of a previously resolved handle.
    ///
    /// May fail even though `is_file` succeeded moments earlier (the file
    /// can be deleted between the existence check and the read); callers
    /// treat that as a per-section degradation, not a fatal error.
    fn read(&self, file: &NoteFile) -> Result<String>;
}

// ============================================================================
// FILESYSTEM VAULT
// ============================================================================

/// FsVault - NoteStore over a local directory tree
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Open a vault rooted at `root`. The directory must exist.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            bail!("vault directory not found: {}", root.display());
        }
        Ok(FsVault { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a vault-relative one, refusing escapes from the
    /// root (`..` components or absolute paths).
    pub fn absolute_path(&self, rel: &str) -> Result<PathBuf> {
        let rel_path = Path::new(rel);
        if rel_path.is_absolute() {
            bail!("not a vault-relative path: {}", rel);
        }
        if rel_path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            bail!("path escapes vault root: {}", rel);
        }
        Ok(self.root.join(rel_path))
    }
}

impl NoteStore for FsVault {
    fn is_file(&self, path: &str) -> bool {
        match self.absolute_path(path) {
            Ok(abs) => abs.is_file(),
            Err(_) => false,
        }
    }

    fn read(&self, file: &NoteFile) -> Result<String> {
        let abs = self.absolute_path(&file.path)?;
        fs::read_to_string(&abs).with_context(|| format!("failed to read note {}", file.path))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_display_name() {
        assert_eq!(NoteFile::new("2024-06-15.md").display_name(), "2024-06-15");
        assert_eq!(
            NoteFile::new("Journal/2023-06-15.md").display_name(),
            "2023-06-15"
        );
        assert_eq!(NoteFile::new("README").display_name(), "README");
    }

    #[test]
    fn test_open_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-vault");
        assert!(FsVault::open(missing).is_err());
    }

    #[test]
    fn test_is_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-06-15.md"), "# hi").unwrap();
        fs::create_dir(dir.path().join("Journal")).unwrap();

        let vault = FsVault::open(dir.path()).unwrap();
        assert!(vault.is_file("2024-06-15.md"));
        assert!(!vault.is_file("2023-06-15.md"));
        // A directory is not a file
        assert!(!vault.is_file("Journal"));
    }

    #[test]
    fn test_read_roundtrip() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Journal")).unwrap();
        fs::write(dir.path().join("Journal/2023-06-15.md"), "morning pages").unwrap();

        let vault = FsVault::open(dir.path()).unwrap();
        let file = NoteFile::new("Journal/2023-06-15.md");
        assert_eq!(vault.read(&file).unwrap(), "morning pages");
    }

    #[test]
    fn test_read_racing_deletion() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-06-15.md"), "x").unwrap();

        let vault = FsVault::open(dir.path()).unwrap();
        let file = NoteFile::new("2024-06-15.md");
        assert!(vault.is_file(&file.path));

        fs::remove_file(dir.path().join("2024-06-15.md")).unwrap();
        assert!(vault.read(&file).is_err());
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = tempdir().unwrap();
        let vault = FsVault::open(dir.path()).unwrap();
        assert!(vault.absolute_path("../outside.md").is_err());
        assert!(vault.absolute_path("/etc/passwd").is_err());
        assert!(!vault.is_file("../outside.md"));
    }
}

// 📖 Note Opener - Jump from a preview to the full note
// The handle passed in is the one captured at render time.

use crate::vault::{FsVault, NoteFile};
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// NoteOpener - Navigation collaborator
pub trait NoteOpener: Send + Sync {
    fn open(&self, file: &NoteFile) -> Result<()>;
}

/// EditorOpener - Opens a note in the user's editor
///
/// Bound to one vault root at construction. Uses `$VISUAL`, then
/// `$EDITOR`, then `vi`. The editor takes over the terminal, so the TUI
/// suspends itself around the call.
pub struct EditorOpener {
    root: PathBuf,
    editor: String,
}

impl EditorOpener {
    pub fn from_env(vault: &FsVault) -> Self {
        let editor = env::var("VISUAL")
            .or_else(|_| env::var("EDITOR"))
            .unwrap_or_else(|_| "vi".to_string());
        EditorOpener {
            root: vault.root().to_path_buf(),
            editor,
        }
    }

    pub fn with_editor(vault: &FsVault, editor: impl Into<String>) -> Self {
        EditorOpener {
            root: vault.root().to_path_buf(),
            editor: editor.into(),
        }
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }
}

impl NoteOpener for EditorOpener {
    /// Launch the editor on the note's absolute path and wait for it
    fn open(&self, file: &NoteFile) -> Result<()> {
        let abs = self.root.join(&file.path);
        let status = Command::new(&self.editor)
            .arg(&abs)
            .status()
            .with_context(|| format!("failed to launch editor '{}'", self.editor))?;

        if !status.success() {
            bail!("editor '{}' exited with {}", self.editor, status);
        }
        Ok(())
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
    fn test_with_editor_overrides_env() {
        let dir = tempdir().unwrap();
        let vault = FsVault::open(dir.path()).unwrap();
        let opener = EditorOpener::with_editor(&vault, "true");
        assert_eq!(opener.editor(), "true");
    }

    #[test]
    fn test_open_runs_editor() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2024-06-15.md"), "x").unwrap();
        let vault = FsVault::open(dir.path()).unwrap();

        // `true` ignores its argument and exits 0
        let opener = EditorOpener::with_editor(&vault, "true");
        let file = NoteFile::new("2024-06-15.md");
        assert!(opener.open(&file).is_ok());
    }

    #[test]
    fn test_failing_editor_reported() {
        let dir = tempdir().unwrap();
        let vault = FsVault::open(dir.path()).unwrap();

        let opener = EditorOpener::with_editor(&vault, "false");
        let file = NoteFile::new("2024-06-15.md");
        assert!(opener.open(&file).is_err());
    }
}

// Daily Note Comparison - Core Library
// Exposes all modules for use in the TUI binary, print mode, and tests

pub mod config;
pub mod markdown;
pub mod open;
pub mod panel;
pub mod request;
pub mod resolver;
pub mod vault;

// Re-export commonly used types
pub use config::{Config, CONFIG_FILE_NAME, VAULT_ENV_VAR};
pub use markdown::{MarkdownRenderer, Preview, PreviewLine, PreviewRenderer};
pub use panel::{ComparisonPanel, PanelContent, SectionBody, YearSection, NO_NOTE_TEXT, PANEL_TITLE};
pub use request::{ComparisonRequest, DEFAULT_YEAR_COUNT};
pub use resolver::{candidate_paths, resolve};
pub use vault::{FsVault, NoteFile, NoteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

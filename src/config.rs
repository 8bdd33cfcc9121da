// ⚙️ Configuration - Vault location and year window
// Precedence: CLI flags > environment > vault config file > defaults.

use crate::request::DEFAULT_YEAR_COUNT;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the vault directory
pub const VAULT_ENV_VAR: &str = "DAILY_COMPARE_VAULT";

/// Optional per-vault config file, at the vault root
pub const CONFIG_FILE_NAME: &str = "daily-compare.json";

// ============================================================================
// CONFIG
// ============================================================================

/// Settings that may appear in the vault's config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// How many years to compare (anchor year included)
    pub years: Option<u32>,
}

/// Config - Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Vault root directory
    pub vault: PathBuf,
    /// Size of the year window
    pub year_count: u32,
    /// Anchor date override; `None` means today
    pub anchor_date: Option<NaiveDate>,
}

impl Config {
    /// Resolve settings from CLI arguments (everything after the mode
    /// word), the environment, and the vault's config file.
    pub fn resolve(args: &[String]) -> Result<Self> {
        Self::resolve_with_env(args, env::var(VAULT_ENV_VAR).ok())
    }

    /// Same as [`Config::resolve`] but with the environment tier passed
    /// in, so precedence can be tested without mutating process-global
    /// state.
    fn resolve_with_env(args: &[String], env_vault: Option<String>) -> Result<Self> {
        let cli = CliArgs::parse(args)?;

        // The vault must be known before its config file can be read
        let vault = cli
            .vault
            .or_else(|| env_vault.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let file_config = load_file_config(&vault)?;

        let year_count = cli
            .years
            .or(file_config.years)
            .unwrap_or(DEFAULT_YEAR_COUNT);
        if year_count == 0 {
            bail!("--years must be at least 1");
        }

        Ok(Config {
            vault,
            year_count,
            anchor_date: cli.date,
        })
    }
}

/// Read the vault's optional config file; a missing file is fine,
/// a malformed one is not.
fn load_file_config(vault: &Path) -> Result<FileConfig> {
    let path = vault.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(FileConfig::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config in {}", path.display()))
}

// ============================================================================
// CLI ARGUMENTS
// ============================================================================

#[derive(Debug, Default)]
struct CliArgs {
    vault: Option<PathBuf>,
    years: Option<u32>,
    date: Option<NaiveDate>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--vault" => {
                    let value = iter.next().context("--vault requires a directory")?;
                    parsed.vault = Some(PathBuf::from(value));
                }
                "--years" => {
                    let value = iter.next().context("--years requires a number")?;
                    let n: u32 = value
                        .parse()
                        .with_context(|| format!("invalid year count '{}'", value))?;
                    parsed.years = Some(n);
                }
                "--date" => {
                    let value = iter.next().context("--date requires YYYY-MM-DD")?;
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .with_context(|| format!("invalid date '{}'", value))?;
                    parsed.date = Some(date);
                }
                other => bail!("unknown argument '{}'", other),
            }
        }

        Ok(parsed)
    }
}

// ============================================================================
// TESTS
// ============================================================================

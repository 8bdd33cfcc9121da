// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use daily_compare::panel::ComparisonPanel;
use daily_compare::request::ComparisonRequest;
use daily_compare::vault::FsVault;
use daily_compare::{Config, PreviewRenderer};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "print" {
        // Print mode: render the panel to stdout
        run_print(&args[2..])?;
    } else {
        // Panel mode (default)
        run_panel_mode(&args[1..])?;
    }

    Ok(())
}

/// Build the comparison request a run will use: explicit anchor date if
/// configured, otherwise today's wall-clock date.
fn build_request(config: &Config) -> ComparisonRequest {
    match config.anchor_date {
        Some(date) => ComparisonRequest::for_date(date, config.year_count),
        None => ComparisonRequest::for_today(config.year_count),
    }
}

fn run_print(args: &[String]) -> Result<()> {
    let config = Config::resolve(args)?;
    let vault = FsVault::open(&config.vault)?;
    let request = build_request(&config);

    let panel = ComparisonPanel::new(vault, PreviewRenderer);
    let content = panel.render(&request);

    print!("{}", content.to_plain_text());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_panel_mode(args: &[String]) -> Result<()> {
    let config = Config::resolve(args)?;
    let vault = FsVault::open(&config.vault)?;
    let request = build_request(&config);

    println!("🖥️  Opening daily note comparison panel...");
    println!("   Vault: {}", config.vault.display());
    println!("   Date: {}-{} across {} years\n", request.month, request.day, request.years.len());

    let mut app = ui::App::new(vault, request);
    ui::run_ui(&mut app)?;

    println!("✅ Panel closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_panel_mode(_args: &[String]) -> Result<()> {
    eprintln!("❌ Panel mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print to stdout: daily-compare print");
    std::process::exit(1);
}

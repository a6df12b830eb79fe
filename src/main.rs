//! pagekit - headless page-interaction engine
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};

use pagekit_app::config::init_config_dir;

/// pagekit - drive landing-page controllers from scripts
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(about = "Headless page-interaction engine with NDJSON output", long_about = None)]
struct Args {
    /// Page fixture (TOML)
    #[arg(value_name = "PAGE")]
    page: PathBuf,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write a default .pagekit/config.toml beside the page and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = pagekit_core::logging::init() {
        eprintln!("Logging disabled: {}", e);
    }

    let base_path = args
        .page
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    if args.init_config {
        init_config_dir(&base_path)?;
        eprintln!(
            "Wrote default settings to {}",
            base_path.join(".pagekit").display()
        );
        return Ok(());
    }

    if !args.page.exists() {
        return Err(eyre!("Page fixture not found: {}", args.page.display()));
    }

    pagekit::run_headless(&args.page, args.script.as_deref()).await?;
    Ok(())
}

// Declare modules
pub mod cli;
pub mod config;
pub mod emitter;
pub mod models;
pub mod palette;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;

use self::cli::Cli;
use self::config::resolve_config;
use self::emitter::CssEmitter;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify Project Root
    let project_root = env::current_dir().context("Failed to get current directory")?;

    // 3. Resolve Configuration
    let output_path = args.output.clone();
    let check_only = args.check;
    let config = resolve_config(args, &project_root)?;

    if check_only {
        println!(
            "Configuration OK: {} content patterns, {} palette tokens",
            config.content.len(),
            config.palette.len()
        );
        return Ok(());
    }

    // 4. Scan Content Files
    let scanner = Scanner::new(project_root, &config)?;
    let candidates = scanner.scan();

    if candidates.is_empty() {
        log::warn!("⚠️ No class candidates found in the configured content files.");
    }

    // 5. Generate Stylesheet
    let rules = CssEmitter::resolve_rules(&candidates, &config.palette);
    let stylesheet = CssEmitter::format_stylesheet(&rules);

    // 6. Print or Write
    match output_path {
        Some(path) => {
            fs::write(&path, &stylesheet)
                .context(format!("Failed to write stylesheet to {:?}", path))?;
            log::info!("Wrote {} rules to {:?}", rules.len(), path);
        }
        None => println!("{}", stylesheet),
    }

    Ok(())
}

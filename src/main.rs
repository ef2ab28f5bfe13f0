// src/main.rs

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;

use blockfont::config::GeneratorConfig;
use blockfont::font::generate;
use blockfont::validate::{log_report, validate_artifacts};

/// Pixel-art block font generator and validator.
#[derive(Parser)]
#[command(name = "blockfont", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate <FontName>.ttf/.woff/.woff2 from the built-in glyph table.
    Generate {
        /// Output directory (defaults to the configured dist/fonts).
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Optional JSON config file overriding the defaults.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate previously generated font artifacts.
    Validate {
        /// Directory holding the artifacts.
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Font name (file stem) to validate.
        #[arg(long, default_value = "OpenCodeLogo")]
        font_name: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Generate { out_dir, config } => {
            let mut config = match config {
                Some(path) => GeneratorConfig::load(&path)?,
                None => GeneratorConfig::default(),
            };
            if let Some(dir) = out_dir {
                config.out_dir = dir;
            }
            let artifacts =
                generate(&config).context("font generation failed")?;
            for path in artifacts.all() {
                info!("generated {}", path.display());
            }
            Ok(())
        }
        Command::Validate { dir, font_name } => {
            let dir = dir.unwrap_or_else(|| GeneratorConfig::default().out_dir);
            let report = validate_artifacts(&dir, &font_name);
            log_report(&report);
            if report.has_fatal() {
                error!("validation failed");
                std::process::exit(1);
            }
            info!("validation passed");
            Ok(())
        }
    }
}

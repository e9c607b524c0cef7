//! NaoX landing page, drawn in the terminal.
//!
//! Run the binary to show the logo and project cards; `Enter` or a click on
//! "Explore" opens the project in the browser.  `--list-assets` and
//! `--print-config` print to stdout and exit.

mod app;
mod config;
mod core;
mod shell;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::app::lifecycle;
use crate::config::{AppConfig, LandingConfig, LayoutStrategy};
use crate::ui::terminal::TerminalToolkit;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "NaoX project landing page")]
struct Cli {
    /// Directory holding the fonts, logo and `projects/` thumbnails.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// How the project cards are arranged.
    #[arg(long, value_enum)]
    layout: Option<LayoutStrategy>,

    /// Print the asset paths that would be loaded and exit.
    #[arg(long = "list-assets")]
    list_assets: bool,

    /// Print the effective config file and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the user config.
    fn overlay(&self, mut user: AppConfig) -> AppConfig {
        if let Some(layout) = self.layout {
            user.layout = layout;
        }
        if let Some(dir) = &self.assets {
            user.assets_dir = Some(dir.clone());
        }
        user
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let user = cli.overlay(AppConfig::load());
    let config = LandingConfig::with_user(&user);

    if cli.list_assets {
        for path in config.asset_paths() {
            println!("{}", path.display());
        }
        return Ok(());
    }
    if cli.print_config {
        print!("{}", user.serialise());
        return Ok(());
    }

    tracing::info!(layout = config.layout.label(), assets = %config.assets_dir.display(), "starting");
    lifecycle::run::<TerminalToolkit>(&config).await?;
    Ok(())
}

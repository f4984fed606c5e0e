//! hostwatch agent entry point.
//!
//! Loads the configuration file, derives the logging settings, and brings
//! the channel registry plus the tracing bridge up before anything else
//! runs. The monitoring subsystems attach behind this startup sequence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hostwatch_config::AgentConfig;
use hostwatch_logging::{args, setup, Mods};

#[derive(Parser, Debug)]
#[command(name = "hostwatch", about = "Host-monitoring agent", version)]
struct Cli {
    /// Directory containing hostwatch.toml (defaults to the working dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Raise the debug level to 1, enabling debug-channel file output
    #[arg(long)]
    debug: bool,

    /// Override the log file location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable debugger-console output
    #[arg(long)]
    no_windbg: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve working directory")?,
    };
    let config = AgentConfig::load_or_default(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir.display()))?;

    let mut settings = config.log_settings();
    if cli.debug {
        settings.debug_level = settings.debug_level.max(1);
    }
    if let Some(log_file) = cli.log_file {
        settings.log_file = log_file;
    }
    if cli.no_windbg {
        settings.windbg = false;
    }

    setup::configure(settings);
    hostwatch_logging::init_tracing();
    tracing::info!("tracing bridge installed");

    hostwatch_logging::log().write(
        Mods::NONE,
        "agent starting, log file {}",
        args![hostwatch_logging::log().filename().display()],
    );
    hostwatch_logging::debug().write(
        Mods::NONE,
        "configuration loaded from {}",
        args![config_dir.display()],
    );
    hostwatch_logging::stdio()
        .line()
        .push("hostwatch ready\n");

    // Monitoring subsystems start here.

    Ok(())
}

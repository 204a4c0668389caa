//! `crmdash`: terminal dashboard for leads and products.
//!
//! Built on [ratatui](https://ratatui.rs). Both record lists are fetched
//! once at startup by a background data bridge; after that every search,
//! category switch, create, edit, and delete happens in memory. Screens
//! are navigable via number keys (1-3): Home, Leads, Products.
//!
//! Logs are written to a file (default `<tmp>/crmdash.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crmdash_config::Config;

use crate::app::App;

/// Terminal dashboard for browsing and editing leads and products.
#[derive(Parser, Debug)]
#[command(name = "crmdash", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long, env = "CRMDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Leads endpoint URL
    #[arg(long, env = "CRMDASH_LEADS_URL")]
    leads_url: Option<String>,

    /// Products endpoint URL
    #[arg(long, env = "CRMDASH_PRODUCTS_URL")]
    products_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    write_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crmdash_config::config_path)
    }

    /// Flags win over the file and the environment.
    fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(url) = &self.leads_url {
            cfg.endpoints.leads.clone_from(url);
        }
        if let Some(url) = &self.products_url {
            cfg.endpoints.products.clone_from(url);
        }
        if let Some(secs) = self.timeout {
            cfg.defaults.timeout = secs;
        }
        if let Some(path) = &self.log_file {
            cfg.defaults.log_file.clone_from(path);
        }
    }
}

/// Set up file-based tracing. Nothing may go to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard until exit so logs flush.
fn setup_tracing(log_file: &Path, verbose: u8) -> WorkerGuard {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "crmdash={log_level},crmdash_core={log_level},crmdash_api={log_level}"
        ))
    });

    let fallback_dir = std::env::temp_dir();
    let log_dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(&fallback_dir);
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("crmdash.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config_path = cli.config_path();
    let mut cfg = crmdash_config::load_config_from(&config_path)?;
    cli.apply_overrides(&mut cfg);

    if cli.write_config {
        crmdash_config::save_config_to(&cfg, &config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    let _log_guard = setup_tracing(&cfg.defaults.log_file, cli.verbose);

    let source = crmdash_config::to_source_config(&cfg)?;
    info!(
        leads = %source.endpoints.leads,
        products = %source.endpoints.products,
        config = %config_path.display(),
        "starting crmdash"
    );

    let client = source.client()?;
    let mut app = App::new(Some(client));
    app.run().await
}

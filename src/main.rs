#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use ktm_core::logging::LoggingBuilder;
use ktm_core::{CardExporter, CardRenderer, ClientConfig, HttpGateway, MemoryGateway};

use crate::context::{AppGateway, AppState};

/// Shared state, set once before launch
static APP_STATE: OnceLock<AppState> = OnceLock::new();

/// Get the application state built from the command line
pub fn app_state() -> Option<AppState> {
    APP_STATE.get().cloned()
}

/// KTM Admin - student identity card records
#[derive(Parser, Debug)]
#[command(name = "ktm-admin")]
#[command(about = "KTM Admin - manage student identity card records")]
struct Args {
    /// Gateway base address
    #[arg(short, long, env = "KTM_GATEWAY_URL")]
    gateway: Option<String>,

    /// Data directory for activity logs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory exported cards are saved to
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Ask where to save each exported card instead of using the export directory
    #[arg(long)]
    ask_save_location: bool,

    /// Wait before rendering a preview that has not mounted yet, in milliseconds
    #[arg(long, default_value_t = 100)]
    settle_delay_ms: u64,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    timeout: Option<u64>,

    /// Use an in-memory gateway instead of a server
    #[arg(long)]
    offline: bool,
}

impl Args {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::default()
            .with_settle_delay(Duration::from_millis(self.settle_delay_ms))
            .with_request_timeout(self.timeout.map(Duration::from_secs));
        if let Some(url) = &self.gateway {
            config = config.with_gateway_url(url.clone());
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir.clone());
        }
        if let Some(dir) = &self.export_dir {
            config = config.with_export_dir(dir.clone());
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();

    let log_path = LoggingBuilder::new("desktop")
        .with_logs_dir(config.logs_dir())
        .init();

    let gateway = if args.offline {
        tracing::info!("Using in-memory gateway");
        AppGateway::Memory(MemoryGateway::new())
    } else {
        AppGateway::Http(HttpGateway::new(&config)?)
    };

    let exporter = CardExporter::new(Arc::new(CardRenderer::new()), config.settle_delay);

    tracing::info!(
        gateway = %config.gateway_url,
        log = ?log_path,
        "Starting KTM Admin"
    );

    let state = AppState {
        gateway: Arc::new(gateway),
        exporter,
        config,
        ask_save_location: args.ask_save_location,
    };
    let _ = APP_STATE.set(state);

    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("KTM Admin")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 900.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .launch(app::App);

    Ok(())
}

//! DocToData: desktop front end for a document-to-CSV conversion service.
//!
//! Documents are sent to either the AI-powered or the standard conversion
//! endpoint and the returned CSV can be saved locally. The conversion itself
//! happens on the server.

mod app;
mod config;
mod error;
mod subscribe;
mod upload;
mod utils;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use app::DocToDataApp;
use clap::Parser;
use config::{AppConfig, ConfigOverrides};
use eframe::CreationContext;
use std::path::PathBuf;
use subscribe::SubscribeClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload::HttpConvertClient;

#[derive(Parser, Debug)]
#[command(name = "doc_to_data")]
#[command(about = "Convert PDFs and images to CSV")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to ./doctodata.toml when present)
    #[arg(short, long, env = "DOCTODATA_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the conversion service
    #[arg(long, env = "DOCTODATA_BASE_URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "DOCTODATA_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// How long the subscription confirmation stays visible, in milliseconds
    #[arg(long, env = "DOCTODATA_SUBSCRIBE_RESET_MS")]
    subscribe_reset_ms: Option<u64>,

    /// Endpoint receiving mailing-list signups
    #[arg(long, env = "DOCTODATA_SUBSCRIBE_URL")]
    subscribe_url: Option<String>,

    /// Save converted files here instead of asking
    #[arg(long, env = "DOCTODATA_DOWNLOAD_DIR")]
    download_dir: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_file: args.config,
            base_url: args.base_url,
            request_timeout_secs: args.timeout_secs,
            subscribe_reset_ms: args.subscribe_reset_ms,
            subscribe_url: args.subscribe_url,
            download_dir: args.download_dir,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_to_data=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::resolve(&args.into()).context("Failed to load configuration")?;
    info!("Conversion service: {}", config.base_url);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let backend = HttpConvertClient::new(&config)
        .context("Failed to create conversion client")?
        .into_backend();
    let notifier = match &config.subscribe_url {
        Some(url) => {
            info!("Subscriptions will be sent to {}", url);
            Some(
                SubscribeClient::new(url, config.request_timeout())
                    .context("Failed to create subscription client")?,
            )
        }
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "DocToData",
        options,
        Box::new(move |cc: &CreationContext| {
            Box::new(DocToDataApp::new(cc, config, backend, handle, notifier))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    info!("Shutting down");
    Ok(())
}

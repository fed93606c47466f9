mod client;
mod ops;
mod tui;

use clap::{Parser, Subcommand};
use client::HttpSource;
use metricdash_core::config::{
    DEFAULT_ENDPOINT, DEFAULT_HISTORY, DEFAULT_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
use metricdash_core::DashboardConfig;
use ops::{raw_metrics, snapshot, watch, OutputFormat};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Live terminal dashboard for a Prometheus-style metrics endpoint.
#[derive(Parser)]
#[command(
    name = "metricdash",
    author,
    version,
    about = "Live dashboard for CPU and memory gauges"
)]
struct Cli {
    /// Metrics endpoint url
    #[arg(long, global = true, env = "METRICDASH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Poll interval in milliseconds
    #[arg(long, global = true, env = "METRICDASH_INTERVAL_MS", default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Request timeout in milliseconds
    #[arg(long, global = true, env = "METRICDASH_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Number of samples kept for the chart
    #[arg(long, global = true, env = "METRICDASH_HISTORY", default_value_t = DEFAULT_HISTORY)]
    history: usize,

    /// Write logs to this file (watch mode logs nowhere otherwise)
    #[arg(long, global = true, env = "METRICDASH_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Output format for snapshot
    #[arg(long, global = true, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Live full-screen dashboard (default)
    Watch,
    /// Poll once and print the current values
    Snapshot,
    /// Print the raw metrics payload
    Raw,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件（如果存在），忽略错误
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Watch);

    // watch 模式占用终端，没有日志文件时默认不输出日志
    let default_filter = match (&command, &cli.log_file) {
        (Commands::Watch, None) => "off",
        _ => "info",
    };
    init_tracing(default_filter, cli.log_file.as_deref())?;

    let config = DashboardConfig::new(&cli.endpoint, cli.interval_ms, cli.timeout_ms, cli.history)?;
    let client = client::build_client(config.timeout)?;
    let source = HttpSource::new(client, config.endpoint.as_str(), config.timeout);

    match command {
        Commands::Watch => watch(&config, source).await?,
        Commands::Snapshot => snapshot(&source, cli.output).await?,
        Commands::Raw => raw_metrics(&source).await?,
    }

    Ok(())
}

fn init_tracing(default_filter: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer.with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

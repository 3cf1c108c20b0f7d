//! Price Alert Bot
//!
//! Polls one coin's USD price and sends a Telegram alert when it crosses the
//! configured target price or 24h change threshold.

mod config;
mod monitor;

use clap::Parser;
use monitor::{PriceMonitor, TokioSleeper};
use pricealert_alerts::{NotifyError, TelegramNotifier};
use pricealert_core::{format_usd, AlertConfig};
use pricealert_feeds::{CoinGeckoClient, FeedError};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Price Alert Bot CLI
#[derive(Parser, Debug)]
#[command(name = "price-alert")]
#[command(about = "Telegram alerts for crypto price thresholds", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seconds to sleep between polls
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: u64,
}

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::LoadError),
    #[error("Failed to create price client: {0}")]
    Feed(#[from] FeedError),
    #[error("Failed to create Telegram client: {0}")]
    Notify(#[from] NotifyError),
}

type Monitor = PriceMonitor<CoinGeckoClient, TelegramNotifier, TokioSleeper>;

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn target_summary(config: &AlertConfig) -> String {
    if config.target_enabled() {
        format_usd(config.target_price)
    } else {
        "Not set".to_string()
    }
}

fn change_summary(config: &AlertConfig) -> String {
    if config.percentage_enabled() {
        format!("±{}%", config.percentage_change)
    } else {
        "Not set".to_string()
    }
}

fn build_monitor(args: &Args) -> Result<Monitor, StartupError> {
    let alert_config = config::load_config(&args.config)?;
    let credentials = config::load_credentials()?;

    info!("  Monitoring: {}", alert_config.display_name());
    info!("  Target Price: {}", target_summary(&alert_config));
    info!("  24h Change Alert: {}", change_summary(&alert_config));
    info!("  Poll Interval: {}s", args.interval_secs);

    let source = CoinGeckoClient::new()?;
    let notifier = TelegramNotifier::new(credentials)?;

    Ok(PriceMonitor::new(alert_config, source, notifier, TokioSleeper)
        .with_interval(Duration::from_secs(args.interval_secs)))
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    info!("🚀 Price Alert Bot starting...");

    let mut monitor = match build_monitor(&args) {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Press Ctrl+C to stop...");

    tokio::select! {
        _ = monitor.run() => {}
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::process::exit(1);
            }
            warn!("Shutdown signal received");
        }
    }

    info!("👋 Bot stopped by user.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["price-alert"]);
        assert_eq!(args.config, "config.json");
        assert_eq!(args.log_level, "info");
        assert_eq!(args.interval_secs, 60);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from(["price-alert", "-c", "eth.json", "-l", "debug", "--interval-secs", "15"]);
        assert_eq!(args.config, "eth.json");
        assert_eq!(args.log_level, "debug");
        assert_eq!(args.interval_secs, 15);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Args::try_parse_from(["price-alert", "--interval-secs", "0"]).is_err());
    }

    #[test]
    fn test_banner_summaries() {
        let config = AlertConfig::new("bitcoin")
            .with_target_price(100000.0)
            .with_percentage_change(5.0);
        assert_eq!(target_summary(&config), "$100,000.00");
        assert_eq!(change_summary(&config), "±5%");

        let disabled = AlertConfig::default();
        assert_eq!(target_summary(&disabled), "Not set");
        assert_eq!(change_summary(&disabled), "Not set");
    }

    #[test]
    fn test_missing_config_is_startup_error() {
        let args = Args::parse_from(["price-alert", "-c", "/nonexistent/price-alert.json"]);
        let err = build_monitor(&args).err().unwrap();
        assert!(matches!(err, StartupError::Config(config::LoadError::NotFound(_))));
    }
}

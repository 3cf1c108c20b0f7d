//! Price monitor loop.
//!
//! One cycle is fetch → evaluate → notify. Between cycles the monitor sleeps
//! for a fixed interval measured from the end of the previous cycle, so
//! fetch and notify latency adds to the period.

use async_trait::async_trait;
use futures_util::FutureExt;
use pricealert_alerts::{format_alert_message, Notifier};
use pricealert_core::{
    evaluate_conditions, format_change, format_usd, AlertConfig, AlertState, PriceReading,
};
use pricealert_feeds::PriceSource;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Waits between cycles. Swapped out in tests to avoid real sleeps.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Counts for one evaluated cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Conditions currently true
    pub triggered: usize,
    /// Notifications delivered this cycle
    pub sent: usize,
    /// Notifications attempted but not delivered
    pub failed: usize,
    /// Conditions still true but already notified
    pub suppressed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No reading this cycle; alert state untouched
    FetchFailed,
    /// The cycle panicked; logged and skipped
    Panicked,
    Evaluated(CycleReport),
}

/// Polls one coin and sends at most one alert per condition until it clears.
pub struct PriceMonitor<S, N, Z> {
    config: AlertConfig,
    source: S,
    notifier: N,
    sleeper: Z,
    state: AlertState,
    interval: Duration,
}

impl<S, N, Z> PriceMonitor<S, N, Z>
where
    S: PriceSource,
    N: Notifier,
    Z: Sleeper,
{
    pub fn new(config: AlertConfig, source: S, notifier: N, sleeper: Z) -> Self {
        Self {
            config,
            source,
            notifier,
            sleeper,
            state: AlertState::default(),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run forever; stop it by dropping the future.
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting price monitor for {}",
            self.config.display_name()
        );
        loop {
            self.tick().await;
        }
    }

    /// One guarded cycle followed by the inter-cycle sleep.
    pub async fn tick(&mut self) -> CycleOutcome {
        let outcome = match AssertUnwindSafe(self.run_cycle()).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(payload) => {
                error!("Unexpected error: {}", panic_message(&*payload));
                CycleOutcome::Panicked
            }
        };

        self.sleeper.sleep(self.interval).await;
        outcome
    }

    /// Fetch, evaluate and notify once.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let coin_id = self.config.coin_id.clone();

        let reading = match self.source.fetch_price(&coin_id).await {
            Ok(reading) => reading,
            Err(e) => {
                if e.is_transient() {
                    warn!(error = %e, "Failed to fetch price for {}", coin_id);
                } else {
                    error!(error = %e, "Failed to fetch price for {}", coin_id);
                }
                return CycleOutcome::FetchFailed;
            }
        };

        info!("{}", status_line(&self.config.display_name(), &reading));

        let triggered = evaluate_conditions(&self.config, &reading);
        self.state.rearm_cleared(&triggered);

        let mut report = CycleReport {
            triggered: triggered.len(),
            ..Default::default()
        };

        for condition in &triggered {
            let kind = condition.kind();
            if self.state.is_sent(kind) {
                debug!(%kind, "Alert already sent, waiting for condition to clear");
                report.suppressed += 1;
                continue;
            }

            let message = format_alert_message(&coin_id, &reading, condition, chrono::Utc::now());
            match self.notifier.send(&message).await {
                Ok(()) => {
                    info!(%kind, "✓ Alert sent: {}", condition);
                    self.state.mark_sent(kind);
                    report.sent += 1;
                }
                Err(e) => {
                    warn!(%kind, error = %e, "✗ Failed to send alert: {}", condition);
                    report.failed += 1;
                }
            }
        }

        CycleOutcome::Evaluated(report)
    }
}

/// Per-cycle console line, e.g. `BITCOIN: $50,000.00 | 24h Change: +1.23%`.
pub fn status_line(name: &str, reading: &PriceReading) -> String {
    format!(
        "{}: {} | 24h Change: {}",
        name,
        format_usd(reading.price),
        format_change(reading.change_24h)
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

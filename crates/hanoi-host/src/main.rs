//! Tower minigame host binary.
//!
//! # Usage
//!
//! ```bash
//! # Default timings (60 s budget, watchdog 5 s later)
//! echo '{"type":"startHack"}' | hanoi-host
//!
//! # Short sessions for manual testing
//! hanoi-host --time-budget 10 --watchdog-margin-ms 2000 --log-level debug
//! ```
//!
//! Host messages are read from stdin, one JSON object per line. Outcome
//! reports are written to stdout the same way. Logs go to stderr.

use std::time::Duration;

use clap::Parser;
use hanoi_app::{DEFAULT_RESULT_DISPLAY, DEFAULT_REVEAL_DELAY, Runtime, SessionConfig};
use hanoi_core::{
    TimerConfig,
    timer::{DEFAULT_TICK_INTERVAL, DEFAULT_TIME_BUDGET_SECS, DEFAULT_WATCHDOG_MARGIN},
};
use hanoi_host::{BoardRenderer, HostError, StdioBridge, SystemEnv};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// How long queued reports get to reach stdout once the host closes stdin.
const REPORT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Tower minigame host
#[derive(Parser, Debug)]
#[command(name = "hanoi-host")]
#[command(about = "Timed tower puzzle driven by JSON lines on stdin")]
#[command(version)]
struct Args {
    /// Game timer budget in ticks
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_SECS)]
    time_budget: u32,

    /// Milliseconds per game timer tick
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL.as_millis() as u64)]
    tick_ms: u64,

    /// Milliseconds between the end of the budget and the watchdog
    #[arg(long, default_value_t = DEFAULT_WATCHDOG_MARGIN.as_millis() as u64)]
    watchdog_margin_ms: u64,

    /// Milliseconds between solving and revealing the win
    #[arg(long, default_value_t = DEFAULT_REVEAL_DELAY.as_millis() as u64)]
    reveal_delay_ms: u64,

    /// Milliseconds the result screen stays up
    #[arg(long, default_value_t = DEFAULT_RESULT_DISPLAY.as_millis() as u64)]
    result_display_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            timers: TimerConfig {
                budget_secs: self.time_budget,
                tick_interval: Duration::from_millis(self.tick_ms),
                watchdog_margin: Duration::from_millis(self.watchdog_margin_ms),
            },
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            result_display: Duration::from_millis(self.result_display_ms),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = args.session_config();
    config.validate().map_err(HostError::from)?;

    tracing::info!(
        budget = config.timers.budget_secs,
        tick_ms = args.tick_ms,
        watchdog_ms = config.timers.watchdog_delay().as_millis() as u64,
        "tower minigame host starting"
    );

    let mut runtime =
        Runtime::new(StdioBridge::stdio(), BoardRenderer::new(), SystemEnv::new(), config);
    runtime.run().await.map_err(HostError::from)?;

    tracing::info!("host input closed, exiting");
    if tokio::time::timeout(REPORT_FLUSH_TIMEOUT, runtime.into_host().finish()).await.is_err() {
        tracing::warn!("host stopped reading, dropping queued reports");
    }
    Ok(())
}

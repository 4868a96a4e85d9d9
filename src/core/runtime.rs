//! Bot runtime: startup sequence, timers, shutdown and restart supervision

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::ConfigError;
use crate::core::scheduler::{JobFault, JobScheduler};
use crate::jobs::handlers::{self, deliver};
use crate::jobs::{JobContext, JobKind};
use crate::notifications::{started_message, stopped_message};

pub const USER_STOP_REASON: &str = "Stopped by user";

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("job {job} panicked: {message}")]
    JobPanicked { job: JobKind, message: String },
}

pub struct BotRuntime {
    ctx: Arc<JobContext>,
    schedulers: Vec<JobScheduler>,
    running: AtomicBool,
}

impl BotRuntime {
    /// Build one scheduler per job kind. Fails if a period has no cron form.
    pub fn new(ctx: Arc<JobContext>) -> Result<Self, ConfigError> {
        let schedulers = JobKind::ALL
            .iter()
            .map(|kind| JobScheduler::new(*kind, kind.period_seconds(&ctx.config.schedule)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            ctx,
            schedulers,
            running: AtomicBool::new(false),
        })
    }

    pub fn context(&self) -> &Arc<JobContext> {
        &self.ctx
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Announce, load the universe and first cycle, then start the timers.
    pub async fn start(&self, faults: mpsc::UnboundedSender<JobFault>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Runtime already started");
            return;
        }

        let bot_name = &self.ctx.config.telegram.bot_name;
        info!(
            bot = %bot_name,
            notifications = self.ctx.notifier.is_enabled(),
            "Starting bot"
        );
        deliver(&self.ctx, &started_message(bot_name, Utc::now())).await;

        if handlers::refresh_universe(&self.ctx).await > 0 {
            handlers::refresh_indicators(&self.ctx).await;
        }

        for scheduler in &self.schedulers {
            scheduler.start(self.ctx.clone(), faults.clone()).await;
        }

        let schedule = &self.ctx.config.schedule;
        info!(
            universe_secs = schedule.token_refresh_seconds,
            indicators_secs = schedule.indicator_refresh_seconds,
            signals_secs = schedule.signal_check_seconds,
            notify_secs = schedule.notify_seconds,
            stats_secs = schedule.stats_seconds,
            "Bot started"
        );
    }

    /// Stop the timers and announce the stop. No-op if not running.
    pub async fn stop(&self, reason: Option<&str>) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        info!(reason = reason.unwrap_or(""), "Stopping bot");
        for scheduler in &self.schedulers {
            scheduler.stop().await;
        }

        let bot_name = &self.ctx.config.telegram.bot_name;
        deliver(&self.ctx, &stopped_message(bot_name, reason, Utc::now())).await;
        info!("Bot stopped");
    }

    /// Run until Ctrl-C (`Ok`) or until a job panics (`Err`).
    pub async fn run(&self) -> Result<(), RuntimeError> {
        let (faults_tx, mut faults_rx) = mpsc::unbounded_channel();
        self.start(faults_tx).await;

        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    error!(error = %e, "Failed to listen for shutdown signal");
                }
                self.stop(Some(USER_STOP_REASON)).await;
                Ok(())
            }
            Some(fault) = faults_rx.recv() => {
                let reason = format!("Emergency stop: {} failed: {}", fault.kind, fault.message);
                self.stop(Some(&reason)).await;
                Err(RuntimeError::JobPanicked {
                    job: fault.kind,
                    message: fault.message,
                })
            }
        }
    }
}

/// Keep the bot alive: a failed runtime is rebuilt after `restart_delay`.
/// Returns on a clean shutdown or a configuration error.
pub async fn supervise(ctx: Arc<JobContext>) -> Result<(), RuntimeError> {
    let restart_delay = Duration::from_secs(ctx.config.restart_delay_seconds);

    loop {
        let runtime = BotRuntime::new(ctx.clone())?;

        match runtime.run().await {
            Ok(()) => return Ok(()),
            Err(e) => {
                error!(
                    error = %e,
                    restart_in_secs = restart_delay.as_secs(),
                    "Runtime failed, restarting in {}s",
                    restart_delay.as_secs()
                );
                tokio::time::sleep(restart_delay).await;
                info!("Restarting bot");
            }
        }
    }
}

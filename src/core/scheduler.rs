//! Cron-based scheduler driving one periodic job

use std::str::FromStr;
use std::sync::Arc;

use cron::Schedule;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error, info};

use crate::config::ConfigError;
use crate::jobs::{handlers, JobContext, JobKind};

/// Express a fixed period as a cron cadence.
///
/// Cron format: second minute hour day month weekday. Supported periods are
/// every N seconds or N minutes with N dividing 60, and every N hours with N
/// dividing 24. Other steps would reset at the unit boundary and tick unevenly.
pub fn cron_expression(period_seconds: u64) -> Result<String, ConfigError> {
    let divides = |step: u64, unit: u64| step < unit && unit % step == 0;

    match period_seconds {
        0 => Err(ConfigError::UnsupportedPeriod(0)),
        s if divides(s, 60) => Ok(format!("*/{} * * * * *", s)),
        s if s % 60 == 0 && divides(s / 60, 60) => Ok(format!("0 */{} * * * *", s / 60)),
        s if s % 3600 == 0 && divides(s / 3600, 24) => Ok(format!("0 0 */{} * * *", s / 3600)),
        s => Err(ConfigError::UnsupportedPeriod(s)),
    }
}

pub fn parse_schedule(expr: &str) -> Result<Schedule, ConfigError> {
    Schedule::from_str(expr).map_err(|e| ConfigError::InvalidCron {
        expr: expr.to_string(),
        reason: e.to_string(),
    })
}

/// A handler that panicked. Its scheduler stops ticking.
#[derive(Debug, Clone)]
pub struct JobFault {
    pub kind: JobKind,
    pub message: String,
}

fn panic_message(err: tokio::task::JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string()),
        Err(err) => err.to_string(),
    }
}

/// Runs the handler for `kind` on every tick of its cron cadence.
pub struct JobScheduler {
    kind: JobKind,
    cron_expr: String,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    pub fn new(kind: JobKind, period_seconds: u64) -> Result<Self, ConfigError> {
        let cron_expr = cron_expression(period_seconds)?;
        let schedule = parse_schedule(&cron_expr)?;

        debug!(
            job = %kind,
            interval = period_seconds,
            cron = %cron_expr,
            "JobScheduler: created {} with interval {}s",
            kind,
            period_seconds
        );

        Ok(Self {
            kind,
            cron_expr,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn cron_expr(&self) -> &str {
        &self.cron_expr
    }

    /// Spawn the tick loop. A panicking handler is reported on `faults`.
    pub async fn start(&self, ctx: Arc<JobContext>, faults: mpsc::UnboundedSender<JobFault>) {
        let mut guard = self.handle.write().await;
        if guard.is_some() {
            return;
        }

        let kind = self.kind;
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            loop {
                let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };

                let now = chrono::Utc::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                debug!(job = %kind, "JobScheduler: tick");
                let tick_ctx = ctx.clone();
                let tick = tokio::spawn(async move { handlers::run(kind, &tick_ctx).await });

                if let Err(e) = tick.await {
                    if e.is_cancelled() {
                        break;
                    }
                    let message = panic_message(e);
                    error!(job = %kind, error = %message, "JobScheduler: job panicked");
                    let _ = faults.send(JobFault { kind, message });
                    break;
                }
            }
        });

        *guard = Some(handle);
        info!(job = %self.kind, cron = %self.cron_expr, "JobScheduler: started");
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!(job = %self.kind, "JobScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}

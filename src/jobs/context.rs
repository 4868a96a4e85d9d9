//! Shared state for job handlers

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::notifications::NotificationSink;
use crate::services::collector::AssetCollector;
use crate::signals::CycleContext;

/// What the timers share between ticks. The cycle is swapped wholesale on
/// every indicator refresh.
#[derive(Debug, Default, Clone)]
pub struct BotState {
    pub symbols: Vec<String>,
    pub cycle: Option<Arc<CycleContext>>,
}

impl BotState {
    pub fn active_total(&self) -> usize {
        self.cycle.as_ref().map_or(0, |c| c.active.total())
    }
}

/// Passed to every handler.
pub struct JobContext {
    pub collector: Arc<AssetCollector>,
    pub notifier: Arc<dyn NotificationSink>,
    pub config: Config,
    pub state: RwLock<BotState>,
}

impl JobContext {
    pub fn new(
        collector: Arc<AssetCollector>,
        notifier: Arc<dyn NotificationSink>,
        config: Config,
    ) -> Self {
        Self {
            collector,
            notifier,
            config,
            state: RwLock::new(BotState::default()),
        }
    }

    pub async fn symbols(&self) -> Vec<String> {
        self.state.read().await.symbols.clone()
    }

    pub async fn latest_cycle(&self) -> Option<Arc<CycleContext>> {
        self.state.read().await.cycle.clone()
    }

    pub async fn snapshot(&self) -> BotState {
        self.state.read().await.clone()
    }
}

//! Job kinds driven by the periodic timers

use std::fmt;
use std::time::Duration;

use crate::config::ScheduleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    RefreshUniverse,
    RefreshIndicators,
    CheckSignals,
    Notify,
    Stats,
}

impl JobKind {
    pub const ALL: [JobKind; 5] = [
        JobKind::RefreshUniverse,
        JobKind::RefreshIndicators,
        JobKind::CheckSignals,
        JobKind::Notify,
        JobKind::Stats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            JobKind::RefreshUniverse => "refresh-universe",
            JobKind::RefreshIndicators => "refresh-indicators",
            JobKind::CheckSignals => "check-signals",
            JobKind::Notify => "notify",
            JobKind::Stats => "stats",
        }
    }

    pub fn period_seconds(&self, schedule: &ScheduleConfig) -> u64 {
        match self {
            JobKind::RefreshUniverse => schedule.token_refresh_seconds,
            JobKind::RefreshIndicators => schedule.indicator_refresh_seconds,
            JobKind::CheckSignals => schedule.signal_check_seconds,
            JobKind::Notify => schedule.notify_seconds,
            JobKind::Stats => schedule.stats_seconds,
        }
    }

    pub fn period(&self, schedule: &ScheduleConfig) -> Duration {
        Duration::from_secs(self.period_seconds(schedule))
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

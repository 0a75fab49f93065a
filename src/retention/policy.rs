use crate::config::RetentionConfig;
use std::time::Duration;

pub const MS_PER_HOUR: i64 = 3_600_000;

/// Count and age caps for the retention window. Zero disables a cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_per_user: u32,
    pub max_age_hours: u32,
    pub cleanup_interval_hours: u32,
}

impl RetentionPolicy {
    pub fn is_enabled(&self) -> bool {
        self.max_per_user > 0 || self.max_age_hours > 0
    }

    /// Records strictly older than this timestamp fall outside the window.
    pub fn age_cutoff(&self, now_ms: i64) -> Option<i64> {
        (self.max_age_hours > 0)
            .then(|| now_ms.saturating_sub(i64::from(self.max_age_hours) * MS_PER_HOUR))
    }

    pub fn count_cap(&self) -> Option<usize> {
        (self.max_per_user > 0).then(|| usize::try_from(self.max_per_user).unwrap_or(usize::MAX))
    }

    pub fn cleanup_period(&self) -> Option<Duration> {
        (self.cleanup_interval_hours > 0)
            .then(|| Duration::from_secs(u64::from(self.cleanup_interval_hours) * 3_600))
    }
}

impl From<&RetentionConfig> for RetentionPolicy {
    fn from(config: &RetentionConfig) -> Self {
        Self {
            max_per_user: config.max_per_user,
            max_age_hours: config.max_age_hours,
            cleanup_interval_hours: config.cleanup_interval_hours,
        }
    }
}

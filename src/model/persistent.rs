//! UI state that survives restarts

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Fixed identifier the snapshot is stored under
pub const UI_STATE_ID: &str = "ui_state";

/// Sleep timer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub enabled: bool,
    pub minutes: u32,
    pub finish_last_song: bool,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            minutes: 30,
            finish_last_song: true,
            started_at: None,
        }
    }
}

impl TimerSettings {
    /// When the timer fires, if running.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        if !self.enabled {
            return None;
        }
        self.started_at
            .map(|start| start + chrono::Duration::minutes(i64::from(self.minutes)))
    }
}

/// Snapshot written by the persistent state synchronizer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentUiState {
    #[serde(default)]
    pub home_page: usize,
    #[serde(default)]
    pub timer: TimerSettings,
}

/// Single-writer, many-reader holder for the live timer settings
#[derive(Clone, Default)]
pub struct TimerHolder {
    settings: Arc<RwLock<TimerSettings>>,
}

impl TimerHolder {
    pub fn get(&self) -> TimerSettings {
        self.settings.read().clone()
    }

    pub fn replace(&self, settings: TimerSettings) {
        *self.settings.write() = settings;
    }

    pub fn start(&self, minutes: u32) {
        let mut settings = self.settings.write();
        settings.enabled = true;
        settings.minutes = minutes;
        settings.started_at = Some(Utc::now());
    }

    pub fn cancel(&self) {
        let mut settings = self.settings.write();
        settings.enabled = false;
        settings.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_at_only_when_running() {
        let holder = TimerHolder::default();
        assert!(holder.get().ends_at().is_none());

        holder.start(15);
        let settings = holder.get();
        let ends_at = settings.ends_at().unwrap();
        assert_eq!(ends_at - settings.started_at.unwrap(), chrono::Duration::minutes(15));

        holder.cancel();
        assert!(holder.get().ends_at().is_none());
    }

    #[test]
    fn test_snapshot_tolerates_missing_fields() {
        let state: PersistentUiState = serde_json::from_str(r#"{"home_page": 2}"#).unwrap();
        assert_eq!(state.home_page, 2);
        assert_eq!(state.timer, TimerSettings::default());
    }
}

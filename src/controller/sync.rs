//! Restore and periodic persistence of the UI snapshot

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::UiManager;
use crate::model::{PersistentUiState, StateStore, TimerHolder, HOME_PAGES, UI_STATE_ID};
use crate::reactive::Reactive;

impl UiManager {
    /// Current snapshot of the persisted slice of UI state.
    pub fn persistent_snapshot(&self) -> PersistentUiState {
        sample(self.home.page(), &self.timer)
    }

    /// Load the last snapshot and apply it. Missing or unreadable state
    /// falls back to defaults.
    pub fn restore_persistent_state(&self) -> PersistentUiState {
        let state = match self.collaborators.store.load(UI_STATE_ID) {
            Ok(Some(state)) => {
                tracing::info!(home_page = state.home_page, "Restored UI state");
                state
            }
            Ok(None) => {
                tracing::debug!("No saved UI state, using defaults");
                PersistentUiState::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load UI state, using defaults");
                PersistentUiState::default()
            }
        };

        self.home.scroll_to_page(state.home_page);
        self.timer.replace(state.timer.clone());
        state
    }

    /// Sample the snapshot every `interval` and save it when it changed.
    /// Stops with [`UiManager::shutdown`].
    pub fn start_persistent_sync(&self, interval: Duration) -> bool {
        let page = self.home.page().clone();
        let timer = self.timer.clone();
        let store = self.collaborators.store.clone();

        let started = self.scope.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_saved: Option<PersistentUiState> = None;

            loop {
                ticker.tick().await;
                let snapshot = sample(&page, &timer);
                if last_saved.as_ref() == Some(&snapshot) {
                    continue;
                }
                // Stores may do file I/O; keep it off the runtime threads.
                let (blocking_store, pending) = (store.clone(), snapshot.clone());
                if let Err(e) = tokio::task::spawn_blocking(move || save(&blocking_store, &pending)).await {
                    tracing::warn!(error = %e, "UI state save task failed");
                }
                last_saved = Some(snapshot);
            }
        });
        if started {
            tracing::debug!(interval_ms = interval.as_millis() as u64, "Persistent state sync started");
        }
        started
    }

    /// Save the current snapshot right away, e.g. just before exit.
    pub fn persist_now(&self) {
        save(&self.collaborators.store, &self.persistent_snapshot());
    }
}

fn sample(page: &Reactive<usize>, timer: &TimerHolder) -> PersistentUiState {
    PersistentUiState {
        home_page: page.get().min(HOME_PAGES.len() - 1),
        timer: timer.get(),
    }
}

fn save(store: &Arc<dyn StateStore>, snapshot: &PersistentUiState) {
    match store.save(UI_STATE_ID, snapshot) {
        Ok(()) => tracing::trace!(home_page = snapshot.home_page, "Saved UI state"),
        Err(e) => tracing::warn!(error = %e, "Failed to save UI state"),
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::bail;
use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::controller::{Collaborators, UiManager};
use crate::demo::InMemoryLibrary;
use crate::model::{
    LibraryIndex, Notifier, OverlayPanel, PersistentUiState, Playlist, PlaylistKey, PlaylistMap,
    Song, StateStore,
};
use crate::reactive::Reactive;

fn song(id: u64, title: &str, artist: &str, album: &str) -> Song {
    Song {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        folder: "jazz".to_string(),
        duration_ms: 300_000,
    }
}

pub fn sample_songs() -> Vec<Song> {
    vec![
        song(1, "Blue Train", "John Coltrane", "Blue Train"),
        song(2, "Moment's Notice", "John Coltrane", "Blue Train"),
        song(3, "So What", "Miles Davis", "Kind of Blue"),
    ]
}

pub fn sample_library() -> LibraryIndex {
    LibraryIndex::new(sample_songs())
}

/// One playlist, `mix` ("Evening mix"), holding songs 3 and 1.
pub fn sample_playlists() -> PlaylistMap {
    let mut playlists = PlaylistMap::new();
    playlists.insert(
        PlaylistKey::new("mix"),
        Playlist {
            name: "Evening mix".to_string(),
            songs: vec![3, 1],
        },
    );
    playlists
}

/// Panel whose target jumps straight to every commanded value.
#[derive(Default)]
pub struct RecordingPanel {
    openness: Reactive<f32>,
    commands: Mutex<Vec<f32>>,
}

impl RecordingPanel {
    /// Simulate the user dragging the panel, without recording a command.
    pub fn set_openness(&self, openness: f32) {
        self.openness.set(openness);
    }

    pub fn commands(&self) -> Vec<f32> {
        self.commands.lock().clone()
    }
}

impl OverlayPanel for RecordingPanel {
    fn target_openness(&self) -> Reactive<f32> {
        self.openness.clone()
    }

    fn animate_to(&self, openness: f32) -> BoxFuture<'static, ()> {
        self.commands.lock().push(openness);
        self.openness.set(openness);
        Box::pin(async {})
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<(String, bool)>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<(String, bool)> {
        self.toasts.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, text: &str, short: bool) {
        self.toasts.lock().push((text.to_string(), short));
    }
}

/// In-memory [`StateStore`] that counts calls and can be told to fail.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, PersistentUiState>>,
    attempts: AtomicUsize,
    saves: AtomicUsize,
    fail_loads: bool,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn failing_loads() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<PersistentUiState> {
        self.entries.lock().get(id).cloned()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, id: &str) -> anyhow::Result<Option<PersistentUiState>> {
        if self.fail_loads {
            bail!("corrupt state file");
        }
        Ok(self.get(id))
    }

    fn save(&self, id: &str, state: &PersistentUiState) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            bail!("disk full");
        }
        self.entries.lock().insert(id.to_string(), state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct Harness<S = MemoryStore> {
    pub manager: UiManager,
    pub library: Arc<InMemoryLibrary>,
    pub panel: Arc<RecordingPanel>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<S>,
}

/// A manager over the sample library with recording collaborators.
pub fn harness() -> Harness {
    harness_with_store(Arc::new(MemoryStore::default()))
}

pub fn harness_with_store<S: StateStore + 'static>(store: Arc<S>) -> Harness<S> {
    let library = Arc::new(InMemoryLibrary::new(sample_songs(), sample_playlists()));
    let panel = Arc::new(RecordingPanel::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let manager = UiManager::new(Collaborators {
        library: library.clone(),
        panel: panel.clone(),
        notifier: notifier.clone(),
        store: store.clone(),
    });
    Harness {
        manager,
        library,
        panel,
        notifier,
        store,
    }
}

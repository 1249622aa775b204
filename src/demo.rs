//! In-process collaborators for the terminal front end

use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::model::{
    LibraryIndex, LibrarySource, Notifier, OverlayPanel, Playlist, PlaylistKey, PlaylistMap,
    Song, SongId,
};
use crate::reactive::Reactive;

const ANIMATION_STEPS: u32 = 8;
const ANIMATION_FRAME: Duration = Duration::from_millis(25);
const SHORT_TOAST: Duration = Duration::from_secs(2);
const LONG_TOAST: Duration = Duration::from_secs(5);

/// Library and playlists held in memory. Mutations stand in for the
/// scanner and playlist storage.
pub struct InMemoryLibrary {
    library: Reactive<LibraryIndex>,
    playlists: Reactive<PlaylistMap>,
}

impl InMemoryLibrary {
    pub fn new(songs: Vec<Song>, playlists: PlaylistMap) -> Self {
        Self {
            library: Reactive::new(LibraryIndex::new(songs)),
            playlists: Reactive::new(playlists),
        }
    }

    pub fn replace_songs(&self, songs: Vec<Song>) {
        self.library.set(LibraryIndex::new(songs));
    }

    pub fn add_playlist(&self, key: PlaylistKey, playlist: Playlist) {
        self.playlists.update(|map| {
            map.insert(key, playlist);
        });
    }

    /// Append `songs` not already in the playlist. Returns how many were added.
    pub fn append_to_playlist(&self, key: &PlaylistKey, songs: &[SongId]) -> usize {
        let mut added = 0;
        self.playlists.update(|map| {
            if let Some(playlist) = map.get_mut(key) {
                for song in songs {
                    if !playlist.songs.contains(song) {
                        playlist.songs.push(*song);
                        added += 1;
                    }
                }
            }
        });
        added
    }

    pub fn rename_playlist(&self, key: &PlaylistKey, name: &str) {
        self.playlists.update(|map| {
            if let Some(playlist) = map.get_mut(key) {
                playlist.name = name.to_string();
            }
        });
    }

    pub fn remove_playlist(&self, key: &PlaylistKey) -> bool {
        let removed = self.playlists.update(|map| {
            map.remove(key);
        });
        if removed {
            tracing::info!(playlist = %key, "Playlist deleted");
        }
        removed
    }

    pub fn playlist_keys(&self) -> Vec<PlaylistKey> {
        self.playlists.with(|map| map.keys().cloned().collect())
    }
}

impl LibrarySource for InMemoryLibrary {
    fn library(&self) -> Reactive<LibraryIndex> {
        self.library.clone()
    }

    fn playlists(&self) -> Reactive<PlaylistMap> {
        self.playlists.clone()
    }
}

/// Overlay panel that eases its visible position towards the target.
pub struct SimulatedPanel {
    target: Reactive<f32>,
    position: Reactive<f32>,
}

impl SimulatedPanel {
    pub fn new() -> Self {
        Self {
            target: Reactive::new(0.0),
            position: Reactive::new(0.0),
        }
    }

    pub fn position(&self) -> f32 {
        self.position.get()
    }
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayPanel for SimulatedPanel {
    fn target_openness(&self) -> Reactive<f32> {
        self.target.clone()
    }

    fn animate_to(&self, openness: f32) -> BoxFuture<'static, ()> {
        let openness = openness.clamp(0.0, 1.0);
        self.target.set(openness);

        let (target, position) = (self.target.clone(), self.position.clone());
        Box::pin(async move {
            let start = position.get();
            for step in 1..=ANIMATION_STEPS {
                tokio::time::sleep(ANIMATION_FRAME).await;
                if target.get() != openness {
                    // Superseded by a newer command.
                    return;
                }
                let t = step as f32 / ANIMATION_STEPS as f32;
                position.set(start + (openness - start) * t);
            }
        })
    }
}

struct Toast {
    text: String,
    shown_at: Instant,
    ttl: Duration,
}

/// Keeps the latest toast until it expires.
#[derive(Default)]
pub struct ToastBoard {
    current: Mutex<Option<Toast>>,
}

impl ToastBoard {
    pub fn current(&self) -> Option<String> {
        let mut current = self.current.lock();
        if current.as_ref().is_some_and(|t| t.shown_at.elapsed() > t.ttl) {
            *current = None;
        }
        current.as_ref().map(|t| t.text.clone())
    }
}

impl Notifier for ToastBoard {
    fn toast(&self, text: &str, short: bool) {
        *self.current.lock() = Some(Toast {
            text: text.to_string(),
            shown_at: Instant::now(),
            ttl: if short { SHORT_TOAST } else { LONG_TOAST },
        });
    }
}

fn song(id: u64, title: &str, artist: &str, album: &str, folder: &str, duration_ms: u32) -> Song {
    Song {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        folder: folder.to_string(),
        duration_ms,
    }
}

/// Catalog the demo starts with.
pub fn demo_catalog() -> (Vec<Song>, PlaylistMap) {
    let songs = vec![
        song(1, "Blue Train", "John Coltrane", "Blue Train", "jazz", 643_000),
        song(2, "Moment's Notice", "John Coltrane", "Blue Train", "jazz", 551_000),
        song(3, "So What", "Miles Davis", "Kind of Blue", "jazz", 562_000),
        song(4, "Blue in Green", "Miles Davis", "Kind of Blue", "jazz", 337_000),
        song(5, "Teardrop", "Massive Attack", "Mezzanine", "trip-hop", 330_000),
        song(6, "Angel", "Massive Attack", "Mezzanine", "trip-hop", 379_000),
        song(7, "Roads", "Portishead", "Dummy", "trip-hop", 305_000),
    ];

    let mut playlists = PlaylistMap::new();
    playlists.insert(
        PlaylistKey::new("late-night"),
        Playlist {
            name: "Late night".to_string(),
            songs: vec![7, 4, 5],
        },
    );
    playlists.insert(
        PlaylistKey::new("focus"),
        Playlist {
            name: "Focus".to_string(),
            songs: vec![1, 3],
        },
    );
    (songs, playlists)
}

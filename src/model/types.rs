//! Core type definitions for the navigation layers

use serde::{Deserialize, Serialize};

pub type SongId = u64;

/// Key of a user playlist in the playlist map
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaylistKey(pub String);

impl PlaylistKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl std::fmt::Display for PlaylistKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A full-screen view pushed over the home view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Settings,
    NowPlayingQueue,
    Equalizer,
    SleepTimer,
    About,
    SongDetails { song: SongId },
}

impl Screen {
    pub fn title(&self) -> String {
        match self {
            Screen::Settings => "Settings".to_string(),
            Screen::NowPlayingQueue => "Queue".to_string(),
            Screen::Equalizer => "Equalizer".to_string(),
            Screen::SleepTimer => "Sleep timer".to_string(),
            Screen::About => "About".to_string(),
            Screen::SongDetails { song } => format!("Song #{song}"),
        }
    }
}

/// A modal dialog. Only one is shown at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialog {
    CreatePlaylist,
    RenamePlaylist { key: PlaylistKey },
    DeletePlaylist { key: PlaylistKey },
    AddToPlaylist { songs: Vec<SongId> },
    SortOrder,
}

impl Dialog {
    pub fn title(&self) -> String {
        match self {
            Dialog::CreatePlaylist => "New playlist".to_string(),
            Dialog::RenamePlaylist { key } => format!("Rename '{key}'"),
            Dialog::DeletePlaylist { key } => format!("Delete '{key}'?"),
            Dialog::AddToPlaylist { songs } => match songs.len() {
                1 => "Add 1 song to playlist".to_string(),
                n => format!("Add {n} songs to playlist"),
            },
            Dialog::SortOrder => "Sort by".to_string(),
        }
    }
}

/// What a collection view drills into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionKind {
    Album,
    Artist,
    Folder,
    Filter,
    Playlist,
}

impl CollectionKind {
    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::Album => "Album",
            CollectionKind::Artist => "Artist",
            CollectionKind::Folder => "Folder",
            CollectionKind::Filter => "Search",
            CollectionKind::Playlist => "Playlist",
        }
    }
}

/// Which layer consumed a back action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackOutcome {
    DialogClosed,
    ScreenPopped,
    PanelCollapsed,
    SelectionCleared,
    CollectionViewPopped,
    /// Nothing to go back from; the platform default applies.
    Unhandled,
}

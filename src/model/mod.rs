//! Model module - navigation data types and state holders
//!
//! - `types`: screens, dialogs, ids and the back outcome
//! - `library`: library/playlist snapshots and collection selectors
//! - `multi_select`: selection state shared by every list view
//! - `collection_view`: drill-down views with their own scopes
//! - `home`: the home pager
//! - `persistent`: the snapshot that survives restarts and the timer holder
//! - `collaborators`: interfaces to library, panel, toasts and storage
//! - `store`: JSON file implementation of the storage interface

mod types;
mod library;
mod multi_select;
mod collection_view;
mod home;
mod persistent;
mod collaborators;
mod store;

pub use types::{BackOutcome, CollectionKind, Dialog, PlaylistKey, Screen, SongId};

pub use library::{
    by_album, by_artist, by_filter, by_folder, CollectionInfo, LibraryIndex, Playlist,
    PlaylistMap, Song,
};

pub use multi_select::MultiSelectState;
pub use collection_view::{CollectionView, CollectionViewState};
pub use home::{HomeView, HOME_PAGES};
pub use persistent::{PersistentUiState, TimerHolder, TimerSettings, UI_STATE_ID};

pub use collaborators::{
    LibrarySource, Notifier, OverlayPanel, StateStore, PANEL_COLLAPSED, PANEL_EXPANDED,
};

pub use store::JsonFileStore;

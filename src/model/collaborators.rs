//! Narrow interfaces to the collaborators the navigation core consumes

use futures::future::BoxFuture;

use crate::reactive::Reactive;
use super::library::{LibraryIndex, PlaylistMap};
use super::persistent::PersistentUiState;

/// Openness at which the overlay panel counts as fully expanded
pub const PANEL_EXPANDED: f32 = 1.0;
pub const PANEL_COLLAPSED: f32 = 0.0;

/// Live, read-only library data
pub trait LibrarySource: Send + Sync {
    fn library(&self) -> Reactive<LibraryIndex>;
    fn playlists(&self) -> Reactive<PlaylistMap>;
}

/// The draggable now-playing panel
pub trait OverlayPanel: Send + Sync {
    /// Openness the panel is settling towards, in `[0, 1]`.
    fn target_openness(&self) -> Reactive<f32>;

    /// Command an animation. The command is issued by the call itself;
    /// the returned future completes when the animation settles.
    fn animate_to(&self, openness: f32) -> BoxFuture<'static, ()>;
}

/// Transient user-facing notices
pub trait Notifier: Send + Sync {
    fn toast(&self, text: &str, short: bool);
}

/// Durable storage for the UI snapshot
pub trait StateStore: Send + Sync {
    fn load(&self, id: &str) -> anyhow::Result<Option<PersistentUiState>>;
    fn save(&self, id: &str, state: &PersistentUiState) -> anyhow::Result<()>;
}

//! Screen stack, dialog slot and collection-view stack

use std::sync::atomic::{AtomicU64, Ordering};

use super::UiManager;
use crate::model::{
    CollectionInfo, CollectionView, CollectionViewState, Dialog, LibraryIndex, PlaylistKey,
    Screen, PANEL_COLLAPSED,
};

static NEXT_VIEW: AtomicU64 = AtomicU64::new(1);

impl UiManager {
    pub fn open_top_level_screen(&self, screen: Screen) {
        tracing::debug!(screen = ?screen, "Opening screen");
        self.screens.update(|screens| screens.push(screen));
    }

    /// Remove the first screen equal to `screen`. No-op when absent.
    pub fn close_top_level_screen(&self, screen: &Screen) {
        let removed = self.screens.update(|screens| {
            if let Some(index) = screens.iter().position(|s| s == screen) {
                screens.remove(index);
            }
        });
        if removed {
            tracing::debug!(screen = ?screen, "Closed screen");
        }
    }

    /// Show `dialog`, replacing any dialog already shown.
    pub fn open_dialog(&self, dialog: Dialog) {
        tracing::debug!(dialog = ?dialog, "Opening dialog");
        self.dialog.set(Some(dialog));
    }

    pub fn close_dialog(&self) {
        if self.dialog.set(None) {
            tracing::debug!("Closed dialog");
        }
    }

    /// Open a drill-down view over the live library.
    ///
    /// `selector` runs against every library snapshot inside the new view's
    /// scope; a `None` result marks the view stale and the purge job pops it.
    /// The overlay panel is commanded to collapse so the view is visible.
    pub fn open_collection_view<F>(&self, selector: F) -> CollectionView
    where
        F: Fn(&LibraryIndex) -> Option<CollectionInfo> + Send + Sync + 'static,
    {
        let scope = self.scope.child(next_scope_name("collection"));
        let info = self.library.map(&scope, selector);
        self.push_collection_view(CollectionViewState::new(scope, info))
    }

    /// Open a view over one playlist. It goes stale when `key` leaves the
    /// playlist map.
    pub fn open_playlist_collection_view(&self, key: PlaylistKey) -> CollectionView {
        let scope = self.scope.child(next_scope_name("playlist"));
        let info = self.playlists.combine(&self.library, &scope, move |playlists, library| {
            CollectionInfo::for_playlist(library, playlists, &key)
        });
        self.push_collection_view(CollectionViewState::new(scope, info))
    }

    fn push_collection_view(&self, view: CollectionView) -> CollectionView {
        tracing::debug!(scope = view.scope_name(), title = %view.title(), "Opening collection view");
        self.animate_panel(PANEL_COLLAPSED);
        self.collection_views.update(|views| views.push(view.clone()));
        view
    }

    /// Pop the topmost collection view and close its scope.
    pub(crate) fn pop_collection_view(&self) -> Option<CollectionView> {
        let mut popped = None;
        self.collection_views.update(|views| popped = views.pop());
        if let Some(view) = &popped {
            view.close();
            tracing::debug!(scope = view.scope_name(), "Popped collection view");
        }
        popped
    }
}

fn next_scope_name(prefix: &str) -> String {
    format!("{prefix}-{}", NEXT_VIEW.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use crate::model::{by_album, Dialog, PlaylistKey, Screen, PANEL_COLLAPSED, PANEL_EXPANDED};
    use crate::test_support::harness;

    #[test]
    fn test_screens_push_and_remove_first_match() {
        let h = harness();
        h.manager.open_top_level_screen(Screen::Settings);
        h.manager.open_top_level_screen(Screen::About);
        h.manager.open_top_level_screen(Screen::Settings);

        h.manager.close_top_level_screen(&Screen::Settings);
        assert_eq!(h.manager.screens().get(), vec![Screen::About, Screen::Settings]);
    }

    #[test]
    fn test_closing_absent_layers_is_a_no_op() {
        let h = harness();
        h.manager.open_top_level_screen(Screen::About);
        let before = h.manager.screens().get();

        h.manager.close_top_level_screen(&Screen::Equalizer);
        h.manager.close_dialog();

        assert_eq!(h.manager.screens().get(), before);
        assert_eq!(h.manager.dialog().get(), None);
    }

    #[test]
    fn test_dialog_replace_overwrites() {
        let h = harness();
        h.manager.open_dialog(Dialog::CreatePlaylist);
        h.manager.open_dialog(Dialog::SortOrder);
        assert_eq!(h.manager.dialog().get(), Some(Dialog::SortOrder));
    }

    #[tokio::test]
    async fn test_opening_collection_view_collapses_panel() {
        let h = harness();
        h.panel.set_openness(PANEL_EXPANDED);

        h.manager.open_collection_view(by_album("Blue Train"));

        assert_eq!(h.panel.commands(), vec![PANEL_COLLAPSED]);
        assert_eq!(h.manager.panel_openness().get(), PANEL_COLLAPSED);
        assert_eq!(h.manager.collection_views().get().len(), 1);
    }

    #[tokio::test]
    async fn test_playlist_view_resolves_songs_from_library() {
        let h = harness();
        let view = h.manager.open_playlist_collection_view(PlaylistKey::new("mix"));
        let info = view.info().get().unwrap();
        assert_eq!(info.title, "Evening mix");
        assert_eq!(info.song_ids(), vec![3, 1]);

        h.library.rename_playlist(&PlaylistKey::new("mix"), "Late mix");
        assert_eq!(view.title(), "Playlist: Late mix");
    }
}

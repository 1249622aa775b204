//! Controller module - navigation orchestration
//!
//! [`UiManager`] is the explicitly constructed context object that owns the
//! layered navigation state and derives the cross-cutting signals. It is
//! organized into submodules by responsibility:
//!
//! - `navigation`: screen stack, dialog slot, collection-view stack
//! - `back`: back-eligibility aggregation and the prioritized `back()`
//! - `purge`: removal of collection views whose backing data vanished
//! - `sync`: restore and periodic persistence of the UI snapshot
//! - `input`: key bindings for the terminal front end

mod navigation;
mod back;
mod purge;
mod sync;
mod input;

use std::sync::Arc;

use crate::model::{
    CollectionView, Dialog, HomeView, LibraryIndex, LibrarySource, MultiSelectState, Notifier,
    OverlayPanel, PlaylistMap, Screen, SongId, StateStore, TimerHolder,
};
use crate::reactive::{Reactive, Scope};

pub use back::BackTargets;
pub use input::{InputResult, handle_key_event};

/// External collaborators the manager is wired to
#[derive(Clone)]
pub struct Collaborators {
    pub library: Arc<dyn LibrarySource>,
    pub panel: Arc<dyn OverlayPanel>,
    pub notifier: Arc<dyn Notifier>,
    pub store: Arc<dyn StateStore>,
}

#[derive(Clone)]
pub struct UiManager {
    scope: Scope,
    collaborators: Collaborators,
    library: Reactive<LibraryIndex>,
    playlists: Reactive<PlaylistMap>,
    panel_openness: Reactive<f32>,

    screens: Reactive<Vec<Screen>>,
    dialog: Reactive<Option<Dialog>>,
    collection_views: Reactive<Vec<CollectionView>>,
    search_query: Reactive<String>,
    home: HomeView,
    timer: TimerHolder,

    active_multi_select: Reactive<MultiSelectState<SongId>>,
    active_selection_count: Reactive<usize>,
    back_targets: Reactive<BackTargets>,
    back_handler_enabled: Reactive<bool>,
}

impl UiManager {
    /// Build the navigation state and start the purge job.
    ///
    /// Persistence is started separately with
    /// [`UiManager::start_persistent_sync`] since it needs a runtime.
    pub fn new(collaborators: Collaborators) -> Self {
        let scope = Scope::root("ui");
        let library = collaborators.library.library();
        let playlists = collaborators.library.playlists();
        let panel_openness = collaborators.panel.target_openness();

        let screens = Reactive::new(Vec::new());
        let dialog = Reactive::new(None);
        let collection_views: Reactive<Vec<CollectionView>> = Reactive::new(Vec::new());
        let home = HomeView::new(&scope, &library);

        let home_select = home.multi_select().clone();
        let active_multi_select = collection_views.map(&scope, move |views| {
            views
                .last()
                .map(|view| view.multi_select().clone())
                .unwrap_or_else(|| home_select.clone())
        });
        let active_selection_count =
            active_multi_select.switch_map(&scope, |state| state.selected_count().clone());

        let back_targets = back::aggregate(
            &scope,
            &dialog,
            &screens,
            &panel_openness,
            &active_selection_count,
            &collection_views,
        );
        let back_handler_enabled = back_targets.map(&scope, BackTargets::any);

        purge::start(&scope, &collection_views);

        tracing::debug!("UI manager constructed");

        Self {
            scope,
            collaborators,
            library,
            playlists,
            panel_openness,
            screens,
            dialog,
            collection_views,
            search_query: Reactive::new(String::new()),
            home,
            timer: TimerHolder::default(),
            active_multi_select,
            active_selection_count,
            back_targets,
            back_handler_enabled,
        }
    }

    pub fn screens(&self) -> &Reactive<Vec<Screen>> {
        &self.screens
    }

    pub fn dialog(&self) -> &Reactive<Option<Dialog>> {
        &self.dialog
    }

    pub fn collection_views(&self) -> &Reactive<Vec<CollectionView>> {
        &self.collection_views
    }

    pub fn back_handler_enabled(&self) -> &Reactive<bool> {
        &self.back_handler_enabled
    }

    pub fn back_targets(&self) -> &Reactive<BackTargets> {
        &self.back_targets
    }

    pub fn active_multi_select(&self) -> &Reactive<MultiSelectState<SongId>> {
        &self.active_multi_select
    }

    pub fn active_selection_count(&self) -> &Reactive<usize> {
        &self.active_selection_count
    }

    pub fn search_query(&self) -> &Reactive<String> {
        &self.search_query
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.search_query.set(query.into());
    }

    pub fn panel_openness(&self) -> &Reactive<f32> {
        &self.panel_openness
    }

    pub fn library(&self) -> &Reactive<LibraryIndex> {
        &self.library
    }

    pub fn playlists(&self) -> &Reactive<PlaylistMap> {
        &self.playlists
    }

    pub fn home(&self) -> &HomeView {
        &self.home
    }

    pub fn timer(&self) -> &TimerHolder {
        &self.timer
    }

    /// Fire-and-forget notice to the user.
    pub fn toast(&self, text: &str, short: bool) {
        tracing::debug!(text, short, "Toast");
        self.collaborators.notifier.toast(text, short);
    }

    /// Command the overlay panel; completion runs in the background.
    pub(crate) fn animate_panel(&self, openness: f32) {
        let settle = self.collaborators.panel.animate_to(openness);
        self.scope.spawn(settle);
    }

    pub fn expand_panel(&self) {
        self.animate_panel(crate::model::PANEL_EXPANDED);
    }

    pub fn is_shut_down(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Cancel the purge job, the synchronizer and every open view scope.
    pub fn shutdown(&self) {
        if self.scope.cancel() {
            tracing::info!("UI manager shut down");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{by_album, Screen};
    use crate::test_support::harness;

    #[test]
    fn test_toast_reaches_notifier() {
        let h = harness();
        h.manager.toast("Playlist created", true);
        assert_eq!(h.notifier.toasts(), vec![("Playlist created".to_string(), true)]);
    }

    #[test]
    fn test_search_query_is_equality_suppressed() {
        let h = harness();
        h.manager.set_search_query("blue");
        assert_eq!(h.manager.search_query().get(), "blue");
        assert!(!h.manager.search_query().set("blue".to_string()));
    }

    #[tokio::test]
    async fn test_shutdown_closes_open_views() {
        let h = harness();
        let view = h.manager.open_collection_view(by_album("Kind of Blue"));
        h.manager.open_top_level_screen(Screen::About);

        h.manager.shutdown();

        assert!(h.manager.is_shut_down());
        assert!(view.is_closed());
        assert_eq!(h.manager.library().observer_count(), 0);
    }
}

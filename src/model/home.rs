//! The home view beneath every other layer

use crate::reactive::{Reactive, Scope};
use super::library::LibraryIndex;
use super::multi_select::MultiSelectState;
use super::types::SongId;

/// Tabs of the home pager, in page order
pub const HOME_PAGES: [&str; 5] = ["Songs", "Albums", "Artists", "Playlists", "Folders"];

#[derive(Clone)]
pub struct HomeView {
    page: Reactive<usize>,
    multi_select: MultiSelectState<SongId>,
}

impl HomeView {
    /// Selection items follow every song in `library` for as long as
    /// `scope` lives.
    pub fn new(scope: &Scope, library: &Reactive<LibraryIndex>) -> Self {
        let multi_select = MultiSelectState::new(scope);
        multi_select.set_items(library.with(all_song_ids));

        let items = multi_select.clone();
        scope.hold(library.observe(move |library| items.set_items(all_song_ids(library))));

        Self {
            page: Reactive::new(0),
            multi_select,
        }
    }

    /// Raw page holder, for sampling. Writes go through
    /// [`HomeView::scroll_to_page`].
    pub(crate) fn page(&self) -> &Reactive<usize> {
        &self.page
    }

    /// Current page, always a valid index into [`HOME_PAGES`].
    pub fn current_page(&self) -> usize {
        self.page.get().min(HOME_PAGES.len() - 1)
    }

    /// Jump to `page`, clamped to the last tab.
    pub fn scroll_to_page(&self, page: usize) {
        self.page.set(page.min(HOME_PAGES.len() - 1));
    }

    pub fn page_title(&self) -> &'static str {
        HOME_PAGES[self.current_page()]
    }

    pub fn multi_select(&self) -> &MultiSelectState<SongId> {
        &self.multi_select
    }
}

fn all_song_ids(library: &LibraryIndex) -> Vec<SongId> {
    library.songs().iter().map(|s| s.id).collect()
}

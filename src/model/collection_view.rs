//! Drill-down collection views and their private scopes

use std::ops::Deref;
use std::sync::Arc;

use crate::reactive::{Reactive, Scope};
use super::library::CollectionInfo;
use super::multi_select::MultiSelectState;
use super::types::SongId;

/// One drill-down view. Owns the scope its reactive subscriptions were
/// created in; [`CollectionViewState::close`] releases them.
pub struct CollectionViewState {
    scope: Scope,
    info: Reactive<Option<CollectionInfo>>,
    multi_select: MultiSelectState<SongId>,
}

impl CollectionViewState {
    /// `info` must have been derived inside `scope`.
    pub fn new(scope: Scope, info: Reactive<Option<CollectionInfo>>) -> CollectionView {
        let multi_select = MultiSelectState::new(&scope);
        multi_select.set_items(info.with(song_ids));

        let items = multi_select.clone();
        scope.hold(info.observe(move |info| items.set_items(song_ids(info))));

        CollectionView(Arc::new(Self {
            scope,
            info,
            multi_select,
        }))
    }

    pub fn info(&self) -> &Reactive<Option<CollectionInfo>> {
        &self.info
    }

    pub fn multi_select(&self) -> &MultiSelectState<SongId> {
        &self.multi_select
    }

    pub fn title(&self) -> String {
        self.info.with(|info| match info {
            Some(info) => format!("{}: {}", info.kind.label(), info.title),
            None => String::from("(removed)"),
        })
    }

    /// The backing entity is gone.
    pub fn is_stale(&self) -> bool {
        self.info.with(Option::is_none)
    }

    pub fn scope_name(&self) -> &str {
        self.scope.name()
    }

    /// Cancel the view's scope. Only the first call has an effect.
    pub fn close(&self) -> bool {
        self.scope.cancel()
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }
}

fn song_ids(info: &Option<CollectionInfo>) -> Vec<SongId> {
    info.as_ref().map(CollectionInfo::song_ids).unwrap_or_default()
}

/// Shared handle to a [`CollectionViewState`], compared by identity.
#[derive(Clone)]
pub struct CollectionView(Arc<CollectionViewState>);

impl PartialEq for CollectionView {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CollectionView {}

impl Deref for CollectionView {
    type Target = CollectionViewState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for CollectionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionView")
            .field("scope", &self.scope_name())
            .field("title", &self.title())
            .field("closed", &self.is_closed())
            .finish()
    }
}

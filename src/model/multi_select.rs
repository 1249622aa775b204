//! Per-view multi-select state

use std::collections::BTreeSet;
use std::fmt;

use crate::reactive::{Reactive, Scope};

/// Selection over a list of items.
///
/// Cheap to clone; clones share state, and equality is identity, so a
/// `MultiSelectState` can itself be held in a [`Reactive`].
#[derive(Clone)]
pub struct MultiSelectState<T> {
    items: Reactive<Vec<T>>,
    selected: Reactive<BTreeSet<T>>,
    count: Reactive<usize>,
}

impl<T> PartialEq for MultiSelectState<T> {
    fn eq(&self, other: &Self) -> bool {
        self.selected == other.selected
    }
}

impl<T> fmt::Debug for MultiSelectState<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSelectState")
            .field("selected", &self.selected)
            .finish()
    }
}

impl<T> MultiSelectState<T>
where
    T: Clone + Ord + Send + Sync + 'static,
{
    /// The derived selection count lives in `scope`.
    pub fn new(scope: &Scope) -> Self {
        let selected = Reactive::new(BTreeSet::new());
        let count = selected.map(scope, BTreeSet::len);
        Self {
            items: Reactive::new(Vec::new()),
            selected,
            count,
        }
    }

    pub fn items(&self) -> &Reactive<Vec<T>> {
        &self.items
    }

    pub fn selected(&self) -> &Reactive<BTreeSet<T>> {
        &self.selected
    }

    pub fn selected_count(&self) -> &Reactive<usize> {
        &self.count
    }

    pub fn is_empty(&self) -> bool {
        self.selected.with(BTreeSet::is_empty)
    }

    /// Replace the item list, dropping selected items that vanished.
    pub fn set_items(&self, items: Vec<T>) {
        let present: BTreeSet<T> = items.iter().cloned().collect();
        self.items.set(items);
        self.selected.update(|selected| selected.retain(|item| present.contains(item)));
    }

    /// Flip `item`. Items not in the list are ignored.
    pub fn toggle(&self, item: T) {
        if !self.items.with(|items| items.contains(&item)) {
            return;
        }
        self.selected.update(|selected| {
            if !selected.remove(&item) {
                selected.insert(item);
            }
        });
    }

    pub fn select_all(&self) {
        let all: BTreeSet<T> = self.items.with(|items| items.iter().cloned().collect());
        self.selected.set(all);
    }

    pub fn clear(&self) -> bool {
        self.selected.set(BTreeSet::new())
    }

    /// Selected items in list order.
    pub fn selected_in_order(&self) -> Vec<T> {
        let selected = self.selected.get();
        self.items.with(|items| {
            items
                .iter()
                .filter(|item| selected.contains(item))
                .cloned()
                .collect()
        })
    }
}

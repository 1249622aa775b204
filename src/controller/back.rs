//! Back-eligibility aggregation and prioritized back navigation

use super::UiManager;
use crate::model::{BackOutcome, CollectionView, Dialog, Screen, PANEL_COLLAPSED, PANEL_EXPANDED};
use crate::reactive::{Observable, Reactive, Scope};

/// Which layers could currently consume a back action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackTargets {
    pub dialog: bool,
    pub screen: bool,
    pub panel_expanded: bool,
    pub selection: bool,
    pub collection_view: bool,
}

impl BackTargets {
    pub fn any(&self) -> bool {
        self.dialog || self.screen || self.panel_expanded || self.selection || self.collection_view
    }

    /// The layer `back()` acts on, highest priority first.
    pub fn resolve(&self) -> BackOutcome {
        if self.dialog {
            BackOutcome::DialogClosed
        } else if self.screen {
            BackOutcome::ScreenPopped
        } else if self.panel_expanded {
            BackOutcome::PanelCollapsed
        } else if self.selection {
            BackOutcome::SelectionCleared
        } else if self.collection_view {
            BackOutcome::CollectionViewPopped
        } else {
            BackOutcome::Unhandled
        }
    }
}

fn sample(
    dialog: &Reactive<Option<Dialog>>,
    screens: &Reactive<Vec<Screen>>,
    panel_openness: &Reactive<f32>,
    selection_count: &Reactive<usize>,
    collection_views: &Reactive<Vec<CollectionView>>,
) -> BackTargets {
    BackTargets {
        dialog: dialog.with(Option::is_some),
        screen: !screens.with(Vec::is_empty),
        panel_expanded: panel_openness.get() >= PANEL_EXPANDED,
        selection: selection_count.get() > 0,
        collection_view: !collection_views.with(Vec::is_empty),
    }
}

pub(super) fn aggregate(
    scope: &Scope,
    dialog: &Reactive<Option<Dialog>>,
    screens: &Reactive<Vec<Screen>>,
    panel_openness: &Reactive<f32>,
    selection_count: &Reactive<usize>,
    collection_views: &Reactive<Vec<CollectionView>>,
) -> Reactive<BackTargets> {
    let inputs = (
        dialog.clone(),
        screens.clone(),
        panel_openness.clone(),
        selection_count.clone(),
        collection_views.clone(),
    );
    let sources: [&dyn Observable; 5] =
        [dialog, screens, panel_openness, selection_count, collection_views];
    Reactive::computed(
        scope,
        &sources,
        move || {
            let (dialog, screens, panel, selection, views) = &inputs;
            sample(dialog, screens, panel, selection, views)
        },
    )
}

impl UiManager {
    /// Live back targets, read straight from the layer holders.
    pub fn current_back_targets(&self) -> BackTargets {
        sample(
            &self.dialog,
            &self.screens,
            &self.panel_openness,
            &self.active_selection_count,
            &self.collection_views,
        )
    }

    /// Consume a back action on the highest-priority layer that has
    /// something to go back from. Exactly one layer changes.
    pub fn back(&self) -> BackOutcome {
        let outcome = self.current_back_targets().resolve();
        match outcome {
            BackOutcome::DialogClosed => self.close_dialog(),
            BackOutcome::ScreenPopped => {
                self.screens.update(|screens| {
                    screens.pop();
                });
            }
            BackOutcome::PanelCollapsed => self.animate_panel(PANEL_COLLAPSED),
            BackOutcome::SelectionCleared => {
                self.active_multi_select.get().clear();
            }
            BackOutcome::CollectionViewPopped => {
                self.pop_collection_view();
            }
            BackOutcome::Unhandled => {}
        }
        tracing::debug!(outcome = ?outcome, "Back");
        outcome
    }
}

//! Background removal of collection views whose backing data vanished

use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::CollectionView;
use crate::reactive::{Reactive, Scope, Subscription};

/// Pop collection views as soon as their `info` is gone.
///
/// The watch follows the stack: whenever it changes, the previous watches
/// are dropped and every view in the new stack is watched, the topmost one
/// included. Views that are already stale when the stack changes are swept
/// right away, so no stale view survives a propagation pass even when it is
/// covered by others. Removal is by identity, so a view that a concurrent
/// back action already popped is left alone.
pub(super) fn start(scope: &Scope, stack: &Reactive<Vec<CollectionView>>) {
    let watched: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

    let (views, slot) = (stack.clone(), watched.clone());
    scope.hold(stack.observe(move |current| {
        let subscriptions: Vec<Subscription> =
            current.iter().map(|view| watch(&views, view)).collect();
        let previous = std::mem::replace(&mut *slot.lock(), subscriptions);
        drop(previous);

        let stale: Vec<CollectionView> =
            current.iter().filter(|view| view.is_stale()).cloned().collect();
        for view in stale {
            purge(&views, &view);
        }
    }));

    scope.hold(Subscription::new(move || {
        let previous = std::mem::take(&mut *watched.lock());
        drop(previous);
    }));
}

fn watch(stack: &Reactive<Vec<CollectionView>>, view: &CollectionView) -> Subscription {
    let (stack, target) = (stack.clone(), view.clone());
    view.info().observe(move |info| {
        if info.is_none() {
            purge(&stack, &target);
        }
    })
}

fn purge(stack: &Reactive<Vec<CollectionView>>, view: &CollectionView) {
    let removed = stack.update(|views| views.retain(|v| v != view));
    if removed {
        view.close();
        tracing::info!(scope = view.scope_name(), "Purged stale collection view");
    }
}

//! Observable value holder with equality-based change suppression

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use super::scope::Scope;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    value: T,
    version: u64,
}

struct Shared<T> {
    slot: RwLock<Slot<T>>,
    observers: Mutex<Vec<(u64, Observer<T>)>>,
    next_observer: AtomicU64,
    // Serializes notification passes across threads while letting an
    // observer write back into the same holder on the notifying thread.
    notifying: ReentrantMutex<()>,
}

/// A shared, observable value.
///
/// Clones refer to the same holder. Writes that leave the value unchanged
/// (by `PartialEq`) are swallowed, so observers only run on real changes.
/// Observers run synchronously on the writing thread, outside every
/// internal lock, and always see the latest value: if an observer writes a
/// newer value, the pass for the older value stops early.
pub struct Reactive<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

/// Holders compare by identity, which lets a reactive handle itself be the
/// value of another holder (see [`Reactive::switch_map`]).
impl<T> PartialEq for Reactive<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> Default for Reactive<T>
where
    T: Default + Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Reactive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reactive")
            .field(&self.shared.slot.read().value)
            .finish()
    }
}

impl<T> Reactive<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: RwLock::new(Slot { value, version: 0 }),
                observers: Mutex::new(Vec::new()),
                next_observer: AtomicU64::new(0),
                notifying: ReentrantMutex::new(()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.shared.slot.read().value.clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// `f` runs under the read lock and must not write to this holder.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.slot.read().value)
    }

    /// Replace the value. Returns `false` when it was already equal.
    pub fn set(&self, value: T) -> bool {
        let version = {
            let mut slot = self.shared.slot.write();
            if slot.value == value {
                return false;
            }
            slot.value = value;
            slot.version += 1;
            slot.version
        };
        self.notify(version);
        true
    }

    /// Read-modify-write under the write lock. Returns `false` when the
    /// closure left the value unchanged.
    ///
    /// `f` must not touch this holder.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let version = {
            let mut slot = self.shared.slot.write();
            let mut next = slot.value.clone();
            f(&mut next);
            if next == slot.value {
                return false;
            }
            slot.value = next;
            slot.version += 1;
            slot.version
        };
        self.notify(version);
        true
    }

    /// Register an observer for future changes. The observer is removed
    /// when the returned [`Subscription`] is dropped.
    pub fn observe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.shared.next_observer.fetch_add(1, Ordering::Relaxed);
        let observer: Observer<T> = Arc::new(observer);
        self.shared.observers.lock().push((id, observer));

        let shared = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.observers.lock().retain(|(other, _)| *other != id);
            }
        })
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.shared.observers.lock().len()
    }

    fn notify(&self, version: u64) {
        let _pass = self.shared.notifying.lock();
        let observers: Vec<Observer<T>> = self
            .shared
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        for observer in observers {
            let value = {
                let slot = self.shared.slot.read();
                if slot.version != version {
                    // A nested write already delivered a newer value to everyone.
                    return;
                }
                slot.value.clone()
            };
            observer(&value);
        }
    }

    /// Derive a value that follows `self` through `f`.
    ///
    /// The upstream subscription belongs to `scope`; once the scope is
    /// cancelled the derived value keeps its last state.
    pub fn map<U>(&self, scope: &Scope, f: impl Fn(&T) -> U + Send + Sync + 'static) -> Reactive<U>
    where
        U: Clone + PartialEq + Send + Sync + 'static,
    {
        let derived = Reactive::new(self.with(&f));
        let target = derived.clone();
        scope.hold(self.observe(move |value| {
            target.set(f(value));
        }));
        derived
    }

    /// Zip with `other` using latest-value semantics: a change on either
    /// side recomputes from the current value of the other.
    pub fn combine<U, V>(
        &self,
        other: &Reactive<U>,
        scope: &Scope,
        f: impl Fn(&T, &U) -> V + Send + Sync + 'static,
    ) -> Reactive<V>
    where
        U: Clone + PartialEq + Send + Sync + 'static,
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let derived = Reactive::new(f(&self.get(), &other.get()));

        let (target, right, combine) = (derived.clone(), other.clone(), f.clone());
        scope.hold(self.observe(move |left| {
            let value = right.with(|right| combine(left, right));
            target.set(value);
        }));

        let (target, left, combine) = (derived.clone(), self.clone(), f);
        scope.hold(other.observe(move |right| {
            let value = left.with(|left| combine(left, right));
            target.set(value);
        }));

        derived
    }

    /// Flat-map-latest: follow whichever inner holder `select` picks for
    /// the current value of `self`, dropping the previous inner
    /// subscription on every change.
    pub fn switch_map<U>(
        &self,
        scope: &Scope,
        select: impl Fn(&T) -> Reactive<U> + Send + Sync + 'static,
    ) -> Reactive<U>
    where
        U: Clone + PartialEq + Send + Sync + 'static,
    {
        let first = self.with(&select);
        let derived = Reactive::new(first.get());
        let inner = Arc::new(Mutex::new(Some(forward(&first, &derived))));

        let (target, slot) = (derived.clone(), inner.clone());
        scope.hold(self.observe(move |value| {
            let next = select(value);
            let previous = slot.lock().replace(forward(&next, &target));
            drop(previous);
            target.set(next.get());
        }));
        scope.hold(Subscription::new(move || {
            let previous = inner.lock().take();
            drop(previous);
        }));

        derived
    }

    /// Recompute `compute` whenever any of `sources` changes.
    ///
    /// This is the n-ary form of [`Reactive::combine`]: `compute` reads
    /// whatever holders it captured, so every one of them must be listed
    /// in `sources`.
    pub fn computed(
        scope: &Scope,
        sources: &[&dyn Observable],
        compute: impl Fn() -> T + Send + Sync + 'static,
    ) -> Reactive<T> {
        let compute = Arc::new(compute);
        // Recompute-and-publish is one step, so writers racing on different
        // sources cannot publish an older result after a newer one.
        let turn = Arc::new(ReentrantMutex::new(()));
        let derived = Reactive::new(compute());
        for source in sources {
            let (target, compute, turn) = (derived.clone(), compute.clone(), turn.clone());
            scope.hold(source.on_change(Arc::new(move || {
                let _turn = turn.lock();
                target.set(compute());
            })));
        }
        derived
    }
}

fn forward<U>(source: &Reactive<U>, target: &Reactive<U>) -> Subscription
where
    U: Clone + PartialEq + Send + Sync + 'static,
{
    let target = target.clone();
    source.observe(move |value| {
        target.set(value.clone());
    })
}

/// Type-erased change notification, used to recompute from heterogeneous
/// sources.
pub trait Observable: Send + Sync {
    fn on_change(&self, callback: Arc<dyn Fn() + Send + Sync>) -> Subscription;
}

impl<T> Observable for Reactive<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn on_change(&self, callback: Arc<dyn Fn() + Send + Sync>) -> Subscription {
        self.observe(move |_| callback())
    }
}

/// Keeps an observer registered. Dropping it unregisters the observer.
#[must_use = "dropping a subscription unregisters its observer"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

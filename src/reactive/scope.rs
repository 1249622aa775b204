//! Cancellable ownership records for subscriptions and background tasks

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::value::Subscription;

#[derive(Default)]
struct Owned {
    cancelled: bool,
    subscriptions: Vec<Subscription>,
    tasks: Vec<JoinHandle<()>>,
    children: Vec<Scope>,
}

struct ScopeInner {
    name: String,
    owned: Mutex<Owned>,
}

/// A unit of cancellable work.
///
/// Everything registered through [`Scope::hold`], [`Scope::spawn`] and
/// [`Scope::child`] is released by [`Scope::cancel`], which runs at most
/// once. Registering on an already cancelled scope releases immediately.
#[derive(Clone)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

impl Scope {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                name: name.into(),
                owned: Mutex::new(Owned::default()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Create a child scope that is cancelled together with this one.
    pub fn child(&self, name: impl Into<String>) -> Scope {
        let child = Scope::root(name);
        let mut owned = self.inner.owned.lock();
        if owned.cancelled {
            drop(owned);
            child.cancel();
        } else {
            owned.children.retain(|c| !c.is_cancelled());
            owned.children.push(child.clone());
        }
        child
    }

    pub fn hold(&self, subscription: Subscription) {
        let mut owned = self.inner.owned.lock();
        if owned.cancelled {
            drop(owned);
            subscription.cancel();
        } else {
            owned.subscriptions.push(subscription);
        }
    }

    /// Spawn `future` on the current tokio runtime, aborted on cancel.
    ///
    /// Returns `false` when the scope is cancelled or no runtime is
    /// available.
    pub fn spawn<F>(&self, future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(scope = %self.inner.name, "No tokio runtime, task not started");
            return false;
        };

        let mut owned = self.inner.owned.lock();
        if owned.cancelled {
            return false;
        }
        owned.tasks.retain(|task| !task.is_finished());
        owned.tasks.push(runtime.spawn(future));
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.owned.lock().cancelled
    }

    /// Release everything this scope owns. Returns `true` only for the call
    /// that actually performed the cancellation.
    pub fn cancel(&self) -> bool {
        let owned = {
            let mut owned = self.inner.owned.lock();
            if owned.cancelled {
                return false;
            }
            let taken = std::mem::take(&mut *owned);
            owned.cancelled = true;
            taken
        };

        tracing::trace!(
            scope = %self.inner.name,
            subscriptions = owned.subscriptions.len(),
            tasks = owned.tasks.len(),
            children = owned.children.len(),
            "Cancelling scope"
        );

        for child in &owned.children {
            child.cancel();
        }
        for task in &owned.tasks {
            task.abort();
        }
        drop(owned.subscriptions);
        true
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.inner.name)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

//! View-scoped fetches.
//!
//! A view starts its fetches inside a [`ViewScope`]. Tearing the scope down
//! aborts whatever is still in flight, so no response is written into a view
//! that no longer exists.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use cmdb_framework::CmdbType;
use cmdb_rights::ViewContainer;

use crate::clients::ObjectClient;
use crate::transport::{ApiTransport, HttpTransport};

/// Owner of a view's in-flight tasks.
#[derive(Debug, Default)]
pub struct ViewScope {
    tasks: Vec<JoinHandle<()>>,
}

impl ViewScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Run a task for as long as the scope lives.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(tokio::spawn(task));
    }

    /// Number of tasks still running.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Abort every task still running.
    pub fn teardown(&mut self) {
        let pending = self.pending();
        if pending > 0 {
            debug!(pending, "Aborting view tasks");
        }
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Sidebar entry for a type, showing how many objects it has.
///
/// The count is fetched on [`init`](SidebarTypeEntry::init) and published
/// through a watch channel, starting at 0.
pub struct SidebarTypeEntry<X = HttpTransport> {
    ty: CmdbType,
    objects: ObjectClient<X>,
    counter: Arc<watch::Sender<u64>>,
    scope: ViewScope,
}

impl<X: ApiTransport + 'static> SidebarTypeEntry<X> {
    /// Create an entry for a type. Nothing is fetched yet.
    pub fn new(ty: CmdbType, objects: ObjectClient<X>) -> Self {
        let (counter, _) = watch::channel(0);
        Self {
            ty,
            objects,
            counter: Arc::new(counter),
            scope: ViewScope::new(),
        }
    }

    /// Start fetching the object count.
    pub fn init(&mut self) {
        let objects = self.objects.clone();
        let counter = Arc::clone(&self.counter);
        let type_id = self.ty.public_id;

        self.scope.spawn(async move {
            match objects.count_by_type(type_id).await {
                Ok(count) => {
                    counter.send_replace(count);
                }
                Err(e) => warn!(type_id, error = %e, "Failed to count objects"),
            }
        });
    }

    /// Cancel the pending fetch, if any.
    pub fn teardown(&mut self) {
        self.scope.teardown();
    }

    /// The type shown by this entry.
    pub fn cmdb_type(&self) -> &CmdbType {
        &self.ty
    }

    /// The current object count.
    pub fn object_counter(&self) -> u64 {
        *self.counter.borrow()
    }

    /// Watch the object count.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.counter.subscribe()
    }

    /// Number of fetches still running.
    pub fn pending(&self) -> usize {
        self.scope.pending()
    }
}

impl<X: ApiTransport + 'static> ViewContainer for SidebarTypeEntry<X> {
    fn mount(&mut self) {
        self.init();
    }

    fn clear(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_scope_runs_tasks() {
        let done = Arc::new(AtomicBool::new(false));
        let mut scope = ViewScope::new();

        let flag = Arc::clone(&done);
        scope.spawn(async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn test_teardown_aborts_pending_tasks() {
        let done = Arc::new(AtomicBool::new(false));
        let mut scope = ViewScope::new();

        let flag = Arc::clone(&done);
        scope.spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            flag.store(true, Ordering::SeqCst);
        });
        assert_eq!(scope.pending(), 1);

        scope.teardown();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!done.load(Ordering::SeqCst));
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn test_drop_aborts_pending_tasks() {
        let done = Arc::new(AtomicBool::new(false));

        {
            let mut scope = ViewScope::new();
            let flag = Arc::clone(&done);
            scope.spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                flag.store(true, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!done.load(Ordering::SeqCst));
    }
}

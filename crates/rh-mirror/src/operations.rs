//! Tracking of background mutations.
//!
//! Every background task gets an [`OperationId`] and an attachment flag.
//! Detaching leaves the remote call running but tells its completion
//! handler not to touch the view's state.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(u64);

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

/// Handed to a background task; checked before it mutates shared state.
#[derive(Debug, Clone)]
pub struct Attachment {
    id: OperationId,
    attached: Arc<AtomicBool>,
}

impl Attachment {
    #[must_use]
    pub const fn id(&self) -> OperationId {
        self.id
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

struct Entry {
    attached: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct Inner {
    next_id: AtomicU64,
    entries: Mutex<HashMap<OperationId, Entry>>,
}

/// Registry of in-flight operations. Clones share the same registry.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("pending", &self.pending())
            .finish()
    }
}

impl OperationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on the tokio runtime under a fresh operation id.
    pub fn spawn<F, Fut>(&self, task: F) -> OperationId
    where
        F: FnOnce(Attachment) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let id = OperationId(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let attached = Arc::new(AtomicBool::new(true));
        let attachment = Attachment {
            id,
            attached: Arc::clone(&attached),
        };
        // Registered before spawning: the task unregisters itself on exit.
        self.entries().insert(
            id,
            Entry {
                attached,
                handle: None,
            },
        );
        let future = task(attachment);
        let registry = self.clone();
        let handle = tokio::spawn(async move {
            future.await;
            registry.entries().remove(&id);
        });
        if let Some(entry) = self.entries().get_mut(&id) {
            entry.handle = Some(handle);
        }
        id
    }

    /// Stop one operation's completion handler from touching shared state.
    /// Returns `false` if the id is unknown or already settled.
    pub fn detach(&self, id: OperationId) -> bool {
        match self.entries().get(&id) {
            Some(entry) => {
                entry.attached.store(false, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    /// Detach every operation currently in flight (view teardown).
    pub fn detach_all(&self) {
        for entry in self.entries().values() {
            entry.attached.store(false, Ordering::SeqCst);
        }
    }

    /// Number of operations not yet settled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries().len()
    }

    /// Wait until no operation is in flight, including ones spawned by
    /// operations that were themselves being awaited.
    pub async fn settle(&self) {
        loop {
            let handles: Vec<_> = self
                .entries()
                .iter_mut()
                .filter_map(|(id, entry)| entry.handle.take().map(|h| (*id, h)))
                .collect();
            if handles.is_empty() {
                if self.pending() == 0 {
                    return;
                }
                // Entries without a handle are mid-spawn or being awaited
                // by another caller.
                tokio::task::yield_now().await;
                continue;
            }
            for (id, handle) in handles {
                if let Err(error) = handle.await {
                    tracing::warn!(%id, %error, "background operation panicked");
                }
                self.entries().remove(&id);
            }
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<OperationId, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

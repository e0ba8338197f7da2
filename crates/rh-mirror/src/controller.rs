//! Optimistic mutation over a [`LocalMirror`].
//!
//! Deletes are applied locally first and confirmed in the background; a
//! failed confirmation triggers a resync that replaces the mirror with the
//! remote collection. Creates go to the remote side first because the
//! server assigns the id.
//!
//! A resync never resurrects an id whose delete is still in flight, and it
//! re-fetches if any mutation completed while it was fetching. Together
//! these keep the mirror equal to the remote collection once
//! [`OptimisticController::settle`] returns.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::collection::Collection;
use crate::error::MirrorError;
use crate::mirror::{Identified, LocalMirror};
use crate::notice::{Notice, Notifier};
use crate::operations::{Attachment, OperationId, OperationRegistry};

type IdOf<C> = <<C as Collection>::Item as Identified>::Id;

/// Resync attempts before a possibly stale fetch is applied anyway.
const MAX_RESYNC_ROUNDS: usize = 16;

/// What [`OptimisticController::apply_delete`] did locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// The background confirmation.
    pub operation: OperationId,
    /// `false` if the id was already absent from the mirror.
    pub removed: bool,
}

struct Shared<T: Identified> {
    mirror: LocalMirror<T>,
    pending_deletes: HashMap<T::Id, usize>,
    /// Bumped whenever a remote mutation completes.
    epoch: u64,
}

impl<T: Identified> Shared<T> {
    fn begin_delete(&mut self, id: &T::Id) {
        *self.pending_deletes.entry(id.clone()).or_default() += 1;
    }

    fn finish_delete(&mut self, id: &T::Id) {
        if let Some(count) = self.pending_deletes.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                self.pending_deletes.remove(id);
            }
        }
        self.epoch += 1;
    }
}

struct Inner<C: Collection> {
    collection: C,
    state: Mutex<Shared<C::Item>>,
    registry: OperationRegistry,
    notifier: Notifier,
}

impl<C: Collection> Inner<C> {
    fn state(&self) -> MutexGuard<'_, Shared<C::Item>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch and replace the mirror. `attachment` gates the final write.
    async fn resync(&self, attachment: Option<&Attachment>) -> Result<bool, MirrorError> {
        for round in 1..=MAX_RESYNC_ROUNDS {
            let started = self.state().epoch;
            let fetched = self.collection.fetch_all().await?;

            let mut state = self.state();
            if state.epoch != started && round < MAX_RESYNC_ROUNDS {
                tracing::debug!(round, "collection changed during resync; fetching again");
                continue;
            }
            if attachment.is_some_and(|a| !a.is_attached()) {
                tracing::debug!("resync finished after detach; mirror left alone");
                return Ok(false);
            }
            let pending = &state.pending_deletes;
            let items: Vec<_> = fetched
                .into_iter()
                .filter(|item| !pending.contains_key(item.id()))
                .collect();
            state.mirror.replace_all(items);
            tracing::info!(
                noun = self.collection.noun(),
                items = state.mirror.len(),
                "mirror resynchronized"
            );
            return Ok(true);
        }
        Ok(false)
    }

    fn spawn_resync(self: &Arc<Self>) -> OperationId {
        let inner = Arc::clone(self);
        self.registry.spawn(move |attachment| async move {
            if let Err(error) = inner.resync(Some(&attachment)).await {
                tracing::warn!(
                    noun = inner.collection.noun(),
                    %error,
                    "background resync failed; mirror may be stale"
                );
            }
        })
    }
}

/// Optimistic mutation controller for one collection.
///
/// Clones share the mirror and the operation registry.
pub struct OptimisticController<C: Collection> {
    inner: Arc<Inner<C>>,
}

impl<C: Collection> Clone for OptimisticController<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Collection> OptimisticController<C> {
    pub fn new(collection: C, notifier: Notifier) -> Self {
        Self::with_items(collection, notifier, Vec::new())
    }

    /// Controller whose mirror starts from already fetched items.
    pub fn with_items(collection: C, notifier: Notifier, items: Vec<C::Item>) -> Self {
        Self {
            inner: Arc::new(Inner {
                collection,
                state: Mutex::new(Shared {
                    mirror: LocalMirror::from_items(items),
                    pending_deletes: HashMap::new(),
                    epoch: 0,
                }),
                registry: OperationRegistry::new(),
                notifier,
            }),
        }
    }

    #[must_use]
    pub fn collection(&self) -> &C {
        &self.inner.collection
    }

    #[must_use]
    pub fn registry(&self) -> &OperationRegistry {
        &self.inner.registry
    }

    /// Read the mirror under the lock.
    pub fn with_mirror<R>(&self, read: impl FnOnce(&LocalMirror<C::Item>) -> R) -> R {
        read(&self.inner.state().mirror)
    }

    /// Change the selection (or anything else local) under the lock.
    pub fn with_mirror_mut<R>(&self, write: impl FnOnce(&mut LocalMirror<C::Item>) -> R) -> R {
        write(&mut self.inner.state().mirror)
    }

    #[must_use]
    pub fn items(&self) -> Vec<C::Item> {
        self.with_mirror(|m| m.items().to_vec())
    }

    #[must_use]
    pub fn ids(&self) -> Vec<IdOf<C>> {
        self.with_mirror(LocalMirror::ids)
    }

    #[must_use]
    pub fn selected(&self) -> Vec<C::Item> {
        self.with_mirror(|m| m.selected_items().into_iter().cloned().collect())
    }

    /// Initial load: fetch the collection and replace the mirror.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Client`] if the fetch fails; the mirror is
    /// left as it was.
    pub async fn load(&self) -> Result<(), MirrorError> {
        self.inner.resync(None).await.map(|_| ())
    }

    /// Foreground resync that reports failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Client`] if the fetch fails.
    pub async fn resync(&self) -> Result<(), MirrorError> {
        self.load().await
    }

    /// Remove `id` from the mirror now and confirm in the background.
    ///
    /// A remote 404 counts as success. Any other failure is logged and
    /// corrected by a background resync; it is never returned.
    pub fn apply_delete(&self, id: &IdOf<C>) -> DeleteOutcome {
        let removed = {
            let mut state = self.inner.state();
            state.begin_delete(id);
            state.mirror.remove(id)
        };

        let noun = self.inner.collection.noun();
        if let Some(item) = &removed {
            self.inner.notifier.notify(Notice::success(format!(
                "Deleted {noun} '{}'",
                C::label(item)
            )));
        } else {
            tracing::debug!(noun, ?id, "delete of an id already absent from the mirror");
        }

        let inner = Arc::clone(&self.inner);
        let id = id.clone();
        let operation = self.inner.registry.spawn(move |attachment| async move {
            let result = inner.collection.delete(&id).await;
            inner.state().finish_delete(&id);
            match result {
                Ok(()) => tracing::debug!(noun, ?id, "delete confirmed"),
                Err(error) if error.is_not_found() => {
                    tracing::debug!(noun, ?id, "already deleted remotely");
                }
                Err(error) => {
                    tracing::warn!(noun, ?id, %error, "delete failed; resynchronizing");
                    if attachment.is_attached() {
                        inner.spawn_resync();
                    }
                }
            }
        });

        DeleteOutcome {
            operation,
            removed: removed.is_some(),
        }
    }

    /// Create remotely, then append the canonical entity and refresh
    /// derived fields in the background.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Validation`] for an incomplete draft and
    /// [`MirrorError::Client`] if the remote create fails. The mirror is
    /// unchanged in both cases.
    pub async fn apply_create(&self, draft: &C::Draft) -> Result<C::Item, MirrorError> {
        let noun = self.inner.collection.noun();
        let created = match self.create_remote(draft).await {
            Ok(created) => created,
            Err(error) => {
                self.inner
                    .notifier
                    .notify(Notice::error(format!("Failed to create {noun}: {error}")));
                return Err(error);
            }
        };

        {
            let mut state = self.inner.state();
            state.epoch += 1;
            state.mirror.upsert(created.clone());
        }
        self.inner.notifier.notify(Notice::success(format!(
            "Created {noun} '{}'",
            C::label(&created)
        )));
        self.inner.spawn_resync();
        Ok(created)
    }

    async fn create_remote(&self, draft: &C::Draft) -> Result<C::Item, MirrorError> {
        self.inner.collection.validate(draft)?;
        Ok(self.inner.collection.create(draft).await?)
    }

    /// Wait for every background operation, including resyncs they start.
    pub async fn settle(&self) {
        self.inner.registry.settle().await;
    }

    pub fn detach(&self, operation: OperationId) -> bool {
        self.inner.registry.detach(operation)
    }

    /// View teardown: in-flight operations complete without touching the
    /// mirror.
    pub fn detach_all(&self) {
        self.inner.registry.detach_all();
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.registry.pending()
    }
}

//! Optimistic reaction counter
//!
//! A `ReactionCounter` owns the locally observable reaction bundle of one
//! story or comment. An increment shows up locally before the store write
//! resolves; a failed write puts the previous bundle back.
//!
//! Writes replace the whole `reactions` field. Two counters working on the
//! same record (another visitor, another tab) are not coordinated and the
//! last write wins.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use regret_core::{
    field, Collection, DocumentStore, DomainError, Fields, ReactionBundle, ReactionKind,
    RepoResult,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

/// Record a counter writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTarget {
    pub collection: Collection,
    pub record_id: String,
}

impl CounterTarget {
    pub fn new(collection: Collection, record_id: impl Into<String>) -> Self {
        Self {
            collection,
            record_id: record_id.into(),
        }
    }

    pub fn story(record_id: impl Into<String>) -> Self {
        Self::new(Collection::Regrets, record_id)
    }

    pub fn comment(record_id: impl Into<String>) -> Self {
        Self::new(Collection::Comments, record_id)
    }
}

/// Told how each increment ended
pub trait CounterObserver: Send + Sync {
    fn on_committed(&self, target: &CounterTarget, kind: ReactionKind, bundle: &ReactionBundle);

    fn on_failed(&self, target: &CounterTarget, kind: ReactionKind, error: &DomainError);
}

/// Observer that reports outcomes through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CounterObserver for TracingObserver {
    fn on_committed(&self, target: &CounterTarget, kind: ReactionKind, bundle: &ReactionBundle) {
        info!(
            collection = %target.collection,
            record_id = %target.record_id,
            kind = %kind,
            count = bundle.get(kind),
            "Reaction recorded"
        );
    }

    fn on_failed(&self, target: &CounterTarget, kind: ReactionKind, error: &DomainError) {
        warn!(
            collection = %target.collection,
            record_id = %target.record_id,
            kind = %kind,
            error = %error,
            "Failed to record reaction, reverted"
        );
    }
}

/// Optimistic updater for the reaction bundle of one record
pub struct ReactionCounter<S: DocumentStore + ?Sized = dyn DocumentStore> {
    store: Arc<S>,
    target: CounterTarget,
    local: RwLock<ReactionBundle>,
    in_flight: Mutex<HashSet<ReactionKind>>,
    observer: Arc<dyn CounterObserver>,
}

impl<S: DocumentStore + ?Sized> ReactionCounter<S> {
    /// Counter seeded with the bundle last read from the store
    pub fn new(store: Arc<S>, target: CounterTarget, seed: ReactionBundle) -> Self {
        Self {
            store,
            target,
            local: RwLock::new(seed),
            in_flight: Mutex::new(HashSet::new()),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CounterObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn target(&self) -> &CounterTarget {
        &self.target
    }

    /// Locally observable bundle
    pub fn current(&self) -> ReactionBundle {
        self.local.read().clone()
    }

    /// Whether an increment of `kind` is waiting on the store
    pub fn is_in_flight(&self, kind: ReactionKind) -> bool {
        self.in_flight.lock().contains(&kind)
    }

    /// Add one to `kind`, locally first, then in the store
    ///
    /// A second increment of the same kind while the first is outstanding is
    /// rejected with `ReactionInFlight`. On store failure the local bundle is
    /// put back to what it was before this call and the error is returned;
    /// there is no retry. That snapshot also drops any other kind committed
    /// locally while this write was outstanding, even though the store keeps it.
    #[instrument(skip(self), fields(record_id = %self.target.record_id))]
    pub async fn increment(&self, kind: ReactionKind) -> RepoResult<ReactionBundle> {
        let _pending = InFlight::claim(&self.in_flight, kind)?;

        let (current, next) = {
            let mut local = self.local.write();
            let current = local.clone();
            let next = current.incremented(kind);
            *local = next.clone();
            (current, next)
        };

        let mut patch = Fields::new();
        patch.insert(field::REACTIONS.into(), Value::from(next.serialize()));

        match self
            .store
            .update(self.target.collection, &self.target.record_id, patch)
            .await
        {
            Ok(_) => {
                self.observer.on_committed(&self.target, kind, &next);
                Ok(next)
            }
            Err(err) => {
                *self.local.write() = current;
                self.observer.on_failed(&self.target, kind, &err);
                Err(err)
            }
        }
    }
}

impl<S: DocumentStore + ?Sized> std::fmt::Debug for ReactionCounter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionCounter")
            .field("target", &self.target)
            .field("local", &*self.local.read())
            .finish()
    }
}

/// Marks a kind as outstanding until dropped, including when the increment
/// future is cancelled
struct InFlight<'a> {
    set: &'a Mutex<HashSet<ReactionKind>>,
    kind: ReactionKind,
}

impl<'a> InFlight<'a> {
    fn claim(set: &'a Mutex<HashSet<ReactionKind>>, kind: ReactionKind) -> RepoResult<Self> {
        let inserted = set.lock().insert(kind);
        if inserted {
            Ok(Self { set, kind })
        } else {
            Err(DomainError::ReactionInFlight(kind))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use regret_core::{Document, DocumentList, ListQuery};
    use regret_db::MemoryDocumentStore;
    use tokio::sync::Notify;

    /// Store whose updates wait until released
    struct GatedStore {
        inner: MemoryDocumentStore,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl DocumentStore for GatedStore {
        async fn list(&self, collection: Collection, query: &ListQuery) -> RepoResult<DocumentList> {
            self.inner.list(collection, query).await
        }

        async fn get(&self, collection: Collection, id: &str) -> RepoResult<Option<Document>> {
            self.inner.get(collection, id).await
        }

        async fn create(&self, collection: Collection, id: &str, fields: Fields) -> RepoResult<Document> {
            self.inner.create(collection, id, fields).await
        }

        async fn update(&self, collection: Collection, id: &str, fields: Fields) -> RepoResult<Document> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.update(collection, id, fields).await
        }
    }

    /// Store whose updates always fail
    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn list(&self, _: Collection, _: &ListQuery) -> RepoResult<DocumentList> {
            Ok(DocumentList::default())
        }

        async fn get(&self, _: Collection, _: &str) -> RepoResult<Option<Document>> {
            Ok(None)
        }

        async fn create(&self, _: Collection, _: &str, _: Fields) -> RepoResult<Document> {
            Err(DomainError::Store("unavailable".into()))
        }

        async fn update(&self, _: Collection, _: &str, _: Fields) -> RepoResult<Document> {
            Err(DomainError::Store("unavailable".into()))
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl CounterObserver for RecordingObserver {
        fn on_committed(&self, _: &CounterTarget, kind: ReactionKind, bundle: &ReactionBundle) {
            self.events.lock().push(format!("committed {kind} {}", bundle.get(kind)));
        }

        fn on_failed(&self, _: &CounterTarget, kind: ReactionKind, _: &DomainError) {
            self.events.lock().push(format!("failed {kind}"));
        }
    }

    const STORED: &str = r#"{"hugs":2,"me_too":0,"wisdom":5}"#;

    async fn store_with(reactions: &str) -> MemoryDocumentStore {
        let store = MemoryDocumentStore::new();
        let mut fields = Fields::new();
        fields.insert(field::REACTIONS.into(), Value::from(reactions));
        store.create(Collection::Regrets, "s1", fields).await.unwrap();
        store
    }

    async fn seeded_store() -> MemoryDocumentStore {
        store_with(r#"{"me_too":2,"hugs":0,"wisdom":1}"#).await
    }

    fn stored_seed() -> ReactionBundle {
        ReactionBundle::parse(Some(STORED), &ReactionBundle::story_default())
    }

    fn stored_reactions(doc: &Document) -> ReactionBundle {
        ReactionBundle::parse(doc.str_field(field::REACTIONS), &ReactionBundle::story_default())
    }

    #[tokio::test]
    async fn test_increment_commits() {
        let store = Arc::new(seeded_store().await);
        let seed = ReactionBundle::story_default().with(ReactionKind::MeToo, 2).with(ReactionKind::Wisdom, 1);
        let observer = Arc::new(RecordingObserver::default());
        let counter = ReactionCounter::new(store.clone(), CounterTarget::story("s1"), seed)
            .with_observer(observer.clone());

        let next = counter.increment(ReactionKind::MeToo).await.unwrap();

        assert_eq!(next.get(ReactionKind::MeToo), 3);
        assert_eq!(counter.current(), next);
        let doc = store.get(Collection::Regrets, "s1").await.unwrap().unwrap();
        assert_eq!(stored_reactions(&doc), next);
        assert_eq!(*observer.events.lock(), vec!["committed me_too 3".to_string()]);
        assert!(!counter.is_in_flight(ReactionKind::MeToo));
    }

    #[tokio::test]
    async fn test_local_state_advances_before_store_resolves() {
        let store = Arc::new(GatedStore {
            inner: seeded_store().await,
            entered: Notify::new(),
            release: Notify::new(),
        });
        let counter = Arc::new(ReactionCounter::new(
            store.clone(),
            CounterTarget::story("s1"),
            ReactionBundle::story_default(),
        ));

        let task = tokio::spawn({
            let counter = Arc::clone(&counter);
            async move { counter.increment(ReactionKind::Hugs).await }
        });
        store.entered.notified().await;

        assert_eq!(counter.current().get(ReactionKind::Hugs), 1);
        assert!(counter.is_in_flight(ReactionKind::Hugs));
        let doc = store.get(Collection::Regrets, "s1").await.unwrap().unwrap();
        assert_eq!(stored_reactions(&doc).get(ReactionKind::Hugs), 0);

        let second = counter.increment(ReactionKind::Hugs).await;
        assert!(matches!(second, Err(DomainError::ReactionInFlight(ReactionKind::Hugs))));

        store.release.notify_one();
        let committed = task.await.unwrap().unwrap();
        assert_eq!(committed.get(ReactionKind::Hugs), 1);
        assert!(!counter.is_in_flight(ReactionKind::Hugs));
    }

    #[tokio::test]
    async fn test_failed_write_reverts() {
        let seed = ReactionBundle::story_default().with(ReactionKind::Wisdom, 4);
        let observer = Arc::new(RecordingObserver::default());
        let counter = ReactionCounter::new(Arc::new(FailingStore), CounterTarget::story("s1"), seed.clone())
            .with_observer(observer.clone());

        let result = counter.increment(ReactionKind::Wisdom).await;

        assert!(matches!(result, Err(DomainError::Store(_))));
        assert_eq!(counter.current(), seed);
        assert_eq!(*observer.events.lock(), vec!["failed wisdom".to_string()]);
        assert!(!counter.is_in_flight(ReactionKind::Wisdom));
    }

    #[tokio::test]
    async fn test_counter_over_trait_object() {
        let store: Arc<dyn DocumentStore> = Arc::new(seeded_store().await);
        let counter: ReactionCounter = ReactionCounter::new(
            store,
            CounterTarget::story("s1"),
            ReactionBundle::story_default(),
        );

        let next = counter.increment(ReactionKind::Hugs).await.unwrap();
        assert_eq!(next.get(ReactionKind::Hugs), 1);
    }

    #[tokio::test]
    async fn test_sequential_increments_of_different_kinds() {
        let store = Arc::new(store_with(STORED).await);
        let counter = ReactionCounter::new(store.clone(), CounterTarget::story("s1"), stored_seed());

        counter.increment(ReactionKind::Hugs).await.unwrap();
        let last = counter.increment(ReactionKind::Wisdom).await.unwrap();

        let expected = r#"{"me_too":0,"hugs":3,"wisdom":6}"#;
        assert_eq!(last.serialize(), expected);
        assert_eq!(counter.current().serialize(), expected);
        let doc = store.get(Collection::Regrets, "s1").await.unwrap().unwrap();
        assert_eq!(doc.str_field(field::REACTIONS), Some(expected));
    }

    #[tokio::test]
    async fn test_hugs_shows_locally_while_write_is_pending() {
        let store = Arc::new(GatedStore {
            inner: store_with(STORED).await,
            entered: Notify::new(),
            release: Notify::new(),
        });
        let counter = Arc::new(ReactionCounter::new(
            store.clone(),
            CounterTarget::story("s1"),
            stored_seed(),
        ));

        let task = tokio::spawn({
            let counter = Arc::clone(&counter);
            async move { counter.increment(ReactionKind::Hugs).await }
        });
        store.entered.notified().await;

        assert_eq!(counter.current().serialize(), r#"{"me_too":0,"hugs":3,"wisdom":5}"#);
        let doc = store.get(Collection::Regrets, "s1").await.unwrap().unwrap();
        assert_eq!(doc.str_field(field::REACTIONS), Some(STORED));

        store.release.notify_one();
        task.await.unwrap().unwrap();
        let doc = store.get(Collection::Regrets, "s1").await.unwrap().unwrap();
        assert_eq!(stored_reactions(&doc).get(ReactionKind::Hugs), 3);
    }

    #[tokio::test]
    async fn test_failed_hugs_restores_stored_bundle() {
        let counter = ReactionCounter::new(Arc::new(FailingStore), CounterTarget::story("s1"), stored_seed());

        let result = counter.increment(ReactionKind::Hugs).await;

        assert!(matches!(result, Err(DomainError::Store(_))));
        assert_eq!(counter.current(), stored_seed());
        assert_eq!(counter.current().serialize(), r#"{"me_too":0,"hugs":2,"wisdom":5}"#);
    }
}

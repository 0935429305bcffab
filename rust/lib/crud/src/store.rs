//! Generic CRUD store: list state for one collection plus the mutations
//! that keep it in sync with the server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use malha_client::ResourceClient;
use malha_core::Envelope;
use malha_model::Resource;
use tracing::{debug, warn};

/// Message used when a list fetch fails without an error from the server.
pub const FETCH_FAILED: &str = "failed to load data";

/// Remote operations a [`CrudStore`] drives.
///
/// Implemented for every [`ResourceClient`]; tests plug in fakes.
#[async_trait::async_trait]
pub trait CrudApi: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type Create: Send + Sync;
    type Update: Send + Sync;

    async fn fetch_items(&self) -> Envelope<Vec<Self::Item>>;
    async fn create_item(&self, data: &Self::Create) -> Envelope<Self::Item>;
    async fn update_item(&self, id: &str, data: &Self::Update) -> Envelope<Self::Item>;
    async fn delete_item(&self, id: &str) -> Envelope<()>;
}

#[async_trait::async_trait]
impl<R: Resource> CrudApi for ResourceClient<R> {
    type Item = R;
    type Create = R::Create;
    type Update = R::Update;

    async fn fetch_items(&self) -> Envelope<Vec<R>> {
        self.list().await
    }

    async fn create_item(&self, data: &R::Create) -> Envelope<R> {
        self.create(data).await
    }

    async fn update_item(&self, id: &str, data: &R::Update) -> Envelope<R> {
        self.update(id, data).await
    }

    async fn delete_item(&self, id: &str) -> Envelope<()> {
        self.delete(id).await
    }
}

/// Snapshot of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct CrudState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// Handle returned by [`CrudStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callback invoked with the new state after every transition.
pub type StateHandler<T> = Arc<dyn Fn(&CrudState<T>) + Send + Sync>;

/// List state for one collection.
///
/// - `fetch()` replaces the list with the server's, or empties it and
///   records the error.
/// - `create()`, `update()` and `remove()` call the API and, only when the
///   call succeeds, re-fetch exactly once. The list is never patched locally.
/// - `subscribe(handler)` is told about every state transition.
pub struct CrudStore<A: CrudApi> {
    api: A,
    state: RwLock<CrudState<A::Item>>,
    handlers: RwLock<Vec<(SubscriptionId, StateHandler<A::Item>)>>,
    next_id: AtomicU64,
}

impl<A: CrudApi> CrudStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(CrudState::default()),
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> CrudState<A::Item> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn items(&self) -> Vec<A::Item> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).items.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).error.clone()
    }

    /// Load the full list from the server.
    ///
    /// A failed fetch clears previously loaded items.
    pub async fn fetch(&self) {
        self.transition(|s| {
            s.loading = true;
            s.error = None;
        });

        let envelope = self.api.fetch_items().await;

        self.transition(|s| {
            s.loading = false;
            match envelope {
                Envelope { success: true, data: Some(items), .. } => {
                    debug!(count = items.len(), "list loaded");
                    s.items = items;
                }
                Envelope { error, .. } => {
                    let message = error.unwrap_or_else(|| FETCH_FAILED.to_string());
                    warn!(error = %message, "list fetch failed");
                    s.items.clear();
                    s.error = Some(message);
                }
            }
        });
    }

    pub async fn create(&self, data: &A::Create) -> Envelope<A::Item> {
        let envelope = self.api.create_item(data).await;
        if envelope.success {
            self.fetch().await;
        }
        envelope
    }

    pub async fn update(&self, id: &str, data: &A::Update) -> Envelope<A::Item> {
        let envelope = self.api.update_item(id, data).await;
        if envelope.success {
            self.fetch().await;
        }
        envelope
    }

    pub async fn remove(&self, id: &str) -> Envelope<()> {
        let envelope = self.api.delete_item(id).await;
        if envelope.success {
            self.fetch().await;
        }
        envelope
    }

    /// Register a handler for state changes.
    ///
    /// Handlers run synchronously after each transition, outside any lock.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&CrudState<A::Item>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(sid, _)| *sid != id);
    }

    fn transition(&self, f: impl FnOnce(&mut CrudState<A::Item>)) {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut *state);
            state.clone()
        };
        let handlers: Vec<StateHandler<A::Item>> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
    }

    fn row(id: &str, name: &str) -> Row {
        Row { id: id.into(), name: name.into() }
    }

    /// In-memory backend that counts calls and can be told to fail.
    #[derive(Default)]
    struct FakeApi {
        rows: Mutex<Vec<Row>>,
        fetches: AtomicUsize,
        fail_fetch: AtomicBool,
        fail_fetch_silently: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl FakeApi {
        fn with_rows(rows: Vec<Row>) -> Self {
            Self { rows: Mutex::new(rows), ..Default::default() }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CrudApi for FakeApi {
        type Item = Row;
        type Create = String;
        type Update = String;

        async fn fetch_items(&self) -> Envelope<Vec<Row>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Envelope::fail("HTTP 500");
            }
            if self.fail_fetch_silently.load(Ordering::SeqCst) {
                return Envelope { success: false, data: None, error: None };
            }
            Envelope::ok(Some(self.rows.lock().unwrap().clone()))
        }

        async fn create_item(&self, name: &String) -> Envelope<Row> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Envelope::fail("Nome é obrigatório");
            }
            let mut rows = self.rows.lock().unwrap();
            let created = row(&(rows.len() + 1).to_string(), name);
            rows.push(created.clone());
            Envelope::ok(Some(created))
        }

        async fn update_item(&self, id: &str, name: &String) -> Envelope<Row> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Envelope::fail("not found");
            }
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|r| r.id == id) {
                Some(r) => {
                    r.name = name.clone();
                    Envelope::ok(Some(r.clone()))
                }
                None => Envelope::fail("not found"),
            }
        }

        async fn delete_item(&self, id: &str) -> Envelope<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Envelope::fail("in use");
            }
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Envelope::ok(None)
        }
    }

    // ========================================================================
    // fetch
    // ========================================================================

    #[tokio::test]
    async fn starts_empty() {
        let store = CrudStore::new(FakeApi::default());
        assert_eq!(store.state(), CrudState::default());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn fetch_replaces_items() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul"), row("2", "Verde")]));
        store.fetch().await;

        assert_eq!(store.items(), vec![row("1", "Azul"), row("2", "Verde")]);
        assert!(store.error().is_none());
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn failed_fetch_clears_items_and_sets_error() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul")]));
        store.fetch().await;
        assert_eq!(store.items().len(), 1);

        store.api().fail_fetch.store(true, Ordering::SeqCst);
        store.fetch().await;
        assert!(store.items().is_empty());
        assert_eq!(store.error().as_deref(), Some("HTTP 500"));
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn failed_fetch_without_message_uses_default() {
        let api = FakeApi::default();
        api.fail_fetch_silently.store(true, Ordering::SeqCst);
        let store = CrudStore::new(api);
        store.fetch().await;
        assert_eq!(store.error().as_deref(), Some(FETCH_FAILED));
    }

    #[tokio::test]
    async fn successful_fetch_clears_previous_error() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul")]));
        store.api().fail_fetch.store(true, Ordering::SeqCst);
        store.fetch().await;
        assert!(store.error().is_some());

        store.api().fail_fetch.store(false, Ordering::SeqCst);
        store.fetch().await;
        assert!(store.error().is_none());
        assert_eq!(store.items().len(), 1);
    }

    // ========================================================================
    // Mutations re-fetch only on success
    // ========================================================================

    #[tokio::test]
    async fn create_refetches_once() {
        let store = CrudStore::new(FakeApi::default());
        let env = store.create(&"Vinho".to_string()).await;

        assert!(env.success);
        assert_eq!(env.data.unwrap().name, "Vinho");
        assert_eq!(store.api().fetches(), 1);
        assert_eq!(store.items(), vec![row("1", "Vinho")]);
    }

    #[tokio::test]
    async fn update_refetches_once() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul")]));
        store.fetch().await;

        let env = store.update("1", &"Azul claro".to_string()).await;
        assert!(env.success);
        assert_eq!(store.api().fetches(), 2);
        assert_eq!(store.items()[0].name, "Azul claro");
    }

    #[tokio::test]
    async fn remove_refetches_once() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul"), row("2", "Verde")]));
        let env = store.remove("1").await;

        assert!(env.success);
        assert_eq!(store.api().fetches(), 1);
        assert_eq!(store.items(), vec![row("2", "Verde")]);
    }

    #[tokio::test]
    async fn failed_mutations_do_not_refetch() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul")]));
        store.fetch().await;
        store.api().fail_writes.store(true, Ordering::SeqCst);

        let created = store.create(&"Vinho".to_string()).await;
        assert_eq!(created.error.as_deref(), Some("Nome é obrigatório"));
        let updated = store.update("1", &"x".to_string()).await;
        assert!(!updated.success);
        let removed = store.remove("1").await;
        assert_eq!(removed.error.as_deref(), Some("in use"));

        assert_eq!(store.api().fetches(), 1);
        assert_eq!(store.items(), vec![row("1", "Azul")]);
        // Mutation errors are returned, not stored.
        assert!(store.error().is_none());
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    #[tokio::test]
    async fn subscribers_see_loading_then_result() {
        let store = CrudStore::new(FakeApi::with_rows(vec![row("1", "Azul")]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |s: &CrudState<Row>| {
            sink.lock().unwrap().push((s.loading, s.items.len()));
        });

        store.fetch().await;
        assert_eq!(*seen.lock().unwrap(), vec![(true, 0), (false, 1)]);
    }

    #[tokio::test]
    async fn unsubscribe_stops_notifications() {
        let store = CrudStore::new(FakeApi::default());
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        let id = store.subscribe(move |_: &CrudState<Row>| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.fetch().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        store.unsubscribe(id);
        store.fetch().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn subscription_ids_are_unique() {
        let store = CrudStore::new(FakeApi::default());
        let a = store.subscribe(|_: &CrudState<Row>| {});
        let b = store.subscribe(|_: &CrudState<Row>| {});
        assert_ne!(a, b);
    }
}

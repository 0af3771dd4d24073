// ── Generic reactive collection store ──
//
// Mirrors one remote REST collection in an ordered in-memory list and
// pushes every change to subscribers through a `watch` channel. Books and
// authors are two instantiations of the same type.

use std::marker::PhantomData;
use std::sync::Arc;

use shelf_api::ResourceClient;
use tokio::sync::watch;
use tracing::debug;

use super::loading::LoadingGuard;
use crate::error::CoreError;
use crate::model::{CatalogItem, EntityId};

/// Observable state of a [`CollectionStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    /// Items in server order; newly created items are appended.
    pub items: Arc<Vec<T>>,
    /// Last item loaded by [`CollectionStore::fetch_one`].
    pub selected: Option<T>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            selected: None,
            loading: false,
            last_error: None,
        }
    }
}

impl<T: CatalogItem> CollectionState<T> {
    /// Identities of the current items, in list order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().filter_map(|i| i.id().cloned()).collect()
    }

    /// Find a loaded item by identity.
    pub fn find(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|i| i.has_id(id))
    }
}

/// Keeps a local list consistent with a remote collection after fetches
/// and mutations.
///
/// Every operation:
/// - raises `loading` and clears `last_error` when it starts,
/// - always lowers `loading` when it ends,
/// - on failure records the message in `last_error` **and** returns the
///   error, leaving `items` as they were.
///
/// Overlapping calls are not coordinated: whichever response resolves
/// last writes last.
pub struct CollectionStore<T: CatalogItem> {
    client: ResourceClient,
    state: watch::Sender<CollectionState<T>>,
    _item: PhantomData<fn() -> T>,
}

impl<T: CatalogItem> CollectionStore<T> {
    pub fn new(client: ResourceClient) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            client,
            state,
            _item: PhantomData,
        }
    }

    /// The REST client backing this store.
    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Point-in-time copy of the state (items are shared, not copied).
    pub fn state(&self) -> CollectionState<T> {
        self.state.borrow().clone()
    }

    /// Current items (cheap `Arc` clone).
    pub fn items(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.state.borrow().items)
    }

    pub fn selected(&self) -> Option<T> {
        self.state.borrow().selected.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.state.subscribe()
    }

    // ── Remote operations ────────────────────────────────────────────

    /// Replace the local list wholesale with the remote collection.
    pub async fn fetch_all(&self) -> Result<Arc<Vec<T>>, CoreError> {
        let _loading = self.begin();

        let items = Arc::new(self.record(self.client.list::<T>().await)?);
        debug!(kind = T::KIND, count = items.len(), "collection fetched");

        let snapshot = Arc::clone(&items);
        self.state.send_modify(|s| s.items = snapshot);
        Ok(items)
    }

    /// Load one item into `selected`. The list itself is not touched.
    pub async fn fetch_one(&self, id: &EntityId) -> Result<T, CoreError> {
        let _loading = self.begin();

        let result = self
            .client
            .get::<T>(id.as_str())
            .await
            .map_err(|e| Self::not_found_or(id, e));
        let item = self.record(result)?;

        let selected = item.clone();
        self.state.send_modify(|s| s.selected = Some(selected));
        Ok(item)
    }

    /// Create an item. Identity always comes from the server: any id on
    /// the draft is stripped before sending.
    pub async fn create(&self, mut draft: T) -> Result<T, CoreError> {
        let _loading = self.begin();

        draft.clear_id();
        let created = self.record(self.client.create::<T, T>(&draft).await)?;
        let created = self.record(Self::require_id(created))?;
        debug!(kind = T::KIND, id = ?created.id(), "item created");

        let appended = created.clone();
        self.state.send_modify(|s| Arc::make_mut(&mut s.items).push(appended));
        Ok(created)
    }

    /// Replace an item remotely, then swap it into the local list.
    ///
    /// If no local item carries `id` the remote write still stands but the
    /// local view is left as it was; a later `fetch_all` reconciles.
    pub async fn update(&self, id: &EntityId, patch: T) -> Result<T, CoreError> {
        let _loading = self.begin();

        let result = self
            .client
            .replace::<T, T>(id.as_str(), &patch)
            .await
            .map_err(|e| Self::not_found_or(id, e));
        let updated = self.record(result)?;

        let replacement = updated.clone();
        self.state.send_modify(|s| {
            match s.items.iter().position(|i| i.has_id(id)) {
                Some(index) => Arc::make_mut(&mut s.items)[index] = replacement.clone(),
                None => debug!(kind = T::KIND, %id, "updated item not in local list"),
            }
            if s.selected.as_ref().is_some_and(|sel| sel.has_id(id)) {
                s.selected = Some(replacement);
            }
        });
        Ok(updated)
    }

    /// Delete an item remotely, then filter it out of the local list.
    pub async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        let _loading = self.begin();

        let result = self
            .client
            .remove(id.as_str())
            .await
            .map_err(|e| Self::not_found_or(id, e));
        self.record(result)?;
        debug!(kind = T::KIND, %id, "item deleted");

        self.state.send_modify(|s| {
            if s.items.iter().any(|i| i.has_id(id)) {
                Arc::make_mut(&mut s.items).retain(|i| !i.has_id(id));
            }
            if s.selected.as_ref().is_some_and(|sel| sel.has_id(id)) {
                s.selected = None;
            }
        });
        Ok(())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn begin(&self) -> LoadingGuard<'_, CollectionState<T>> {
        LoadingGuard::begin(
            &self.state,
            |s| {
                s.loading = true;
                s.last_error = None;
            },
            |s| s.loading = false,
        )
    }

    /// Capture a failure into `last_error` and pass the result through.
    fn record<V, E: Into<CoreError>>(&self, result: Result<V, E>) -> Result<V, CoreError> {
        result.map_err(|e| {
            let err: CoreError = e.into();
            debug!(kind = T::KIND, error = %err, "collection operation failed");
            let message = err.to_string();
            self.state.send_modify(|s| s.last_error = Some(message));
            err
        })
    }

    fn not_found_or(id: &EntityId, err: shelf_api::Error) -> CoreError {
        if err.is_not_found() {
            CoreError::NotFound {
                kind: T::KIND.to_owned(),
                identifier: id.to_string(),
            }
        } else {
            err.into()
        }
    }

    fn require_id(item: T) -> Result<T, CoreError> {
        if item.id().is_some_and(|id| !id.is_empty()) {
            Ok(item)
        } else {
            Err(CoreError::Validation {
                message: format!("server returned a {} without an id", T::KIND),
            })
        }
    }
}

impl<T: CatalogItem> std::fmt::Debug for CollectionStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CollectionStore")
            .field("resource", &self.client.resource())
            .field("items", &state.items.len())
            .field("loading", &state.loading)
            .field("last_error", &state.last_error)
            .finish()
    }
}

// ── Collection item capability ──
//
// Books and authors share every line of store logic. The only thing the
// store needs from an item is its identity and where it lives remotely.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::EntityId;

/// Minimal capability set for anything kept in a `CollectionStore`.
pub trait CatalogItem:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Remote collection name (`"books"`, `"authors"`).
    const RESOURCE: &'static str;

    /// Singular, human-readable kind used in logs and errors.
    const KIND: &'static str;

    /// Server-assigned identity. `None` only for unsaved drafts.
    fn id(&self) -> Option<&EntityId>;

    /// Drop any caller-supplied identity before a create.
    fn clear_id(&mut self);

    /// Whether this item carries the given identity.
    fn has_id(&self, id: &EntityId) -> bool {
        self.id() == Some(id)
    }
}

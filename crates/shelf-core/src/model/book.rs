use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CatalogItem, EntityId, lenient};

/// A book record as served by the `/books` collection.
///
/// Unknown fields are kept in `extra` and written back untouched, so a
/// replace never strips data this client does not model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(
        default,
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<EntityId>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Servers send this as a number, a numeric string or `""`.
    #[serde(
        default,
        deserialize_with = "lenient::opt_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_year: Option<i32>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl CatalogItem for Book {
    const RESOURCE: &'static str = "books";
    const KIND: &'static str = "book";

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn clear_id(&mut self) {
        self.id = None;
    }
}

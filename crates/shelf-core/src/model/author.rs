use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CatalogItem, EntityId, lenient};

/// An author record as served by the `/authors` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nationality: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl CatalogItem for Author {
    const RESOURCE: &'static str = "authors";
    const KIND: &'static str = "author";

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn clear_id(&mut self) {
        self.id = None;
    }
}

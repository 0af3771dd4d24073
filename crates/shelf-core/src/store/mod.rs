// ── Reactive stores ──
//
// Each store owns its state behind a `watch` channel: mutations go through
// the store's methods, readers take snapshots or subscribe.

pub mod collection;
pub(crate) mod loading;

pub use collection::{CollectionState, CollectionStore};

use crate::model::{Author, Book};

pub type BookStore = CollectionStore<Book>;
pub type AuthorStore = CollectionStore<Author>;

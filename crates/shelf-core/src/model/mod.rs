// ── Domain model ──
//
// Canonical types shared by the stores: item identity, the two catalog
// collections, and the authenticated session.

pub mod author;
pub mod book;
pub mod entity_id;
pub mod item;
mod lenient;
pub mod session;

pub use author::Author;
pub use book::Book;
pub use entity_id::EntityId;
pub use item::CatalogItem;
pub use session::Session;

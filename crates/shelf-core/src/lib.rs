//! Reactive data layer for the shelf catalog.
//!
//! - **[`Catalog`]**: facade owning every store below, built from a
//!   [`CatalogConfig`] plus a storage backend and an auth provider.
//! - **[`CollectionStore<T>`]**: mirrors one REST collection (books,
//!   authors) in an ordered list published through a `watch` channel.
//! - **[`SessionStore`]**: the optional signed-in user, checked against an
//!   [`AuthProvider`] and persisted through a [`KeyValueStorage`].
//! - **[`RouteGuard`]**: pure navigation decisions from route metadata and
//!   the session predicate.
//! - **[`Notifier`]**: one transient notification slot.

pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod notify;
pub mod session;
pub mod store;

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::CoreError;
pub use guard::{GuardDecision, Route, RouteGuard, RouteMeta};
pub use model::{Author, Book, CatalogItem, EntityId, Session};
pub use notify::{Notification, Notifier, Severity};
pub use session::{
    AuthProvider, FileStorage, Identity, KeyValueStorage, LoginOutcome, MemoryStorage,
    SessionState, SessionStore, StaticAllowList,
};
pub use store::{AuthorStore, BookStore, CollectionState, CollectionStore};

// ── Catalog facade ──
//
// Wires the two collection stores, the session, the notifier and the route
// guard together over one shared HTTP connection pool. Cheaply cloneable.

use std::sync::Arc;

use shelf_api::{ResourceClient, TlsMode, TransportConfig};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::guard::{GuardDecision, Route, RouteGuard};
use crate::model::{Author, Book, CatalogItem};
use crate::notify::Notifier;
use crate::session::{AuthProvider, KeyValueStorage, SessionStore};
use crate::store::{AuthorStore, BookStore};

/// Everything a front end needs to browse and administer the catalog.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    books: BookStore,
    authors: AuthorStore,
    session: SessionStore,
    notifier: Notifier,
    guard: RouteGuard,
}

impl Catalog {
    /// Build the stores. No network traffic happens here.
    pub fn new(
        config: CatalogConfig,
        storage: Arc<dyn KeyValueStorage>,
        auth: Arc<dyn AuthProvider>,
    ) -> Result<Self, CoreError> {
        let tls = if config.insecure {
            TlsMode::DangerAcceptInvalid
        } else {
            TlsMode::System
        };
        let http = TransportConfig::default()
            .with_timeout(config.timeout)
            .with_tls(tls)
            .build_client()?;

        let books = ResourceClient::with_client(http.clone(), &config.api_url, Book::RESOURCE)?;
        let authors = ResourceClient::with_client(http, &config.api_url, Author::RESOURCE)?;
        debug!(api_url = %config.api_url, "catalog initialised");

        let session = SessionStore::new(storage, auth).with_login_delay(config.login_delay);
        let guard = RouteGuard::new(config.login_path.clone(), config.dashboard_path.clone());

        Ok(Self {
            inner: Arc::new(CatalogInner {
                books: BookStore::new(books),
                authors: AuthorStore::new(authors),
                session,
                notifier: Notifier::new(),
                guard,
                config,
            }),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn books(&self) -> &BookStore {
        &self.inner.books
    }

    pub fn authors(&self) -> &AuthorStore {
        &self.inner.authors
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.inner.guard
    }

    /// Run the route guard against the current session.
    pub fn navigate(&self, to: &Route) -> GuardDecision {
        let decision = self
            .inner
            .guard
            .check(to, self.inner.session.is_authenticated());
        debug!(path = %to.path, %decision, "navigation checked");
        decision
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("api_url", &self.inner.config.api_url.as_str())
            .field("books", &self.inner.books)
            .field("authors", &self.inner.authors)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

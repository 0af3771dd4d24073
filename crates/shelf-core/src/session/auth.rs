// ── Authentication provider ──
//
// The session store never looks at credentials itself. It asks an
// `AuthProvider`, which today is a compiled-in allow-list and tomorrow can
// be a real identity service without touching the session contract.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

/// Identity returned by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub display_name: String,
}

/// Verifies an email/password pair.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Some(identity)` on an exact match, `None` otherwise.
    async fn authenticate(&self, email: &str, password: &SecretString) -> Option<Identity>;
}

/// A static credential entry. Read-only for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct CredentialRecord {
    pub email: &'static str,
    pub password: &'static str,
    pub display_name: &'static str,
}

/// Built-in demo accounts for the admin area.
const BUILTIN_ACCOUNTS: &[CredentialRecord] = &[
    CredentialRecord {
        email: "admin@shelf.dev",
        password: "Admin@123",
        display_name: "Shelf Admin",
    },
    CredentialRecord {
        email: "editor@shelf.dev",
        password: "editor123456",
        display_name: "Catalog Editor",
    },
];

/// Linear-scan allow-list over a fixed slice of [`CredentialRecord`]s.
#[derive(Debug, Clone, Copy)]
pub struct StaticAllowList {
    records: &'static [CredentialRecord],
}

impl StaticAllowList {
    pub const fn new(records: &'static [CredentialRecord]) -> Self {
        Self { records }
    }

    /// The accounts compiled into this build.
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_ACCOUNTS)
    }

    pub fn records(&self) -> &'static [CredentialRecord] {
        self.records
    }

    /// Synchronous lookup shared by the async trait impl.
    pub fn find(&self, email: &str, password: &str) -> Option<&'static CredentialRecord> {
        self.records
            .iter()
            .find(|r| r.email == email && r.password == password)
    }
}

impl Default for StaticAllowList {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl AuthProvider for StaticAllowList {
    async fn authenticate(&self, email: &str, password: &SecretString) -> Option<Identity> {
        self.find(email, password.expose_secret())
            .map(|r| Identity {
                email: r.email.to_owned(),
                display_name: r.display_name.to_owned(),
            })
    }
}

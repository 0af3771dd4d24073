// ── Runtime catalog configuration ──
//
// Describes where the data API lives and how to talk to it. Built by the
// front end and handed in; core never reads config files.

use std::time::Duration;

use url::Url;

use crate::guard::{DEFAULT_DASHBOARD_PATH, DEFAULT_LOGIN_PATH};
use crate::session::DEFAULT_LOGIN_DELAY;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one catalog instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Data API root; collections live at `{api_url}/books` etc.
    pub api_url: Url,
    pub timeout: Duration,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
    /// Simulated latency before each credential check.
    pub login_delay: Duration,
    pub login_path: String,
    pub dashboard_path: String,
}

impl CatalogConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: DEFAULT_TIMEOUT,
            insecure: false,
            login_delay: DEFAULT_LOGIN_DELAY,
            login_path: DEFAULT_LOGIN_PATH.into(),
            dashboard_path: DEFAULT_DASHBOARD_PATH.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }
}

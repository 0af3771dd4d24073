// ── Route guard ──
//
// Runs once per navigation attempt, synchronously, against the session
// predicate only. No network call, no re-check after the decision.

use std::fmt;

use url::form_urlencoded;

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_DASHBOARD_PATH: &str = "/admin";

/// Per-route access requirements, declared by the routing table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
}

impl RouteMeta {
    /// Open to everyone.
    pub const fn public() -> Self {
        Self {
            requires_auth: false,
            requires_guest: false,
        }
    }

    /// Admin area: signed-in users only.
    pub const fn admin() -> Self {
        Self {
            requires_auth: true,
            requires_guest: false,
        }
    }

    /// Sign-in page and friends: anonymous users only.
    pub const fn guest() -> Self {
        Self {
            requires_auth: false,
            requires_guest: true,
        }
    }
}

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(path: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            path: path.into(),
            meta,
        }
    }

    pub fn public(path: impl Into<String>) -> Self {
        Self::new(path, RouteMeta::public())
    }

    pub fn admin(path: impl Into<String>) -> Self {
        Self::new(path, RouteMeta::admin())
    }

    pub fn guest(path: impl Into<String>) -> Self {
        Self::new(path, RouteMeta::guest())
    }
}

/// What the navigation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Send to sign-in, remembering where the user wanted to go.
    RedirectToLogin { login_path: String, redirect: String },
    RedirectToDashboard { dashboard_path: String },
}

impl GuardDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }

    /// Where the navigation ends up, given the originally requested path.
    pub fn destination(&self, requested: &str) -> String {
        match self {
            Self::Proceed => requested.to_owned(),
            Self::RedirectToLogin {
                login_path,
                redirect,
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect", redirect)
                    .finish();
                format!("{login_path}?{query}")
            }
            Self::RedirectToDashboard { dashboard_path } => dashboard_path.clone(),
        }
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => f.write_str("proceed"),
            Self::RedirectToLogin { redirect, .. } => {
                write!(f, "redirect to login ({})", self.destination(redirect))
            }
            Self::RedirectToDashboard { dashboard_path } => {
                write!(f, "redirect to dashboard ({dashboard_path})")
            }
        }
    }
}

/// Decides whether a navigation may proceed.
///
/// | requires_auth | requires_guest | authenticated | outcome |
/// |---|---|---|---|
/// | true  | -    | false | login, carrying the path |
/// | true  | -    | true  | proceed |
/// | -     | true | true  | dashboard |
/// | -     | true | false | proceed |
/// | false | false| any   | proceed |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
    dashboard_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH, DEFAULT_DASHBOARD_PATH)
    }
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>, dashboard_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            dashboard_path: dashboard_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }

    pub fn check(&self, to: &Route, authenticated: bool) -> GuardDecision {
        if to.meta.requires_auth && !authenticated {
            return GuardDecision::RedirectToLogin {
                login_path: self.login_path.clone(),
                redirect: to.path.clone(),
            };
        }
        if to.meta.requires_guest && authenticated {
            return GuardDecision::RedirectToDashboard {
                dashboard_path: self.dashboard_path.clone(),
            };
        }
        GuardDecision::Proceed
    }
}

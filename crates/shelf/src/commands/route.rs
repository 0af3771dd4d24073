//! Route guard inspection.

use serde::Serialize;
use shelf_core::{Catalog, GuardDecision, Route, RouteMeta};

use crate::cli::{GlobalOpts, RouteArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct RouteReport {
    path: String,
    requires_auth: bool,
    requires_guest: bool,
    authenticated: bool,
    decision: &'static str,
    destination: String,
}

fn detail(r: &RouteReport) -> String {
    [
        format!("Path:          {}", r.path),
        format!("Requires auth: {}", r.requires_auth),
        format!("Guest only:    {}", r.requires_guest),
        format!("Signed in:     {}", r.authenticated),
        format!("Decision:      {}", r.decision),
        format!("Destination:   {}", r.destination),
    ]
    .join("\n")
}

/// Metadata the routing table would attach to `path`.
fn meta_for(catalog: &Catalog, path: &str, args: &RouteArgs) -> RouteMeta {
    let bare = path.split(['?', '#']).next().unwrap_or(path);
    let dashboard = catalog.guard().dashboard_path();
    let under_admin = bare == dashboard
        || bare
            .strip_prefix(dashboard)
            .is_some_and(|rest| rest.starts_with('/'));

    RouteMeta {
        requires_auth: args.requires_auth || under_admin,
        requires_guest: args.requires_guest || bare == catalog.guard().login_path(),
    }
}

pub fn handle(catalog: &Catalog, args: &RouteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let route = Route::new(args.path.clone(), meta_for(catalog, &args.path, args));
    let decision = catalog.navigate(&route);

    let report = RouteReport {
        destination: decision.destination(&route.path),
        decision: match decision {
            GuardDecision::Proceed => "proceed",
            GuardDecision::RedirectToLogin { .. } => "redirect_to_login",
            GuardDecision::RedirectToDashboard { .. } => "redirect_to_dashboard",
        },
        path: route.path,
        requires_auth: route.meta.requires_auth,
        requires_guest: route.meta.requires_guest,
        authenticated: catalog.session().is_authenticated(),
    };

    let out = output::render_single(global.output, &report, detail, |r| r.destination.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

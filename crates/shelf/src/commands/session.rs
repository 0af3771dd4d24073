//! Sign-in, sign-out and identity handlers.

use secrecy::SecretString;
use shelf_core::{Catalog, GuardDecision, LoginOutcome, Route, Session};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(s: &Session) -> String {
    [
        format!("Email:     {}", s.email),
        format!("Name:      {}", s.display_name),
        format!("Avatar:    {}", s.avatar_url),
        format!(
            "Signed in: {}",
            s.signed_in_at
                .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        ),
    ]
    .join("\n")
}

pub async fn login(
    catalog: &Catalog,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The sign-in page is guest-only.
    let login_page = Route::guest(catalog.guard().login_path());
    if let GuardDecision::RedirectToDashboard { .. } = catalog.navigate(&login_page) {
        if let Some(user) = catalog.session().current_user() {
            catalog.notifier().info(format!(
                "Already signed in as {}; run `shelf logout` to switch accounts",
                user.email
            ));
        }
        return Ok(());
    }

    let email = match args.email {
        Some(email) => email,
        None => util::prompt_line("Email: ")?,
    };
    util::require_non_empty("email", &email)?;

    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => SecretString::from(rpassword::prompt_password("Password: ")?),
    };

    match catalog.session().login(email.trim(), &password).await {
        LoginOutcome::Success => {
            let Some(user) = catalog.session().current_user() else {
                return Err(CliError::Storage {
                    message: "session vanished after sign-in".into(),
                });
            };
            catalog
                .notifier()
                .success(format!("Welcome, {}", user.display_name));
            let out = output::render_single(global.output, &user, detail, |s| s.email.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        LoginOutcome::Failure { error } => Err(CliError::AuthFailed { message: error }),
    }
}

pub fn logout(catalog: &Catalog) {
    let was_signed_in = catalog.session().is_authenticated();
    catalog.session().logout();
    if was_signed_in {
        catalog.notifier().success("Signed out");
    } else {
        catalog.notifier().info("Not signed in");
    }
}

pub fn whoami(catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    let user = catalog
        .session()
        .current_user()
        .ok_or_else(|| CliError::NotSignedIn {
            redirect: catalog.guard().login_path().to_owned(),
        })?;
    let out = output::render_single(global.output, &user, detail, |s| s.email.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

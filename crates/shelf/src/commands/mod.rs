//! Command dispatch: bridges CLI args -> catalog stores -> output formatting.

pub mod authors;
pub mod books;
pub mod config_cmd;
pub mod route;
pub mod session;
pub mod util;

use shelf_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    catalog: &Catalog,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(catalog, args, global).await,
        Command::Logout => {
            session::logout(catalog);
            Ok(())
        }
        Command::Whoami => session::whoami(catalog, global),
        Command::Books(args) => books::handle(catalog, args, global).await,
        Command::Authors(args) => authors::handle(catalog, args, global).await,
        Command::Route(args) => route::handle(catalog, &args, global),
        Command::Config(args) => config_cmd::handle(&args, global),
    }
}

//! CLI configuration: thin wrapper around `shelf_config`.
//!
//! Applies `GlobalOpts` flag overrides on top of file + environment and
//! builds the `Catalog` every catalog-bound command runs against.

use std::sync::Arc;

use shelf_core::{Catalog, FileStorage, StaticAllowList};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use shelf_config::{Config, config_path, load_config, save_config};

/// File + env config with CLI flags layered on top.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config()?;
    if let Some(ref url) = global.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
    Ok(cfg)
}

/// Build the catalog and reinstall any session left by an earlier run.
pub fn build_catalog(cfg: &Config) -> Result<Catalog, CliError> {
    let catalog_config = shelf_config::to_catalog_config(cfg)?;
    let storage = FileStorage::new(cfg.storage_path());
    debug!(path = %storage.path().display(), "using session storage");

    let catalog = Catalog::new(
        catalog_config,
        Arc::new(storage),
        Arc::new(StaticAllowList::builtin()),
    )?;
    catalog.session().restore_session();
    Ok(catalog)
}

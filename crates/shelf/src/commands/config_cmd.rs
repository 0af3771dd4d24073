//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

fn to_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg)
        .map(|s| s.trim_end().to_owned())
        .map_err(|e| CliError::Validation {
            field: "config".into(),
            reason: format!("failed to serialize config: {e}"),
        })
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists; pass --force to overwrite", path.display()),
                });
            }
            let cfg = config::effective_config(global)?;
            shelf_config::parse_api_url(&cfg.api_url)?;
            let written = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Wrote {}", written.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::effective_config(global)?;
            let out = match global.output {
                OutputFormat::Json | OutputFormat::JsonCompact => {
                    output::render_single(global.output, &cfg, |_| String::new(), |_| String::new())?
                }
                OutputFormat::Table | OutputFormat::Plain => to_toml(&cfg)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

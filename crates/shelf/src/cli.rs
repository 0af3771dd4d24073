//! Clap derive structures for the `shelf` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shelf -- browse and administer a book catalog
#[derive(Debug, Parser)]
#[command(
    name = "shelf",
    version,
    about = "Browse and administer a book catalog from the command line",
    long_about = "Browse books and authors served by a JSON REST API, and manage \
        them after signing in.\n\n\
        The session is kept on disk between invocations; `shelf logout` ends it.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Data API root URL (overrides config)
    #[arg(long, short = 'u', global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHELF_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in to the admin area
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse and manage books
    #[command(alias = "b")]
    Books(BooksArgs),

    /// Browse and manage authors
    #[command(alias = "a")]
    Authors(AuthorsArgs),

    /// Check where a navigation to PATH would end up
    Route(RouteArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "SHELF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Books ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub command: BooksCommand,
}

#[derive(Debug, Subcommand)]
pub enum BooksCommand {
    /// List all books
    #[command(alias = "ls")]
    List,

    /// Show one book
    Get {
        /// Book ID
        id: String,
    },

    /// Add a book (requires sign-in)
    Add {
        #[command(flatten)]
        fields: BookFields,

        /// Load the full payload from a JSON file
        #[arg(long, conflicts_with = "title")]
        from_file: Option<PathBuf>,
    },

    /// Edit a book (requires sign-in)
    Update {
        /// Book ID
        id: String,

        #[command(flatten)]
        fields: BookFields,

        /// Load the full replacement payload from a JSON file
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// Delete a book (requires sign-in)
    #[command(alias = "rm")]
    Delete {
        /// Book ID
        id: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct BookFields {
    /// Book title
    #[arg(long)]
    pub title: Option<String>,

    /// Author ID
    #[arg(long)]
    pub author_id: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Year of first publication
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i32>,

    /// Cover image URL
    #[arg(long)]
    pub cover_url: Option<String>,
}

// ── Authors ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthorsArgs {
    #[command(subcommand)]
    pub command: AuthorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthorsCommand {
    /// List all authors
    #[command(alias = "ls")]
    List,

    /// Show one author
    Get {
        /// Author ID
        id: String,
    },

    /// Add an author (requires sign-in)
    Add {
        #[command(flatten)]
        fields: AuthorFields,

        /// Load the full payload from a JSON file
        #[arg(long, conflicts_with = "name")]
        from_file: Option<PathBuf>,
    },

    /// Edit an author (requires sign-in)
    Update {
        /// Author ID
        id: String,

        #[command(flatten)]
        fields: AuthorFields,

        /// Load the full replacement payload from a JSON file
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// Delete an author (requires sign-in)
    #[command(alias = "rm")]
    Delete {
        /// Author ID
        id: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct AuthorFields {
    /// Author name
    #[arg(long)]
    pub name: Option<String>,

    /// Short biography
    #[arg(long)]
    pub bio: Option<String>,

    #[arg(long)]
    pub nationality: Option<String>,

    /// Portrait image URL
    #[arg(long)]
    pub photo_url: Option<String>,
}

// ── Route ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Path to navigate to (e.g. /admin/books)
    pub path: String,

    /// Treat the route as signed-in only (implied under /admin)
    #[arg(long)]
    pub requires_auth: bool,

    /// Treat the route as anonymous only (implied for the login page)
    #[arg(long)]
    pub requires_guest: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
}

//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Restwire CLI - call authenticated REST resources from the shell
///
/// Logs in with email and password, stores the issued bearer token, and
/// issues one request per invocation against a named resource.
#[derive(Parser, Debug)]
#[command(
    name = "restwire",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RESTWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the API (overrides configuration)
    #[arg(long, global = true, env = "RESTWIRE_BASE_URL")]
    pub base_url: Option<String>,

    /// File holding the bearer token (overrides configuration)
    #[arg(long, global = true, env = "RESTWIRE_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login(LoginArgs),

    /// Fetch a single entity: GET {resource}/{id}
    Get(ItemArgs),

    /// Fetch a whole collection: GET {resource}
    List(CollectionArgs),

    /// Create an entity: POST {resource}
    Create(CreateArgs),

    /// Replace an entity: PUT {resource}/{id}
    Replace(ReplaceArgs),

    /// Delete an entity: DELETE {resource}/{id}
    Delete(ItemArgs),

    /// Search a collection: POST {resource}/search
    Search(SearchArgs),

    /// Download binary content: GET {resource}/{id}/{sub_path}
    Fetch(FetchArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long, env = "RESTWIRE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Write the issued token to the token file
    #[arg(long)]
    pub save: bool,
}

/// A resource and one identifier
#[derive(Parser, Debug)]
pub struct ItemArgs {
    /// Resource name, e.g. invoices
    pub resource: String,

    /// Entity identifier
    pub id: String,
}

/// A resource collection
#[derive(Parser, Debug)]
pub struct CollectionArgs {
    /// Resource name, e.g. invoices
    pub resource: String,
}

/// Arguments for the create command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Resource name, e.g. invoices
    pub resource: String,

    /// JSON payload, or @path to read it from a file
    #[arg(short, long)]
    pub data: String,
}

/// Arguments for the replace command
#[derive(Parser, Debug)]
pub struct ReplaceArgs {
    /// Resource name, e.g. invoices
    pub resource: String,

    /// Entity identifier
    pub id: String,

    /// JSON payload, or @path to read it from a file
    #[arg(short, long)]
    pub data: String,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Resource name, e.g. invoices
    pub resource: String,

    /// JSON query object, or @path to read it from a file
    #[arg(short = 'Q', long, default_value = "{}")]
    pub query: String,
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Resource name, e.g. users
    pub resource: String,

    /// Entity identifier
    pub id: String,

    /// Trailing path, e.g. avatar
    pub sub_path: String,

    /// Write the bytes to this file instead of stdout
    #[arg(long = "save-to", value_name = "FILE")]
    pub save_to: Option<PathBuf>,

    /// Print a data: URL instead of raw bytes
    #[arg(long, conflicts_with = "save_to")]
    pub data_url: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// Validate the effective configuration
    Validate,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

//! Restwire CLI - Command-line interface for authenticated REST resources
//!
//! This is the main entry point for the Restwire CLI application, providing
//! commands for logging in and calling resource endpoints of a REST backend.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let result = run(cli).await;

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = command_name(&cli.command)))]
async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_with_file(cli.config.as_deref())?;
    config.apply_overrides(cli.base_url.clone(), cli.token_file.clone(), cli.timeout);

    // Logging depends on the file's [logging] section, so it starts after loading
    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let _timer = Timer::new("cli_execution");
    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(
        command = command_name(&cli.command),
        verbosity = cli.verbosity_level(),
        base_url = config.api.base_url.as_deref().unwrap_or("<unset>"),
        "Executing command"
    );

    match cli.command {
        Commands::Login(args) => handlers::handle_login(args, &config, &mut output).await,
        Commands::Get(args) => handlers::handle_get(args, &config, &mut output).await,
        Commands::List(args) => handlers::handle_list(args, &config, &mut output).await,
        Commands::Create(args) => handlers::handle_create(args, &config, &mut output).await,
        Commands::Replace(args) => handlers::handle_replace(args, &config, &mut output).await,
        Commands::Delete(args) => handlers::handle_delete(args, &config, &mut output).await,
        Commands::Search(args) => handlers::handle_search(args, &config, &mut output).await,
        Commands::Fetch(args) => handlers::handle_fetch(args, &config, &mut output).await,
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Subcommand name for log fields; arguments may carry a password
fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Login(_) => "login",
        Commands::Get(_) => "get",
        Commands::List(_) => "list",
        Commands::Create(_) => "create",
        Commands::Replace(_) => "replace",
        Commands::Delete(_) => "delete",
        Commands::Search(_) => "search",
        Commands::Fetch(_) => "fetch",
        Commands::Config(_) => "config",
        Commands::Completions(_) => "completions",
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.merge_with_file(&config.logging, verbosity);
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

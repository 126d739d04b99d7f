//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use restwire_core::FileCredentialStore;

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Validate => handle_config_validate(config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!("Config already exists at {} (use --force to overwrite)", path.display()))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Set api.base_url before issuing requests.")?;
    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let rendered = match args.format {
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
    };
    output.writeln(rendered.trim_end())
}

/// Handle config validate subcommand
fn handle_config_validate(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client_config = config.client_config()?;
    output.success(&format!("✓ Configuration is valid (base URL {})", client_config.base_url))?;

    let store = FileCredentialStore::new(&config.credentials.token_file);
    if store.read_token()?.is_none() {
        output.warning(&format!(
            "No token in {}; run `restwire login --save` first",
            store.path().display()
        ))?;
    }
    Ok(())
}

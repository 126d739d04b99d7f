//! Login command handler

use super::utils::{build_client, save_token};
use crate::cli::LoginArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;

/// Handle the login command
pub async fn handle_login(args: LoginArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let _timer = Timer::with_details("login", &args.email);

    output.info(&format!("Logging in as {}", args.email))?;
    let spinner = output.spinner("Waiting for server...");
    let result = client.login(&args.email, &args.password).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let response = result?;

    let mut user = serde_json::to_value(&response.data)?;
    if args.save {
        let token = response
            .data
            .token
            .as_deref()
            .ok_or_else(|| Error::other("Login succeeded but the response carried no token"))?;
        let path = &config.credentials.token_file;
        save_token(path, token)?;
        tracing::info!(path = %path.display(), "Stored bearer token");
        output.success(&format!("✓ Token saved to {}", path.display()))?;

        redaction::redact_json_value(&mut user);
    } else {
        output.success("✓ Logged in (token not saved; pass --save to store it)")?;
    }

    output.data(&user)
}

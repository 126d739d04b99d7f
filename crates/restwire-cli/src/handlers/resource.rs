//! Resource command handlers
//!
//! One request per invocation; the response body is printed in the
//! selected output format.

use super::utils::{build_client, parse_json_arg, print_response};
use crate::cli::{CollectionArgs, CreateArgs, FetchArgs, ItemArgs, ReplaceArgs, SearchArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde_json::Value;

/// Handle the get command
pub async fn handle_get(args: ItemArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let _timer = Timer::with_details("get", &args.resource);

    let response = client.get_one::<Value>(&args.resource, args.id.as_str()).await?;
    print_response(output, &response)
}

/// Handle the list command
pub async fn handle_list(args: CollectionArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let _timer = Timer::with_details("list", &args.resource);

    let response = client.get_collection::<Value>(&args.resource).await?;
    print_response(output, &response)
}

/// Handle the create command
pub async fn handle_create(args: CreateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let payload = parse_json_arg(&args.data)?;
    let client = build_client(config)?;
    let _timer = Timer::with_details("create", &args.resource);

    let response = client.create::<_, Value>(&args.resource, &payload).await?;
    print_response(output, &response)
}

/// Handle the replace command
pub async fn handle_replace(args: ReplaceArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let payload = parse_json_arg(&args.data)?;
    let client = build_client(config)?;
    let _timer = Timer::with_details("replace", &args.resource);

    let response = client
        .replace::<_, Value>(&args.resource, args.id.as_str(), &payload)
        .await?;
    print_response(output, &response)
}

/// Handle the delete command
pub async fn handle_delete(args: ItemArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let _timer = Timer::with_details("delete", &args.resource);

    let response = client.delete(&args.resource, args.id.as_str()).await?;
    output.success(&format!("✓ Deleted {}/{} ({})", args.resource, args.id, response.status))?;

    if let Some(body) = response.json::<Value>() {
        output.data(&body)?;
    }
    Ok(())
}

/// Handle the search command
pub async fn handle_search(args: SearchArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let query = parse_json_arg(&args.query)?;
    let client = build_client(config)?;
    let _timer = Timer::with_details("search", &args.resource);

    let response = client.search::<_, Value>(&args.resource, &query).await?;
    print_response(output, &response)
}

/// Handle the fetch command
pub async fn handle_fetch(args: FetchArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let _timer = Timer::with_details("fetch", &args.resource);

    let spinner = output.spinner(&format!("Downloading {}/{}/{}", args.resource, args.id, args.sub_path));
    let result = client
        .fetch_binary(&args.resource, args.id.as_str(), &args.sub_path)
        .await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let response = result?;

    if let Some(path) = &args.save_to {
        std::fs::write(path, &response.data)?;
        output.success(&format!(
            "✓ Saved {} bytes ({}) to {}",
            response.data.len(),
            response.content_type().unwrap_or("unknown type"),
            path.display()
        ))
    } else if args.data_url {
        output.writeln(&response.to_data_url())
    } else {
        output.write_bytes(&response.data)
    }
}

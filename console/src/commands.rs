//! Subcommand handlers. Each one writes its report to `out`; errors bubble
//! up as `anyhow::Error` for `main` to print.

use std::io::Write;

use anyhow::{bail, Context};
use ddash_core::pages::load_grid;
use ddash_core::timeline::{render, tasks_from_projects};
use ddash_core::{
    ApiClient, ApiError, ClientConfig, ListQuery, Project, ResourceKind, SortDirection,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command, DEFAULT_BASE_URL};

/// Enough rows for the timeline to cover the whole plan.
const TIMELINE_PAGE_SIZE: u32 = 500;

/// `--base-url`, else `DDASH_API_BASE`, else the local mock server.
pub fn config(cli: &Cli) -> ClientConfig {
    let mut config = match &cli.base_url {
        Some(base) => ClientConfig::new(base),
        None => ClientConfig::from_env_or(DEFAULT_BASE_URL),
    };
    for (name, value) in &cli.headers {
        config = config.header(name.as_str(), value.as_str());
    }
    if let Some(mode) = cli.credentials {
        config = config.credentials(mode);
    }
    config
}

pub fn client(cli: &Cli) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::with_reqwest(config(cli))?)
}

pub async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let client = client(&cli)?;
    debug!(base_url = client.base_url(), command = ?cli.command, "running");
    match cli.command {
        Command::List {
            resource,
            filter,
            sort,
            desc,
        } => list(&client, resource, filter.as_deref(), sort.as_deref(), desc, out).await,
        Command::Get { resource, id } => {
            let record: Value = client.get(&resource.item_path(id)).await?;
            print_json(out, &record)
        }
        Command::Create { resource, data } => {
            let body = parse_data(&data)?;
            let record: Value = client.post(resource.path(), &body).await?;
            print_json(out, &record)
        }
        Command::Update { resource, id, data } => {
            let body = parse_data(&data)?;
            let record: Value = client.put(&resource.item_path(id), &body).await?;
            print_json(out, &record)
        }
        Command::Patch { resource, id, data } => {
            let body = parse_data(&data)?;
            let record: Value = client.patch(&resource.item_path(id), &body).await?;
            print_json(out, &record)
        }
        Command::Delete { resource, id } => {
            client.delete(&resource.item_path(id)).await?;
            writeln!(out, "deleted {resource} {id}")?;
            Ok(())
        }
        Command::Timeline { width, view } => {
            let page = client
                .list::<Project>(&ListQuery::new().page_size(TIMELINE_PAGE_SIZE))
                .await?;
            write!(out, "{}", render(&tasks_from_projects(&page.results), width, view))?;
            Ok(())
        }
        Command::Health => {
            let health = client.health().await?;
            let state = if health.ok { "ok" } else { "degraded" };
            writeln!(
                out,
                "{} {} {state} at {}",
                health.service,
                health.version,
                health.time.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
            Ok(())
        }
        Command::Schema => {
            let schema = client.schema_lite().await?;
            writeln!(out, "{} exposes {} routes", schema.service, schema.count)?;
            for endpoint in &schema.endpoints {
                writeln!(
                    out,
                    "  {:<28} {}",
                    endpoint.name.as_deref().unwrap_or("-"),
                    endpoint.pattern
                )?;
            }
            Ok(())
        }
    }
}

async fn list(
    client: &ApiClient,
    resource: ResourceKind,
    filter: Option<&str>,
    sort: Option<&str>,
    desc: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let loaded = load_grid(resource, client).await;
    let mut grid = match filter {
        Some(needle) => loaded.data.quick_filter(needle),
        None => loaded.data,
    };
    if let Some(column) = sort {
        let direction = if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        if !grid.sort_by(column, direction) {
            bail!("no column named `{column}` on the {resource} page");
        }
    }
    write!(out, "{grid}")?;
    for failure in &loaded.failures {
        writeln!(out, "warning: {} unavailable: {}", failure.resource, failure.error)?;
    }
    Ok(())
}

/// A JSON object given inline or, with a leading `@`, read from a file.
pub fn parse_data(raw: &str) -> anyhow::Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => raw.to_string(),
    };
    let value: Value = serde_json::from_str(&text).context("--data is not valid JSON")?;
    if !value.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(value)
}

fn print_json(out: &mut impl Write, value: &Value) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Error text for the terminal, with per-field validation messages.
pub fn describe(err: &anyhow::Error) -> String {
    let mut text = format!("error: {err}");
    if let Some(problem) = err.downcast_ref::<ApiError>().and_then(ApiError::problem) {
        for (field, messages) in &problem.fields {
            for message in messages.as_list() {
                text.push_str(&format!("\n  {field}: {message}"));
            }
        }
    }
    text
}

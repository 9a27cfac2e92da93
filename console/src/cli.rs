use clap::{Parser, Subcommand};
use ddash_core::timeline::ViewMode;
use ddash_core::{Credentials, ResourceKind};
use uuid::Uuid;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

#[derive(Debug, Parser)]
#[command(name = "ddash")]
#[command(about = "Drilling-campaign admin console", long_about = None, version)]
pub struct Cli {
    /// Backend base URL, including the `/api` prefix; defaults to
    /// $DDASH_API_BASE, then the local mock server
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Extra request header as `Name: value`; repeatable
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Credentials mode: omit, same-origin or include
    #[arg(long, global = true)]
    pub credentials: Option<Credentials>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a resource page as a table, with foreign keys resolved to names
    List {
        resource: ResourceKind,

        /// Keep rows with any cell containing this text
        #[arg(long)]
        filter: Option<String>,

        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,

        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Print one record as JSON
    Get { resource: ResourceKind, id: Uuid },

    /// Create a record from a JSON object (`@path` reads a file)
    Create {
        resource: ResourceKind,
        #[arg(long)]
        data: String,
    },

    /// Replace a record
    Update {
        resource: ResourceKind,
        id: Uuid,
        #[arg(long)]
        data: String,
    },

    /// Change some fields of a record
    Patch {
        resource: ResourceKind,
        id: Uuid,
        #[arg(long)]
        data: String,
    },

    Delete { resource: ResourceKind, id: Uuid },

    /// Project schedule as a text Gantt chart
    Timeline {
        #[arg(long, default_value_t = 60)]
        width: usize,

        /// day, week or month
        #[arg(long, default_value = "week")]
        view: ViewMode,
    },

    /// Backend health probe
    Health,

    /// Routes the backend exposes
    Schema,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{raw}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ddash").chain(args.iter().copied()))
    }

    #[test]
    fn list_with_sorting() {
        let cli = parse(&["list", "maintenance_windows", "--sort", "Days", "--desc"]).unwrap();
        let Command::List {
            resource,
            sort,
            desc,
            filter,
        } = cli.command
        else {
            panic!("expected list");
        };
        assert_eq!(resource, ResourceKind::MaintenanceWindows);
        assert_eq!(sort.as_deref(), Some("Days"));
        assert!(desc);
        assert!(filter.is_none());
    }

    #[test]
    fn desc_needs_a_sort_column() {
        assert!(parse(&["list", "rigs", "--desc"]).is_err());
    }

    #[test]
    fn unknown_resource_is_rejected() {
        assert!(parse(&["list", "users"]).is_err());
    }

    #[test]
    fn global_options_after_the_subcommand() {
        let cli = parse(&[
            "health",
            "--base-url",
            "http://backend/api",
            "-H",
            "Authorization: Bearer t0k",
            "--credentials",
            "include",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://backend/api"));
        assert_eq!(
            cli.headers,
            vec![("Authorization".to_string(), "Bearer t0k".to_string())]
        );
        assert_eq!(cli.credentials, Some(Credentials::Include));
    }

    #[test]
    fn base_url_is_optional() {
        assert_eq!(parse(&["health"]).unwrap().base_url, None);
    }

    #[test]
    fn header_values_may_contain_colons() {
        assert_eq!(
            parse_header("X-Trace: a:b"),
            Ok(("X-Trace".to_string(), "a:b".to_string()))
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn timeline_defaults() {
        let cli = parse(&["timeline"]).unwrap();
        let Command::Timeline { width, view } = cli.command else {
            panic!("expected timeline");
        };
        assert_eq!(width, 60);
        assert_eq!(view, ViewMode::Week);
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(parse(&["get", "rigs", "not-an-id"]).is_err());
    }
}

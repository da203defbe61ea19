//! `dashboard` command-line client.
//!
//! Drives the access layer without a UI: manage the stored credentials and theme,
//! and list, fetch or search resources. Output is JSON on stdout; logs go to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use dashboard::app::Dashboard;
use dashboard::config::{load_dotenv, Config};
use dashboard::core::{AppError, RemoteResource, Result};
use dashboard::debug::{self, LogConfig};
use dashboard::services::Theme;
use dashboard::state::RemoteCollection;
use shared::{AgentQuery, BookingQuery, BusQuery, PartnerQuery, RoleQuery, UserQuery};

/// Partner network dashboard client
///
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Partner network dashboard client", long_about = None)]
struct Cli {
    /// Partner API root (overrides DASHBOARD_API_BASE_URL)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the stored API credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
    /// Read or change the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// List one page of a resource
    List {
        resource: Resource,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Page size (defaults to DASHBOARD_PAGE_SIZE)
        #[arg(long)]
        size: Option<u32>,
    },
    /// Fetch one item by uid
    Get { resource: Resource, uid: String },
    /// Search a resource by its main text field, first page
    Search { resource: Resource, term: String },
}

#[derive(Subcommand, Debug)]
enum CredentialsAction {
    /// Store and verify a key/secret pair
    Set {
        #[arg(long, env = "DASHBOARD_API_KEY")]
        key: String,
        #[arg(long, env = "DASHBOARD_API_SECRET", hide_env_values = true)]
        secret: String,
    },
    /// Forget the stored pair
    Clear,
    /// Show whether a pair is stored
    Status,
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Get,
    Set { theme: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Resource {
    Partners,
    Agents,
    SuperAgents,
    GroupAgents,
    Bookings,
    Buses,
    Users,
    Roles,
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    let _log_guard = debug::init_logger(&LogConfig::from_env());

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if e.needs_credentials() {
                eprintln!("hint: run `dashboard credentials set --key <KEY> --secret <SECRET>`");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(raw) = &cli.api_base_url {
        config.api_base_url = raw
            .parse()
            .map_err(|e| AppError::Config(format!("--api-base-url `{raw}`: {e}")))?;
        config.validate()?;
    }

    let dashboard = Dashboard::with_file_store(config)?;

    match cli.command {
        Command::Credentials { action } => credentials(&dashboard, action).await,
        Command::Theme { action } => theme(&dashboard, action),
        Command::List { resource, page, size } => list(&dashboard, resource, page, size).await,
        Command::Get { resource, uid } => get(&dashboard, resource, &uid).await,
        Command::Search { resource, term } => search(&dashboard, resource, term).await,
    }
}

async fn credentials(dashboard: &Dashboard, action: CredentialsAction) -> Result<()> {
    match action {
        CredentialsAction::Set { key, secret } => {
            dashboard.setup_credentials(&key, &secret).await?;
            print_json(&json!({ "configured": true, "apiKey": shared::redact(&key) }))
        }
        CredentialsAction::Clear => {
            dashboard.credentials().clear_api_credentials();
            print_json(&json!({ "configured": false }))
        }
        CredentialsAction::Status => {
            let creds = dashboard.credentials().get_api_credentials();
            print_json(&json!({
                "configured": dashboard.credentials().has_api_credentials(),
                "apiKey": creds.map(|c| shared::redact(&c.api_key)),
            }))
        }
    }
}

fn theme(dashboard: &Dashboard, action: ThemeAction) -> Result<()> {
    match action {
        ThemeAction::Get => {}
        ThemeAction::Set { theme } => {
            let theme: Theme = theme.parse().map_err(AppError::Validation)?;
            dashboard.preferences().set_theme(theme);
        }
    }
    print_json(&json!({ "theme": dashboard.preferences().theme().as_str() }))
}

async fn list(dashboard: &Dashboard, resource: Resource, page: u32, size: Option<u32>) -> Result<()> {
    let c = dashboard.collections();
    match resource {
        Resource::Partners => show_page(&c.partners, None, page, size).await,
        Resource::Agents => show_page(&c.agents, None, page, size).await,
        Resource::SuperAgents => show_page(&c.super_agents, None, page, size).await,
        Resource::GroupAgents => show_page(&c.group_agents, None, page, size).await,
        Resource::Bookings => show_page(&c.bookings, None, page, size).await,
        Resource::Buses => show_page(&c.buses, None, page, size).await,
        Resource::Users => show_page(&c.users, None, page, size).await,
        Resource::Roles => show_page(&c.roles, None, page, size).await,
    }
}

async fn search(dashboard: &Dashboard, resource: Resource, term: String) -> Result<()> {
    let c = dashboard.collections();
    let term = Some(term);
    match resource {
        Resource::Partners => {
            let query = PartnerQuery { business_name: term, ..Default::default() };
            show_page(&c.partners, Some(query), 0, None).await
        }
        Resource::Agents => {
            let query = AgentQuery { business_name: term, ..Default::default() };
            show_page(&c.agents, Some(query), 0, None).await
        }
        Resource::SuperAgents => {
            let query = AgentQuery { business_name: term, ..Default::default() };
            show_page(&c.super_agents, Some(query), 0, None).await
        }
        Resource::GroupAgents => {
            let query = AgentQuery { business_name: term, ..Default::default() };
            show_page(&c.group_agents, Some(query), 0, None).await
        }
        Resource::Bookings => {
            let query = BookingQuery { reference: term, ..Default::default() };
            show_page(&c.bookings, Some(query), 0, None).await
        }
        Resource::Buses => {
            let query = BusQuery { plate_number: term, ..Default::default() };
            show_page(&c.buses, Some(query), 0, None).await
        }
        Resource::Users => {
            let query = UserQuery { email: term, ..Default::default() };
            show_page(&c.users, Some(query), 0, None).await
        }
        Resource::Roles => {
            let query = RoleQuery { name: term };
            show_page(&c.roles, Some(query), 0, None).await
        }
    }
}

async fn get(dashboard: &Dashboard, resource: Resource, uid: &str) -> Result<()> {
    let c = dashboard.collections();
    match resource {
        Resource::Partners => show_item(&c.partners, uid).await,
        Resource::Agents => show_item(&c.agents, uid).await,
        Resource::SuperAgents => show_item(&c.super_agents, uid).await,
        Resource::GroupAgents => show_item(&c.group_agents, uid).await,
        Resource::Bookings => show_item(&c.bookings, uid).await,
        Resource::Buses => show_item(&c.buses, uid).await,
        Resource::Users => show_item(&c.users, uid).await,
        Resource::Roles => show_item(&c.roles, uid).await,
    }
}

async fn show_page<R>(
    collection: &RemoteCollection<R>,
    query: Option<R::Query>,
    page: u32,
    size: Option<u32>,
) -> Result<()>
where
    R: RemoteResource,
    R::Item: Serialize,
{
    match (query, size) {
        (Some(query), _) => {
            collection.search_now(query).await?;
        }
        (None, Some(size)) => {
            collection.set_page_size(size).await?;
            if page != 0 {
                collection.load(page).await?;
            }
        }
        (None, None) => {
            collection.load(page).await?;
        }
    }

    let state = collection.snapshot();
    print_json(&json!({
        "resource": collection.resource().name(),
        "page": state.current_page,
        "size": state.page_size,
        "totalItems": state.total_items,
        "totalPages": state.total_pages,
        "items": state.items,
    }))
}

async fn show_item<R>(collection: &RemoteCollection<R>, uid: &str) -> Result<()>
where
    R: RemoteResource,
    R::Item: Serialize,
{
    // A missing item prints `null`; it is an empty result, not a failure.
    let item = collection.load_item(uid).await?;
    print_json(&item)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

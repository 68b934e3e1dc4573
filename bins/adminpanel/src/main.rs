//! adminpanel CLI - catalog administration from the terminal
//!
//! Lists brands, categories and products from the admin-panel backend and
//! exposes the raw CRUD verbs for everything else.

use adminpanel_api_client::{AdminClient, ApiError, ClientConfig, EntityKind, ErrorPolicy};
use adminpanel_telemetry::TelemetryConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod commands;

use commands::{list, raw, summary, write};

/// Admin-panel catalog CLI
#[derive(Parser)]
#[command(name = "adminpanel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Backend origin (overrides the config file)
    #[arg(long, global = true, env = "ADMIN_SERVER_URL")]
    base_url: Option<String>,

    /// TOML file with client settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Translate failures of every verb, not only GET
    #[arg(long, global = true)]
    normalize_errors: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Catalog collection argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Brand,
    Category,
    Product,
}

impl From<Kind> for EntityKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Brand => Self::Brand,
            Kind::Category => Self::Category,
            Kind::Product => Self::Product,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a collection into the store and print it
    List {
        /// Collection to list
        #[arg(value_enum)]
        kind: Kind,
    },

    /// Refresh all collections and print counts
    Summary,

    /// GET a path and print status, headers and body
    Raw {
        /// Path relative to the backend origin
        path: String,
    },

    /// POST a JSON or multipart body
    Create {
        /// Path relative to the backend origin
        path: String,

        /// JSON body
        #[arg(long, conflicts_with_all = ["file", "field"])]
        json: Option<String>,

        /// File to upload (repeatable); switches to multipart
        #[arg(long)]
        file: Vec<PathBuf>,

        /// Extra form field as key=value (repeatable, multipart only)
        #[arg(long, value_parser = write::parse_field)]
        field: Vec<(String, String)>,
    },

    /// PATCH a path with a JSON body
    Update {
        /// Path relative to the backend origin
        path: String,

        /// JSON body
        #[arg(long)]
        json: String,
    },

    /// DELETE a path
    Delete {
        /// Path relative to the backend origin
        path: String,
    },
}

impl Cli {
    /// Resolve client configuration: file or environment, then flag overrides
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::from_env()?,
        };

        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if self.normalize_errors {
            config = config.with_error_policy(ErrorPolicy::Normalized);
        }

        Ok(config)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.client_config()?;
    let client = AdminClient::with_config(config).context("Failed to build API client")?;
    let format = cli.format;

    match cli.command {
        Commands::List { kind } => list::run(&client, kind.into(), format).await,
        Commands::Summary => summary::run(&client, format).await,
        Commands::Raw { path } => raw::run(&client, &path, format).await,
        Commands::Create {
            path,
            json,
            file,
            field,
        } => write::create(&client, &path, json.as_deref(), &file, field, format).await,
        Commands::Update { path, json } => write::update(&client, &path, &json, format).await,
        Commands::Delete { path } => write::delete(&client, &path, format).await,
    }
}

/// User-facing text for an error chain, preferring the normalized API message
fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(api) => api.display_message(),
        None => format!("{error:#}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::for_cli(cli.verbose, cli.format == OutputFormat::Json);
    if let Err(e) = adminpanel_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), error_message(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::parse_from([
            "adminpanel",
            "--base-url",
            "http://localhost:3000",
            "--timeout",
            "5",
            "--normalize-errors",
            "list",
            "brand",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.error_policy, ErrorPolicy::Normalized);
    }

    #[test]
    fn test_error_message_prefers_api_text() {
        let err = anyhow::Error::new(ApiError::request_failed(Some(400), "name required"));
        assert_eq!(error_message(&err), "name required");

        let other = anyhow::anyhow!("plain failure");
        assert_eq!(error_message(&other), "plain failure");
    }
}

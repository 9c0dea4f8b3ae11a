//! docnav CLI: serve the HTTP API or run a single lookup

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docnav::{Config, DocumentService, HttpFetcher, MatchPolicy};

#[derive(Parser)]
#[command(name = "docnav")]
#[command(version)]
#[command(about = "Browse remote .docx and HTML documents section by section", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How requested titles are matched against headings
    #[arg(long, global = true, value_enum)]
    match_policy: Option<MatchPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the sections of a document, or below one chapter
    Chapters {
        #[arg(value_name = "URL")]
        url: String,

        /// Parent chapter title
        #[arg(short, long)]
        chapter: Option<String>,

        /// Attach content to each section (default: on when a chapter is given)
        #[arg(long)]
        content: Option<bool>,
    },

    /// Print the content of a chapter, or of the whole document
    Content {
        #[arg(value_name = "URL")]
        url: String,

        #[arg(short, long)]
        chapter: Option<String>,
    },

    /// Write the default config file
    InitConfig,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::InitConfig => match Config::init_default(cli.config.as_deref())? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => anyhow::bail!("could not determine a config directory; pass --config"),
        },
        Commands::Serve { host, port } => {
            let mut config = load_config(cli.config.as_deref(), cli.match_policy)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = config.server.bind_addr();
            let service = Arc::new(build_service(&config)?);
            tracing::info!(addr = %addr, match_policy = ?service.policy(), "starting docnav server");

            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            let result = runtime.block_on(docnav::server::serve(&addr, service.clone()));
            // The last reference to the blocking client must go away outside the runtime.
            drop(runtime);
            drop(service);
            result.with_context(|| format!("server on {addr} failed"))?;
        }
        Commands::Chapters { url, chapter, content } => {
            let config = load_config(cli.config.as_deref(), cli.match_policy)?;
            let data = build_service(&config)?.list(Some(&url), chapter.as_deref(), content)?;
            print_json(&data)?;
        }
        Commands::Content { url, chapter } => {
            let config = load_config(cli.config.as_deref(), cli.match_policy)?;
            let data = build_service(&config)?.extract(Some(&url), chapter.as_deref())?;
            print_json(&data)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, match_policy: Option<MatchPolicy>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    if let Some(policy) = match_policy {
        config.extract.match_policy = policy;
    }
    Ok(config)
}

fn build_service(config: &Config) -> Result<DocumentService> {
    let fetcher = HttpFetcher::new(&config.fetch).context("failed to create HTTP client")?;
    Ok(DocumentService::new(Arc::new(fetcher), config))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,docnav=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

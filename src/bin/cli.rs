//! Blog CLI - GraphQL API for users, posts and comments.
//!
//! Usage:
//!   blog serve                      # Start the HTTP server
//!   blog serve --port 8080          # Override the configured port
//!   blog query '{ users { name } }' # Run one document against fresh seed data
//!   blog sdl                        # Print the schema

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blog::{build_schema, execute_with_variables, server, Config, Seed, Store};

#[derive(Parser)]
#[command(name = "blog")]
#[command(about = "Blog - GraphQL API for users, posts and comments", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overrides config; RUST_LOG overrides both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GraphQL HTTP server
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Execute a single GraphQL document and print the JSON response
    Query {
        /// GraphQL document
        document: String,

        /// Variables as a JSON object
        #[arg(short, long)]
        variables: Option<String>,
    },

    /// Print the schema in SDL form
    Sdl,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));

    let store = Arc::new(open_store(&config)?);

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let stats = store.stats()?;
            info!(
                users = stats.users,
                posts = stats.posts,
                comments = stats.comments,
                "store ready"
            );
            let schema = build_schema(store, &config);
            server::serve(schema, &config.bind_addr()).await?;
        }

        Commands::Query {
            document,
            variables,
        } => {
            let variables = match variables {
                Some(json) => {
                    let value: serde_json::Value =
                        serde_json::from_str(&json).context("invalid --variables JSON")?;
                    async_graphql::Variables::from_json(value)
                }
                None => async_graphql::Variables::default(),
            };
            let schema = build_schema(store, &config);
            println!(
                "{}",
                execute_with_variables(&schema, &document, variables).await
            );
        }

        Commands::Sdl => {
            let schema = build_schema(store, &config);
            println!("{}", schema.sdl());
        }
    }

    Ok(())
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &Config) -> Result<Store> {
    match &config.seed {
        Some(path) => {
            let seed = Seed::load(path)
                .with_context(|| format!("failed to read seed {}", path.display()))?;
            Ok(Store::from_seed(seed)?)
        }
        None => Ok(Store::seeded()),
    }
}

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;

use api_gateway::{
    openapi::{OpenApi, OpenApiInfo},
    GatewayConfig,
};
use marketplace::{
    infra::{
        locks::EntityLocks,
        memory::{InMemoryUsers, InMemoryVenues},
    },
    MarketplaceConfig, Service,
};
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Bazaar Server - venue marketplace over HTTP
#[derive(Parser)]
#[command(name = "bazaar-server")]
#[command(about = "Bazaar Server - venue marketplace over HTTP")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Bazaar Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let mut gateway_config: GatewayConfig = config.module_config("api_gateway");
    if config.server.timeout_sec > 0 {
        gateway_config.timeout_sec = config.server.timeout_sec;
    }
    let marketplace_config: MarketplaceConfig = config.module_config("marketplace");

    let service = Arc::new(Service::new(
        Arc::new(InMemoryUsers::new()),
        Arc::new(InMemoryVenues::new()),
        EntityLocks::new(),
        marketplace_config.into(),
    ));

    let api = marketplace::api::rest::routes::router(service);
    let mut router = api_gateway::build_router(&gateway_config, api);

    if gateway_config.enable_docs {
        let document = OpenApi::new(
            OpenApiInfo {
                title: "Bazaar API".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some("Venue marketplace REST API".to_string()),
            },
            marketplace::api::rest::openapi::paths(),
            marketplace::api::rest::openapi::schemas(),
        );
        router = api_gateway::attach_docs(router, serde_json::to_value(&document)?);
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid server address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    // Translate process signals into cancellation so the gateway drains in-flight requests.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = runtime::shutdown::wait_for_shutdown().await {
            tracing::error!("Shutdown signal listener failed: {}", e);
        }
        signal_cancel.cancel();
    });

    api_gateway::serve(addr, router, cancel).await
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load_* already normalized & created home_dir
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

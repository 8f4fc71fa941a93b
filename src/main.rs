use anyhow::Result;
use clap::{Parser, Subcommand};
use farelink_config::{Config, CredentialStore};
use farelink_proxy::AppState;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "farelink", about = "farelink: one API in front of travel booking providers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the gateway server.
    Serve {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Override the listening port (default: 8018).
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the listening address (default: 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
        /// Emit logs as JSON lines.
        #[arg(long)]
        json_logs: bool,
    },
    /// Validate configuration and provider credentials, then exit.
    Check {
        /// Path to the YAML configuration file.
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the real environment may carry everything.
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            host,
            json_logs,
        } => {
            init_tracing(json_logs);
            cmd_serve(config, port, host).await
        }
        Commands::Check { config } => {
            init_tracing(false);
            cmd_check(config)
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load(config_path: Option<&PathBuf>) -> Result<(Config, CredentialStore)> {
    let config = Config::load(config_path.map(PathBuf::as_path))
        .map_err(|e| anyhow::anyhow!("config error: {e}"))?;
    let credentials = CredentialStore::from_env(&config)?;
    Ok((config, credentials))
}

async fn cmd_serve(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    let (mut config, credentials) = load(config_path.as_ref())?;
    if let Some(p) = port {
        config.port = p;
    }
    if let Some(h) = host {
        config.host = h;
    }

    let providers = farelink_provider::build_providers(&config, &credentials);
    if providers.is_empty() {
        tracing::warn!("no providers enabled; every provider route will answer 503");
    }
    let app = farelink_proxy::make_router(AppState::new(providers));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        fallback = config.fallback.enabled,
        "farelink listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn cmd_check(config_path: Option<PathBuf>) -> Result<()> {
    let (config, credentials) = load(config_path.as_ref())?;
    for line in check_report(&config, &credentials) {
        println!("{line}");
    }
    Ok(())
}

/// One line per loaded provider plus the fallback setup. Credentials are
/// already validated, so every listed provider is ready.
fn check_report(config: &Config, credentials: &CredentialStore) -> Vec<String> {
    let mut lines: Vec<String> = config
        .enabled_providers()
        .into_iter()
        .filter_map(|provider| credentials.get(provider))
        .map(|cred| format!("{}: ready ({})", cred.provider, cred.base_url))
        .collect();
    if config.fallback.enabled {
        lines.push(format!(
            "fallback: {} (timeout {}s)",
            config.fallback.program, config.fallback.timeout_secs
        ));
    } else {
        lines.push("fallback: disabled".to_string());
    }
    lines
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

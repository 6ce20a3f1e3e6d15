//! Rooms service entry-point: loads settings, picks a repository, serves HTTP.

mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rentomatic::outbound::persistence::{DbPool, PoolConfig};
use rentomatic::settings::{AppConfig, Environment, Manifest};
use server::{DEFAULT_WORKERS, ServerConfig, create_server};

/// `rentomatic` command arguments.
#[derive(Debug, Parser)]
#[command(name = "rentomatic", about = "Serve the rooms listing API", version)]
struct Args {
    /// Socket address to listen on.
    #[arg(long, env = "ROOMS_BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
    /// Number of HTTP worker threads.
    #[arg(long, env = "ROOMS_WORKERS", default_value_t = DEFAULT_WORKERS)]
    workers: usize,
    /// Name of an environment manifest under `config/` whose entries are
    /// applied as defaults before reading settings.
    #[arg(long, env = "ROOMS_MANIFEST", value_name = "name")]
    manifest: Option<String>,
    /// Directory holding the `config/` manifests.
    #[arg(long, value_name = "path", default_value = ".")]
    project_root: PathBuf,
}

fn load_environment(args: &Args) -> std::io::Result<Environment> {
    let mut environment = Environment::from_process();
    if let Some(name) = args.manifest.as_deref() {
        let manifest = Manifest::load(&args.project_root, name).map_err(std::io::Error::other)?;
        environment.apply_defaults(&manifest);
    }
    Ok(environment)
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let environment = load_environment(&args)?;
    let config = AppConfig::from_environment(&environment).map_err(std::io::Error::other)?;
    init_tracing(config.variant.default_log_filter());
    info!(config = %config.variant, "starting rooms service");

    let mut server_config = ServerConfig::new(args.bind).with_workers(args.workers);
    if let Some(postgres) = config.postgres.as_ref() {
        let database_url = postgres
            .application_database_url()
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|error| std::io::Error::other(format!("create database pool: {error}")))?;
        server_config = server_config.with_db_pool(pool);
    }

    create_server(server_config)?.await
}

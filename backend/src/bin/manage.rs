//! Development and deployment helper: drives docker-compose and provisions
//! PostgreSQL for a named configuration.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rentomatic::orchestration::{
    ComposeProject, OrchestrationError, ProvisionReport, ReadinessPolicy, provision_database,
    run_forwarding_interrupts, service_logs_contain, wait_until_ready,
};
use rentomatic::outbound::persistence::ProvisionOutcome;
use rentomatic::settings::{
    APPLICATION_CONFIG_ENV, AppConfig, ConfigVariant, DEFAULT_APPLICATION_CONFIG, Environment,
    Manifest,
};

const POSTGRES_SERVICE: &str = "postgres";
const POSTGRES_READY_LINE: &str = "ready to accept connections";

/// `manage` command arguments.
#[derive(Debug, Parser)]
#[command(name = "manage", about = "Run docker-compose and database tasks", version)]
struct Cli {
    /// Configuration name; selects `config/<name>.json` and `docker/<name>.yml`.
    #[arg(
        long,
        env = APPLICATION_CONFIG_ENV,
        default_value = DEFAULT_APPLICATION_CONFIG,
        global = true
    )]
    config: String,
    /// Directory holding the `config/` and `docker/` trees.
    #[arg(long, value_name = "path", default_value = ".", global = true)]
    project_root: PathBuf,
    #[command(subcommand)]
    command: Task,
}

#[derive(Debug, Subcommand)]
enum Task {
    /// Run docker-compose with the configuration's project name and file.
    Compose {
        /// Arguments forwarded verbatim to docker-compose.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Create the application database and apply migrations.
    InitPostgres,
    /// Run the test suite against a fresh `testing` compose stack.
    Test {
        /// Arguments forwarded to `cargo test`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let code = match cli.command {
        Task::Compose { args } => {
            let environment = load_environment(&cli.project_root, &cli.config)?;
            let project = ComposeProject::new(&cli.project_root, &cli.config)?;
            compose(&project, &environment, &args)?
        }
        Task::InitPostgres => {
            let environment = load_environment(&cli.project_root, &cli.config)?;
            init_postgres(&environment)?;
            0
        }
        Task::Test { args } => {
            let config = ConfigVariant::Testing.as_str();
            let environment = load_environment(&cli.project_root, config)?;
            let project = ComposeProject::new(&cli.project_root, config)?;
            run_tests(&project, &environment, &cli.project_root, &args)?
        }
    };

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")
}

/// Merge the configuration's manifest into the process environment view.
fn load_environment(project_root: &Path, config: &str) -> Result<Environment> {
    let manifest = Manifest::load(project_root, config)
        .wrap_err_with(|| format!("load environment manifest for {config}"))?;
    let mut environment = Environment::from_process();
    let applied = environment.apply_defaults(&manifest);
    environment.set(APPLICATION_CONFIG_ENV, config);
    info!(config, defaults = applied.len(), "environment prepared");
    Ok(environment)
}

fn compose(project: &ComposeProject, environment: &Environment, args: &[String]) -> Result<i32> {
    let command = project.command(args)?;
    info!(command = %command.display(), "running docker-compose");
    let code = runtime()?.block_on(run_forwarding_interrupts(command.to_command(environment)))?;
    Ok(code)
}

/// Provisioning talks to PostgreSQL synchronously, so it must not run inside
/// the Tokio runtime.
fn init_postgres(environment: &Environment) -> Result<ProvisionReport> {
    let config = AppConfig::from_environment(environment)?;
    let postgres = config
        .postgres
        .ok_or(OrchestrationError::MissingDatabaseSettings)?;
    let report = provision_database(&postgres)
        .wrap_err_with(|| format!("provision database {}", postgres.application_db))?;
    match report.database {
        ProvisionOutcome::Created => info!(database = %postgres.application_db, "database created"),
        ProvisionOutcome::AlreadyExists => {
            info!(database = %postgres.application_db, "database already exists");
        }
    }
    Ok(report)
}

fn run_tests(
    project: &ComposeProject,
    environment: &Environment,
    project_root: &Path,
    args: &[String],
) -> Result<i32> {
    let runtime = runtime()?;

    let up = runtime.block_on(run_forwarding_interrupts(
        project.command(["up", "-d"])?.to_command(environment),
    ))?;
    if up != 0 {
        return Err(eyre!("docker-compose up exited with code {up}"));
    }

    let outcome = prepare_database(&runtime, project, environment)
        .and_then(|()| runtime.block_on(cargo_test(environment, project_root, args)));

    let down = runtime.block_on(run_forwarding_interrupts(
        project.command(["down"])?.to_command(environment),
    ));
    let code = outcome?;
    let down = down?;
    if down != 0 {
        warn!(code = down, "docker-compose down failed");
    }
    Ok(code)
}

fn prepare_database(
    runtime: &Runtime,
    project: &ComposeProject,
    environment: &Environment,
) -> Result<()> {
    runtime.block_on(wait_until_ready(
        POSTGRES_SERVICE,
        ReadinessPolicy::default(),
        || service_logs_contain(project, environment, POSTGRES_SERVICE, POSTGRES_READY_LINE),
    ))?;
    init_postgres(environment)?;
    Ok(())
}

async fn cargo_test(
    environment: &Environment,
    project_root: &Path,
    args: &[String],
) -> Result<i32> {
    let mut command = Command::new("cargo");
    command
        .arg("test")
        .args(args)
        .current_dir(project_root)
        .envs(environment.overlay());
    Ok(run_forwarding_interrupts(command).await?)
}

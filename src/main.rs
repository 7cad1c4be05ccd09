use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use taskpad::commands::Command;
use taskpad_db::{Database, DbError, DbResult};

/// Environment variable name for the database path
const TPD_DB_PATH_ENV: &str = "TPD_DB_PATH";

/// Taskpad - a single-user task list CLI
#[derive(Parser)]
#[command(name = "tpd")]
#[command(version = "0.1.0")]
#[command(about = "A task list CLI with sub-tasks and manual ordering", long_about = None)]
struct Args {
    /// Path to the database directory (can also be set via TPD_DB_PATH env var)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the database path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --db argument
/// 2. TPD_DB_PATH environment variable (if non-empty)
/// 3. Default path (~/.tpd/data)
fn resolve_db_path(cli_db: Option<PathBuf>) -> DbResult<PathBuf> {
    if let Some(path) = cli_db {
        return Ok(path);
    }

    if let Ok(env_path) = std::env::var(TPD_DB_PATH_ENV)
        && !env_path.is_empty()
    {
        return Ok(PathBuf::from(env_path));
    }

    Ok(Database::default_path())
}

/// Initialize logging from RUST_LOG, defaulting to warnings only.
///
/// Skipped-entry warnings from reorder land here; raise the filter to
/// `debug` or `trace` to watch query activity.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> Result<(), DbError> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> Result<(), DbError> {
    let db_path = resolve_db_path(args.db.clone())?;

    let db = Database::connect(&db_path).await?;
    db.init().await?;

    match &args.command {
        Some(cmd) => {
            let result = cmd.execute(&db).await?;
            println!("{}", result);
        }
        None => {
            println!("Welcome to Taskpad!");
            println!("Use 'tpd --help' for usage information.");
        }
    }

    Ok(())
}

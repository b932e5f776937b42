//! # TumDum Dashboard Library
//!
//! Application layer for the `tumdum` command line: state, commands, error
//! mapping and output. The binary only parses arguments and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! tumdum_dashboard/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── output.rs       ◄─── Text tables and messages
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── calculator.rs ◄─ Current input + last result
//! │   ├── records.rs  ◄─── Listed records, optimistic delete
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── calculator.rs ◄─ update_input, save_analysis
//! │   ├── records.rs  ◄─── load_records, get_record, delete_record
//! │   └── config.rs   ◄─── get_config, database status
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐ ┌─────────────────┐ ┌──────────────┐ ┌──────────────┐    │
//! │  │ DbState  │ │ CalculatorState │ │ RecordsState │ │ ConfigState  │    │
//! │  │          │ │                 │ │              │ │              │    │
//! │  │ • Pool   │ │ • Input         │ │ • Listed     │ │ • DB path    │    │
//! │  │ • Repos  │ │ • Last result   │ │   records    │ │ • Margin     │    │
//! │  └──────────┘ └─────────────────┘ └──────────────┘ └──────────────┘    │
//! │                                                                         │
//! │  Each command takes only the state it needs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

use anyhow::Context;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::calculator::PricingForm;
use error::ApiError;
use state::{CalculatorState, ConfigError, ConfigState, DbState, RecordsState};
use tumdum_db::{Database, DbConfig};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load ConfigState from TUMDUM_* variables                            │
/// │  2. compare: no database needed, compute and print                      │
/// │  3. Everything else:                                                    │
/// │     • Determine database path (TUMDUM_DB_PATH or platform data dir)     │
/// │     • Connect (WAL) and run pending migrations                          │
/// │     • Build DbState, CalculatorState, RecordsState                      │
/// │     • Dispatch the command                                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Returns
/// `ExitCode::FAILURE` when the command itself failed; its user-facing
/// message has already been printed. Startup failures (configuration,
/// database) come back as `Err`.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ConfigState::from_env()?;
    let calculator = CalculatorState::with_profit_margin(config.default_profit_margin_percent);

    if let Commands::Compare { pricing, volumes } = &cli.command {
        let form = PricingForm::from(pricing);
        return report(
            cli.json,
            commands::calculator::update_input(
                &calculator,
                &form,
                config.default_profit_margin_percent,
            )
            .map(|_| {
                let volumes = (!volumes.is_empty()).then_some(volumes.as_slice());
                commands::calculator::get_calculator(&calculator, volumes)
            }),
            |view| output::render_calculator(&config, view),
        );
    }

    let db_path = database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db_config = DbConfig::new(&db_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    debug!("Database connected and migrations applied");

    let db = DbState::new(db);
    let records = RecordsState::new();

    let outcome = dispatch(&cli, &config, &db, &calculator, &records).await;
    db.inner().close().await;
    outcome
}

async fn dispatch(
    cli: &Cli,
    config: &ConfigState,
    db: &DbState,
    calculator: &CalculatorState,
    records: &RecordsState,
) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Compare { .. } => Ok(ExitCode::SUCCESS),
        Commands::Save {
            pricing,
            restaurant,
            dish,
        } => {
            let form = PricingForm::from(pricing);
            let saved = match commands::calculator::update_input(
                calculator,
                &form,
                config.default_profit_margin_percent,
            ) {
                Ok(_) => {
                    commands::calculator::save_analysis(db, calculator, records, restaurant, dish)
                        .await
                }
                Err(e) => Err(e),
            };
            report(cli.json, saved, |record| output::render_saved(config, record))
        }
        Commands::Records { filter } => report(
            cli.json,
            commands::records::load_records(db, records, filter).await,
            |loaded| output::render_records(config, loaded),
        ),
        Commands::Show { id } => report(
            cli.json,
            commands::records::get_record(db, id).await,
            |detail| output::render_record(config, detail),
        ),
        Commands::Delete { id } => {
            // Load first so a failed delete has a listed record to restore.
            if let Err(e) = commands::records::load_records(db, records, "").await {
                debug!(code = ?e.code, "Could not preload records before delete");
            }
            report(
                cli.json,
                commands::records::delete_record(db, records, id).await,
                output::render_deleted,
            )
        }
        Commands::Config => {
            let current = commands::config::get_config(config);
            let status = commands::config::get_database_status(db).await;
            if cli.json {
                let status = status?;
                print_json(&serde_json::json!({ "config": current, "database": status }))
                    .map(|()| ExitCode::SUCCESS)
            } else {
                report(false, status, |status| output::render_config(&current, status))
            }
        }
    }
}

/// Prints a command result as JSON or text.
///
/// Errors go to stderr and turn into a failing exit code.
fn report<T, F>(json: bool, result: Result<T, ApiError>, render: F) -> anyhow::Result<ExitCode>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match result {
        Ok(value) if json => print_json(&value).map(|()| ExitCode::SUCCESS),
        Ok(value) => {
            print!("{}", render(&value));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if json => {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            eprintln!("{}", output::render_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output stays parseable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tumdum=trace` - Show trace for tumdum crates only
/// - Default: `info,tumdum=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tumdum=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.tumdum.dashboard/tumdum.db`
/// - **Windows**: `%APPDATA%\tumdum\dashboard\data\tumdum.db`
/// - **Linux**: `~/.local/share/dashboard/tumdum.db`
///
/// ## Override
/// `TUMDUM_DB_PATH` (via [`ConfigState`]) wins over the platform default.
pub fn database_path(config: &ConfigState) -> Result<PathBuf, ConfigError> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs =
        ProjectDirs::from("com", "tumdum", "dashboard").ok_or(ConfigError::NoDataDirectory)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("tumdum.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_database_path_wins() {
        let config = ConfigState {
            database_path: Some(PathBuf::from("/tmp/tumdum-override.db")),
            ..ConfigState::default()
        };
        assert_eq!(
            database_path(&config).unwrap(),
            PathBuf::from("/tmp/tumdum-override.db")
        );
    }

    #[test]
    fn test_report_maps_command_error_to_failure() {
        let err = ApiError::validation("listed price must be non-negative");
        let result: Result<(), ApiError> = Err(err);
        let code = report(true, result, |_| String::new()).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));

        let code = report(false, Ok(()), |_| String::new()).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
    }
}

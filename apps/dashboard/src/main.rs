//! # TumDum Dashboard Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tumdum (CLI)                                   │
//! │                                                                         │
//! │  main.rs ─────► parse args, init logging                                │
//! │  lib.rs ──────► config, database, state, dispatch                       │
//! │  commands/ ───► update_input, save_analysis, load_records, delete_record│
//! │  output.rs ───► tables (or JSON with --json)                            │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  tumdum.db (local file, WAL mode)                                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use tumdum_dashboard::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tumdum_dashboard::init_tracing();

    tumdum_dashboard::run(cli).await
}

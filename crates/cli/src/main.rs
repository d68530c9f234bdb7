//! Gamelib CLI - Database migrations and data loading tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! gamelib migrate
//!
//! # Migrate and bulk-load the CSV catalog
//! gamelib populate --data ./data
//!
//! # Register (or re-register) a user
//! gamelib register -u thorke -p "correct horse battery"
//! ```
//!
//! The database location comes from `DATABASE_URL` (a SQLite connection
//! string, e.g. `sqlite://gamelib.db`), loaded from the environment or a
//! `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gamelib")]
#[command(version, about = "Games library CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Run migrations, then bulk-load games.csv and users.csv
    Populate {
        /// Directory containing games.csv and users.csv
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },
    /// Register a user (upserts on an existing username)
    Register {
        /// Username (normalized to lowercase)
        #[arg(short, long)]
        username: String,

        /// Raw password (hashed before storage)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate().await,
        Commands::Populate { data } => commands::populate(&data).await,
        Commands::Register { username, password } => {
            commands::register(&username, &password).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

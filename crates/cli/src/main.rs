//! Food Store CLI - catalog seeding and user management.
//!
//! # Usage
//!
//! ```bash
//! # Load categories and products from a YAML file
//! fs-cli seed data/seed.yaml
//!
//! # List registered users
//! fs-cli users list
//!
//! # Give a user access to the admin console
//! fs-cli users promote --email admin@example.com
//! ```
//!
//! Every command talks to the REST backend at `BACKEND_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use food_store_backend::{BackendClient, BackendConfig};

mod commands;

#[derive(Parser)]
#[command(name = "fs-cli")]
#[command(author, version, about = "Food Store CLI tools")]
struct Cli {
    /// Base URL of the REST backend
    #[arg(long, env = "BACKEND_URL", global = true, default_value = "http://localhost:8080")]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create categories and products from a YAML file
    Seed {
        /// Path to the seed file
        file: String,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List every registered user
    List,
    /// Give a user the admin role
    Promote {
        /// Email the user registered with
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    // Seeding writes right after reading; a stale catalog cache would hide
    // categories created earlier in the same run.
    let client = BackendClient::new(&BackendConfig::new(cli.backend_url).without_cache())?;

    match cli.command {
        Commands::Seed { file } => {
            let summary = commands::seed::run(&client, &file).await?;
            tracing::info!(
                categories_created = summary.categories_created,
                categories_reused = summary.categories_reused,
                products_created = summary.products_created,
                "Seeding complete"
            );
        }
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(&client).await?,
            UsersAction::Promote { email } => commands::users::promote(&client, &email).await?,
        },
    }
    Ok(())
}

//! Ecommerce CLI - Database migrations and user bootstrap.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ecom-cli migrate
//!
//! # Create the first user (every API route needs an existing x-user-id)
//! ecom-cli user create -n "Ada Lovelace"
//! ecom-cli user create -n "Ada Lovelace" --id 7f1c1c2e-4b7a-4c1e-9a57-3d4b1f0e2a11
//!
//! # Show a user
//! ecom-cli user show 7f1c1c2e-4b7a-4c1e-9a57-3d4b1f0e2a11
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "ecom-cli")]
#[command(author, version, about = "Ecommerce API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// User ID (a random one is generated when omitted)
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Show an existing user
    Show {
        /// User ID
        id: Uuid,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { name, id } => {
                commands::user::create(&name, id).await?;
            }
            UserAction::Show { id } => commands::user::show(id).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "ecom-cli",
            "user",
            "create",
            "-n",
            "Ada",
            "--id",
            "7f1c1c2e-4b7a-4c1e-9a57-3d4b1f0e2a11",
        ])
        .unwrap();
        match cli.command {
            Commands::User {
                action: UserAction::Create { name, id },
            } => {
                assert_eq!(name, "Ada");
                assert_eq!(
                    id.unwrap().to_string(),
                    "7f1c1c2e-4b7a-4c1e-9a57-3d4b1f0e2a11"
                );
            }
            _ => panic!("expected user create"),
        }
    }

    #[test]
    fn test_rejects_malformed_user_id() {
        assert!(Cli::try_parse_from(["ecom-cli", "user", "show", "nope"]).is_err());
    }
}

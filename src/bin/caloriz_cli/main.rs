// ABOUTME: Caloriz CLI - administrative command-line tool for the Caloriz platform
// ABOUTME: User moderation, audit timelines, notifications, pricing, workouts, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz
//!
//! Usage:
//! ```bash
//! # Search accounts
//! caloriz-cli --admin-email admin@caloriz.app user list --search maria
//!
//! # Ban or unban an account
//! caloriz-cli --admin-email admin@caloriz.app user ban maria@test.com
//!
//! # Show an account's activity grouped by day
//! caloriz-cli --admin-email admin@caloriz.app user timeline maria@test.com
//!
//! # Schedule a notification
//! caloriz-cli --admin-email admin@caloriz.app notify schedule \
//!     --title "Drink water" --message "Stay hydrated" --at 2025-12-24T20:00
//!
//! # Change the monthly price
//! caloriz-cli --admin-email admin@caloriz.app config set --monthly-price 24.90
//! ```

mod commands;
mod helpers;

use anyhow::{anyhow, Result};
use caloriz::config::{DatabaseUrl, ServerConfig};
use caloriz::database::Database;
use caloriz::logging::LoggingConfig;
use caloriz::models::{SeasonalTheme, ThemeMode};
use caloriz::services::AdminService;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "caloriz-cli",
    about = "Caloriz Administration CLI",
    long_about = "Command-line tool for Caloriz administrators: moderate users, read audit timelines, schedule notifications, and manage pricing."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Email of the acting administrator (must be listed in `CALORIZ_ADMIN_EMAILS`)
    #[arg(long, global = true)]
    admin_email: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// User moderation commands
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Broadcast notification commands
    Notify {
        #[command(subcommand)]
        action: NotifyCommand,
    },

    /// Platform configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Workout catalog commands
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Show platform statistics
    Stats,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum UserCommand {
    /// List accounts, optionally filtered by name, email, or user code
    List {
        /// Case-insensitive search text
        #[arg(long)]
        search: Option<String>,
    },

    /// Toggle the ban flag of an account
    Ban {
        /// Account email
        email: String,
    },

    /// Show an account's activity grouped by day
    Timeline {
        /// Account email
        email: String,
    },

    /// Show what the access gate decides for an account right now
    Access {
        /// Account email
        email: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum NotifyCommand {
    /// Schedule a broadcast notification
    Schedule {
        /// Notification title
        #[arg(long)]
        title: String,

        /// Notification body
        #[arg(long)]
        message: String,

        /// Delivery time, RFC 3339 or YYYY-MM-DDTHH:MM (UTC)
        #[arg(long)]
        at: String,
    },

    /// List scheduled notifications
    List,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the platform configuration
    Show,

    /// Update prices or themes
    Set {
        /// Monthly subscription price
        #[arg(long)]
        monthly_price: Option<f64>,

        /// Annual subscription price
        #[arg(long)]
        annual_price: Option<f64>,

        /// Color scheme: light or dark
        #[arg(long)]
        theme: Option<ThemeMode>,

        /// Seasonal decoration: none, xmas, or halloween
        #[arg(long)]
        seasonal_theme: Option<SeasonalTheme>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum WorkoutCommand {
    /// List the workout catalog
    List,

    /// Add or replace workouts from a JSON file holding an array of workouts
    Seed {
        /// Path to the JSON file
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = &cli.database_url {
        config.database_url = DatabaseUrl::parse_url(url);
    }
    debug!("{}", config.summary());

    let admin_email = cli
        .admin_email
        .ok_or_else(|| anyhow!("--admin-email is required for administrative commands"))?;

    info!("Connecting to database: {}", config.database_url);
    let database = Database::new(&config.database_url.to_connection_string()).await?;
    let admin = AdminService::new(database.clone(), config.privileged.clone(), &admin_email)?;

    match cli.command {
        Command::User { action } => match action {
            UserCommand::List { search } => {
                commands::user::list(&admin, search.as_deref()).await?;
            }
            UserCommand::Ban { email } => commands::user::ban(&admin, &email).await?,
            UserCommand::Timeline { email } => commands::user::timeline(&admin, &email).await?,
            UserCommand::Access { email } => commands::user::access(&admin, &email).await?,
        },
        Command::Notify { action } => match action {
            NotifyCommand::Schedule { title, message, at } => {
                commands::notify::schedule(&admin, &title, &message, &at).await?;
            }
            NotifyCommand::List => commands::notify::list(&admin).await?,
        },
        Command::Config { action } => match action {
            ConfigCommand::Show => commands::config::show(&admin).await?,
            ConfigCommand::Set {
                monthly_price,
                annual_price,
                theme,
                seasonal_theme,
            } => {
                commands::config::set(&admin, monthly_price, annual_price, theme, seasonal_theme)
                    .await?;
            }
        },
        Command::Workout { action } => match action {
            WorkoutCommand::List => commands::workout::list(database).await?,
            WorkoutCommand::Seed { path } => commands::workout::seed(database, &path).await?,
        },
        Command::Stats => commands::stats::show(&admin).await?,
    }

    Ok(())
}

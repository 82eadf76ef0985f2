//! Kynship CLI - migrations and content management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! kynship-cli migrate
//!
//! # Inspect and edit site settings
//! kynship-cli settings show
//! kynship-cli settings set footer_text '"جميع الحقوق محفوظة"' --as-admin 1
//!
//! # Inspect and edit page content
//! kynship-cli pages list
//! kynship-cli pages show faq
//! kynship-cli pages set faq ./faq.json --as-admin 1
//!
//! # Print the local settings backup
//! kynship-cli backup show
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kynship_core::AdminUserId;

mod commands;

#[derive(Parser)]
#[command(name = "kynship-cli")]
#[command(author, version, about = "Kynship CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect and edit site settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Inspect and edit page content
    Pages {
        #[command(subcommand)]
        action: PagesAction,
    },
    /// Inspect the local settings backup
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print all settings, stored values over defaults
    Show,
    /// Save one setting
    Set {
        /// Setting key (e.g. `site_name`)
        key: String,

        /// Value as JSON; bare text is saved as a string
        value: String,

        /// Admin user the write is recorded against
        #[arg(long = "as-admin")]
        as_admin: AdminUserId,
    },
}

#[derive(Subcommand)]
enum PagesAction {
    /// List editable pages
    List,
    /// Print a page's content, stored sections over defaults
    Show {
        /// Page key (`home`, `about`, `contact`, `faq`)
        key: String,
    },
    /// Replace a page's content with a JSON file
    Set {
        /// Page key (`home`, `about`, `contact`, `faq`)
        key: String,

        /// JSON file holding the full content object
        file: PathBuf,

        /// Admin user the write is recorded against
        #[arg(long = "as-admin")]
        as_admin: AdminUserId,
    },
}

#[derive(Subcommand)]
enum BackupAction {
    /// Print the last settings backup
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await?,
            SettingsAction::Set {
                key,
                value,
                as_admin,
            } => commands::settings::set(&key, &value, as_admin).await?,
        },
        Commands::Pages { action } => match action {
            PagesAction::List => commands::pages::list(),
            PagesAction::Show { key } => commands::pages::show(&key).await?,
            PagesAction::Set {
                key,
                file,
                as_admin,
            } => commands::pages::set(&key, &file, as_admin).await?,
        },
        Commands::Backup { action } => match action {
            BackupAction::Show => commands::backup::show().await?,
        },
    }
    Ok(())
}

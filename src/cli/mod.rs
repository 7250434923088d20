pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "media-vault")]
#[command(version)]
#[command(about = "Accounts and tagged photos/videos behind a JSON API", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "media-vault.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Overrides `server.host` from the config file
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Overrides `server.port` from the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending schema migrations
    Migrate {
        #[command(subcommand)]
        command: Option<MigrateCommand>,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
}

#[derive(Subcommand)]
pub enum MigrateCommand {
    /// Show which migrations have been applied
    Status,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a staff superuser account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    List,
}

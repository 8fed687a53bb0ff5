//! EduHub CLI - drive the client session from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create a teacher account, then sign in and stay signed in
//! eduhub signup --role teacher --email edna@example.com --password apple123 \
//!     --name "Edna Krabappel" --phone 5559876543 --location Springfield \
//!     --teaching-grades 3,4 --teaching-school "Springfield Elementary"
//! eduhub login --email edna@example.com --password apple123 --remember-me
//!
//! # Inspect the session and the router
//! eduhub whoami
//! eduhub route /books
//!
//! # Try the app without an account for ten minutes
//! eduhub demo --role student --watch
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod bootstrap;
mod commands;
mod logging;

use commands::{DemoArgs, LoginArgs, RouteArgs, SignupArgs};

#[derive(Parser)]
#[command(name = "eduhub")]
#[command(author, version, about = "EduHub CLI - accounts, profiles and demo sessions", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path of config.toml (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for accounts, profiles and logs (overrides [storage] data_dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep accounts and profiles in memory; nothing is written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and its profile
    Signup(SignupArgs),
    /// Sign in with email and password
    Login(LoginArgs),
    /// Sign out (ends a running demo)
    Logout,
    /// Show the signed-in user, profile and navigation
    Whoami,
    /// Show what the router does for a path
    Route(RouteArgs),
    /// Start a demo session
    Demo(DemoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app = bootstrap::bootstrap(&cli.global)?;

    let result = match cli.command {
        Commands::Signup(args) => commands::account::signup(&app, args).await,
        Commands::Login(args) => commands::account::login(&app, args).await,
        Commands::Logout => commands::account::logout(&app).await,
        Commands::Whoami => commands::session::whoami(&app).await,
        Commands::Route(args) => commands::session::route(&app, args).await,
        Commands::Demo(args) => commands::session::demo(&app, args).await,
    };

    app.shutdown();
    result
}

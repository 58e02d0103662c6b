use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

mod auth;
mod commands;
mod config;
mod db;
mod defaults;
mod models;
mod sync;

use auth::AdminSession;
use commands::{CategoryCommand, ConfigCommand, DashboardCommand, ItemCommand, SyncCommand};
use config::Config;
use db::{init_db, CategoryRepository, ItemRepository};

#[derive(Parser)]
#[command(name = "thanainfo")]
#[command(version)]
#[command(about = "Local information directory for Aminpur Thana", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    Category(CategoryCommand),

    /// Manage directory entries
    Item(ItemCommand),

    /// Show dataset totals and per-category counts
    Dashboard(DashboardCommand),

    /// Sync the dataset with the remote repository
    Sync(SyncCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Start an admin session
    Login {
        /// Admin username
        username: String,

        /// Admin password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// End the admin session
    Logout,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thanainfo=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    let session = AdminSession::at(&Config::default_data_dir());

    match cli.command {
        Some(Commands::Category(cmd)) => {
            let pool = init_db(Some(config.database_path.value.clone())).await?;
            let repo = CategoryRepository::new(pool);
            cmd.run(&repo, &session).await?;
        }
        Some(Commands::Item(cmd)) => {
            let pool = init_db(Some(config.database_path.value.clone())).await?;
            let item_repo = ItemRepository::new(pool.clone());
            let category_repo = CategoryRepository::new(pool);
            cmd.run(&item_repo, &category_repo, &session).await?;
        }
        Some(Commands::Dashboard(cmd)) => {
            let pool = init_db(Some(config.database_path.value.clone())).await?;
            let category_repo = CategoryRepository::new(pool.clone());
            let item_repo = ItemRepository::new(pool);
            cmd.run(&category_repo, &item_repo).await?;
        }
        Some(Commands::Sync(cmd)) => {
            let pool = init_db(Some(config.database_path.value.clone())).await?;
            let category_repo = CategoryRepository::new(pool.clone());
            let item_repo = ItemRepository::new(pool.clone());
            cmd.run(&pool, &category_repo, &item_repo, &config, &session)
                .await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::Login { username, password }) => {
            let password = match password {
                Some(p) => p,
                None => {
                    print!("Password: ");
                    std::io::stdout().flush()?;
                    let mut input = String::new();
                    std::io::stdin().read_line(&mut input)?;
                    input.trim_end_matches(['\r', '\n']).to_string()
                }
            };
            session.login(&username, &password)?;
            println!("Logged in. Admin commands are now available.");
        }
        Some(Commands::Logout) => {
            session.logout()?;
            println!("Logged out.");
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

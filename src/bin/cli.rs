use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use portfolio_api::{
    cli::{
        auth,
        db::{db_generate, db_list, db_migrate, db_revert},
        seed::{self, SeedData},
    },
    core::db::init_pool,
    settings::get_config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Authentication related command
    Auth(AuthArgs),
    /// Create portfolio entries through the API, skipping the ones already present
    Seed {
        #[command(flatten)]
        api: ApiArgs,
        /// JSON file with `education`, `projects`, `dsa_topics` and `certificates` lists
        #[arg(short, long, default_value = "demos/seed_data.json")]
        file: PathBuf,
    },
    /// Delete every portfolio entry owned by the user through the API
    Clear {
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Debug, Args)]
struct ApiArgs {
    /// API root including the prefix, e.g. http://localhost:8000/api
    #[arg(short, long, default_value = "http://localhost:8000/api")]
    base_url: String,
    #[arg(short, long)]
    username: String,
    #[arg(short, long)]
    password: String,
}

#[derive(Debug, Args)]
struct AuthArgs {
    #[command(subcommand)]
    command: AuthCommands,
}

#[derive(Debug, Subcommand)]
enum AuthCommands {
    /// Create new user with its own profile
    CreateUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create or update a user linked to the default profile
    EnsureAdmin {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                db_revert(&config).await?;
            }
        },
        Commands::Auth(auth_args) => {
            let config = get_config()?;
            let pool = init_pool(&config).await?;
            match &auth_args.command {
                AuthCommands::CreateUser { username, password } => {
                    println!("create user: {username:?}");
                    let registered = auth::create_user(&pool, &config, username, password).await?;
                    println!("user created with profile {}", registered.profile.id);
                }
                AuthCommands::EnsureAdmin { username, password } => {
                    println!("ensure admin: {username:?}");
                    let credential = auth::ensure_admin(&pool, &config, username, password).await?;
                    if let Some(val) = credential.profile_id {
                        println!("{} linked to profile {}", credential.username, val);
                    }
                }
            }
        }
        Commands::Seed { api, file } => {
            let data = SeedData::from_file(file).await?;
            let report = seed::seed(&api.base_url, &api.username, &api.password, data).await?;
            println!(
                "seed done: {} created, {} already present",
                report.created, report.skipped
            );
        }
        Commands::Clear { api } => {
            let deleted = seed::clear(&api.base_url, &api.username, &api.password).await?;
            println!("clear done: {} deleted", deleted);
        }
    }
    Ok(())
}

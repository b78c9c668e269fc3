use anyhow::Result;
use clap::{Parser, Subcommand};
use miniature::{config::Config, migration, server, server::ServiceGroup, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(name = "miniature")]
#[command(author, version, about = "Customer, shop and product services")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Route groups to expose
        #[arg(long, value_enum, default_value_t = ServiceGroup::All)]
        service: ServiceGroup,
    },
    /// Create the database if missing and apply migrations
    Migrate,
    /// Insert demo customers, shops and products into an empty database
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let metrics = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Commands::Serve {
        service: ServiceGroup::All,
    }) {
        Commands::Serve { service } => {
            info!(environment = %config.environment, "Starting miniature");
            server::run(config, service, metrics).await
        }
        Commands::Migrate => migration::run_migrations(&config).await,
        Commands::Seed => migration::seed(&config).await,
    }
}

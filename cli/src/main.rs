//! Provisioning tool for the customer-service DynamoDB infrastructure.
//!
//! This binary manages the lifecycle of the `Customer` table: it creates the
//! table from the canonical schema, reports its status, tears it down, and
//! seeds it with sample records for local development.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod prelude;
mod table;

/// Infrastructure tasks for the customer-service Customer table
#[derive(Debug, Parser)]
#[command(name = "customerdb")]
#[command(about = "Manage the Customer DynamoDB table", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Create the Customer table if it does not exist
    Deploy(table::DeployCommand),

    /// Delete the Customer table
    Destroy(table::DestroyCommand),

    /// Show the current state of the Customer table
    Status(table::StatusCommand),

    /// Insert sample customers into the table
    Seed(table::SeedCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(&cli.global);

    match cli.command {
        Commands::Deploy(deploy_cmd) => {
            table::run_deploy(deploy_cmd, &cli.global).await?;
        }
        Commands::Destroy(destroy_cmd) => {
            table::run_destroy(destroy_cmd, &cli.global).await?;
        }
        Commands::Status(status_cmd) => {
            table::run_status(status_cmd, &cli.global).await?;
        }
        Commands::Seed(seed_cmd) => {
            table::run_seed(seed_cmd, &cli.global).await?;
        }
    }

    Ok(())
}

fn init_tracing(global: &Global) {
    let default_directive = if global.is_verbose() {
        "customerdb=debug,aws_config=warn"
    } else {
        "customerdb=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

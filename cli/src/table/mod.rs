//! Customer table infrastructure management commands.

mod client;
mod error;
mod planning;
mod provision;
mod schema;
mod seed;

pub use error::{Result, TableError};

use crate::prelude::*;
use dialoguer::Confirm;

/// Create the Customer table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create the Customer DynamoDB table.

By default, this command provisions the table used by the customer service:
partition key 'Id' (string) with provisioned throughput of one read and one
write capacity unit. The command shows a plan before applying and asks for
confirmation, then waits until the table reports ACTIVE and prints the
service's table description.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Table name to use.
    #[arg(long, default_value = "Customer")]
    pub table_name: String,

    /// Provisioned read capacity units.
    #[arg(long, default_value = "1")]
    pub read_capacity: u32,

    /// Provisioned write capacity units.
    #[arg(long, default_value = "1")]
    pub write_capacity: u32,

    /// Use on-demand billing instead of provisioned throughput.
    #[arg(long, conflicts_with_all = ["read_capacity", "write_capacity"])]
    pub on_demand: bool,
}

/// Delete the Customer table.
#[derive(Debug, clap::Parser)]
pub struct DestroyCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Table name to use.
    #[arg(long, default_value = "Customer")]
    pub table_name: String,
}

/// Show the current state of the Customer table.
#[derive(Debug, clap::Parser)]
pub struct StatusCommand {
    /// Table name to use.
    #[arg(long, default_value = "Customer")]
    pub table_name: String,
}

/// Insert sample customers into the table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert sample customers into DynamoDB.

Creates deterministic demo records with the columns the customer service
expects (Id, Name, Email, AccountNumber, RegistrationDate), spread over the
days leading up to today.")]
pub struct SeedCommand {
    /// Number of customers to generate.
    #[arg(long, default_value = "15")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, default_value = "Customer")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

pub async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let billing = if cmd.on_demand {
        schema::BillingMode::PayPerRequest
    } else {
        schema::BillingMode::Provisioned {
            read_capacity: cmd.read_capacity,
            write_capacity: cmd.write_capacity,
        }
    };
    let table_schema = schema::customer_table_schema()
        .with_table_name(&cmd.table_name)
        .with_billing(billing);
    table_schema.validate()?;

    let dynamo_client = client::create_client(&aws_config).await?;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_schema);

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Table already exists, nothing to create."));
        }
        return Ok(());
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(true)
            .interact()
            .map_err(|e| TableError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(TableError::UserCancelled);
        }
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Creating table..."));
    }

    // The outcome payload belongs on stdout: the error payload here, the
    // description below. The failure still propagates for the exit code.
    let description = match provision::execute_deploy_plan(&dynamo_client, &plan).await {
        Ok(description) => description,
        Err(err) => {
            aprintln!("{}", p_r(&err.to_string()));
            return Err(err);
        }
    };

    if let Some(description) = description {
        aprintln!("{:#?}", description);
    }
    if !global.is_silent() {
        aprintln!();
        aprintln!("{}", p_g("Table created successfully."));
    }

    Ok(())
}

pub async fn run_destroy(cmd: DestroyCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in planning::format_destroy_plan(&plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Are you sure you want to delete this table? ALL DATA WILL BE LOST")
            .default(false)
            .interact()
            .map_err(|e| TableError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(TableError::UserCancelled);
        }
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Deleting table..."));
    }

    provision::execute_destroy_plan(&dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Table destroyed successfully."));
    }

    Ok(())
}

pub async fn run_status(cmd: StatusCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    match client::describe_table(&dynamo_client, &cmd.table_name).await? {
        Some(description) => {
            aprintln!("{:#?}", description);
        }
        None => {
            aprintln!("Table '{}' does not exist", cmd.table_name);
        }
    }

    Ok(())
}

pub async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Customer count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    // Verify table exists
    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(TableError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let customers =
        customerdb_core::customer::generate_sample_customers(chrono::Utc::now(), cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Customers to create:"));
        for customer in customers.iter().take(5) {
            aprintln!(
                "  {} <{}> ({})",
                customer.name,
                customer.email,
                customer.account_number
            );
        }
        if customers.len() > 5 {
            aprintln!("  ... and {} more", customers.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Insert {} customers?", customers.len()))
            .default(true)
            .interact()
            .map_err(|e| TableError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(TableError::UserCancelled);
        }
    }

    let inserted = seed::seed_customers(&dynamo_client, &cmd.table_name, &customers).await?;

    if !global.is_silent() {
        aprintln!("{} {} customers inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}

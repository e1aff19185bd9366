//! Table provisioning operations (Imperative Shell).

use super::client;
use super::error::{Result, TableError};
use super::planning::{DeployPlan, DestroyPlan, TableStatus};
use super::schema::{BillingMode, TableSchema};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
    TableDescription,
};
use aws_sdk_dynamodb::Client;
use std::time::Duration;
use tracing::debug;

/// Execute a deploy plan. Returns the service's table description payload
/// when a table was created, None when there was nothing to do.
pub async fn execute_deploy_plan(
    client: &Client,
    plan: &DeployPlan,
) -> Result<Option<TableDescription>> {
    match plan {
        DeployPlan::CreateTable { schema } => {
            let description = create_table(client, schema).await?;
            wait_for_table_active(client, &schema.table_name).await?;
            Ok(Some(description))
        }
        DeployPlan::NoChanges { .. } => Ok(None),
    }
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            delete_table(client, table_name).await?;
        }
        DestroyPlan::AlreadyGone { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

/// Submits the table definition in a single CreateTable request. One call,
/// one outcome: the service's description payload or its error.
async fn create_table(client: &Client, schema: &TableSchema) -> Result<TableDescription> {
    debug!(table_name = %schema.table_name, "submitting CreateTable");

    let mut request = client
        .create_table()
        .table_name(&schema.table_name)
        .set_key_schema(Some(build_key_schema(schema)?))
        .set_attribute_definitions(Some(build_attribute_definitions(schema)?));

    request = match schema.billing {
        BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } => request
            .billing_mode(aws_sdk_dynamodb::types::BillingMode::Provisioned)
            .provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(i64::from(read_capacity))
                    .write_capacity_units(i64::from(write_capacity))
                    .build()
                    .map_err(|e| TableError::AwsSdk(e.to_string()))?,
            ),
        BillingMode::PayPerRequest => {
            request.billing_mode(aws_sdk_dynamodb::types::BillingMode::PayPerRequest)
        }
    };

    let response = request
        .send()
        .await
        .map_err(|e| TableError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

    response
        .table_description()
        .cloned()
        .ok_or_else(|| TableError::AwsSdk("CreateTable response has no description".to_string()))
}

/// Builds the key schema elements, partition key first.
fn build_key_schema(schema: &TableSchema) -> Result<Vec<KeySchemaElement>> {
    let mut key_schema = vec![KeySchemaElement::builder()
        .attribute_name(&schema.partition_key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| TableError::AwsSdk(e.to_string()))?];

    if let Some(sk) = &schema.sort_key {
        key_schema.push(
            KeySchemaElement::builder()
                .attribute_name(&sk.name)
                .key_type(KeyType::Range)
                .build()
                .map_err(|e| TableError::AwsSdk(e.to_string()))?,
        );
    }

    Ok(key_schema)
}

/// Builds the attribute definitions for every key attribute.
fn build_attribute_definitions(schema: &TableSchema) -> Result<Vec<AttributeDefinition>> {
    schema
        .key_attributes()
        .into_iter()
        .map(|key| {
            AttributeDefinition::builder()
                .attribute_name(&key.name)
                .attribute_type(to_scalar_type(key.attribute_type))
                .build()
                .map_err(|e| TableError::AwsSdk(e.to_string()))
        })
        .collect()
}

async fn delete_table(client: &Client, table_name: &str) -> Result<()> {
    debug!(table_name, "submitting DeleteTable");

    client
        .delete_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|e| TableError::AwsSdk(DisplayErrorContext(&e).to_string()))?;
    Ok(())
}

/// Polls DescribeTable until the table reports ACTIVE.
async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(TableError::TableActivationTimeout)
}

fn to_scalar_type(attr_type: super::schema::AttributeType) -> ScalarAttributeType {
    match attr_type {
        super::schema::AttributeType::String => ScalarAttributeType::S,
        super::schema::AttributeType::Number => ScalarAttributeType::N,
        super::schema::AttributeType::Binary => ScalarAttributeType::B,
    }
}

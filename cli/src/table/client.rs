//! AWS SDK client setup (Imperative Shell).

use super::error::{Result, TableError};
use super::planning::{TableState, TableStatus};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::TableDescription;
use aws_sdk_dynamodb::Client;
use tracing::debug;

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration. The returned
/// handle is the only way the rest of the tool talks to the service.
pub async fn create_client(config: &AwsConfig) -> Result<Client> {
    debug!(region = %config.region, endpoint = ?config.endpoint_url, "creating DynamoDB client");

    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Ok(Client::new(&sdk_config))
}

/// Fetches the raw table description, returns None if the table doesn't exist.
pub async fn describe_table(
    client: &Client,
    table_name: &str,
) -> Result<Option<TableDescription>> {
    debug!(table_name, "describing table");

    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => {
            let table = response.table().cloned().ok_or_else(|| {
                TableError::AwsSdk("DescribeTable response has no table".to_string())
            })?;
            Ok(Some(table))
        }
        // A missing table is a normal answer, not a failure.
        Err(err) if err.as_service_error().is_some_and(is_table_missing) => Ok(None),
        Err(err) => Err(TableError::AwsSdk(DisplayErrorContext(&err).to_string())),
    }
}

fn is_table_missing(err: &DescribeTableError) -> bool {
    err.is_resource_not_found_exception()
}

/// Fetches current table state, returns None if the table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let Some(table) = describe_table(client, table_name).await? else {
        return Ok(None);
    };

    let status = match table.table_status() {
        Some(aws_sdk_dynamodb::types::TableStatus::Active) => TableStatus::Active,
        Some(aws_sdk_dynamodb::types::TableStatus::Creating) => TableStatus::Creating,
        Some(aws_sdk_dynamodb::types::TableStatus::Updating) => TableStatus::Updating,
        Some(aws_sdk_dynamodb::types::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    Ok(Some(TableState { status }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{InternalServerError, ResourceNotFoundException};

    fn resource_not_found() -> DescribeTableError {
        DescribeTableError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .message("Requested resource not found: Table: Customer not found")
                .build(),
        )
    }

    #[test]
    fn test_missing_table_is_detected_from_typed_error() {
        assert!(is_table_missing(&resource_not_found()));
    }

    #[test]
    fn test_other_service_errors_are_not_a_missing_table() {
        let err = DescribeTableError::InternalServerError(InternalServerError::builder().build());
        assert!(!is_table_missing(&err));
    }

    #[test]
    fn test_describe_error_mapping_keeps_payload() {
        let mapped = TableError::AwsSdk(DisplayErrorContext(&resource_not_found()).to_string());
        let message = mapped.to_string();
        assert!(message.contains("ResourceNotFoundException"));
        assert!(message.contains("Requested resource not found"));
    }
}

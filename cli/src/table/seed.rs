//! Seed command implementation.

use super::error::{Result, TableError};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemOutput;
use aws_sdk_dynamodb::types::{AttributeValue, WriteRequest};
use aws_sdk_dynamodb::Client;
use customerdb_core::customer::{validate_customer, Customer};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

// Column names from the customer-service application.
const ID_COLUMN: &str = "Id";
const NAME_COLUMN: &str = "Name";
const EMAIL_COLUMN: &str = "Email";
const ACCOUNT_NUMBER_COLUMN: &str = "AccountNumber";
const REGISTRATION_DATE_COLUMN: &str = "RegistrationDate";

/// Maximum retry attempts for unprocessed write requests.
const MAX_BATCH_RETRIES: u32 = 5;

/// Convert a Customer to a DynamoDB item.
fn customer_to_item(customer: &Customer) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        ID_COLUMN.to_string(),
        AttributeValue::S(customer.id.clone()),
    );
    item.insert(
        NAME_COLUMN.to_string(),
        AttributeValue::S(customer.name.clone()),
    );
    item.insert(
        EMAIL_COLUMN.to_string(),
        AttributeValue::S(customer.email.clone()),
    );
    item.insert(
        ACCOUNT_NUMBER_COLUMN.to_string(),
        AttributeValue::S(customer.account_number.clone()),
    );
    item.insert(
        REGISTRATION_DATE_COLUMN.to_string(),
        AttributeValue::S(customer.registration_date_string()),
    );

    item
}

/// Insert customers into DynamoDB. Records are validated before any write is
/// issued, so a bad batch inserts nothing.
pub async fn seed_customers(
    client: &Client,
    table_name: &str,
    customers: &[Customer],
) -> Result<u32> {
    for customer in customers {
        validate_customer(customer)?;
    }

    let mut inserted = 0;

    // Use batch write for efficiency (25 items per batch max)
    for chunk in customers.chunks(25) {
        let mut pending = chunk
            .iter()
            .map(|customer| {
                let put_request = aws_sdk_dynamodb::types::PutRequest::builder()
                    .set_item(Some(customer_to_item(customer)))
                    .build()
                    .map_err(|e| TableError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put_request).build())
            })
            .collect::<Result<Vec<_>>>()?;

        // The service may return part of a batch as unprocessed (throttling
        // on low provisioned throughput); those requests are retried with
        // backoff until the bound is hit.
        let mut retries = 0;
        while !pending.is_empty() {
            let batch_size = pending.len();
            debug!(table_name, batch_size, retries, "writing seed batch");

            let output = client
                .batch_write_item()
                .request_items(table_name, pending)
                .send()
                .await
                .map_err(|e| TableError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

            let remaining = unprocessed_for_table(&output, table_name);
            inserted += (batch_size - remaining.len()) as u32;

            if remaining.is_empty() {
                break;
            }
            if retries >= MAX_BATCH_RETRIES {
                return Err(TableError::SeedIncomplete {
                    remaining: remaining.len(),
                });
            }
            retries += 1;
            tokio::time::sleep(Duration::from_millis(50 * u64::from(1u32 << retries))).await;
            pending = remaining;
        }
    }

    Ok(inserted)
}

/// Write requests the service reported back as unprocessed for this table.
fn unprocessed_for_table(output: &BatchWriteItemOutput, table_name: &str) -> Vec<WriteRequest> {
    output
        .unprocessed_items()
        .and_then(|items| items.get(table_name))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_customer_to_item_columns() {
        let date = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 45).unwrap();
        let customer = Customer::new("Jane Doe", "jane@example.com", "AC-1001")
            .with_id("c-1")
            .with_registration_date(date);

        let item = customer_to_item(&customer);

        assert_eq!(item.len(), 5);
        assert_eq!(item["Id"], AttributeValue::S("c-1".to_string()));
        assert_eq!(item["Name"], AttributeValue::S("Jane Doe".to_string()));
        assert_eq!(
            item["Email"],
            AttributeValue::S("jane@example.com".to_string())
        );
        assert_eq!(
            item["AccountNumber"],
            AttributeValue::S("AC-1001".to_string())
        );
        assert_eq!(
            item["RegistrationDate"],
            AttributeValue::S("2024-06-15T12:30:45.000+00:00".to_string())
        );
    }

    #[test]
    fn test_item_registration_date_parses_back() {
        let customer = Customer::new("Jane Doe", "jane@example.com", "AC-1001");
        let item = customer_to_item(&customer);

        let AttributeValue::S(raw) = &item["RegistrationDate"] else {
            panic!("RegistrationDate should be a string attribute");
        };
        Customer::parse_registration_date(raw).unwrap();
    }

    fn write_request(id: &str) -> WriteRequest {
        let put_request = aws_sdk_dynamodb::types::PutRequest::builder()
            .item("Id", AttributeValue::S(id.to_string()))
            .build()
            .unwrap();
        WriteRequest::builder().put_request(put_request).build()
    }

    #[test]
    fn test_unprocessed_for_table_extracts_leftovers() {
        let output = BatchWriteItemOutput::builder()
            .unprocessed_items("Customer", vec![write_request("c-1"), write_request("c-2")])
            .build();

        let remaining = unprocessed_for_table(&output, "Customer");
        assert_eq!(remaining.len(), 2);
    }

    #[test]
    fn test_unprocessed_for_table_ignores_other_tables() {
        let output = BatchWriteItemOutput::builder()
            .unprocessed_items("Orders", vec![write_request("o-1")])
            .build();

        assert!(unprocessed_for_table(&output, "Customer").is_empty());
    }

    #[test]
    fn test_unprocessed_for_table_empty_output() {
        let output = BatchWriteItemOutput::builder().build();
        assert!(unprocessed_for_table(&output, "Customer").is_empty());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CustomerError;

/// Timestamp layout used in the `RegistrationDate` column: RFC 3339 with
/// millisecond precision and a numeric UTC offset.
pub const REGISTRATION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// A customer record as stored in the `Customer` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub account_number: String,
    pub registration_date: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer with a generated ID, registered now.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            account_number: account_number.into(),
            registration_date: Utc::now(),
        }
    }

    /// Sets a specific ID for this customer (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets a specific registration date for this customer.
    pub fn with_registration_date(mut self, registration_date: DateTime<Utc>) -> Self {
        self.registration_date = registration_date;
        self
    }

    /// Returns the registration date in the column layout.
    pub fn registration_date_string(&self) -> String {
        self.registration_date
            .format(REGISTRATION_DATE_FORMAT)
            .to_string()
    }

    /// Parses a `RegistrationDate` column value.
    pub fn parse_registration_date(value: &str) -> Result<DateTime<Utc>, CustomerError> {
        DateTime::parse_from_str(value, REGISTRATION_DATE_FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| CustomerError::InvalidRegistrationDate(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_registration_date_round_trip() {
        let date = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 45).unwrap();
        let customer = Customer::new("Jane Doe", "jane@example.com", "AC-1001")
            .with_registration_date(date);

        let formatted = customer.registration_date_string();
        assert_eq!(formatted, "2024-06-15T12:30:45.000+00:00");

        let parsed = Customer::parse_registration_date(&formatted).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_parse_registration_date_rejects_garbage() {
        let result = Customer::parse_registration_date("yesterday");
        assert!(matches!(
            result,
            Err(CustomerError::InvalidRegistrationDate(_))
        ));
    }

    #[test]
    fn test_serde_uses_column_names() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let customer = Customer::new("Jane Doe", "jane@example.com", "AC-1001")
            .with_id("c-1")
            .with_registration_date(date);

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["Id"], "c-1");
        assert_eq!(json["Name"], "Jane Doe");
        assert_eq!(json["Email"], "jane@example.com");
        assert_eq!(json["AccountNumber"], "AC-1001");
        assert!(json["RegistrationDate"].is_string());

        let back: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(back, customer);
    }
}

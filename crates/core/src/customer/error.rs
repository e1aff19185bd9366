use thiserror::Error;

/// Errors that can occur when validating or parsing customer records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Customer name cannot be empty")]
    EmptyName,
    #[error("Customer name too long (max 100 characters)")]
    NameTooLong,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Account number cannot be empty")]
    EmptyAccountNumber,
    #[error("Invalid registration date: {0}")]
    InvalidRegistrationDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_error_display() {
        assert_eq!(
            CustomerError::EmptyName.to_string(),
            "Customer name cannot be empty"
        );
        assert_eq!(
            CustomerError::InvalidEmail("not-an-email".to_string()).to_string(),
            "Invalid email address: not-an-email"
        );
    }
}

use super::error::CustomerError;
use super::types::Customer;

/// Validates a customer record before it is written to the table.
pub fn validate_customer(customer: &Customer) -> Result<(), CustomerError> {
    if customer.name.trim().is_empty() {
        return Err(CustomerError::EmptyName);
    }
    if customer.name.len() > 100 {
        return Err(CustomerError::NameTooLong);
    }
    if !is_valid_email(&customer.email) {
        return Err(CustomerError::InvalidEmail(customer.email.clone()));
    }
    if customer.account_number.trim().is_empty() {
        return Err(CustomerError::EmptyAccountNumber);
    }
    Ok(())
}

/// Checks that an email has a single `@` with a non-empty local part and a
/// dotted domain. Not a full RFC 5322 parse, just enough to catch typos.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

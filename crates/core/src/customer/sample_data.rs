//! Sample data generation for testing and seeding.
//!
//! Pure functions that generate deterministic customer records. They have no
//! side effects and are shared between unit tests and the `seed` command.

use chrono::{DateTime, Duration, Utc};

use super::types::Customer;

/// Generate sample customers registered in the days leading up to `now`.
///
/// Customers cycle through a fixed pool of names, so generated records are
/// deterministic apart from their IDs. Registration dates are spread one day
/// apart, newest first.
///
/// # Example
///
/// ```
/// use customerdb_core::customer::generate_sample_customers;
/// use chrono::Utc;
///
/// let customers = generate_sample_customers(Utc::now(), 10);
///
/// assert_eq!(customers.len(), 10);
/// ```
pub fn generate_sample_customers(now: DateTime<Utc>, count: u32) -> Vec<Customer> {
    let names = [
        "Ada Lovelace",
        "Grace Hopper",
        "Alan Turing",
        "Katherine Johnson",
        "Edsger Dijkstra",
        "Barbara Liskov",
        "Donald Knuth",
        "Margaret Hamilton",
        "Tony Hoare",
        "Frances Allen",
    ];

    let mut customers = Vec::with_capacity(count as usize);

    for i in 0..count {
        let name = names[i as usize % names.len()];
        let email = format!(
            "{}{}@example.com",
            name.split_whitespace()
                .next()
                .unwrap_or("customer")
                .to_lowercase(),
            i
        );
        let account_number = format!("AC-{:05}", 1000 + i);
        let registered = now - Duration::days(i as i64);

        customers.push(
            Customer::new(name, email, account_number).with_registration_date(registered),
        );
    }

    customers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::validate_customer;
    use std::collections::HashSet;

    #[test]
    fn test_generate_sample_customers_count() {
        let customers = generate_sample_customers(Utc::now(), 25);
        assert_eq!(customers.len(), 25);
    }

    #[test]
    fn test_generate_sample_customers_are_valid() {
        for customer in generate_sample_customers(Utc::now(), 15) {
            validate_customer(&customer).unwrap();
        }
    }

    #[test]
    fn test_generate_sample_customers_unique_ids() {
        let customers = generate_sample_customers(Utc::now(), 30);
        let ids: HashSet<_> = customers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), customers.len());
    }

    #[test]
    fn test_generate_sample_customers_unique_emails() {
        let customers = generate_sample_customers(Utc::now(), 30);
        let emails: HashSet<_> = customers.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), customers.len());
    }
}

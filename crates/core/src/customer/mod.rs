mod error;
mod operations;
mod sample_data;
mod types;

pub use error::CustomerError;
pub use operations::validate_customer;
pub use sample_data::generate_sample_customers;
pub use types::{Customer, REGISTRATION_DATE_FORMAT};

//! Error types for table operations.

use thiserror::Error;

/// Result type alias for the table module.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while managing the Customer table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Invalid table schema: {0}")]
    InvalidSchema(String),

    #[error("Invalid customer record: {0}")]
    InvalidCustomer(#[from] customerdb_core::customer::CustomerError),

    #[error("{remaining} seed records were still unprocessed after retries")]
    SeedIncomplete { remaining: usize },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

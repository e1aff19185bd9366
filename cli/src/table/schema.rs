//! Table schema types (Functional Core - pure data).

use super::error::{Result, TableError};

/// Table definition descriptor: everything needed to issue a CreateTable call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub billing: BillingMode,
}

/// A key attribute definition. Each key carries its own scalar type, so every
/// key schema entry always has a matching attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}

/// DynamoDB scalar attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    /// The single-letter type tag used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    /// Pre-allocated read/write capacity units.
    Provisioned {
        read_capacity: u32,
        write_capacity: u32,
    },
    PayPerRequest,
}

impl TableSchema {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Sets the billing mode.
    pub fn with_billing(mut self, billing: BillingMode) -> Self {
        self.billing = billing;
        self
    }

    /// Returns every key attribute in key-schema order (partition first).
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut keys = vec![&self.partition_key];
        if let Some(sk) = &self.sort_key {
            keys.push(sk);
        }
        keys
    }

    /// Returns the derived attribute definitions as (name, type tag) pairs.
    /// Derived from the keys themselves, so coverage of the key schema is
    /// guaranteed by construction.
    pub fn attribute_definitions(&self) -> Vec<(&str, &'static str)> {
        self.key_attributes()
            .into_iter()
            .map(|key| (key.name.as_str(), key.attribute_type.tag()))
            .collect()
    }

    /// Validates the descriptor before submission. Capacity units must be
    /// positive and key names non-empty; everything else is left to the
    /// service.
    pub fn validate(&self) -> Result<()> {
        if self.table_name.trim().is_empty() {
            return Err(TableError::InvalidSchema(
                "table name cannot be empty".to_string(),
            ));
        }
        for key in self.key_attributes() {
            if key.name.trim().is_empty() {
                return Err(TableError::InvalidSchema(
                    "key attribute name cannot be empty".to_string(),
                ));
            }
        }
        if let BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } = self.billing
        {
            if read_capacity < 1 || write_capacity < 1 {
                return Err(TableError::InvalidSchema(format!(
                    "provisioned capacity must be at least 1 (got read={}, write={})",
                    read_capacity, write_capacity
                )));
            }
        }
        Ok(())
    }
}

/// Returns the canonical schema for the Customer table.
/// This is a pure function - no I/O.
pub fn customer_table_schema() -> TableSchema {
    TableSchema {
        table_name: "Customer".to_string(),
        partition_key: KeyAttribute::new("Id", AttributeType::String),
        sort_key: None,
        billing: BillingMode::Provisioned {
            read_capacity: 1,
            write_capacity: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_schema_shape() {
        let schema = customer_table_schema();
        assert_eq!(schema.table_name, "Customer");
        assert_eq!(schema.partition_key.name, "Id");
        assert_eq!(schema.partition_key.attribute_type, AttributeType::String);
        assert!(schema.sort_key.is_none());
        assert_eq!(
            schema.billing,
            BillingMode::Provisioned {
                read_capacity: 1,
                write_capacity: 1
            }
        );
    }

    #[test]
    fn test_customer_schema_is_valid() {
        customer_table_schema().validate().unwrap();
    }

    #[test]
    fn test_attribute_definitions_cover_key_schema() {
        let schema = TableSchema {
            table_name: "Customer".to_string(),
            partition_key: KeyAttribute::new("Id", AttributeType::String),
            sort_key: Some(KeyAttribute::new("Version", AttributeType::Number)),
            billing: BillingMode::PayPerRequest,
        };

        let definitions = schema.attribute_definitions();
        for key in schema.key_attributes() {
            assert!(
                definitions.iter().any(|(name, _)| *name == key.name),
                "key '{}' has no attribute definition",
                key.name
            );
        }
        assert_eq!(definitions, vec![("Id", "S"), ("Version", "N")]);
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        for (read, write) in [(0, 1), (1, 0), (0, 0)] {
            let schema = customer_table_schema().with_billing(BillingMode::Provisioned {
                read_capacity: read,
                write_capacity: write,
            });
            assert!(matches!(
                schema.validate(),
                Err(TableError::InvalidSchema(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let schema = customer_table_schema().with_table_name("  ");
        assert!(matches!(
            schema.validate(),
            Err(TableError::InvalidSchema(_))
        ));

        let mut schema = customer_table_schema();
        schema.partition_key.name = String::new();
        assert!(matches!(
            schema.validate(),
            Err(TableError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_attribute_type_tags() {
        assert_eq!(AttributeType::String.tag(), "S");
        assert_eq!(AttributeType::Number.tag(), "N");
        assert_eq!(AttributeType::Binary.tag(), "B");
    }
}

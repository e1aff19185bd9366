//! Pure functions for calculating deployment plans (Functional Core).

use super::schema::{BillingMode, TableSchema};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { schema: TableSchema },
    /// Table already exists, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableSchema) -> DeployPlan {
    match current {
        None => DeployPlan::CreateTable {
            schema: desired.clone(),
        },
        Some(_) => DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        },
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { schema } => {
            let mut lines = vec![
                format!("+ Create table: {}", schema.table_name),
                format!(
                    "  Partition key: {} ({})",
                    schema.partition_key.name,
                    schema.partition_key.attribute_type.tag()
                ),
            ];
            if let Some(sk) = &schema.sort_key {
                lines.push(format!(
                    "  Sort key: {} ({})",
                    sk.name,
                    sk.attribute_type.tag()
                ));
            }
            match schema.billing {
                BillingMode::Provisioned {
                    read_capacity,
                    write_capacity,
                } => {
                    lines.push(format!(
                        "  Billing: PROVISIONED (read: {}, write: {})",
                        read_capacity, write_capacity
                    ));
                }
                BillingMode::PayPerRequest => {
                    lines.push("  Billing: PAY_PER_REQUEST".to_string());
                }
            }
            lines
        }
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' already exists", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::schema::customer_table_schema;

    #[test]
    fn test_deploy_plan_missing_table_creates() {
        let schema = customer_table_schema();
        let plan = calculate_deploy_plan(None, &schema);
        assert_eq!(plan, DeployPlan::CreateTable { schema });
    }

    #[test]
    fn test_deploy_plan_existing_table_no_changes() {
        let state = TableState {
            status: TableStatus::Active,
        };
        let plan = calculate_deploy_plan(Some(&state), &customer_table_schema());
        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "Customer".to_string()
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        let state = TableState {
            status: TableStatus::Active,
        };
        assert_eq!(
            calculate_destroy_plan(Some(&state), "Customer"),
            DestroyPlan::DeleteTable {
                table_name: "Customer".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "Customer"),
            DestroyPlan::AlreadyGone {
                table_name: "Customer".to_string()
            }
        );
    }

    #[test]
    fn test_format_deploy_plan_create() {
        let plan = calculate_deploy_plan(None, &customer_table_schema());
        let lines = format_deploy_plan(&plan);
        assert_eq!(lines[0], "+ Create table: Customer");
        assert_eq!(lines[1], "  Partition key: Id (S)");
        assert_eq!(lines[2], "  Billing: PROVISIONED (read: 1, write: 1)");
    }

    #[test]
    fn test_format_destroy_plan_gone() {
        let lines = format_destroy_plan(&DestroyPlan::AlreadyGone {
            table_name: "Customer".to_string(),
        });
        assert_eq!(lines, vec!["= Table 'Customer' does not exist"]);
    }
}

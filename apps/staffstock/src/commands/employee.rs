//! Employee commands.

use staffstock_core::{Employee, NewEmployee, RecordId};
use tabled::Tabled;

use super::{render_added, render_deleted, render_list, OutputFormat};
use crate::error::AppResult;
use crate::state::DbState;

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: RecordId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Department")]
    department: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
        }
    }
}

/// Add an employee
pub async fn add(db: &DbState, input: NewEmployee, format: OutputFormat) -> AppResult<String> {
    let id = db.inner().employees().insert(&input).await?;
    render_added("employee", id, format)
}

/// List employees in insertion order
pub async fn list(db: &DbState, format: OutputFormat) -> AppResult<String> {
    let employees = db.inner().employees().list().await?;
    render_list::<_, EmployeeRow>(&employees, format, "No employees found.")
}

/// Delete an employee by id
pub async fn delete(db: &DbState, id: RecordId, format: OutputFormat) -> AppResult<String> {
    db.inner().employees().delete_by_id(id).await?;
    render_deleted("employee", id, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::temp_state;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_then_list() {
        let (_dir, db) = temp_state().await;

        let out = add(
            &db,
            NewEmployee::new("Alice", "alice@example.com", "Sales"),
            OutputFormat::Table,
        )
        .await
        .unwrap();
        assert!(out.starts_with("Added employee"));

        let table = list(&db, OutputFormat::Table).await.unwrap();
        assert!(table.contains("Alice"));
        assert!(table.contains("alice@example.com"));
        assert!(table.contains("Sales"));
    }

    #[tokio::test]
    async fn test_blank_field_reports_validation_error() {
        let (_dir, db) = temp_state().await;

        let err = add(&db, NewEmployee::new("Alice", "", "Sales"), OutputFormat::Table)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("email"));
        assert_eq!(list(&db, OutputFormat::Table).await.unwrap(), "No employees found.");
    }

    #[tokio::test]
    async fn test_list_json() {
        let (_dir, db) = temp_state().await;
        add(&db, NewEmployee::new("Bob", "b@x", "Ops"), OutputFormat::Json)
            .await
            .unwrap();

        let json: Vec<Employee> =
            serde_json::from_str(&list(&db, OutputFormat::Json).await.unwrap()).unwrap();
        assert_eq!(json.len(), 1);
        assert_eq!(json[0].name, "Bob");
    }

    #[tokio::test]
    async fn test_delete_unknown_is_ok() {
        let (_dir, db) = temp_state().await;

        assert!(delete(&db, 42, OutputFormat::Table).await.is_ok());
    }
}

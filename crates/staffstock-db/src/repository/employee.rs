//! # Employee Repository
//!
//! Add, list and delete employees.

use staffstock_core::validation::validate_employee;
use staffstock_core::{Employee, NewEmployee, RecordId};
use tracing::debug;

use crate::database::Database;
use crate::error::DbResult;

/// Repository for employee records.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: Database,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(db: Database) -> Self {
        EmployeeRepository { db }
    }

    /// Inserts a new employee.
    ///
    /// ## Returns
    /// * `Ok(id)` - Identity assigned by the store
    /// * `Err(DbError::Validation)` - name, email or department blank
    pub async fn insert(&self, input: &NewEmployee) -> DbResult<RecordId> {
        let employee = validate_employee(input)?;

        debug!(name = %employee.name, department = %employee.department, "Inserting employee");

        let mut conn = self.db.connect().await?;
        let id = sqlx::query("INSERT INTO employees (name, email, department) VALUES (?1, ?2, ?3)")
            .bind(&employee.name)
            .bind(&employee.email)
            .bind(&employee.department)
            .execute(&mut conn)
            .await?
            .last_insert_rowid();
        self.db.release_after_write(conn).await;

        debug!(id, "Employee inserted");
        Ok(id)
    }

    /// Lists all employees in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let mut conn = self.db.connect().await?;
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, name, email, department FROM employees ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await?;
        self.db.release(conn).await?;

        Ok(employees)
    }

    /// Deletes an employee. Unknown ids are ignored.
    pub async fn delete_by_id(&self, id: RecordId) -> DbResult<()> {
        let mut conn = self.db.connect().await?;
        let removed = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?
            .rows_affected();
        self.db.release_after_write(conn).await;

        debug!(id, removed, "Deleted employee");
        Ok(())
    }

    /// Counts employees.
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.db.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&mut conn)
            .await?;
        self.db.release(conn).await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

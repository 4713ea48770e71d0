use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use crate::error::{HrmsError, HrmsResult};
use crate::model::attendance::{Attendance, AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeRef, EmployeeSummary};
use crate::store::HrmsStore;

/// Store over the `employees` / `attendance` tables (see `sql/schema.sql`).
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    id: String,
    employee_ref: String,
    date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
    // LEFT JOIN: all NULL once the employee is deleted
    employee_name: Option<String>,
    employee_code: Option<String>,
    department: Option<String>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = HrmsError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status).map_err(|_| {
            HrmsError::Unexpected(format!(
                "attendance {} has unknown status {}",
                row.id, row.status
            ))
        })?;

        let employee = match (row.employee_name, row.employee_code, row.department) {
            (Some(name), Some(employee_id), Some(department)) => Some(EmployeeSummary {
                id: row.employee_ref.clone(),
                name,
                employee_id,
                department,
            }),
            _ => None,
        };

        Ok(AttendanceRecord {
            id: row.id,
            employee_ref: row.employee_ref,
            employee,
            date: row.date,
            status,
            created_at: row.created_at,
        })
    }
}

const EMPLOYEE_COLUMNS: &str = "id, name, email, employee_code, department, created_at";

impl HrmsStore for MySqlStore {
    async fn employee_exists(&self, email: &str, employee_id: &str) -> HrmsResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE email = ? OR employee_code = ?",
        )
        .bind(email)
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn insert_employee(&self, employee: &Employee) -> HrmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees
            (id, name, email, employee_code, department, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.employee_id)
        .bind(&employee.department)
        .bind(employee.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_employees(&self) -> HrmsResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC");
        debug!(sql = %sql, "Fetching employees");

        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    async fn find_employee(&self, by: &EmployeeRef) -> HrmsResult<Option<Employee>> {
        let (column, value) = match by {
            EmployeeRef::SystemId(id) => ("id", id),
            EmployeeRef::BusinessId(code) => ("employee_code", code),
        };
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE {column} = ?");

        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn delete_employee(&self, id: &str) -> HrmsResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_attendance(&self, attendance: &Attendance) -> HrmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_ref, date, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&attendance.id)
        .bind(&attendance.employee_ref)
        .bind(attendance.date)
        .bind(attendance.status.as_ref())
        .bind(attendance.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_attendance(&self) -> HrmsResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT
                a.id,
                a.employee_ref,
                a.date,
                a.status,
                a.created_at,
                e.name AS employee_name,
                e.employee_code,
                e.department
            FROM attendance a
            LEFT JOIN employees e ON e.id = a.employee_ref
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }

    async fn delete_attendance(&self, id: &str) -> HrmsResult<bool> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

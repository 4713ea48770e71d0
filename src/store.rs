//! Persistence behind the employee and attendance resources.
//!
//! Handlers are generic over [`HrmsStore`], so the same routes run against
//! MySQL in production and the in-process store in tests.

pub mod memory;
pub mod mysql;

use std::future::Future;

use crate::error::HrmsResult;
use crate::model::attendance::{Attendance, AttendanceRecord};
use crate::model::employee::{Employee, EmployeeRef};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

pub trait HrmsStore: Send + Sync + 'static {
    /// True if any employee already uses `email` or `employee_id`.
    /// `email` is expected lowercase.
    fn employee_exists(
        &self,
        email: &str,
        employee_id: &str,
    ) -> impl Future<Output = HrmsResult<bool>> + Send;

    /// Persists a new employee. Fails with `Conflict` if a unique key is taken.
    fn insert_employee(&self, employee: &Employee) -> impl Future<Output = HrmsResult<()>> + Send;

    /// Most recent first.
    fn list_employees(&self) -> impl Future<Output = HrmsResult<Vec<Employee>>> + Send;

    fn find_employee(
        &self,
        by: &EmployeeRef,
    ) -> impl Future<Output = HrmsResult<Option<Employee>>> + Send;

    /// Returns false if no employee had that id.
    fn delete_employee(&self, id: &str) -> impl Future<Output = HrmsResult<bool>> + Send;

    fn insert_attendance(
        &self,
        attendance: &Attendance,
    ) -> impl Future<Output = HrmsResult<()>> + Send;

    /// Most recent first, with the employee summary attached where the
    /// employee still exists.
    fn list_attendance(&self) -> impl Future<Output = HrmsResult<Vec<AttendanceRecord>>> + Send;

    /// Returns false if no attendance record had that id.
    fn delete_attendance(&self, id: &str) -> impl Future<Output = HrmsResult<bool>> + Send;
}

/// Tries each reference in order and returns the first employee found.
pub async fn resolve_employee<S: HrmsStore>(
    store: &S,
    candidates: &[EmployeeRef],
) -> HrmsResult<Option<Employee>> {
    for candidate in candidates {
        if let Some(employee) = store.find_employee(candidate).await? {
            return Ok(Some(employee));
        }
    }
    Ok(None)
}

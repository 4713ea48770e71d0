use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::employee::{Employee, EmployeeSummary};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Stored attendance mark. `employee_ref` is a weak reference to
/// `Employee::id`; the employee may since have been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Attendance {
    pub id: String,
    pub employee_ref: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
}

impl Attendance {
    pub fn create(employee: &Employee, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_ref: employee.id.clone(),
            date,
            status,
            created_at: Utc::now(),
        }
    }

    pub fn into_record(self, employee: Option<EmployeeSummary>) -> AttendanceRecord {
        AttendanceRecord {
            id: self.id,
            employee_ref: self.employee_ref,
            employee,
            date: self.date,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Attendance as returned by the API, with the employee summary attached
/// (`null` once the employee is gone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "9b7d4c1e-5a0f-4c7b-8e2d-3f6a1b9c0d24",
    "employeeRef": "5f0c3b7e-2a7d-4f5e-9c1b-8d2a6e4f1a03",
    "employee": {
        "id": "5f0c3b7e-2a7d-4f5e-9c1b-8d2a6e4f1a03",
        "name": "Ann Lee",
        "employeeId": "EMP-001",
        "department": "IT"
    },
    "date": "2024-01-05",
    "status": "Present",
    "createdAt": "2024-01-05T09:30:00Z"
}))]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_ref: String,
    #[schema(nullable = true)]
    pub employee: Option<EmployeeSummary>,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

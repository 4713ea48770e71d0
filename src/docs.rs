use crate::api::attendance::CreateAttendance;
use crate::api::employee::CreateEmployee;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "0.1.0",
        description = r#"
## HRMS Lite

A small Human Resource Management API for keeping an employee directory and
daily attendance marks.

### Key Features
- **Employee Management**
  - Add, list and remove employees; email and employee ID are unique
- **Attendance Management**
  - Mark an employee Present or Absent for a date, by system ID or employee ID
  - List all marks with the employee's name and department attached

### Response Format
- JSON bodies; failures are `{"message": "..."}`
- Lists are returned whole, most recent first (no pagination)

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::delete_attendance
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            EmployeeSummary,
            CreateAttendance,
            AttendanceRecord,
            AttendanceStatus
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;

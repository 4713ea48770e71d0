use std::str::FromStr;

use crate::{
    error::{HrmsError, HrmsResult},
    model::{
        attendance::{Attendance, AttendanceStatus},
        employee::EmployeeRef,
    },
    store::{HrmsStore, resolve_employee},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Either `employeeMongoId` (system id) or `employeeId` (business id) must
/// be given. When both are, the system id wins.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendance {
    #[schema(example = "5f0c3b7e-2a7d-4f5e-9c1b-8d2a6e4f1a03", value_type = String)]
    pub employee_mongo_id: Option<String>,
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "2024-01-05", format = "date", value_type = String)]
    pub date: Option<String>,
    #[schema(example = "Present", value_type = String)]
    pub status: Option<String>,
}

/// A create-attendance request with every field checked.
#[derive(Debug, PartialEq)]
pub struct ValidAttendance {
    pub candidates: Vec<EmployeeRef>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateAttendance {
    pub fn validate(self) -> HrmsResult<ValidAttendance> {
        let system_id = present(self.employee_mongo_id);
        let business_id = present(self.employee_id);

        let (Some(date), Some(status)) = (present(self.date), present(self.status)) else {
            return Err(HrmsError::validation(
                "Employee, date and status are required",
            ));
        };

        let mut candidates = Vec::with_capacity(3);
        if let Some(id) = &system_id {
            candidates.extend(EmployeeRef::candidates_for_system_id(id));
        }
        if let Some(code) = business_id {
            candidates.push(EmployeeRef::BusinessId(code));
        }
        if candidates.is_empty() {
            return Err(HrmsError::validation(
                "Employee, date and status are required",
            ));
        }

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| HrmsError::validation("date must be a valid YYYY-MM-DD date"))?;
        let status = AttendanceStatus::from_str(&status)
            .map_err(|_| HrmsError::validation("status must be Present or Absent"))?;

        Ok(ValidAttendance {
            candidates,
            date,
            status,
        })
    }
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceRecord),
        (status = 400, description = "Missing or malformed field", body = Object, example = json!({
            "message": "Employee, date and status are required"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "mark_attendance", skip(store, payload))]
pub async fn create_attendance<S: HrmsStore>(
    store: web::Data<S>,
    payload: web::Json<CreateAttendance>,
) -> HrmsResult<HttpResponse> {
    let valid = payload.into_inner().validate()?;

    let employee = resolve_employee(store.get_ref(), &valid.candidates)
        .await?
        .ok_or_else(|| HrmsError::not_found("Employee not found"))?;

    let attendance = Attendance::create(&employee, valid.date, valid.status);
    store.insert_attendance(&attendance).await?;

    info!(
        id = %attendance.id,
        employee = %employee.employee_id,
        date = %attendance.date,
        status = %attendance.status,
        "Attendance recorded"
    );
    Ok(HttpResponse::Created().json(attendance.into_record(Some(employee.summary()))))
}

/// List attendance, most recent first, with employee details
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance records", body = [AttendanceRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "list_attendance", skip(store))]
pub async fn list_attendance<S: HrmsStore>(store: web::Data<S>) -> HrmsResult<HttpResponse> {
    let records = store.list_attendance().await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Attendance record deleted successfully"
        })),
        (status = 404, description = "Attendance record not found", body = Object, example = json!({
            "message": "Attendance record not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "delete_attendance", skip(store))]
pub async fn delete_attendance<S: HrmsStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> HrmsResult<HttpResponse> {
    let id = path.into_inner();

    if !store.delete_attendance(&id).await? {
        return Err(HrmsError::not_found("Attendance record not found"));
    }

    info!("Attendance record deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance record deleted successfully"
    })))
}

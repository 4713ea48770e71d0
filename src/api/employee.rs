use crate::{
    error::{HrmsError, HrmsResult},
    model::employee::{Employee, NewEmployee},
    store::HrmsStore,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Fields are optional on the wire so that a missing field is reported as a
/// validation error rather than a JSON decoding failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "Ann Lee", value_type = String)]
    pub name: Option<String>,
    #[schema(example = "ann@x.com", format = "email", value_type = String)]
    pub email: Option<String>,
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_id: Option<String>,
    #[schema(example = "IT", value_type = String)]
    pub department: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateEmployee {
    pub fn validate(self) -> HrmsResult<NewEmployee> {
        match (
            required(self.name),
            required(self.email),
            required(self.employee_id),
            required(self.department),
        ) {
            (Some(name), Some(email), Some(employee_id), Some(department)) => Ok(NewEmployee {
                name,
                email: email.to_lowercase(),
                employee_id,
                department,
            }),
            _ => Err(HrmsError::validation("All fields are required")),
        }
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "A required field is missing", body = Object, example = json!({
            "message": "All fields are required"
        })),
        (status = 409, description = "Email or employee ID already used", body = Object, example = json!({
            "message": "Employee with same email or ID already exists"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(store, payload))]
pub async fn create_employee<S: HrmsStore>(
    store: web::Data<S>,
    payload: web::Json<CreateEmployee>,
) -> HrmsResult<HttpResponse> {
    let new = payload.into_inner().validate()?;

    if store.employee_exists(&new.email, &new.employee_id).await? {
        info!(employee_id = %new.employee_id, "Rejected duplicate employee");
        return Err(HrmsError::conflict(
            "Employee with same email or ID already exists",
        ));
    }

    let employee = Employee::create(new);
    store.insert_employee(&employee).await?;

    info!(id = %employee.id, employee_id = %employee.employee_id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees, most recent first
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip(store))]
pub async fn list_employees<S: HrmsStore>(store: web::Data<S>) -> HrmsResult<HttpResponse> {
    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Delete Employee
///
/// Attendance recorded for the employee is kept.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee system ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(store))]
pub async fn delete_employee<S: HrmsStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> HrmsResult<HttpResponse> {
    let id = path.into_inner();

    if !store.delete_employee(&id).await? {
        return Err(HrmsError::not_found("Employee not found"));
    }

    info!("Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, employee_id: &str, department: &str) -> CreateEmployee {
        CreateEmployee {
            name: Some(name.into()),
            email: Some(email.into()),
            employee_id: Some(employee_id.into()),
            department: Some(department.into()),
        }
    }

    #[test]
    fn normalizes_valid_payload() {
        let new = payload("  Ann Lee ", " Ann@X.com", "EMP-001 ", "IT")
            .validate()
            .unwrap();
        assert_eq!(new.name, "Ann Lee");
        assert_eq!(new.email, "ann@x.com");
        assert_eq!(new.employee_id, "EMP-001");
    }

    #[test]
    fn blank_or_missing_fields_are_rejected() {
        assert!(matches!(
            payload("Ann", "ann@x.com", "   ", "IT").validate(),
            Err(HrmsError::Validation(_))
        ));
        assert!(matches!(
            CreateEmployee {
                department: None,
                ..payload("Ann", "ann@x.com", "EMP-001", "IT")
            }
            .validate(),
            Err(HrmsError::Validation(_))
        ));
        assert!(CreateEmployee::default().validate().is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "5f0c3b7e-2a7d-4f5e-9c1b-8d2a6e4f1a03",
        "name": "Ann Lee",
        "email": "ann@x.com",
        "employeeId": "EMP-001",
        "department": "IT",
        "createdAt": "2024-01-05T09:30:00Z"
    })
)]
pub struct Employee {
    /// System identifier, assigned at creation
    #[schema(example = "5f0c3b7e-2a7d-4f5e-9c1b-8d2a6e4f1a03")]
    pub id: String,

    #[schema(example = "Ann Lee")]
    pub name: String,

    /// Always stored lowercase
    #[schema(example = "ann@x.com")]
    pub email: String,

    /// Business identifier
    #[schema(example = "EMP-001")]
    #[sqlx(rename = "employee_code")]
    pub employee_id: String,

    #[schema(example = "IT")]
    pub department: String,

    #[schema(example = "2024-01-05T09:30:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// A validated employee payload, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub employee_id: String,
    pub department: String,
}

impl Employee {
    pub fn create(new: NewEmployee) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            employee_id: new.employee_id,
            department: new.department,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> EmployeeSummary {
        EmployeeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            employee_id: self.employee_id.clone(),
            department: self.department.clone(),
        }
    }
}

/// The part of an employee embedded into attendance listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    #[schema(example = "5f0c3b7e-2a7d-4f5e-9c1b-8d2a6e4f1a03")]
    pub id: String,
    #[schema(example = "Ann Lee")]
    pub name: String,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "IT")]
    pub department: String,
}

/// How an attendance payload points at its employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeRef {
    /// The id assigned by the store
    SystemId(String),
    /// The externally assigned `employeeId`
    BusinessId(String),
}

impl EmployeeRef {
    /// Lookup order for a reference given as a system id: system id first,
    /// then the same value as a business id.
    pub fn candidates_for_system_id(value: &str) -> [EmployeeRef; 2] {
        [
            EmployeeRef::SystemId(value.to_string()),
            EmployeeRef::BusinessId(value.to_string()),
        ]
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            EmployeeRef::SystemId(id) => employee.id == *id,
            EmployeeRef::BusinessId(code) => employee.employee_id == *code,
        }
    }
}

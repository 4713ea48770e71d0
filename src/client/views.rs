//! View state for the three client pages (dashboard, employees,
//! attendance).
//!
//! Each view owns the records it last fetched. Every mutation goes to the
//! server and is followed by a refetch, so the state is never patched
//! locally. Filters run over the full fetched set.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::str::FromStr;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use futures_util::future::join;
use tracing::warn;

use crate::api::attendance::CreateAttendance;
use crate::api::employee::CreateEmployee;
use crate::client::api::ApiClient;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::department::Department;
use crate::model::employee::Employee;

const UNKNOWN_EMPLOYEE: &str = "Unknown";

fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let separator: Vec<&str> = separator.iter().map(String::as_str).collect();

    let mut out = line(header);
    out.push_str(&line(&separator));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells));
    }
    out
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub employee_count: usize,
    pub attendance_count: usize,
}

impl Dashboard {
    /// An unavailable attendance list counts as zero records.
    pub async fn load(api: &ApiClient) -> Result<Self> {
        let (employees, attendance) = join(api.list_employees(), api.list_attendance()).await;
        let employee_count = employees?.len();
        let attendance_count = match attendance {
            Ok(records) => records.len(),
            Err(e) => {
                warn!(error = %e, "Attendance unavailable for dashboard");
                0
            }
        };
        Ok(Self {
            employee_count,
            attendance_count,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total Employees     {}", self.employee_count);
        let _ = writeln!(out, "Attendance Records  {}", self.attendance_count);
        if self.employee_count == 0 && self.attendance_count == 0 {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "No data yet. Add employees and mark attendance to see your dashboard stats."
            );
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

/// Input for the add-employee form. Kept intact on failure so it can be
/// corrected, cleared on success.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Loose `something@something.something` check.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl EmployeeForm {
    /// Field name to message, empty when the form can be submitted.
    pub fn errors(&self) -> BTreeMap<&'static str, &'static str> {
        let mut errors = BTreeMap::new();
        if self.employee_id.trim().is_empty() {
            errors.insert("employeeId", "Employee ID is required");
        }
        if self.full_name.trim().is_empty() {
            errors.insert("fullName", "Full name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !looks_like_email(self.email.trim()) {
            errors.insert("email", "Email is invalid");
        }
        if self.department.trim().is_empty() {
            errors.insert("department", "Department is required");
        } else if Department::from_str(self.department.trim()).is_err() {
            errors.insert("department", "Department is not one of the known departments");
        }
        errors
    }

    fn to_request(&self) -> CreateEmployee {
        CreateEmployee {
            name: Some(self.full_name.clone()),
            email: Some(self.email.clone()),
            employee_id: Some(self.employee_id.clone()),
            department: Some(self.department.clone()),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct EmployeesView {
    pub employees: Vec<Employee>,
}

impl EmployeesView {
    pub async fn load(api: &ApiClient) -> Result<Self> {
        let mut view = Self::default();
        view.refresh(api).await?;
        Ok(view)
    }

    pub async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        self.employees = api.list_employees().await?;
        Ok(())
    }

    pub async fn add(&mut self, api: &ApiClient, form: &mut EmployeeForm) -> Result<Employee> {
        let errors = form.errors();
        if !errors.is_empty() {
            let messages: Vec<&str> = errors.values().copied().collect();
            bail!(messages.join("; "));
        }

        let created = api.create_employee(&form.to_request()).await?;
        self.refresh(api).await?;
        *form = EmployeeForm::default();
        Ok(created)
    }

    pub async fn remove(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        api.delete_employee(id).await?;
        self.refresh(api).await
    }

    pub fn render(&self) -> String {
        if self.employees.is_empty() {
            return "No employees yet. Add your first employee to get started.\n".to_string();
        }
        let rows: Vec<Vec<String>> = self
            .employees
            .iter()
            .map(|e| {
                vec![
                    e.employee_id.clone(),
                    e.name.clone(),
                    e.email.clone(),
                    e.department.clone(),
                    e.id.clone(),
                ]
            })
            .collect();
        table(&["Employee ID", "Name", "Email", "Department", "ID"], &rows)
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

/// Client-side filter; unset fields match everything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttendanceFilter {
    /// Employee system id
    pub employee: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl AttendanceFilter {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        let employee_match = self.employee.as_ref().is_none_or(|id| {
            record
                .employee
                .as_ref()
                .is_some_and(|e| e.id == *id)
        });
        let date_match = self.date.is_none_or(|d| record.date == d);
        let status_match = self.status.is_none_or(|s| record.status == s);
        employee_match && date_match && status_match
    }
}

/// Input for the mark-attendance form. The employee is picked by exact name
/// or, failing that, by business id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttendanceForm {
    pub employee_name: String,
    pub employee_code: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Default, Clone)]
pub struct AttendanceView {
    pub employees: Vec<Employee>,
    pub records: Vec<AttendanceRecord>,
    pub filter: AttendanceFilter,
}

impl AttendanceView {
    pub async fn load(api: &ApiClient) -> Result<Self> {
        let (employees, records) = join(api.list_employees(), api.list_attendance()).await;
        Ok(Self {
            employees: employees?,
            records: records?,
            filter: AttendanceFilter::default(),
        })
    }

    pub async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        self.records = api.list_attendance().await?;
        Ok(())
    }

    /// System id of the employee the form points at, if any.
    pub fn resolve(&self, form: &AttendanceForm) -> Option<String> {
        let name = form.employee_name.trim();
        let code = form.employee_code.trim();
        self.employees
            .iter()
            .find(|e| !name.is_empty() && e.name == name)
            .or_else(|| {
                self.employees
                    .iter()
                    .find(|e| !code.is_empty() && e.employee_id == code)
            })
            .map(|e| e.id.clone())
    }

    /// Looks an employee up by system id, business id or exact name, for
    /// building an employee filter.
    pub fn employee_key(&self, key: &str) -> Option<String> {
        self.employees
            .iter()
            .find(|e| e.id == key || e.employee_id == key || e.name == key)
            .map(|e| e.id.clone())
    }

    pub async fn mark(
        &mut self,
        api: &ApiClient,
        form: &mut AttendanceForm,
    ) -> Result<AttendanceRecord> {
        let employee = self.resolve(form);
        let (Some(employee), false, false) = (
            employee,
            form.date.trim().is_empty(),
            form.status.trim().is_empty(),
        ) else {
            bail!("Employee (by name or ID), date and status are required");
        };

        let created = api
            .create_attendance(&CreateAttendance {
                employee_mongo_id: Some(employee),
                employee_id: None,
                date: Some(form.date.trim().to_string()),
                status: Some(form.status.trim().to_string()),
            })
            .await?;

        *form = AttendanceForm::default();
        self.refresh(api).await?;
        Ok(created)
    }

    pub async fn remove(&mut self, api: &ApiClient, id: &str) -> Result<()> {
        api.delete_attendance(id).await?;
        self.refresh(api).await
    }

    pub fn filtered(&self) -> Vec<&AttendanceRecord> {
        self.records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect()
    }

    pub fn render(&self) -> String {
        if self.records.is_empty() {
            return "No attendance records yet.\n".to_string();
        }
        let rows: Vec<Vec<String>> = self
            .filtered()
            .into_iter()
            .map(|r| {
                vec![
                    r.employee
                        .as_ref()
                        .map_or(UNKNOWN_EMPLOYEE.to_string(), |e| e.name.clone()),
                    r.date.to_string(),
                    r.status.to_string(),
                    r.id.clone(),
                ]
            })
            .collect();
        table(&["Employee", "Date", "Status", "ID"], &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::EmployeeSummary;
    use chrono::Utc;

    fn employee(id: &str, name: &str, code: &str) -> Employee {
        Employee {
            id: id.into(),
            name: name.into(),
            email: format!("{}@x.com", code.to_lowercase()),
            employee_id: code.into(),
            department: "IT".into(),
            created_at: Utc::now(),
        }
    }

    fn record(id: &str, emp: Option<&Employee>, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.into(),
            employee_ref: emp.map_or("gone".to_string(), |e| e.id.clone()),
            employee: emp.map(|e| EmployeeSummary {
                id: e.id.clone(),
                name: e.name.clone(),
                employee_id: e.employee_id.clone(),
                department: e.department.clone(),
            }),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            status,
            created_at: Utc::now(),
        }
    }

    fn sample_view() -> AttendanceView {
        let ann = employee("e1", "Ann Lee", "EMP-001");
        let bob = employee("e2", "Bob Roy", "EMP-002");
        AttendanceView {
            records: vec![
                record("a1", Some(&ann), "2024-01-05", AttendanceStatus::Present),
                record("a2", Some(&bob), "2024-01-05", AttendanceStatus::Absent),
                record("a3", Some(&ann), "2024-01-06", AttendanceStatus::Absent),
                record("a4", None, "2024-01-05", AttendanceStatus::Present),
            ],
            employees: vec![ann, bob],
            filter: AttendanceFilter::default(),
        }
    }

    fn ids(view: &AttendanceView) -> Vec<&str> {
        view.filtered().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(ids(&sample_view()), ["a1", "a2", "a3", "a4"]);
    }

    #[test]
    fn filters_combine() {
        let mut view = sample_view();
        view.filter.employee = Some("e1".into());
        assert_eq!(ids(&view), ["a1", "a3"]);

        view.filter.status = Some(AttendanceStatus::Absent);
        assert_eq!(ids(&view), ["a3"]);

        view.filter = AttendanceFilter {
            date: NaiveDate::from_ymd_opt(2024, 1, 5),
            ..Default::default()
        };
        assert_eq!(ids(&view), ["a1", "a2", "a4"]);
    }

    #[test]
    fn resolve_prefers_name_then_business_id() {
        let view = sample_view();
        let by_name = AttendanceForm {
            employee_name: "Bob Roy".into(),
            employee_code: "EMP-001".into(),
            ..Default::default()
        };
        assert_eq!(view.resolve(&by_name).as_deref(), Some("e2"));

        let by_code = AttendanceForm {
            employee_name: "Nobody".into(),
            employee_code: "EMP-001".into(),
            ..Default::default()
        };
        assert_eq!(view.resolve(&by_code).as_deref(), Some("e1"));

        assert_eq!(view.resolve(&AttendanceForm::default()), None);
        assert_eq!(view.employee_key("EMP-002").as_deref(), Some("e2"));
    }

    #[test]
    fn dangling_reference_renders_as_unknown() {
        let view = sample_view();
        let text = view.render();
        assert!(text.contains("Unknown"));
        assert!(text.contains("Ann Lee"));
        assert!(text.lines().next().unwrap().starts_with("Employee"));
    }

    #[test]
    fn employee_form_reports_each_problem() {
        let form = EmployeeForm {
            employee_id: " ".into(),
            full_name: "Ann".into(),
            email: "ann@x".into(),
            department: "Legal".into(),
        };
        let errors = form.errors();
        assert_eq!(errors["employeeId"], "Employee ID is required");
        assert_eq!(errors["email"], "Email is invalid");
        assert!(errors.contains_key("department"));
        assert!(!errors.contains_key("fullName"));

        let ok = EmployeeForm {
            employee_id: "EMP-001".into(),
            full_name: "Ann Lee".into(),
            email: "ann@x.com".into(),
            department: "IT".into(),
        };
        assert!(ok.errors().is_empty());
    }

    #[test]
    fn email_check_is_loose() {
        assert!(looks_like_email("a@b.c"));
        assert!(!looks_like_email("@."));
        assert!(!looks_like_email("a b@c.d"));
        assert!(!looks_like_email("ab.c"));
    }

    #[test]
    fn dashboard_shows_empty_state_only_without_data() {
        assert!(Dashboard::default().render().contains("No data yet"));
        let busy = Dashboard {
            employee_count: 2,
            attendance_count: 0,
        };
        assert!(!busy.render().contains("No data yet"));
    }

    #[test]
    fn employees_render_as_table() {
        let view = EmployeesView {
            employees: vec![employee("e1", "Ann Lee", "EMP-001")],
        };
        let text = view.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("EMP-001"));
        assert!(EmployeesView::default().render().starts_with("No employees yet"));
    }
}

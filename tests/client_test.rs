//! Drives the client views against a live server on an ephemeral port.

use std::net::TcpListener;

use actix_web::dev::ServerHandle;
use hrms_lite::client::{
    ApiClient, AttendanceForm, AttendanceView, Dashboard, EmployeeForm, EmployeesView,
    failure_message,
};
use hrms_lite::config::{Config, StoreBackend};
use hrms_lite::model::attendance::AttendanceStatus;
use hrms_lite::server;
use hrms_lite::store::MemoryStore;

fn spawn_server() -> (ApiClient, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Config {
        store_backend: StoreBackend::Memory,
        rate_api_per_min: 0,
        ..Config::default()
    };
    let server = server::run(MemoryStore::default(), config, listener).unwrap();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (ApiClient::new(format!("http://{addr}/api")), handle)
}

fn ann_form() -> EmployeeForm {
    EmployeeForm {
        employee_id: "EMP-001".into(),
        full_name: "Ann Lee".into(),
        email: "ann@x.com".into(),
        department: "IT".into(),
    }
}

#[actix_web::test]
async fn empty_dashboard_shows_hint() {
    let (api, handle) = spawn_server();

    let dashboard = Dashboard::load(&api).await.unwrap();
    assert_eq!(dashboard.employee_count, 0);
    assert_eq!(dashboard.attendance_count, 0);
    assert!(dashboard.render().contains("No data yet"));

    handle.stop(true).await;
}

#[actix_web::test]
async fn add_employee_then_mark_and_filter_attendance() {
    let (api, handle) = spawn_server();

    let mut employees = EmployeesView::default();
    let mut form = ann_form();
    let ann = employees.add(&api, &mut form).await.unwrap();
    assert!(form.employee_id.is_empty(), "form is cleared after success");
    assert_eq!(employees.employees.len(), 1);
    assert!(employees.render().contains("EMP-001"));

    let mut attendance = AttendanceView::load(&api).await.unwrap();
    let mut mark = AttendanceForm {
        employee_name: String::new(),
        employee_code: "EMP-001".into(),
        date: "2024-01-05".into(),
        status: "Present".into(),
    };
    let record = attendance.mark(&api, &mut mark).await.unwrap();
    assert_eq!(record.employee_ref, ann.id);
    assert!(mark.date.is_empty());
    assert_eq!(attendance.records.len(), 1);

    attendance.filter.status = Some(AttendanceStatus::Absent);
    assert!(attendance.filtered().is_empty());
    attendance.filter.status = Some(AttendanceStatus::Present);
    attendance.filter.employee = attendance.employee_key("Ann Lee");
    assert_eq!(attendance.filtered().len(), 1);
    assert!(attendance.render().contains("Ann Lee"));

    let dashboard = Dashboard::load(&api).await.unwrap();
    assert_eq!(dashboard.employee_count, 1);
    assert_eq!(dashboard.attendance_count, 1);

    handle.stop(true).await;
}

#[actix_web::test]
async fn duplicate_employee_surfaces_server_message() {
    let (api, handle) = spawn_server();

    let mut employees = EmployeesView::default();
    employees.add(&api, &mut ann_form()).await.unwrap();

    let mut again = ann_form();
    again.employee_id = "EMP-002".into();
    let err = employees.add(&api, &mut again).await.unwrap_err();
    assert_eq!(
        failure_message(&err, "Failed to add employee"),
        "Employee with same email or ID already exists"
    );
    assert_eq!(again.employee_id, "EMP-002", "form kept on failure");

    handle.stop(true).await;
}

#[actix_web::test]
async fn removed_employee_shows_as_unknown_in_attendance() {
    let (api, handle) = spawn_server();

    let mut employees = EmployeesView::default();
    let ann = employees.add(&api, &mut ann_form()).await.unwrap();

    let mut attendance = AttendanceView::load(&api).await.unwrap();
    let mut mark = AttendanceForm {
        employee_name: "Ann Lee".into(),
        employee_code: String::new(),
        date: "2024-01-05".into(),
        status: "Absent".into(),
    };
    attendance.mark(&api, &mut mark).await.unwrap();

    employees.remove(&api, &ann.id).await.unwrap();
    assert!(employees.employees.is_empty());

    attendance.refresh(&api).await.unwrap();
    assert!(attendance.records[0].employee.is_none());
    assert!(attendance.render().contains("Unknown"));

    let err = employees.remove(&api, &ann.id).await.unwrap_err();
    assert_eq!(
        failure_message(&err, "Failed to delete employee"),
        "Employee not found"
    );

    handle.stop(true).await;
}

//! Client for the HRMS API: an HTTP wrapper plus per-page view state.

pub mod api;
pub mod views;

pub use api::{ApiClient, ApiFailure, failure_message};
pub use views::{
    AttendanceFilter, AttendanceForm, AttendanceView, Dashboard, EmployeeForm, EmployeesView,
};

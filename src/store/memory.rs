use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{HrmsError, HrmsResult};
use crate::model::attendance::{Attendance, AttendanceRecord};
use crate::model::employee::{Employee, EmployeeRef};
use crate::store::HrmsStore;

#[derive(Default)]
struct Tables {
    // insertion order; listings walk these backwards
    employees: Vec<Employee>,
    attendance: Vec<Attendance>,
}

/// In-process store, selected with `STORE_BACKEND=memory`. Contents are
/// lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    fn read(&self) -> HrmsResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| HrmsError::Unexpected("memory store poisoned".into()))
    }

    fn write(&self) -> HrmsResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| HrmsError::Unexpected("memory store poisoned".into()))
    }
}

fn taken(tables: &Tables, email: &str, employee_id: &str) -> bool {
    tables
        .employees
        .iter()
        .any(|e| e.email.eq_ignore_ascii_case(email) || e.employee_id == employee_id)
}

impl HrmsStore for MemoryStore {
    async fn employee_exists(&self, email: &str, employee_id: &str) -> HrmsResult<bool> {
        Ok(taken(&*self.read()?, email, employee_id))
    }

    async fn insert_employee(&self, employee: &Employee) -> HrmsResult<()> {
        let mut tables = self.write()?;
        if taken(&tables, &employee.email, &employee.employee_id) {
            return Err(HrmsError::conflict(
                "Employee with same email or ID already exists",
            ));
        }
        tables.employees.push(employee.clone());
        Ok(())
    }

    async fn list_employees(&self) -> HrmsResult<Vec<Employee>> {
        Ok(self.read()?.employees.iter().rev().cloned().collect())
    }

    async fn find_employee(&self, by: &EmployeeRef) -> HrmsResult<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .iter()
            .find(|e| by.matches(e))
            .cloned())
    }

    async fn delete_employee(&self, id: &str) -> HrmsResult<bool> {
        let mut tables = self.write()?;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.id != id);
        Ok(tables.employees.len() != before)
    }

    async fn insert_attendance(&self, attendance: &Attendance) -> HrmsResult<()> {
        self.write()?.attendance.push(attendance.clone());
        Ok(())
    }

    async fn list_attendance(&self) -> HrmsResult<Vec<AttendanceRecord>> {
        let tables = self.read()?;
        let records = tables
            .attendance
            .iter()
            .rev()
            .map(|a| {
                let employee = tables
                    .employees
                    .iter()
                    .find(|e| e.id == a.employee_ref)
                    .map(Employee::summary);
                a.clone().into_record(employee)
            })
            .collect();
        Ok(records)
    }

    async fn delete_attendance(&self, id: &str) -> HrmsResult<bool> {
        let mut tables = self.write()?;
        let before = tables.attendance.len();
        tables.attendance.retain(|a| a.id != id);
        Ok(tables.attendance.len() != before)
    }
}

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hrms_lite::client::{
    ApiClient, AttendanceForm, AttendanceView, Dashboard, EmployeeForm, EmployeesView,
    failure_message,
};
use hrms_lite::model::attendance::AttendanceStatus;

#[derive(Parser)]
#[command(name = "hrms-cli", about = "Manage employees and attendance in HRMS Lite")]
struct Args {
    #[arg(
        long,
        env = "HRMS_API_URL",
        default_value = "http://localhost:5000/api"
    )]
    api_url: String,

    #[arg(short, long, help = "Log requests to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Employee and attendance totals
    Dashboard,
    #[command(subcommand)]
    Employees(EmployeesCmd),
    #[command(subcommand)]
    Attendance(AttendanceCmd),
}

#[derive(Subcommand)]
enum EmployeesCmd {
    List,
    Add {
        #[arg(long = "employee-id")]
        employee_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, help = "IT, HR, Sales, Marketing, Operations or Admin")]
        department: String,
    },
    Delete {
        /// Employee system ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AttendanceCmd {
    List {
        #[arg(long, help = "Employee name, employee ID or system ID")]
        employee: Option<String>,
        #[arg(long, help = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
        #[arg(long, help = "Present or Absent")]
        status: Option<AttendanceStatus>,
    },
    Mark {
        #[arg(long, help = "Exact employee name")]
        name: Option<String>,
        #[arg(long = "employee-id", help = "Employee ID, used when no name matches")]
        employee_id: Option<String>,
        #[arg(long, help = "YYYY-MM-DD")]
        date: String,
        #[arg(long, help = "Present or Absent")]
        status: String,
    },
    Delete {
        /// Attendance record ID
        id: String,
    },
}

async fn run(api: &ApiClient, command: Command) -> Result<()> {
    match command {
        Command::Dashboard => {
            let dashboard = Dashboard::load(api).await?;
            print!("{}", dashboard.render());
        }

        Command::Employees(EmployeesCmd::List) => {
            let view = EmployeesView::load(api).await?;
            print!("{}", view.render());
        }
        Command::Employees(EmployeesCmd::Add {
            employee_id,
            name,
            email,
            department,
        }) => {
            let mut view = EmployeesView::default();
            let mut form = EmployeeForm {
                employee_id,
                full_name: name,
                email,
                department,
            };
            let created = view.add(api, &mut form).await?;
            println!("Employee added ({})", created.id);
            print!("{}", view.render());
        }
        Command::Employees(EmployeesCmd::Delete { id }) => {
            let mut view = EmployeesView::default();
            view.remove(api, &id)
                .await
                .map_err(|e| anyhow::anyhow!(failure_message(&e, "Failed to delete employee")))?;
            println!("Employee deleted");
            print!("{}", view.render());
        }

        Command::Attendance(AttendanceCmd::List {
            employee,
            date,
            status,
        }) => {
            let mut view = AttendanceView::load(api).await?;
            if let Some(key) = employee {
                let id = view
                    .employee_key(&key)
                    .with_context(|| format!("No employee matches {key:?}"))?;
                view.filter.employee = Some(id);
            }
            view.filter.date = date;
            view.filter.status = status;
            print!("{}", view.render());
        }
        Command::Attendance(AttendanceCmd::Mark {
            name,
            employee_id,
            date,
            status,
        }) => {
            let mut view = AttendanceView::load(api).await?;
            let mut form = AttendanceForm {
                employee_name: name.unwrap_or_default(),
                employee_code: employee_id.unwrap_or_default(),
                date,
                status,
            };
            view.mark(api, &mut form).await?;
            println!("Attendance saved successfully");
            print!("{}", view.render());
        }
        Command::Attendance(AttendanceCmd::Delete { id }) => {
            let mut view = AttendanceView::default();
            view.remove(api, &id).await.map_err(|e| {
                anyhow::anyhow!(failure_message(&e, "Failed to delete attendance record"))
            })?;
            println!("Attendance record deleted");
        }
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .init();

    let api = ApiClient::new(args.api_url);
    match run(&api, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

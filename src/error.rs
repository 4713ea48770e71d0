use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Failures surfaced by the employee and attendance resources.
#[derive(Debug, Display)]
pub enum HrmsError {
    /// Missing or malformed required field, correctable by the caller.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Uniqueness violation on an employee's email or business id.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Persistence or connectivity failure.
    #[display(fmt = "{}", _0)]
    Unexpected(String),
}

pub type HrmsResult<T> = Result<T, HrmsError>;

impl std::error::Error for HrmsError {}

impl HrmsError {
    pub fn validation(message: impl Into<String>) -> Self {
        HrmsError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HrmsError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HrmsError::Conflict(message.into())
    }
}

impl ResponseError for HrmsError {
    fn status_code(&self) -> StatusCode {
        match self {
            HrmsError::Validation(_) => StatusCode::BAD_REQUEST,
            HrmsError::Conflict(_) => StatusCode::CONFLICT,
            HrmsError::NotFound(_) => StatusCode::NOT_FOUND,
            HrmsError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            HrmsError::Unexpected(detail) => {
                error!(error = %detail, "Request failed");
                "Something went wrong, Contact with system admin".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

impl From<sqlx::Error> for HrmsError {
    fn from(e: sqlx::Error) -> Self {
        // 23000: integrity constraint violation (unique keys on email / employee_code)
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                return HrmsError::conflict("Employee with same email or ID already exists");
            }
        }
        HrmsError::Unexpected(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    /// Server-side failure carrying only a SQLSTATE.
    #[derive(Debug, Display)]
    #[display(fmt = "database error {}", _0)]
    struct SqlState(&'static str);

    impl std::error::Error for SqlState {}

    impl DatabaseError for SqlState {
        fn message(&self) -> &str {
            "Duplicate entry 'ann@x.com' for key 'employees.email'"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[actix_web::test]
    async fn error_kinds_map_to_status_codes() {
        assert_eq!(
            HrmsError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(HrmsError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(HrmsError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            HrmsError::Unexpected("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn unexpected_error_hides_detail() {
        let resp = HrmsError::Unexpected("connection refused".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value["message"],
            "Something went wrong, Contact with system admin"
        );
    }

    #[actix_web::test]
    async fn client_errors_carry_their_message() {
        let resp = HrmsError::not_found("Employee not found").error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Employee not found");
    }

    #[test]
    fn unique_key_violation_becomes_conflict() {
        let err = HrmsError::from(sqlx::Error::Database(Box::new(SqlState("23000"))));
        assert!(matches!(
            &err,
            HrmsError::Conflict(msg) if msg == "Employee with same email or ID already exists"
        ));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn other_database_failures_are_unexpected() {
        let err = HrmsError::from(sqlx::Error::Database(Box::new(SqlState("42S02"))));
        assert!(matches!(err, HrmsError::Unexpected(_)));

        let err = HrmsError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, HrmsError::Unexpected(_)));
    }
}

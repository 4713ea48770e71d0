use anyhow::{Context, Result};
use derive_more::Display;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::attendance::CreateAttendance;
use crate::api::employee::CreateEmployee;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;

/// A non-2xx answer from the API, carrying the server's `message`.
#[derive(Debug, Display)]
#[display(fmt = "{}", message)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl std::error::Error for ApiFailure {}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Thin wrapper over the six HTTP operations.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("Request failed with status {status}"));
        Err(ApiFailure { status, message }.into())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check(response).await?;
        response.json::<T>().await.context("Malformed response body")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.get("/employees").await
    }

    pub async fn create_employee(&self, body: &CreateEmployee) -> Result<Employee> {
        let url = self.url("/employees");
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        Self::decode(response).await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        self.delete(&format!("/employees/{id}")).await
    }

    pub async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>> {
        self.get("/attendance").await
    }

    pub async fn create_attendance(&self, body: &CreateAttendance) -> Result<AttendanceRecord> {
        let url = self.url("/attendance");
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        Self::decode(response).await
    }

    pub async fn delete_attendance(&self, id: &str) -> Result<()> {
        self.delete(&format!("/attendance/{id}")).await
    }
}

/// Text for a failure notification: the server's message when there is one,
/// otherwise `fallback`.
pub fn failure_message(err: &anyhow::Error, fallback: &str) -> String {
    match err.downcast_ref::<ApiFailure>() {
        Some(failure) => failure.message.clone(),
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let api = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("/employees"), "http://localhost:5000/api/employees");
    }

    #[test]
    fn failure_message_prefers_server_text() {
        let err: anyhow::Error = ApiFailure {
            status: StatusCode::CONFLICT,
            message: "Employee with same email or ID already exists".into(),
        }
        .into();
        assert_eq!(
            failure_message(&err, "Failed to add employee"),
            "Employee with same email or ID already exists"
        );

        let other = anyhow::anyhow!("connection refused");
        assert_eq!(
            failure_message(&other, "Failed to add employee"),
            "Failed to add employee"
        );
    }
}

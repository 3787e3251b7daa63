//! Student service API client implementation.
//!
//! This module provides the client for the student management REST service.
//! Requests are sent once: there is no retry, and a failure is reported to
//! the caller as-is.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{Student, StudentId, StudentPayload};

/// Path prefix under which the student service is mounted.
pub const SERVICE_PATH: &str = "/student-management-service";

/// The student service API client.
#[derive(Debug, Clone)]
pub struct StudentClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the backend, without trailing slash.
    base_url: String,
}

impl StudentClient {
    /// Create a new client for the backend at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend origin, e.g. `http://localhost:8080`
    /// * `timeout` - Optional per-request timeout; `None` waits indefinitely
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no http(s) scheme or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Network)?;

        let base_url = normalize_base_url(base_url);
        info!(base_url = %base_url, "Student client created");

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the students collection.
    fn students_url(&self) -> String {
        format!("{}{}/students", self.base_url, SERVICE_PATH)
    }

    /// URL of a single student.
    fn student_url(&self, id: &StudentId) -> String {
        format!(
            "{}/{}",
            self.students_url(),
            urlencoding::encode(id.as_str())
        )
    }

    /// Fetch every student.
    ///
    /// Calls `GET /students`.
    #[instrument(skip(self))]
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        let students: Vec<Student> = self
            .send_json(self.request(Method::GET, &self.students_url()))
            .await?;
        debug!("Fetched {} students", students.len());
        Ok(students)
    }

    /// Fetch a single student by id.
    ///
    /// Calls `GET /students/{id}`.
    #[instrument(skip(self), fields(student_id = %id))]
    pub async fn get_student(&self, id: &StudentId) -> Result<Student> {
        self.send_json(self.request(Method::GET, &self.student_url(id)))
            .await
            .map_err(|e| {
                if matches!(e, ApiError::NotFound(_)) {
                    ApiError::NotFound(format!("Student '{}' not found", id))
                } else {
                    e
                }
            })
    }

    /// Create a student.
    ///
    /// Calls `POST /students`. Any 2xx status means the record was stored;
    /// the created record is returned when the body carries one.
    #[instrument(skip(self, payload))]
    pub async fn create_student(&self, payload: &StudentPayload) -> Result<Option<Student>> {
        let response = self
            .request(Method::POST, &self.students_url())
            .json(payload)
            .send()
            .await?;
        let student = Self::optional_record(Self::check_status(response).await?).await;
        match &student {
            Some(student) => info!(student_id = %student.id, "Student created"),
            None => info!("Student created"),
        }
        Ok(student)
    }

    /// Replace a student's fields.
    ///
    /// Calls `PUT /students/{id}`. Any 2xx status means the update was
    /// applied; the updated record is returned when the body carries one.
    #[instrument(skip(self, payload), fields(student_id = %id))]
    pub async fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> Result<Option<Student>> {
        let response = self
            .request(Method::PUT, &self.student_url(id))
            .json(payload)
            .send()
            .await?;
        let student = Self::optional_record(Self::check_status(response).await?).await;
        info!("Student updated");
        Ok(student)
    }

    /// Delete a student.
    ///
    /// Calls `DELETE /students/{id}`. Any response body is ignored.
    #[instrument(skip(self), fields(student_id = %id))]
    pub async fn delete_student(&self, id: &StudentId) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.student_url(id))
            .send()
            .await?;
        Self::check_status(response).await?;
        info!("Student deleted");
        Ok(())
    }

    /// Start a request with the common headers.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "Sending request");
        self.client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request and parse the JSON response body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = Self::check_status(request.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Read a student record from a success body, if there is one.
    ///
    /// Empty, plain-text or partial bodies yield `None`.
    async fn optional_record(response: Response) -> Option<Student> {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Could not read response body: {}", e);
                return None;
            }
        };
        if body.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Student>(&body) {
            Ok(student) => Some(student),
            Err(e) => {
                debug!("Response body is not a student record: {}", e);
                None
            }
        }
    }

    /// Turn a non-success status into an error.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", error_body);

        Err(ApiError::from_status(status, &url))
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on loopback and capture the request.
    async fn serve_once(response: &'static str) -> (StudentClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let body_len = text[..head_end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + body_len {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(raw).unwrap()
        });

        let client = StudentClient::new(&format!("http://{}", addr), Some(Duration::from_secs(5)))
            .unwrap();
        (client, handle)
    }

    fn request_body(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn payload() -> StudentPayload {
        StudentPayload {
            first_name: "Ann".into(),
            middle_name: String::new(),
            last_name: "Lee".into(),
            age: None,
            nic: "N1".into(),
            tel: "0771234567".into(),
        }
    }

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("https://school.example.com///"),
            "https://school.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("https://gateway.example.com/api/"),
            "https://gateway.example.com/api"
        );
    }

    #[test]
    fn test_new_rejects_missing_scheme() {
        let err = StudentClient::new("localhost:8080", None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_students_url() {
        let client = StudentClient::new("http://localhost:8080/", None).unwrap();
        assert_eq!(
            client.students_url(),
            "http://localhost:8080/student-management-service/students"
        );
    }

    #[test]
    fn test_student_url_encodes_id() {
        let client = StudentClient::new("http://localhost:8080", None).unwrap();
        assert_eq!(
            client.student_url(&StudentId::from(42)),
            "http://localhost:8080/student-management-service/students/42"
        );
        assert_eq!(
            client.student_url(&StudentId::new("a/b")),
            "http://localhost:8080/student-management-service/students/a%2Fb"
        );
    }

    #[test]
    fn test_base_url_accessor() {
        let client =
            StudentClient::new("https://school.example.com/", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(client.base_url(), "https://school.example.com");
    }

    #[tokio::test]
    async fn test_list_students_reports_network_error() {
        // Port 9 (discard) on loopback is not expected to serve HTTP.
        let client = StudentClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2)))
            .unwrap();
        let err = client.list_students().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_create_accepts_empty_created_response() {
        let (client, server) =
            serve_once("HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;

        let created = client.create_student(&payload()).await.unwrap();
        assert!(created.is_none());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /student-management-service/students HTTP/1.1\r\n"));
        let body = request_body(&request);
        assert_eq!(body["firstName"], "Ann");
        assert_eq!(body["middleName"], "");
        assert_eq!(body["lastName"], "Lee");
        assert!(body["age"].is_null());
        assert_eq!(body["nic"], "N1");
        assert_eq!(body["tel"], "0771234567");
    }

    #[tokio::test]
    async fn test_create_returns_record_from_body() {
        let (client, server) = serve_once(
            "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nContent-Length: 36\r\nConnection: close\r\n\r\n{\"id\":12,\"firstName\":\"Ann\",\"age\":20}",
        )
        .await;

        let created = client.create_student(&payload()).await.unwrap().unwrap();
        assert_eq!(created.id, StudentId::from(12));
        assert_eq!(created.age, Some(20));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_update_accepts_text_acknowledgement() {
        let (client, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 7\r\nConnection: close\r\n\r\nUpdated",
        )
        .await;

        let mut update = payload();
        update.age = Some(21);
        let updated = client
            .update_student(&StudentId::from(7), &update)
            .await
            .unwrap();
        assert!(updated.is_none());

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /student-management-service/students/7 HTTP/1.1\r\n"));
        assert_eq!(request_body(&request)["age"], 21);
    }

    #[tokio::test]
    async fn test_update_reports_server_error() {
        let (client, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = client
            .update_student(&StudentId::from(7), &payload())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ServerError(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_sends_delete_to_student_url() {
        let (client, server) =
            serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n").await;

        client.delete_student(&StudentId::from(7)).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /student-management-service/students/7 HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_list_students_parses_array() {
        let (client, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 37\r\nConnection: close\r\n\r\n[{\"id\":1,\"firstName\":\"Ann\"},{\"id\":2}]",
        )
        .await;

        let students = client.list_students().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].first_name, "Ann");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /student-management-service/students HTTP/1.1\r\n"));
    }
}

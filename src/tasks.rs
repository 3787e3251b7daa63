//! Async task management for non-blocking API operations.
//!
//! The UI never awaits a request inline. The pattern is:
//! 1. `App` queues an `ApiRequest` (on navigation or a submit)
//! 2. The main loop drains the queue and hands each request to `TaskSpawner`
//! 3. `TaskSpawner` runs the request on a tokio task
//! 4. The task sends an `ApiMessage` back through the channel
//! 5. The main loop polls the channel with `try_recv()` and feeds `App`

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{Student, StudentClient, StudentId, StudentPayload};

/// A request the UI wants sent to the student service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Fetch the whole collection.
    FetchStudents,
    /// Fetch one student.
    FetchStudent(StudentId),
    /// Create a student.
    CreateStudent(StudentPayload),
    /// Update a student.
    UpdateStudent {
        id: StudentId,
        payload: StudentPayload,
    },
    /// Delete a student.
    DeleteStudent(StudentId),
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiMessage {
    /// Collection fetch result.
    StudentsFetched(Result<Vec<Student>, String>),

    /// Single student fetch result.
    StudentFetched {
        id: StudentId,
        result: Result<Student, String>,
    },

    /// Create result, with the stored record when the service echoed it.
    StudentCreated(Result<Option<Student>, String>),

    /// Update result.
    StudentUpdated {
        id: StudentId,
        result: Result<Option<Student>, String>,
    },

    /// Delete result.
    StudentDeleted {
        id: StudentId,
        result: Result<(), String>,
    },
}

/// Run a request to completion and wrap the outcome.
pub async fn execute(client: &StudentClient, request: ApiRequest) -> ApiMessage {
    match request {
        ApiRequest::FetchStudents => {
            ApiMessage::StudentsFetched(client.list_students().await.map_err(|e| e.to_string()))
        }
        ApiRequest::FetchStudent(id) => {
            let result = client.get_student(&id).await.map_err(|e| e.to_string());
            ApiMessage::StudentFetched { id, result }
        }
        ApiRequest::CreateStudent(payload) => ApiMessage::StudentCreated(
            client
                .create_student(&payload)
                .await
                .map_err(|e| e.to_string()),
        ),
        ApiRequest::UpdateStudent { id, payload } => {
            let result = client
                .update_student(&id, &payload)
                .await
                .map_err(|e| e.to_string());
            ApiMessage::StudentUpdated { id, result }
        }
        ApiRequest::DeleteStudent(id) => {
            let result = client.delete_student(&id).await.map_err(|e| e.to_string());
            ApiMessage::StudentDeleted { id, result }
        }
    }
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    client: StudentClient,
}

impl TaskSpawner {
    /// Create a new TaskSpawner sending results on `tx`.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, client: StudentClient) -> Self {
        Self { tx, client }
    }

    /// Spawn a task for the given request.
    pub fn spawn(&self, request: ApiRequest) {
        debug!(?request, "Spawning API task");
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let message = execute(&client, request).await;
            // The receiver is gone only when the app is shutting down
            let _ = tx.send(message);
        });
    }
}

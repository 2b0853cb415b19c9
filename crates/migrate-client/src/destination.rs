//! Vikunja REST client.
//!
//! Every request waits on the shared [`RequestThrottle`] before it is sent
//! and carries the bearer token. Non-2xx responses become
//! [`MigrateError::Api`] with the status code and body.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use migrate_core::{DestinationCredentials, MigrateError, MigrateResult};
use migrate_domain::destination::{
    AttachmentId, Bucket, BucketId, CommentId, Label, ProjectId, Task, TaskAttachment,
    TaskComment, TaskId, ViewId,
};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::throttle::RequestThrottle;
use crate::{check_status, http_client};

/// Multipart field Vikunja reads uploaded files from.
const ATTACHMENT_FIELD: &str = "files";

/// Create and update calls the uploader needs from the destination service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationApi: Send + Sync {
    async fn create_bucket(&self, bucket: &Bucket) -> MigrateResult<BucketId>;

    /// Creates `task` in its project and bucket.
    async fn create_task(&self, task: &Task) -> MigrateResult<TaskId>;

    /// Creates `comment` on the task named by its `task_id`.
    async fn create_comment(&self, comment: &TaskComment) -> MigrateResult<CommentId>;

    async fn create_attachment(
        &self,
        task_id: TaskId,
        attachment: &TaskAttachment,
    ) -> MigrateResult<AttachmentId>;

    /// Rewrites an existing task, used to set its cover image.
    async fn update_task(&self, task: &Task) -> MigrateResult<()>;
}

#[derive(Debug, Serialize)]
struct BucketRequest<'a> {
    title: &'a str,
    project_id: ProjectId,
    project_view_id: ViewId,
}

#[derive(Debug, Serialize)]
struct TaskRequest<'a> {
    title: &'a str,
    description: &'a str,
    project_id: ProjectId,
    bucket_id: BucketId,
    labels: &'a [Label],
    cover_image_attachment_id: AttachmentId,
}

impl<'a> From<&'a Task> for TaskRequest<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            description: &task.description,
            project_id: task.project_id,
            bucket_id: task.bucket_id,
            labels: &task.labels,
            cover_image_attachment_id: task.cover_image_attachment_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    comment: &'a str,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct AttachmentUploadResponse {
    #[serde(default)]
    success: Option<Vec<Created>>,
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
}

pub struct DestinationClient {
    client: Client,
    credentials: DestinationCredentials,
    throttle: RequestThrottle,
}

impl DestinationClient {
    pub fn new(credentials: DestinationCredentials, throttle: RequestThrottle) -> MigrateResult<Self> {
        Ok(Self {
            client: http_client()?,
            credentials,
            throttle,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.credentials.base_url, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, self.credentials.bearer())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> MigrateResult<T> {
        self.throttle.acquire().await;

        let url = self.url(path);
        tracing::debug!("[vikunja] {} {}", method, path);

        let response = request
            .send()
            .await
            .map_err(|e| MigrateError::transport(&url, e))?;
        let response = check_status(response, &url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| MigrateError::transport(&url, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            MigrateError::Serialization(format!("unexpected response from {}: {}", url, e))
        })
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> MigrateResult<T> {
        let request = self.request(method.clone(), &self.url(path)).json(body);
        self.send(method, path, request).await
    }
}

#[async_trait]
impl DestinationApi for DestinationClient {
    async fn create_bucket(&self, bucket: &Bucket) -> MigrateResult<BucketId> {
        let path = format!(
            "projects/{}/views/{}/buckets",
            bucket.project_id, bucket.project_view_id
        );
        let body = BucketRequest {
            title: &bucket.title,
            project_id: bucket.project_id,
            project_view_id: bucket.project_view_id,
        };
        let created: Created = self.send_json(Method::PUT, &path, &body).await?;
        Ok(created.id)
    }

    async fn create_task(&self, task: &Task) -> MigrateResult<TaskId> {
        let path = format!("projects/{}/tasks", task.project_id);
        let created: Created = self
            .send_json(Method::PUT, &path, &TaskRequest::from(task))
            .await?;
        Ok(created.id)
    }

    async fn create_comment(&self, comment: &TaskComment) -> MigrateResult<CommentId> {
        let path = format!("tasks/{}/comments", comment.task_id);
        let body = CommentRequest {
            comment: &comment.comment,
            created: comment.created,
            updated: comment.updated,
        };
        let created: Created = self.send_json(Method::PUT, &path, &body).await?;
        Ok(created.id)
    }

    async fn create_attachment(
        &self,
        task_id: TaskId,
        attachment: &TaskAttachment,
    ) -> MigrateResult<AttachmentId> {
        let path = format!("tasks/{}/attachments", task_id);
        let file = &attachment.file;
        tracing::debug!("[vikunja] uploading attachment {}", file.name);

        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .or_else(|_| {
                Part::bytes(file.content.clone())
                    .file_name(file.name.clone())
                    .mime_str("application/octet-stream")
            })
            .map_err(|e| MigrateError::transport(self.url(&path), e))?;
        let form = Form::new().part(ATTACHMENT_FIELD, part);

        let request = self
            .request(Method::PUT, &self.url(&path))
            .multipart(form);
        let response: AttachmentUploadResponse = self.send(Method::PUT, &path, request).await?;

        if let Some(created) = response.success.unwrap_or_default().into_iter().next() {
            return Ok(created.id);
        }
        let message = response
            .errors
            .unwrap_or_default()
            .iter()
            .map(|e| {
                e.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string())
            })
            .collect::<Vec<_>>()
            .join("; ");
        Err(MigrateError::AttachmentRejected {
            name: file.name.clone(),
            message: if message.is_empty() {
                "no attachment was created".to_string()
            } else {
                message
            },
        })
    }

    async fn update_task(&self, task: &Task) -> MigrateResult<()> {
        let path = format!("tasks/{}", task.id);
        let _: serde_json::Value = self
            .send_json(Method::POST, &path, &TaskRequest::from(task))
            .await?;
        Ok(())
    }
}

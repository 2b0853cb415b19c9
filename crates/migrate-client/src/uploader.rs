//! Persists a converted hierarchy in dependency order.
//!
//! Buckets are created before their tasks, tasks before their comments and
//! attachments. The first failing request aborts the whole upload; nothing
//! is retried and nothing already created is rolled back.

use migrate_core::MigrateResult;
use migrate_domain::destination::{ProjectHierarchy, Task};
use serde::Serialize;

use crate::destination::DestinationApi;

/// Number of entities created by an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub projects: usize,
    pub buckets: usize,
    pub tasks: usize,
    pub comments: usize,
    pub attachments: usize,
}

impl UploadSummary {
    fn merge(&mut self, other: UploadSummary) {
        self.projects += other.projects;
        self.buckets += other.buckets;
        self.tasks += other.tasks;
        self.comments += other.comments;
        self.attachments += other.attachments;
    }
}

pub struct Uploader<'a, A: DestinationApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: DestinationApi + ?Sized> Uploader<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Uploads every hierarchy in order, stopping at the first error.
    pub async fn upload_all(
        &self,
        hierarchies: &mut [ProjectHierarchy],
    ) -> MigrateResult<UploadSummary> {
        let mut summary = UploadSummary::default();
        for hierarchy in hierarchies.iter_mut() {
            summary.merge(self.upload_project(hierarchy).await?);
        }
        tracing::info!(
            "Uploaded {} buckets, {} tasks, {} comments and {} attachments across {} projects",
            summary.buckets,
            summary.tasks,
            summary.comments,
            summary.attachments,
            summary.projects
        );
        Ok(summary)
    }

    /// Creates the buckets of one project and everything inside them,
    /// writing server identities back into `hierarchy` as they arrive.
    pub async fn upload_project(
        &self,
        hierarchy: &mut ProjectHierarchy,
    ) -> MigrateResult<UploadSummary> {
        let mut summary = UploadSummary {
            projects: 1,
            ..Default::default()
        };
        tracing::info!(
            "Uploading project {} ({} buckets)",
            hierarchy.project.title,
            hierarchy.buckets.len()
        );

        for bucket in &mut hierarchy.buckets {
            let bucket_id = self.api.create_bucket(bucket).await?;
            bucket.assign_id(bucket_id);
            summary.buckets += 1;
            tracing::debug!("Created bucket {} as {}", bucket.title, bucket_id);

            for task in &mut bucket.tasks {
                self.upload_task(task, &mut summary).await?;
            }
        }

        Ok(summary)
    }

    async fn upload_task(&self, task: &mut Task, summary: &mut UploadSummary) -> MigrateResult<()> {
        let task_id = self.api.create_task(task).await?;
        task.assign_id(task_id);
        summary.tasks += 1;

        for comment in &mut task.comments {
            comment.id = self.api.create_comment(comment).await?;
            summary.comments += 1;
        }

        for attachment in &mut task.attachments {
            if !attachment.has_content() {
                tracing::debug!("Skipping empty attachment {}", attachment.file.name);
                continue;
            }
            attachment.id = self.api.create_attachment(task_id, attachment).await?;
            summary.attachments += 1;
        }

        if let Some(cover_id) = task.resolve_cover() {
            tracing::debug!("Setting cover of task {} to attachment {}", task_id, cover_id);
            self.api.update_task(task).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::{DestinationClient, MockDestinationApi};
    use crate::throttle::RequestThrottle;
    use chrono::Utc;
    use migrate_core::{DestinationCredentials, MigrateError};
    use migrate_domain::destination::{
        Bucket, File, Project, ProjectView, TaskAttachment, TaskComment,
    };
    use mockall::Sequence;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn project() -> Project {
        Project {
            id: 7,
            title: "Roadmap".to_string(),
            description: String::new(),
            views: vec![ProjectView {
                id: 3,
                title: "Kanban".to_string(),
                project_id: 7,
                view_kind: "kanban".to_string(),
            }],
        }
    }

    fn attachment(name: &str, content: &[u8]) -> TaskAttachment {
        TaskAttachment::new(File::new(
            name.to_string(),
            "image/png".to_string(),
            content.to_vec(),
        ))
    }

    fn hierarchy_with_cover() -> ProjectHierarchy {
        let mut task = Task::new("Design".to_string(), 7);
        task.add_comment(TaskComment::new("<p>nice</p>\n".to_string(), Utc::now()));
        task.attach_cover(attachment("cover.png", b"png"));
        ProjectHierarchy {
            project: project(),
            buckets: vec![Bucket::new(7, 3, "Archived Tasks 1".to_string(), vec![task])],
        }
    }

    #[tokio::test]
    async fn test_identities_flow_down_in_creation_order() {
        let mut api = MockDestinationApi::new();
        let mut seq = Sequence::new();

        api.expect_create_bucket()
            .withf(|bucket| bucket.title == "Archived Tasks 1" && bucket.project_view_id == 3)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(11));
        api.expect_create_task()
            .withf(|task| task.bucket_id == 11 && task.cover_image_attachment_id == 0)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(21));
        api.expect_create_comment()
            .withf(|comment| comment.task_id == 21)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(41));
        api.expect_create_attachment()
            .withf(|task_id, attachment| *task_id == 21 && attachment.file.name == "cover.png")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(31));
        api.expect_update_task()
            .withf(|task| task.id == 21 && task.cover_image_attachment_id == 31)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut hierarchies = vec![hierarchy_with_cover()];
        let summary = Uploader::new(&api)
            .upload_all(&mut hierarchies)
            .await
            .unwrap();

        assert_eq!(
            summary,
            UploadSummary {
                projects: 1,
                buckets: 1,
                tasks: 1,
                comments: 1,
                attachments: 1,
            }
        );
        let task = &hierarchies[0].buckets[0].tasks[0];
        assert_eq!(hierarchies[0].buckets[0].id, 11);
        assert_eq!(task.id, 21);
        assert_eq!(task.comments[0].id, 41);
        assert_eq!(task.attachments[0].id, 31);
        assert_eq!(task.cover_image_attachment_id, 31);
    }

    #[tokio::test]
    async fn test_empty_attachments_are_skipped_and_no_cover_update() {
        let mut api = MockDestinationApi::new();
        api.expect_create_bucket().returning(|_| Ok(1));
        api.expect_create_task().returning(|_| Ok(2));
        api.expect_create_attachment().times(1).returning(|_, _| Ok(3));
        api.expect_update_task().never();

        let mut task = Task::new("Files".to_string(), 7);
        task.attach(attachment("empty.png", b""));
        task.attach(attachment("full.png", b"data"));
        let mut hierarchy = ProjectHierarchy {
            project: project(),
            buckets: vec![Bucket::new(7, 3, "Archived Tasks 1".to_string(), vec![task])],
        };

        let summary = Uploader::new(&api)
            .upload_project(&mut hierarchy)
            .await
            .unwrap();

        assert_eq!(summary.attachments, 1);
        assert_eq!(hierarchy.buckets[0].tasks[0].attachments[0].id, 0);
        assert_eq!(hierarchy.buckets[0].tasks[0].attachments[1].id, 3);
    }

    #[tokio::test]
    async fn test_failure_halts_remaining_uploads() {
        let mut api = MockDestinationApi::new();
        api.expect_create_bucket().times(1).returning(|_| Ok(1));
        api.expect_create_task().times(1).returning(|_| {
            Err(MigrateError::Api {
                status: 500,
                url: "https://tasks.example.com/api/v1/projects/7/tasks".to_string(),
                body: "boom".to_string(),
            })
        });
        api.expect_create_comment().never();
        api.expect_create_attachment().never();

        let tasks = vec![Task::new("a".to_string(), 7), Task::new("b".to_string(), 7)];
        let mut hierarchies = vec![
            ProjectHierarchy {
                project: project(),
                buckets: vec![Bucket::new(7, 3, "Archived Tasks 1".to_string(), tasks)],
            },
            hierarchy_with_cover(),
        ];

        let err = Uploader::new(&api)
            .upload_all(&mut hierarchies)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(hierarchies[1].buckets[0].id, 0);
    }

    #[tokio::test]
    async fn test_upload_against_http_destination() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/projects/7/views/3/buckets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 11 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/projects/7/tasks"))
            .and(body_partial_json(json!({ "bucket_id": 11 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tasks/21/comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 41 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tasks/21/attachments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": null,
                "success": [{ "id": 31 }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tasks/21"))
            .and(body_partial_json(json!({ "cover_image_attachment_id": 31 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = DestinationCredentials::new(format!("{}/api/v1", server.uri()), "secret");
        let client = DestinationClient::new(credentials, RequestThrottle::default()).unwrap();
        let mut hierarchy = hierarchy_with_cover();

        let summary = Uploader::new(&client)
            .upload_project(&mut hierarchy)
            .await
            .unwrap();

        assert_eq!(summary.tasks, 1);
        assert_eq!(hierarchy.buckets[0].tasks[0].cover_image_attachment_id, 31);
    }
}

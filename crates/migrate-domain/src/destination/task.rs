use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bucket::BucketId;
use super::project::ProjectId;

pub type TaskId = i64;
pub type CommentId = i64;
pub type AttachmentId = i64;

/// Position of an attachment within its task's attachment list.
///
/// Lets the converter name a cover image before the attachment has a
/// server identity; [`Task::resolve_cover`] swaps it for the real id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentHandle(usize);

impl AttachmentHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub title: String,
    pub hex_color: String,
}

impl Label {
    pub fn new(title: String, hex_color: String) -> Self {
        Self { title, hex_color }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub mime: String,
    pub size: u64,
    /// Held in memory until the attachment is uploaded.
    #[serde(skip)]
    pub content: Vec<u8>,
}

impl File {
    pub fn new(name: String, mime: String, content: Vec<u8>) -> Self {
        Self {
            name,
            mime,
            size: content.len() as u64,
            content,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskAttachment {
    #[serde(default)]
    pub id: AttachmentId,
    #[serde(default)]
    pub task_id: TaskId,
    pub file: File,
}

impl TaskAttachment {
    pub fn new(file: File) -> Self {
        Self {
            id: 0,
            task_id: 0,
            file,
        }
    }

    pub fn has_content(&self) -> bool {
        !self.file.content.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskComment {
    #[serde(default)]
    pub id: CommentId,
    pub comment: String,
    #[serde(default)]
    pub task_id: TaskId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl TaskComment {
    /// A comment keeps its original timestamp as both created and updated.
    pub fn new(comment: String, posted_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            comment,
            task_id: 0,
            created: posted_at,
            updated: posted_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub project_id: ProjectId,
    #[serde(default)]
    pub bucket_id: BucketId,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub attachments: Vec<TaskAttachment>,
    #[serde(default)]
    pub comments: Vec<TaskComment>,
    /// Zero until the cover attachment exists on the server.
    #[serde(default)]
    pub cover_image_attachment_id: AttachmentId,
    #[serde(skip)]
    cover: Option<AttachmentHandle>,
}

impl Task {
    pub fn new(title: String, project_id: ProjectId) -> Self {
        Self {
            title,
            project_id,
            ..Default::default()
        }
    }

    pub fn append_description(&mut self, rich_text: &str) {
        self.description.push_str(rich_text);
    }

    pub fn add_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    pub fn add_comment(&mut self, comment: TaskComment) {
        self.comments.push(comment);
    }

    pub fn attach(&mut self, attachment: TaskAttachment) -> AttachmentHandle {
        self.attachments.push(attachment);
        AttachmentHandle(self.attachments.len() - 1)
    }

    /// Attaches a file and designates it as this task's cover image,
    /// replacing any earlier designation.
    pub fn attach_cover(&mut self, attachment: TaskAttachment) -> AttachmentHandle {
        let handle = self.attach(attachment);
        self.cover = Some(handle);
        handle
    }

    pub fn cover(&self) -> Option<AttachmentHandle> {
        self.cover
    }

    pub fn cover_attachment(&self) -> Option<&TaskAttachment> {
        self.cover.and_then(|handle| self.attachments.get(handle.index()))
    }

    /// Copies the cover attachment's server id into
    /// `cover_image_attachment_id` once that attachment has been created.
    /// Returns the id when it was resolved.
    pub fn resolve_cover(&mut self) -> Option<AttachmentId> {
        let id = self.cover_attachment().map(|a| a.id).filter(|id| *id > 0)?;
        self.cover_image_attachment_id = id;
        Some(id)
    }

    /// Records the server identity and points comments and attachments at it.
    pub fn assign_id(&mut self, id: TaskId) {
        self.id = id;
        for comment in &mut self.comments {
            comment.task_id = id;
        }
        for attachment in &mut self.attachments {
            attachment.task_id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> TaskAttachment {
        TaskAttachment::new(File::new(
            name.to_string(),
            "image/png".to_string(),
            vec![1, 2, 3],
        ))
    }

    #[test]
    fn test_file_size_matches_content() {
        let f = File::new("a.txt".to_string(), "text/plain".to_string(), b"hello".to_vec());
        assert_eq!(f.size, 5);
    }

    #[test]
    fn test_cover_handle_points_into_own_attachments() {
        let mut task = Task::new("Task".to_string(), 7);
        task.attach(file("first.png"));
        let handle = task.attach_cover(file("cover.png"));

        assert_eq!(handle.index(), 1);
        assert_eq!(task.cover(), Some(handle));
        assert_eq!(task.cover_attachment().unwrap().file.name, "cover.png");
    }

    #[test]
    fn test_cover_resolves_only_after_attachment_is_created() {
        let mut task = Task::new("Task".to_string(), 7);
        let handle = task.attach_cover(file("cover.png"));

        assert_eq!(task.resolve_cover(), None);
        assert_eq!(task.cover_image_attachment_id, 0);

        task.attachments[handle.index()].id = 99;
        assert_eq!(task.resolve_cover(), Some(99));
        assert_eq!(task.cover_image_attachment_id, 99);
    }

    #[test]
    fn test_task_without_cover_never_resolves() {
        let mut task = Task::new("Task".to_string(), 7);
        task.attach(file("a.png"));
        task.attachments[0].id = 5;
        assert_eq!(task.resolve_cover(), None);
    }

    #[test]
    fn test_assign_id_propagates_to_children() {
        let mut task = Task::new("Task".to_string(), 7);
        task.add_comment(TaskComment::new("hi".to_string(), Utc::now()));
        task.attach(file("a.png"));

        task.assign_id(42);

        assert_eq!(task.id, 42);
        assert_eq!(task.comments[0].task_id, 42);
        assert_eq!(task.attachments[0].task_id, 42);
    }

    #[test]
    fn test_comment_keeps_timestamp_for_created_and_updated() {
        let at = DateTime::parse_from_rfc3339("2022-02-02T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let comment = TaskComment::new("text".to_string(), at);
        assert_eq!(comment.created, at);
        assert_eq!(comment.updated, at);
    }

    #[test]
    fn test_serialized_file_omits_content() {
        let json = serde_json::to_value(file("a.png")).unwrap();
        assert_eq!(json["file"]["size"], 3);
        assert!(json["file"].get("content").is_none());
    }
}

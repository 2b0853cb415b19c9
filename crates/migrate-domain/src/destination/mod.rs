//! Vikunja project hierarchy built by the converter and persisted by the
//! uploader.
//!
//! Server identities are plain `i64`s and stay `0` until the matching create
//! call succeeds. Cover images are wired through [`AttachmentHandle`], a
//! task-local index that never leaves the process.

pub mod bucket;
pub mod project;
pub mod task;

pub use bucket::{Bucket, BucketId};
pub use project::{Project, ProjectHierarchy, ProjectId, ProjectIndex, ProjectView, ViewId};
pub use task::{
    AttachmentHandle, AttachmentId, CommentId, File, Label, Task, TaskAttachment, TaskComment,
    TaskId,
};

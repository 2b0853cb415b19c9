pub mod attachment;
pub mod color;
pub mod convert;
pub mod destination;
pub mod rich_text;
pub mod selection;
pub mod source;

pub use attachment::{AttachmentSource, FetchedFile};
pub use color::ColorTable;
pub use convert::{BucketChunker, HierarchyConverter, MAX_BUCKET_TASKS};
pub use destination::{
    AttachmentHandle, Bucket, Project, ProjectHierarchy, ProjectIndex, ProjectView, Task,
    TaskAttachment, TaskComment,
};
pub use selection::{migratable_titles, BoardSelection};

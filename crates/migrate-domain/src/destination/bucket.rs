use serde::{Deserialize, Serialize};

use super::project::{ProjectId, ViewId};
use super::task::Task;

pub type BucketId = i64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(default)]
    pub id: BucketId,
    pub project_id: ProjectId,
    pub project_view_id: ViewId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Bucket {
    pub fn new(
        project_id: ProjectId,
        project_view_id: ViewId,
        title: String,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            id: 0,
            project_id,
            project_view_id,
            title,
            tasks,
        }
    }

    /// Records the server identity and points every task at it.
    pub fn assign_id(&mut self, id: BucketId) {
        self.id = id;
        for task in &mut self.tasks {
            task.bucket_id = id;
        }
    }
}

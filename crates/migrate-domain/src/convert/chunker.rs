use crate::destination::{Bucket, ProjectId, Task, ViewId};

/// Most tasks a generated bucket may hold.
pub const MAX_BUCKET_TASKS: usize = 200;

/// Splits a stream of tasks into buckets of bounded size.
///
/// Buckets are titled `Archived Tasks N` where N counts the buckets sealed
/// so far for this project view, starting after any buckets an earlier
/// chunker already produced for it.
#[derive(Debug)]
pub struct BucketChunker {
    project_id: ProjectId,
    view_id: ViewId,
    capacity: usize,
    numbered_after: usize,
    open: Vec<Task>,
    sealed: Vec<Bucket>,
}

impl BucketChunker {
    pub fn new(project_id: ProjectId, view_id: ViewId) -> Self {
        Self::with_capacity(project_id, view_id, MAX_BUCKET_TASKS)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(project_id: ProjectId, view_id: ViewId, capacity: usize) -> Self {
        Self {
            project_id,
            view_id,
            capacity: capacity.max(1),
            numbered_after: 0,
            open: Vec::new(),
            sealed: Vec::new(),
        }
    }

    /// Continues numbering after `existing` buckets already on the view.
    pub fn numbered_after(mut self, existing: usize) -> Self {
        self.numbered_after = existing;
        self
    }

    pub fn push(&mut self, task: Task) {
        self.open.push(task);
        if self.open.len() >= self.capacity {
            self.seal();
        }
    }

    /// Seals any partially filled bucket and returns all buckets in
    /// creation order.
    pub fn finish(mut self) -> Vec<Bucket> {
        if !self.open.is_empty() {
            self.seal();
        }
        self.sealed
    }

    fn seal(&mut self) {
        let number = self.numbered_after + self.sealed.len() + 1;
        let tasks = std::mem::take(&mut self.open);
        debug_assert!(tasks.len() <= self.capacity);
        self.sealed.push(Bucket::new(
            self.project_id,
            self.view_id,
            format!("Archived Tasks {}", number),
            tasks,
        ));
    }
}

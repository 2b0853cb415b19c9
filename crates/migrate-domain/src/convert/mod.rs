//! Board to project hierarchy conversion.

pub mod chunker;
pub mod hierarchy;

pub use chunker::{BucketChunker, MAX_BUCKET_TASKS};
pub use hierarchy::HierarchyConverter;

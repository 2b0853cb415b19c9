//! Reads the migration inputs and writes the audit of what was created.

pub mod serialization;
pub mod snapshot;
pub mod store;
pub mod traits;

pub use serialization::JsonSerializer;
pub use snapshot::{load_project_index, load_source_boards};
pub use store::{write_hierarchy, AtomicWriter, AuditEnvelope, AuditStore};
pub use traits::{AuditMetadata, Serializer};

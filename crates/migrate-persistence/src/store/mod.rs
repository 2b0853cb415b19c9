pub mod atomic_writer;
pub mod audit_store;

pub use atomic_writer::AtomicWriter;
pub use audit_store::{write_hierarchy, AuditEnvelope, AuditStore};

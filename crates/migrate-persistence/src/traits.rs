use chrono::{DateTime, Utc};
use migrate_core::MigrateResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version of the audit file layout.
pub const AUDIT_FORMAT_VERSION: u32 = 1;

/// Describes the run that produced an audit file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditMetadata {
    pub format_version: u32,
    /// Identifies the run, so audits from repeated runs can be told apart
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub tool_version: String,
}

impl AuditMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: AUDIT_FORMAT_VERSION,
            instance_id,
            saved_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Encodes values for storage on disk.
pub trait Serializer<T> {
    fn serialize(&self, data: &T) -> MigrateResult<Vec<u8>>;
    fn deserialize(&self, bytes: &[u8]) -> MigrateResult<T>;
}

use crate::serialization::JsonSerializer;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{AuditMetadata, Serializer, AUDIT_FORMAT_VERSION};
use migrate_core::MigrateResult;
use migrate_domain::destination::ProjectHierarchy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Audit file contents: the uploaded hierarchy with server identities.
/// Attachment bytes are never written.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditEnvelope {
    pub version: u32,
    pub metadata: AuditMetadata,
    pub projects: Vec<ProjectHierarchy>,
}

/// Writes the audit of a migration run to a single JSON file.
#[derive(Debug, Clone)]
pub struct AuditStore {
    path: PathBuf,
    instance_id: Uuid,
}

impl AuditStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub async fn save(&self, projects: &[ProjectHierarchy]) -> MigrateResult<AuditMetadata> {
        let envelope = AuditEnvelope {
            version: AUDIT_FORMAT_VERSION,
            metadata: AuditMetadata::new(self.instance_id),
            projects: projects.to_vec(),
        };
        let bytes = JsonSerializer.serialize(&envelope)?;

        AtomicWriter::write_atomic(&self.path, &bytes).await?;

        tracing::info!(
            "Saved audit of {} projects to {}",
            projects.len(),
            self.path.display()
        );
        Ok(envelope.metadata)
    }
}

/// Writes `projects` to `path` as a fresh audit file.
pub async fn write_hierarchy(
    path: impl AsRef<Path>,
    projects: &[ProjectHierarchy],
) -> MigrateResult<AuditMetadata> {
    AuditStore::new(path).save(projects).await
}

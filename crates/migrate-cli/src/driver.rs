//! Runs one migration: convert the selected boards, upload them, and
//! optionally record what was created.

use migrate_client::{DestinationApi, UploadSummary, Uploader};
use migrate_core::{MigrateError, MigrateResult};
use migrate_domain::source::Board;
use migrate_domain::{
    migratable_titles, AttachmentSource, BoardSelection, HierarchyConverter, ProjectHierarchy,
    ProjectIndex,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub title: String,
    pub project_id: i64,
    pub buckets: usize,
    pub tasks: usize,
}

#[derive(Debug, Serialize)]
pub struct MigrationReport {
    pub dry_run: bool,
    pub projects: Vec<ProjectReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<UploadSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<PathBuf>,
}

impl MigrationReport {
    fn new(hierarchies: &[ProjectHierarchy], uploaded: Option<UploadSummary>) -> Self {
        Self {
            dry_run: uploaded.is_none(),
            projects: hierarchies
                .iter()
                .map(|h| ProjectReport {
                    title: h.project.title.clone(),
                    project_id: h.project.id,
                    buckets: h.buckets.len(),
                    tasks: h.task_count(),
                })
                .collect(),
            uploaded,
            audit: None,
        }
    }
}

/// Without a destination the driver stops after conversion. A failed upload
/// still leaves the audit of whatever was created before the failure.
pub struct MigrationDriver<'a, S, A>
where
    S: AttachmentSource + ?Sized,
    A: DestinationApi + ?Sized,
{
    converter: HierarchyConverter<'a, S>,
    destination: Option<&'a A>,
}

impl<'a, S, A> MigrationDriver<'a, S, A>
where
    S: AttachmentSource + ?Sized,
    A: DestinationApi + ?Sized,
{
    pub fn new(converter: HierarchyConverter<'a, S>, destination: Option<&'a A>) -> Self {
        Self {
            converter,
            destination,
        }
    }

    pub async fn run(
        &self,
        boards: &[Board],
        projects: &ProjectIndex,
        selection: &BoardSelection,
        audit_path: Option<&Path>,
    ) -> MigrateResult<MigrationReport> {
        if selection.is_empty() {
            return Err(MigrateError::Validation("no boards selected".to_string()));
        }
        if let BoardSelection::Titles(titles) = selection {
            let available = migratable_titles(boards, projects);
            for title in titles.iter().filter(|t| !available.contains(*t)) {
                tracing::warn!(
                    "Selected board {:?} has no matching board and project, skipping",
                    title
                );
            }
        }

        let mut hierarchies = self
            .converter
            .convert_boards(boards, projects, selection)
            .await?;

        let uploaded = match self.destination {
            Some(api) => match Uploader::new(api).upload_all(&mut hierarchies).await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    if let Some(path) = audit_path {
                        migrate_persistence::write_hierarchy(path, &hierarchies).await?;
                        tracing::warn!(
                            "Upload failed, partial audit written to {}",
                            path.display()
                        );
                    }
                    return Err(err);
                }
            },
            None => {
                tracing::info!(
                    "Dry run: converted {} projects, nothing uploaded",
                    hierarchies.len()
                );
                None
            }
        };

        let mut report = MigrationReport::new(&hierarchies, uploaded);
        if let Some(path) = audit_path {
            migrate_persistence::write_hierarchy(path, &hierarchies).await?;
            report.audit = Some(path.to_path_buf());
        }
        Ok(report)
    }
}

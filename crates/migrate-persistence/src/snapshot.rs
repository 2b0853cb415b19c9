//! Loading the source board snapshot and the destination project list.

use crate::serialization::JsonSerializer;
use crate::store::AtomicWriter;
use crate::traits::Serializer;
use migrate_core::MigrateResult;
use migrate_domain::destination::{Project, ProjectIndex};
use migrate_domain::source::Board;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A snapshot file holds either one board or an array of them.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Reads source boards from `path`. Cards stored flat on a board are moved
/// into their lists.
pub async fn load_source_boards(path: impl AsRef<Path>) -> MigrateResult<Vec<Board>> {
    let path = path.as_ref();
    let bytes = AtomicWriter::read_all(path).await?;
    let decoded: OneOrMany<Board> = JsonSerializer.deserialize(&bytes)?;
    let mut boards: Vec<Board> = decoded.into();

    for board in &mut boards {
        let dropped = board.assemble_lists();
        if dropped > 0 {
            tracing::warn!(
                "Board {} has {} cards in unknown lists; they are skipped",
                board.name,
                dropped
            );
        }
    }

    tracing::info!("Loaded {} boards from {}", boards.len(), path.display());
    Ok(boards)
}

/// Reads destination projects from `path` and indexes them by title.
pub async fn load_project_index(path: impl AsRef<Path>) -> MigrateResult<ProjectIndex> {
    let path = path.as_ref();
    let bytes = AtomicWriter::read_all(path).await?;
    let decoded: OneOrMany<Project> = JsonSerializer.deserialize(&bytes)?;
    let projects: Vec<Project> = decoded.into();

    let index = ProjectIndex::from_projects(projects);
    if index.is_empty() {
        tracing::warn!("No destination projects in {}, nothing can be migrated", path.display());
    } else {
        tracing::info!("Loaded {} projects from {}", index.len(), path.display());
    }
    Ok(index)
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::bucket::Bucket;

pub type ProjectId = i64;
pub type ViewId = i64;

/// View kind Vikunja uses for kanban boards.
pub const KANBAN_VIEW: &str = "kanban";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectView {
    pub id: ViewId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub project_id: ProjectId,
    #[serde(default)]
    pub view_kind: String,
}

impl ProjectView {
    /// Older instances omit `view_kind`; their default kanban view is
    /// recognisable by its title.
    pub fn is_kanban(&self) -> bool {
        if self.view_kind.is_empty() {
            self.title == "Kanban"
        } else {
            self.view_kind.eq_ignore_ascii_case(KANBAN_VIEW)
        }
    }
}

/// A project that already exists on the destination instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<ProjectView>,
}

impl Project {
    pub fn kanban_views(&self) -> impl Iterator<Item = &ProjectView> {
        self.views.iter().filter(|view| view.is_kanban())
    }
}

/// A destination project together with the buckets generated for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectHierarchy {
    pub project: Project,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

impl ProjectHierarchy {
    pub fn task_count(&self) -> usize {
        self.buckets.iter().map(|b| b.tasks.len()).sum()
    }
}

/// Destination projects keyed by exact title.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    by_title: HashMap<String, Project>,
}

impl ProjectIndex {
    /// When several projects share a title the last one wins.
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let mut by_title = HashMap::new();
        for project in projects {
            if let Some(previous) = by_title.insert(project.title.clone(), project) {
                tracing::warn!(
                    "Multiple destination projects titled {:?}; project {} is ignored",
                    previous.title,
                    previous.id
                );
            }
        }
        Self { by_title }
    }

    pub fn get(&self, title: &str) -> Option<&Project> {
        self.by_title.get(title)
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

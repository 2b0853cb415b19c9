use migrate_core::{MigrateResult, SourceCredentials};
use std::collections::HashMap;

use super::chunker::BucketChunker;
use crate::attachment::{AttachmentSource, FetchedFile};
use crate::color::ColorTable;
use crate::destination::{
    File, Label, Project, ProjectHierarchy, ProjectId, ProjectIndex, Task, TaskAttachment,
    TaskComment,
};
use crate::rich_text::{render_checklist, render_link, to_rich_text};
use crate::selection::BoardSelection;
use crate::source::{Attachment, Board, Card, ScaledImage};

const FALLBACK_MIME: &str = "application/octet-stream";
const COVER_MIME: &str = "image/jpeg";

/// Builds Vikunja project hierarchies from Trello boards.
///
/// Any failure to fetch attachment content or convert rich text aborts the
/// whole conversion; a partially converted card is never returned.
pub struct HierarchyConverter<'a, S: AttachmentSource + ?Sized> {
    colors: &'a ColorTable,
    attachments: &'a S,
    source_headers: Vec<(String, String)>,
}

impl<'a, S: AttachmentSource + ?Sized> HierarchyConverter<'a, S> {
    pub fn new(colors: &'a ColorTable, attachments: &'a S) -> Self {
        Self {
            colors,
            attachments,
            source_headers: Vec::new(),
        }
    }

    /// Authorizes downloads of files uploaded to Trello cards.
    pub fn with_source_credentials(mut self, credentials: &SourceCredentials) -> Self {
        self.source_headers = credentials.authorization_headers();
        self
    }

    /// Converts every selected board that has a destination project of the
    /// same title, in snapshot order. Boards sharing a title land in one
    /// hierarchy with bucket numbering continued across them.
    pub async fn convert_boards(
        &self,
        boards: &[Board],
        projects: &ProjectIndex,
        selection: &BoardSelection,
    ) -> MigrateResult<Vec<ProjectHierarchy>> {
        tracing::info!("Converting {} boards to projects", boards.len());

        let mut hierarchy: Vec<ProjectHierarchy> = Vec::new();
        let mut by_project: HashMap<ProjectId, usize> = HashMap::new();
        for board in boards {
            if !selection.contains(&board.name) {
                tracing::debug!("Board {} not selected, skipping", board.name);
                continue;
            }
            let Some(project) = projects.get(&board.name) else {
                tracing::warn!("No destination project titled {:?}, skipping", board.name);
                continue;
            };
            match by_project.get(&project.id) {
                Some(&index) => {
                    let merged = &mut hierarchy[index];
                    tracing::info!(
                        "Board {} shares project {} with an earlier board, appending buckets",
                        board.id,
                        project.id
                    );
                    let converted = self
                        .convert_board_after(board, project, merged.buckets.len())
                        .await?;
                    merged.buckets.extend(converted.buckets);
                }
                None => {
                    by_project.insert(project.id, hierarchy.len());
                    hierarchy.push(self.convert_board(board, project).await?);
                }
            }
        }
        Ok(hierarchy)
    }

    /// Converts one board into buckets on the project's Kanban view.
    pub async fn convert_board(
        &self,
        board: &Board,
        project: &Project,
    ) -> MigrateResult<ProjectHierarchy> {
        self.convert_board_after(board, project, 0).await
    }

    async fn convert_board_after(
        &self,
        board: &Board,
        project: &Project,
        existing_buckets: usize,
    ) -> MigrateResult<ProjectHierarchy> {
        let mut hierarchy = ProjectHierarchy {
            project: Project {
                id: project.id,
                title: board.name.clone(),
                description: board.desc.clone(),
                views: Vec::new(),
            },
            buckets: Vec::new(),
        };

        let mut kanban_views = project.kanban_views();
        let Some(view) = kanban_views.next() else {
            tracing::warn!(
                "Project {} ({}) has no Kanban view, board {} yields no buckets",
                project.title,
                project.id,
                board.id
            );
            return Ok(hierarchy);
        };
        if kanban_views.next().is_some() {
            tracing::warn!(
                "Project {} has several Kanban views, using view {}",
                project.title,
                view.id
            );
        }

        let mut chunker = BucketChunker::new(project.id, view.id).numbered_after(existing_buckets);
        for list in &board.lists {
            tracing::debug!(
                "Converting {} cards to tasks from list {} of board {}",
                list.cards.len(),
                list.name,
                board.name
            );
            for card in &list.cards {
                chunker.push(self.convert_card(card, project.id).await?);
            }
        }
        hierarchy.buckets = chunker.finish();

        tracing::info!(
            "Converted board {} into {} buckets with {} tasks",
            board.name,
            hierarchy.buckets.len(),
            hierarchy.task_count()
        );
        Ok(hierarchy)
    }

    /// Converts a single card into a task, downloading its uploaded files.
    pub async fn convert_card(&self, card: &Card, project_id: ProjectId) -> MigrateResult<Task> {
        tracing::debug!("Converting card {} ({})", card.name, card.id);

        let mut task = Task::new(card.name.clone(), project_id);
        task.description = to_rich_text(&card.desc)?;

        for checklist in &card.checklists {
            let items = checklist
                .check_items
                .iter()
                .map(|item| (item.name.as_str(), item.is_complete()));
            task.append_description(&render_checklist(&checklist.name, items));
        }

        for label in &card.labels {
            let color = self.colors.resolve(label.color.as_deref());
            task.add_label(Label::new(label.name.clone(), color.to_string()));
        }

        for attachment in &card.attachments {
            if !attachment.is_upload {
                task.append_description(&render_link(&attachment.url, &attachment.name));
                continue;
            }

            let fetched = self
                .attachments
                .fetch(&attachment.url, &self.source_headers)
                .await?;
            let uploaded = uploaded_attachment(attachment, fetched);
            if card.is_cover_attachment(attachment) {
                task.attach_cover(uploaded);
            } else {
                task.attach(uploaded);
            }
            tracing::debug!("Downloaded attachment {} of card {}", attachment.id, card.id);
        }

        if task.cover().is_none() {
            if let Some(image) = card.manual_cover_image() {
                let fetched = self.attachments.fetch(&image.url, &[]).await?;
                task.attach_cover(cover_attachment(image, fetched));
                tracing::debug!("Downloaded manual cover image of card {}", card.id);
            }
        }

        for action in card.comments() {
            let text = format!("*{}*:\n\n{}", action.author(), action.data.text);
            task.add_comment(TaskComment::new(to_rich_text(&text)?, action.date));
        }

        Ok(task)
    }
}

fn uploaded_attachment(attachment: &Attachment, fetched: FetchedFile) -> TaskAttachment {
    let name = if attachment.name.is_empty() {
        attachment.id.clone()
    } else {
        attachment.name.clone()
    };
    let mime = attachment
        .mime_type
        .clone()
        .filter(|m| !m.is_empty())
        .or(fetched.content_type)
        .unwrap_or_else(|| FALLBACK_MIME.to_string());
    TaskAttachment::new(File::new(name, mime, fetched.content))
}

fn cover_attachment(image: &ScaledImage, fetched: FetchedFile) -> TaskAttachment {
    let mime = fetched
        .content_type
        .filter(|m| m.starts_with("image/"))
        .unwrap_or_else(|| COVER_MIME.to_string());
    TaskAttachment::new(File::new(
        format!("{}.jpg", image.id),
        mime,
        fetched.content,
    ))
}

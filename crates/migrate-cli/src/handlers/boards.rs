use crate::cli::InputArgs;
use crate::output;
use migrate_domain::migratable_titles;
use migrate_persistence::{load_project_index, load_source_boards};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BoardEntry {
    /// Position accepted by `migrate --select`
    number: usize,
    title: String,
    project_id: i64,
    cards: usize,
}

pub async fn handle(args: InputArgs) -> anyhow::Result<()> {
    let boards = load_source_boards(&args.source).await?;
    let projects = load_project_index(&args.projects).await?;

    let entries: Vec<BoardEntry> = migratable_titles(&boards, &projects)
        .into_iter()
        .enumerate()
        .filter_map(|(idx, title)| {
            let project = projects.get(&title)?;
            let cards = boards
                .iter()
                .filter(|board| board.name == title)
                .map(|board| board.card_count())
                .sum();
            Some(BoardEntry {
                number: idx + 1,
                project_id: project.id,
                title,
                cards,
            })
        })
        .collect();

    output::output_list(entries)
}

use crate::cli::{MigrateArgs, SelectionArgs};
use crate::context::CliContext;
use crate::driver::MigrationDriver;
use crate::output;
use migrate_client::{DestinationClient, HttpAttachmentFetcher, RequestThrottle};
use migrate_core::MigrateResult;
use migrate_domain::source::Board;
use migrate_domain::{migratable_titles, BoardSelection, ColorTable, HierarchyConverter, ProjectIndex};
use migrate_persistence::{load_project_index, load_source_boards};

pub async fn handle(ctx: &mut CliContext, args: MigrateArgs) -> anyhow::Result<()> {
    ctx.apply_flags(&args.credentials);
    if !args.dry_run {
        ctx.config.validate_for_upload()?;
    }

    let boards = load_source_boards(&args.input.source).await?;
    let projects = load_project_index(&args.input.projects).await?;
    let selection = resolve_selection(&args.selection, &boards, &projects)?;

    let colors = ColorTable::trello();
    let fetcher = HttpAttachmentFetcher::new()?;
    let mut converter = HierarchyConverter::new(&colors, &fetcher);
    match ctx.config.source_credentials() {
        Some(credentials) => converter = converter.with_source_credentials(&credentials),
        None => tracing::warn!(
            "No Trello credentials configured; files uploaded to cards may fail to download"
        ),
    }

    let audit = args.output.as_deref();
    let report = if args.dry_run {
        MigrationDriver::<_, DestinationClient>::new(converter, None)
            .run(&boards, &projects, &selection, audit)
            .await?
    } else {
        let client = DestinationClient::new(
            ctx.config.destination_credentials()?,
            RequestThrottle::from_config(&ctx.config.upload)?,
        )?;
        MigrationDriver::new(converter, Some(&client))
            .run(&boards, &projects, &selection, audit)
            .await?
    };

    output::output_success(&report)
}

fn resolve_selection(
    args: &SelectionArgs,
    boards: &[Board],
    projects: &ProjectIndex,
) -> MigrateResult<BoardSelection> {
    if args.all {
        return Ok(BoardSelection::all());
    }
    if let Some(numbers) = &args.select {
        let indices = BoardSelection::parse_indices(numbers)?;
        return BoardSelection::from_indices(&migratable_titles(boards, projects), &indices);
    }
    Ok(BoardSelection::titles(args.boards.iter().cloned()))
}

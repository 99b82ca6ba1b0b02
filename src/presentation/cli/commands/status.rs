use anyhow::Context;
use colored::Colorize;

use crate::application::services::status_board::StatusBoardService;
use crate::domain::entities::component_group::GroupId;
use crate::domain::ports::store::TreeStore;
use crate::domain::ports::translator::Translator;
use crate::presentation::cli::formatters::board_fmt::{
    colorize, format_board, format_group, print_section_header,
};

/// Prints the whole board, or the subtree of `group` when given.
///
/// # Errors
///
/// Returns an error if the group does not exist, the stored hierarchy is
/// malformed, or JSON serialization fails.
pub fn run_status(
    store: &dyn TreeStore,
    translator: &dyn Translator,
    group: Option<GroupId>,
    json: bool,
) -> anyhow::Result<()> {
    let service = StatusBoardService::new(store, translator);

    if let Some(id) = group {
        let view = service
            .group_view(id)
            .with_context(|| format!("Failed to compute status of group {id}"))?;
        if json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            println!("{}", format_group(&view));
        }
        return Ok(());
    }

    let board = service.board().context("Failed to compute board status")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let overall = board.overall_status();
    print_section_header("statusboard");
    println!(
        "{} {}\n",
        "Overall:".bold(),
        colorize(&translator.translate_status(overall), overall.color())
    );
    println!("{}", format_board(&board));
    Ok(())
}

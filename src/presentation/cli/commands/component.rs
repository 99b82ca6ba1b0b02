use anyhow::Context;
use colored::Colorize;

use crate::domain::entities::component::{Component, NewComponent};
use crate::domain::ports::store::TreeStore;
use crate::domain::ports::translator::Translator;
use crate::presentation::cli::app::ComponentAction;
use crate::presentation::cli::formatters::board_fmt::colorize;

fn describe(component: &Component, translator: &dyn Translator) -> String {
    let group = if component.is_grouped() {
        format!("group #{}", component.group_id)
    } else {
        "ungrouped".to_string()
    };
    let mut line = format!(
        "{} {} {} ({group})",
        format!("#{}", component.id).dimmed(),
        component.name.bold(),
        colorize(
            &translator.translate_status(component.status),
            component.status.color()
        )
    );
    if !component.enabled {
        line.push_str(&format!(" {}", "[disabled]".dimmed()));
    }
    line
}

/// Executes a `component` subcommand.
///
/// # Errors
///
/// Returns an error if the component or its group does not exist, or the
/// store fails.
pub fn run_component(
    store: &dyn TreeStore,
    translator: &dyn Translator,
    action: ComponentAction,
) -> anyhow::Result<()> {
    match action {
        ComponentAction::Add {
            name,
            group,
            status,
            order,
            disabled,
        } => {
            let mut draft = NewComponent::new(name, group, status).with_order(order);
            if disabled {
                draft = draft.disabled();
            }
            let component = store
                .create_component(draft)
                .context("Failed to create component")?;
            println!(
                "{} {}",
                "Created".green().bold(),
                describe(&component, translator)
            );
        }
        ComponentAction::SetStatus { id, status } => {
            let component = store
                .set_component_status(id, status)
                .with_context(|| format!("Failed to set status of component {id}"))?;
            println!(
                "{} {}",
                "Updated".green().bold(),
                describe(&component, translator)
            );
        }
    }
    Ok(())
}

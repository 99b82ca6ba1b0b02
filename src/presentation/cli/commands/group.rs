use anyhow::Context;
use colored::Colorize;

use crate::application::commands::{RemoveComponentGroupCommand, UpdateComponentGroupCommand};
use crate::application::services::group_mutation::GroupMutationService;
use crate::domain::entities::component_group::{ComponentGroup, NewComponentGroup};
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::store::TreeStore;
use crate::presentation::cli::app::GroupAction;

fn describe(group: &ComponentGroup) -> String {
    format!(
        "{} {} (parent #{}, order {}, {})",
        format!("#{}", group.id).dimmed(),
        group.name.bold(),
        group.parent_id,
        group.order,
        group.collapsed
    )
}

/// Executes a `group` subcommand.
///
/// # Errors
///
/// Returns an error if the group (or requested parent on creation) does not
/// exist, or the store fails.
pub fn run_group(
    store: &dyn TreeStore,
    notifier: &dyn Notifier,
    action: GroupAction,
) -> anyhow::Result<()> {
    match action {
        GroupAction::Add {
            name,
            parent,
            order,
            collapsed,
        } => {
            let draft = NewComponentGroup::new(name, parent)
                .with_order(order)
                .with_collapsed(collapsed);
            let group = store
                .create_group(draft)
                .context("Failed to create group")?;
            println!("{} {}", "Created".green().bold(), describe(&group));
        }
        GroupAction::Update {
            id,
            name,
            order,
            collapsed,
            parent,
        } => {
            let cmd = UpdateComponentGroupCommand {
                group_id: id,
                name,
                order,
                collapsed,
                parent_id: parent,
            };
            if cmd.is_empty() {
                anyhow::bail!("Nothing to update: pass --name, --order, --collapsed or --parent");
            }
            let service = GroupMutationService::new(store, notifier);
            let group = service
                .update_group(&cmd)
                .with_context(|| format!("Failed to update group {id}"))?;
            if parent.is_some_and(|p| p != group.parent_id) {
                println!(
                    "{}",
                    "Parent change ignored: it would create a cycle or names no group".yellow()
                );
            }
            println!("{} {}", "Updated".green().bold(), describe(&group));
        }
        GroupAction::Remove { id } => {
            let service = GroupMutationService::new(store, notifier);
            let group = service
                .remove_group(&RemoveComponentGroupCommand::new(id))
                .with_context(|| format!("Failed to remove group {id}"))?;
            println!("{} {}", "Removed".red().bold(), describe(&group));
        }
    }
    Ok(())
}

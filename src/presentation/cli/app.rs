use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::entities::component::ComponentId;
use crate::domain::entities::component_group::GroupId;
use crate::domain::value_objects::collapse_mode::CollapseMode;
use crate::domain::value_objects::component_status::ComponentStatus;

/// statusboard: component groups with rolled-up status
///
/// Organizes components into nested groups and derives each group's
/// status from everything beneath it.
#[derive(Parser, Debug)]
#[command(name = "statusboard")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `status`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board, or a single group
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Only show this group and its subtree
        #[arg(short, long)]
        group: Option<GroupId>,
    },

    /// Manage component groups
    #[command(alias = "g")]
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Manage components
    #[command(alias = "c")]
    Component {
        #[command(subcommand)]
        action: ComponentAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupAction {
    /// Create a group
    Add {
        #[arg(short, long)]
        name: String,

        /// Parent group id (0 for top level)
        #[arg(short, long, default_value_t = 0)]
        parent: GroupId,

        #[arg(short, long, default_value_t = 0)]
        order: i64,

        /// expanded, collapsed or auto
        #[arg(long, default_value = "expanded")]
        collapsed: CollapseMode,
    },

    /// Change some fields of a group
    #[command(alias = "u")]
    Update {
        id: GroupId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        order: Option<i64>,

        /// expanded, collapsed or auto
        #[arg(long)]
        collapsed: Option<CollapseMode>,

        /// New parent group id (0 for top level)
        #[arg(short, long)]
        parent: Option<GroupId>,
    },

    /// Delete a group; its components and subgroups move to its parent
    #[command(alias = "rm")]
    Remove { id: GroupId },
}

#[derive(Subcommand, Debug)]
pub enum ComponentAction {
    /// Create a component
    Add {
        #[arg(short, long)]
        name: String,

        /// Owning group id (0 for ungrouped)
        #[arg(short, long, default_value_t = 0)]
        group: GroupId,

        /// 1-4 or operational, performance, partial, major
        #[arg(short, long, default_value = "operational")]
        status: ComponentStatus,

        #[arg(short, long, default_value_t = 0)]
        order: i64,

        /// Exclude from status rollup
        #[arg(long)]
        disabled: bool,
    },

    /// Change the status of a component
    #[command(alias = "set")]
    SetStatus {
        id: ComponentId,

        /// 1-4 or operational, performance, partial, major
        status: ComponentStatus,
    },
}

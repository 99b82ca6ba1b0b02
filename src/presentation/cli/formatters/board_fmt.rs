use std::borrow::Cow;

use colored::{ColoredString, Colorize};

use crate::application::services::status_board::{ComponentView, GroupStatusView, StatusBoard};
use crate::domain::value_objects::status_color::StatusColor;

const INDENT: &str = "  ";

/// Strips ANSI/OSC escape sequences from a string to prevent terminal injection.
fn sanitize_terminal(input: &str) -> Cow<'_, str> {
    if input.contains('\x1b') {
        Cow::Owned(input.chars().filter(|c| *c != '\x1b').collect())
    } else {
        Cow::Borrowed(input)
    }
}

#[must_use]
pub fn colorize(text: &str, color: StatusColor) -> ColoredString {
    match color {
        StatusColor::Green => text.green(),
        StatusColor::Blue => text.blue(),
        StatusColor::Yellow => text.yellow().bold(),
        StatusColor::Red => text.red().bold(),
    }
}

fn component_line(component: &ComponentView, depth: usize) -> String {
    format!(
        "{}{} {} {}",
        INDENT.repeat(depth),
        colorize("●", component.status_color),
        sanitize_terminal(&component.name),
        colorize(&component.human_status, component.status_color)
    )
}

fn group_header(group: &GroupStatusView, depth: usize) -> String {
    let marker = if group.is_collapsed { "▸" } else { "▾" };
    let mut line = format!(
        "{}{} {} {} {}",
        INDENT.repeat(depth),
        marker,
        sanitize_terminal(&group.name).bold(),
        format!("#{}", group.id).dimmed(),
        colorize(&group.human_status, group.status_color)
    );
    if let (Some(lowest), Some(label)) = (group.lowest_status_color, &group.lowest_human_status) {
        if lowest != group.status_color {
            line.push_str(&format!(
                " {}",
                format!("(worst component: {})", colorize(label, lowest)).dimmed()
            ));
        }
    }
    line
}

fn push_group(group: &GroupStatusView, depth: usize, lines: &mut Vec<String>) {
    lines.push(group_header(group, depth));
    if group.is_collapsed {
        let hidden = group.components.len() + group.subgroups.len();
        if hidden > 0 {
            lines.push(format!(
                "{}{}",
                INDENT.repeat(depth + 1),
                format!("… {hidden} hidden").dimmed()
            ));
        }
        return;
    }
    for component in &group.components {
        lines.push(component_line(component, depth + 1));
    }
    for subgroup in &group.subgroups {
        push_group(subgroup, depth + 1, lines);
    }
}

/// Tree rendering of one group and its subtree.
#[must_use]
pub fn format_group(group: &GroupStatusView) -> String {
    let mut lines = Vec::new();
    push_group(group, 0, &mut lines);
    lines.join("\n")
}

/// Tree rendering of the whole board; ungrouped components come last.
#[must_use]
pub fn format_board(board: &StatusBoard) -> String {
    let mut lines = Vec::new();
    for group in &board.groups {
        push_group(group, 0, &mut lines);
    }
    if !board.ungrouped.is_empty() {
        lines.push("Ungrouped".bold().to_string());
        for component in &board.ungrouped {
            lines.push(component_line(component, 1));
        }
    }
    if lines.is_empty() {
        lines.push("No components yet".dimmed().to_string());
    }
    lines.join("\n")
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}

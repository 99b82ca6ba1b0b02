use std::borrow::Cow;

use colored::Colorize;

use crate::domain::entities::group_event::{GroupEvent, GroupEventKind};
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Prints one line per group event on stdout.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, event: &GroupEvent) -> Result<(), NotificationError> {
        println!("{}", format_event(event));
        Ok(())
    }
}

#[must_use]
fn format_event(event: &GroupEvent) -> String {
    let group = &event.group;
    let badge = match event.kind {
        GroupEventKind::Updated => "[updated]".cyan().bold(),
        GroupEventKind::Removed => "[removed]".red().bold(),
    };
    let parent = if group.is_root() {
        "root".to_string()
    } else {
        format!("#{}", group.parent_id)
    };
    format!(
        "{} {} {} {}",
        badge,
        format!("#{}", group.id).dimmed(),
        sanitize(&group.name).bold(),
        format!(
            "(parent {parent}, order {}, {})",
            group.order, group.collapsed
        )
        .dimmed()
    )
}

/// Strip ANSI escape sequences and C0/C1 control characters from a string,
/// preserving only printable content, newlines, and tabs.
fn sanitize(s: &str) -> Cow<'_, str> {
    if s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
    {
        Cow::Owned(
            s.chars()
                .filter(|&c| !matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

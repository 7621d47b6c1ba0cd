//! Plain-text rendering of the to-do screen.

use crate::projection::{TodoView, project};
use crate::types::{Filter, Status, TodoState};
use crate::zone::DueZone;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Display format for due dates, in the configured zone
pub const DUE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders the whole screen for `state` at `now`
///
/// Due dates are shown in `zone`.
#[must_use]
pub fn render(state: &TodoState, now: DateTime<Utc>, zone: &DueZone) -> String {
    let rows = project(state, now);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "To-Do List");
    let _ = writeln!(out, "> {}  [{}]", state.input, state.commit_label());
    let _ = writeln!(out, "{}", filter_bar(state.filter));

    if rows.is_empty() {
        let _ = writeln!(out, "   (nothing to show)");
    }
    for (index, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "{}", render_row(index + 1, row, zone));
    }

    let _ = write!(out, "[Clear Completed]");
    out
}

/// Filter buttons with the active one bracketed
fn filter_bar(active: Filter) -> String {
    Filter::ALL
        .iter()
        .map(|&filter| {
            if filter == active {
                format!("[{filter}]")
            } else {
                format!(" {filter} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn marker(status: Status) -> &'static str {
    match status {
        Status::Pending => "[ ]",
        Status::Completed => "[x]",
        Status::Overdue => "[!]",
    }
}

/// One numbered row: marker, text, status, due date and the row's buttons
fn render_row(number: usize, row: &TodoView, zone: &DueZone) -> String {
    let mut line = format!(
        "{number:>2}. {} {}  (Status: {}",
        marker(row.status),
        row.text,
        row.status
    );
    if let Some(due) = row.due_date {
        let _ = write!(line, ", Due: {}", zone.format(due, DUE_DISPLAY_FORMAT));
    }
    let _ = write!(line, ")  Edit | {} | Remove", row.toggle_label());
    line
}

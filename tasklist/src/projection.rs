//! View projection: the filtered, sorted list the screen shows.
//!
//! Projection is a pure read of [`TodoState`]; nothing here is written back.
//! Overdue-ness is derived from `(due_date, now)` at projection time, so the
//! view never shows a stale flag even when no sweep has run since the
//! deadline passed.

use crate::types::{Filter, Status, TodoId, TodoItem, TodoState};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the rendered list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoView {
    /// Item identifier, used to address actions at this row
    pub id: TodoId,
    /// Item text
    pub text: String,
    /// Status as it should be displayed right now
    pub status: Status,
    /// Status as stored in state
    pub stored_status: Status,
    /// Deadline, if any
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoView {
    /// Label of the per-row toggle button
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        if matches!(self.stored_status, Status::Completed) {
            "Undo"
        } else {
            "Complete"
        }
    }
}

/// Status to display for an item at `now`
///
/// `Completed` always wins; otherwise an item is overdue exactly when its
/// deadline has passed. A stored `Overdue` flag is not consulted, so clearing
/// or moving the deadline takes effect before the next sweep.
#[must_use]
pub fn display_status(item: &TodoItem, now: DateTime<Utc>) -> Status {
    match item.status {
        Status::Completed => Status::Completed,
        Status::Pending | Status::Overdue if item.is_past_due(now) => Status::Overdue,
        Status::Pending | Status::Overdue => Status::Pending,
    }
}

/// Items passing `filter`, in the order the screen shows them
///
/// Undated items stay where they are and no item moves past one; each run of
/// dated items between them is stably ordered by due date.
#[must_use]
pub fn visible_items(items: &[TodoItem], filter: Filter) -> Vec<&TodoItem> {
    let mut visible: Vec<&TodoItem> = items
        .iter()
        .filter(|item| filter.admits(item.status))
        .collect();

    for run in visible.split_mut(|item| item.due_date.is_none()) {
        run.sort_by_key(|item| item.due_date);
    }

    visible
}

/// Projects the state into display rows at `now`
#[must_use]
pub fn project(state: &TodoState, now: DateTime<Utc>) -> Vec<TodoView> {
    visible_items(&state.items, state.filter)
        .into_iter()
        .map(|item| TodoView {
            id: item.id,
            text: item.text.clone(),
            status: display_status(item, now),
            stored_status: item.status,
            due_date: item.due_date,
        })
        .collect()
}

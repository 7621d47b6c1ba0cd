//! Reducer logic for the to-do component.
//!
//! Every handler is total: unknown ids and empty input are silently ignored,
//! so the only observable outcome of an action is whether the state changed.

use crate::types::{Status, TodoAction, TodoId, TodoItem, TodoState};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tasklist_core::{
    SmallVec, delay,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    smallvec,
};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for overdue decisions
    pub clock: Arc<dyn Clock>,
    /// Source of fresh item ids
    pub ids: Arc<dyn IdGenerator>,
    /// When set, the overdue sweep re-runs on this interval after mount
    pub sweep_interval: Option<Duration>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` that sweeps only once, at mount
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            sweep_interval: None,
        }
    }

    /// Re-run the overdue sweep periodically; `None` or a zero interval disables it
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Option<Duration>) -> Self {
        self.sweep_interval = interval.filter(|d| !d.is_zero());
        self
    }
}

/// Reducer for the to-do component
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Commits the input field: saves the edit target or appends a new item
    fn add_or_save(state: &mut TodoState, env: &TodoEnvironment) {
        let text = state.input.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring empty input");
            return;
        }
        let text = text.to_string();

        match state.editing.take() {
            Some(id) => match state.get_mut(&id) {
                Some(item) => item.text = text,
                None => tracing::debug!(%id, "Edit target no longer exists"),
            },
            None => {
                let id = TodoId::from_uuid(env.ids.next_id());
                tracing::debug!(%id, "Adding item");
                state.items.push(TodoItem::new(id, text));
            },
        }

        state.input.clear();
    }

    fn begin_edit(state: &mut TodoState, id: TodoId) {
        let Some(text) = state.get(&id).map(|item| item.text.clone()) else {
            tracing::debug!(%id, "Ignoring edit of unknown item");
            return;
        };
        state.input = text;
        state.editing = Some(id);
    }

    /// Two-valued toggle: only `Completed` goes back to `Pending`
    fn toggle_complete(state: &mut TodoState, id: TodoId) {
        let Some(item) = state.get_mut(&id) else {
            tracing::debug!(%id, "Ignoring toggle of unknown item");
            return;
        };
        item.status = match item.status {
            Status::Pending => Status::Completed,
            Status::Completed | Status::Overdue => Status::Pending,
        };
    }

    fn remove(state: &mut TodoState, id: TodoId) {
        state.items.retain(|item| item.id != id);
    }

    fn clear_completed(state: &mut TodoState) {
        state.items.retain(|item| !item.is_completed());
    }

    fn set_due_date(state: &mut TodoState, id: TodoId, due: Option<DateTime<Utc>>) {
        match state.get_mut(&id) {
            Some(item) => item.due_date = due,
            None => tracing::debug!(%id, "Ignoring due date for unknown item"),
        }
    }

    /// Flags every past-due item, completed ones included
    fn recompute_overdue(state: &mut TodoState, now: DateTime<Utc>) {
        let mut flagged = 0_usize;
        for item in &mut state.items {
            if item.status != Status::Overdue && item.is_past_due(now) {
                item.status = Status::Overdue;
                flagged += 1;
            }
        }
        if flagged > 0 {
            tracing::info!(flagged, "Flagged overdue items");
        }
    }

    /// Schedules the next sweep when periodic sweeping is configured
    fn schedule_sweep(env: &TodoEnvironment) -> Effect<TodoAction> {
        env.sweep_interval.map_or(Effect::None, |interval| {
            delay! {
                duration: interval,
                action: TodoAction::SweepTick
            }
        })
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::SetInput { text } => state.input = text,
            TodoAction::AddOrSave => Self::add_or_save(state, env),
            TodoAction::BeginEdit { id } => Self::begin_edit(state, id),
            TodoAction::ToggleComplete { id } => Self::toggle_complete(state, id),
            TodoAction::Remove { id } => Self::remove(state, id),
            TodoAction::ClearCompleted => Self::clear_completed(state),
            TodoAction::SetDueDate { id, due } => Self::set_due_date(state, id, due),
            TodoAction::RecomputeOverdue => Self::recompute_overdue(state, env.clock.now()),
            TodoAction::SetFilter { filter } => state.filter = filter,
            TodoAction::Mount | TodoAction::SweepTick => {
                Self::recompute_overdue(state, env.clock.now());
                return smallvec![Self::schedule_sweep(env)];
            },
        }

        smallvec![Effect::None]
    }
}

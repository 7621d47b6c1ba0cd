//! Interactive session: turns shell commands into actions on a [`Store`].
//!
//! Row numbers in commands refer to the view as it is rendered right now, so
//! every row-addressed command projects the current state first and resolves
//! the row to an item id before sending anything.

use crate::command::Command;
use crate::projection::project;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::render::render;
use crate::types::{TodoAction, TodoId, TodoState};
use crate::zone::DueZone;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tasklist_core::environment::Clock;
use tasklist_runtime::{EffectHandle, Store, StoreError};
use thiserror::Error;

/// The store type hosting the to-do component
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Errors surfaced to the user while executing a command
#[derive(Error, Debug)]
pub enum SessionError {
    /// The store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The row number is past the end of the current view
    #[error("there is no row {0}")]
    NoSuchRow(usize),

    /// The wall-clock time is skipped or repeated by a daylight-saving change
    #[error("{0} does not name a single instant in the configured time zone")]
    InvalidLocalTime(NaiveDateTime),

    /// The view could not be serialized
    #[error("could not encode view: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State may have changed; redraw the screen
    Render,
    /// Print this text instead of redrawing
    Print(String),
    /// Leave the shell
    Quit,
}

/// A running to-do component bound to a time zone
pub struct Session {
    store: TodoStore,
    clock: Arc<dyn Clock>,
    zone: DueZone,
}

impl Session {
    /// Builds a session around a fresh, empty store
    #[must_use]
    pub fn new(env: TodoEnvironment, zone: DueZone) -> Self {
        let clock = Arc::clone(&env.clock);
        let store = Store::new(TodoState::new(), TodoReducer::new(), env);
        Self { store, clock, zone }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Runs the mount-time sweep (and starts the periodic one, if configured)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn mount(&self) -> Result<EffectHandle, StoreError> {
        tracing::debug!("Mounting to-do component");
        self.store.send(TodoAction::Mount).await
    }

    /// Renders the current screen
    pub async fn screen(&self) -> String {
        let now = self.clock.now();
        self.store
            .state(|state| render(state, now, &self.zone))
            .await
    }

    /// Executes one parsed command
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the command cannot be applied.
    pub async fn execute(&self, command: Command) -> Result<Outcome, SessionError> {
        tracing::debug!(?command, "Executing command");

        match command {
            Command::Add(text) | Command::Save(Some(text)) => {
                self.send(TodoAction::SetInput { text }).await?;
                self.send(TodoAction::AddOrSave).await?;
            },
            Command::Save(None) => self.send(TodoAction::AddOrSave).await?,
            Command::Edit(row) => {
                let id = self.resolve(row).await?;
                self.send(TodoAction::BeginEdit { id }).await?;
            },
            Command::Toggle(row) => {
                let id = self.resolve(row).await?;
                self.send(TodoAction::ToggleComplete { id }).await?;
            },
            Command::Remove(row) => {
                let id = self.resolve(row).await?;
                self.send(TodoAction::Remove { id }).await?;
            },
            Command::Due { row, at } => {
                let id = self.resolve(row).await?;
                let due = at.map(|local| self.to_utc(local)).transpose()?;
                self.send(TodoAction::SetDueDate { id, due }).await?;
            },
            Command::Filter(filter) => self.send(TodoAction::SetFilter { filter }).await?,
            Command::ClearCompleted => self.send(TodoAction::ClearCompleted).await?,
            Command::Sweep => self.send(TodoAction::RecomputeOverdue).await?,
            Command::Json => return Ok(Outcome::Print(self.view_json().await?)),
            Command::Help => return Ok(Outcome::Print(Command::HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Render)
    }

    /// The current view as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Json`] if serialization fails.
    pub async fn view_json(&self) -> Result<String, SessionError> {
        let now = self.clock.now();
        let rows = self.store.state(|state| project(state, now)).await;
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    /// Stops accepting actions and waits for running effects
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }

    async fn send(&self, action: TodoAction) -> Result<(), StoreError> {
        self.store.send(action).await.map(|_| ())
    }

    /// Maps a 1-based row of the current view to its item id
    async fn resolve(&self, row: usize) -> Result<TodoId, SessionError> {
        let now = self.clock.now();
        self.store
            .state(|state| {
                project(state, now)
                    .get(row.wrapping_sub(1))
                    .map(|view| view.id)
            })
            .await
            .ok_or(SessionError::NoSuchRow(row))
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, SessionError> {
        self.zone
            .to_utc(&local)
            .ok_or(SessionError::InvalidLocalTime(local))
    }
}
